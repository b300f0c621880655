//! Configuration module
//!
//! Layers defaults, an optional config file, environment variables and
//! command-line flags, in increasing order of precedence.

mod env;

pub use env::EnvConfig;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::cli::Args;
use crate::models::TestCase;

/// Configuration file locations (in order of precedence)
const CONFIG_LOCATIONS: &[&str] = &[
    "./e2e-runner.yaml",
    "./e2e-runner.yml",
    "./.e2e-runner.yaml",
    "~/.config/e2e-runner/config.yaml",
];

/// Application configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Program used to run each script; `null` executes scripts directly
    pub interpreter: Option<String>,

    /// Working directory for test processes
    pub working_dir: Option<PathBuf>,

    /// Per-case timeout in seconds; unset waits indefinitely
    pub timeout_secs: Option<u64>,

    /// Fail cases that exit 0 but write to stderr
    pub strict_stderr: bool,

    /// Force colour on or off; unset detects a terminal
    pub color: Option<bool>,

    /// Replaces the built-in suite when present
    pub suite: Option<Vec<TestCase>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            interpreter: Some("node".to_string()),
            working_dir: None,
            timeout_secs: None,
            strict_stderr: true,
            color: None,
            suite: None,
        }
    }
}

impl AppConfig {
    /// Find configuration file in standard locations
    pub fn find() -> Option<PathBuf> {
        CONFIG_LOCATIONS
            .iter()
            .map(|location| expand_path(location))
            .find(|path| path.exists())
    }

    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_yaml_file(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Resolve the full configuration for this invocation
    pub fn resolve(args: &Args, env: &EnvConfig) -> Result<Self> {
        let explicit = args
            .config
            .clone()
            .or_else(|| env.config_file.as_ref().map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::load(&path)?,
            None => match Self::find() {
                Some(path) => {
                    tracing::debug!("Using config file {}", path.display());
                    Self::load(&path)?
                }
                None => Self::default(),
            },
        };

        config.apply_env(env);
        config.apply_args(args);
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides
    pub fn apply_env(&mut self, env: &EnvConfig) {
        if let Some(interpreter) = &env.interpreter {
            self.interpreter = non_empty(interpreter);
        }
        if let Some(timeout) = env.timeout {
            self.timeout_secs = Some(timeout);
        }
        if let Some(dir) = &env.workdir {
            self.working_dir = Some(PathBuf::from(dir));
        }
        if let Some(strict) = env.strict_stderr {
            self.strict_stderr = strict;
        }
        if env.no_color {
            self.color = Some(false);
        }
    }

    /// Apply command-line overrides
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(interpreter) = &args.interpreter {
            self.interpreter = non_empty(interpreter);
        }
        if let Some(timeout) = args.timeout {
            self.timeout_secs = Some(timeout);
        }
        if let Some(dir) = &args.workdir {
            self.working_dir = Some(dir.clone());
        }
        if args.allow_stderr {
            self.strict_stderr = false;
        }
        if args.no_color {
            self.color = Some(false);
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == Some(0) {
            anyhow::bail!("timeout_secs must be greater than zero");
        }

        if let Some(suite) = &self.suite {
            let mut seen = HashSet::new();
            for case in suite {
                if case.name.trim().is_empty() {
                    anyhow::bail!("Test case with path '{}' has no name", case.path.display());
                }
                if case.path.as_os_str().is_empty() {
                    anyhow::bail!("Test case '{}' has no path", case.name);
                }
                if !seen.insert(case.name.to_lowercase()) {
                    anyhow::bail!("Duplicate test case name '{}'", case.name);
                }
            }
        }

        Ok(())
    }

    /// The ordered cases to run
    pub fn cases(&self) -> Vec<TestCase> {
        self.suite.clone().unwrap_or_else(TestCase::default_suite)
    }

    /// Whether console output should carry ANSI colour
    pub fn colorize(&self) -> bool {
        self.color.unwrap_or_else(|| std::io::stdout().is_terminal())
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Expand ~ to home directory
fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Check if file is YAML based on extension
fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}
