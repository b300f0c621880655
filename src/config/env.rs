//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "E2E_RUNNER";

/// Overrides read from `E2E_RUNNER_*` variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Config file from E2E_RUNNER_CONFIG
    pub config_file: Option<String>,
    /// Interpreter from E2E_RUNNER_INTERPRETER
    pub interpreter: Option<String>,
    /// Timeout from E2E_RUNNER_TIMEOUT
    pub timeout: Option<u64>,
    /// Working directory from E2E_RUNNER_WORKDIR
    pub workdir: Option<String>,
    /// Stderr policy from E2E_RUNNER_STRICT_STDERR
    pub strict_stderr: Option<bool>,
    /// Verbose from E2E_RUNNER_VERBOSE
    pub verbose: Option<bool>,
    /// Log filter from E2E_RUNNER_LOG
    pub log: Option<String>,
    /// Set when NO_COLOR is present
    pub no_color: bool,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(&format!("{ENV_PREFIX}_{name}"));

        Self {
            config_file: get("CONFIG"),
            interpreter: get("INTERPRETER"),
            timeout: get("TIMEOUT").and_then(|v| v.parse().ok()),
            workdir: get("WORKDIR"),
            strict_stderr: get("STRICT_STDERR").map(|v| parse_bool(&v)),
            verbose: get("VERBOSE").map(|v| parse_bool(&v)),
            log: get("LOG"),
            no_color: lookup("NO_COLOR").is_some_and(|v| !v.is_empty()),
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "1" | "true" | "yes" | "on" | "enabled"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_empty_environment() {
        let config = EnvConfig::from_lookup(lookup(&[]));
        assert!(config.config_file.is_none());
        assert!(config.timeout.is_none());
        assert!(!config.no_color);
    }

    #[test]
    fn test_prefixed_variables() {
        let config = EnvConfig::from_lookup(lookup(&[
            ("E2E_RUNNER_CONFIG", "ci.yaml"),
            ("E2E_RUNNER_INTERPRETER", "deno"),
            ("E2E_RUNNER_TIMEOUT", "120"),
            ("E2E_RUNNER_STRICT_STDERR", "no"),
            ("E2E_RUNNER_VERBOSE", "on"),
            ("NO_COLOR", "1"),
        ]));

        assert_eq!(config.config_file.as_deref(), Some("ci.yaml"));
        assert_eq!(config.interpreter.as_deref(), Some("deno"));
        assert_eq!(config.timeout, Some(120));
        assert_eq!(config.strict_stderr, Some(false));
        assert_eq!(config.verbose, Some(true));
        assert!(config.no_color);
    }

    #[test]
    fn test_invalid_timeout_ignored() {
        let config = EnvConfig::from_lookup(lookup(&[("E2E_RUNNER_TIMEOUT", "soon")]));
        assert!(config.timeout.is_none());
    }
}
