//! Run result models
//!
//! Defines per-case results, the error taxonomy and the overall run outcome.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single case failed. Every kind is fatal to the run.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("failed to launch {}: {source}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}", exit_message(.code, .stderr))]
    ExitStatus { code: Option<i32>, stderr: String },

    #[error("{}", flatten(.stderr))]
    UnexpectedStderr { stderr: String },

    #[error("timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("failed to read process output: {0}")]
    Io(#[from] std::io::Error),
}

fn exit_message(code: &Option<i32>, stderr: &str) -> String {
    let status = match code {
        Some(code) => format!("exited with code {code}"),
        None => "terminated by signal".to_string(),
    };

    let stderr = flatten(stderr);
    if stderr.is_empty() {
        status
    } else {
        format!("{status}: {stderr}")
    }
}

/// Collapse multi-line output onto a single line
pub fn flatten(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Captured output of one child process
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when killed by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn new(exit_code: Option<i32>, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Result of executing a single test case
#[derive(Clone, Debug)]
pub struct RunResult {
    pub test_name: String,
    pub succeeded: bool,
    pub captured_output: String,
    pub error_detail: Option<String>,
    pub duration_ms: u64,
}

impl RunResult {
    pub fn pass(test_name: impl Into<String>, output: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            test_name: test_name.into(),
            succeeded: true,
            captured_output: output.into(),
            error_detail: None,
            duration_ms,
        }
    }

    pub fn fail(
        test_name: impl Into<String>,
        output: impl Into<String>,
        error: &RunError,
        duration_ms: u64,
    ) -> Self {
        Self {
            test_name: test_name.into(),
            succeeded: false,
            captured_output: output.into(),
            error_detail: Some(error.to_string()),
            duration_ms,
        }
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = if self.succeeded { "✓" } else { "✗" };
        write!(f, "{} {} [{}ms]", symbol, self.test_name, self.duration_ms)?;
        if let Some(detail) = &self.error_detail {
            write!(f, " - {detail}")?;
        }
        Ok(())
    }
}

/// Position of the runner in the sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running(usize),
    DoneSuccess,
    DoneFailure,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::DoneSuccess | RunState::DoneFailure)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => write!(f, "idle"),
            RunState::Running(i) => write!(f, "running #{i}"),
            RunState::DoneSuccess => write!(f, "done (success)"),
            RunState::DoneFailure => write!(f, "done (failure)"),
        }
    }
}

/// Outcome of a whole run: first failure or all passed
#[derive(Clone, Debug)]
pub enum RunOutcome {
    Passed {
        executed: Vec<String>,
    },
    Failed {
        executed: Vec<String>,
        failure: RunResult,
    },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Passed { .. })
    }

    /// Names of the cases that were launched, in order
    pub fn executed(&self) -> &[String] {
        match self {
            RunOutcome::Passed { executed } | RunOutcome::Failed { executed, .. } => executed,
        }
    }

    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}
