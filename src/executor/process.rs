//! Child process execution
//!
//! Launches one test script as an isolated child process and captures its
//! exit status and output streams.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

use crate::models::{ProcessOutput, RunError, TestCase};

/// Something that can run a test case to completion.
///
/// The runner only depends on this trait, so tests can substitute scripted
/// outcomes for real processes.
#[allow(async_fn_in_trait)]
pub trait CaseExecutor {
    async fn execute(&self, case: &TestCase) -> Result<ProcessOutput, RunError>;
}

/// Executes test cases as child processes
#[derive(Clone, Debug)]
pub struct ProcessExecutor {
    /// Program used to run each script; `None` executes the script directly
    interpreter: Option<String>,

    /// Working directory for every child
    working_dir: Option<PathBuf>,

    /// Per-case timeout; `None` waits indefinitely
    timeout_secs: Option<u64>,
}

impl ProcessExecutor {
    pub fn new() -> Self {
        Self {
            interpreter: None,
            working_dir: None,
            timeout_secs: None,
        }
    }

    /// Set the interpreter program (e.g. `node`)
    pub fn interpreter(mut self, program: Option<impl Into<String>>) -> Self {
        self.interpreter = program.map(Into::into);
        self
    }

    /// Set the working directory
    pub fn working_dir(mut self, dir: Option<impl Into<PathBuf>>) -> Self {
        self.working_dir = dir.map(Into::into);
        self
    }

    /// Set the per-case timeout
    pub fn timeout(mut self, secs: Option<u64>) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn build_command(&self, case: &TestCase) -> Command {
        let mut command = match &self.interpreter {
            Some(program) => {
                let mut command = Command::new(program);
                command.arg(&case.path);
                command
            }
            None => Command::new(&case.path),
        };

        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        command
    }
}

impl Default for ProcessExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CaseExecutor for ProcessExecutor {
    async fn execute(&self, case: &TestCase) -> Result<ProcessOutput, RunError> {
        debug!(
            "Launching {} via {}",
            case.path.display(),
            self.interpreter.as_deref().unwrap_or("<direct>")
        );

        let child = self
            .build_command(case)
            .spawn()
            .map_err(|source| RunError::Spawn {
                path: case.path.clone(),
                source,
            })?;

        // Dropping the future on timeout drops the child, which kills it.
        let output = match self.timeout_secs {
            Some(secs) => tokio::time::timeout(Duration::from_secs(secs), child.wait_with_output())
                .await
                .map_err(|_| RunError::Timeout { secs })??,
            None => child.wait_with_output().await?,
        };

        Ok(ProcessOutput::new(
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        ))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    fn sh() -> ProcessExecutor {
        ProcessExecutor::new().interpreter(Some("sh"))
    }

    #[tokio::test]
    async fn test_captures_stdout_and_exit_code() {
        let dir = tempdir().unwrap();
        let script = write_script(dir.path(), "ok.sh", "echo 'page loaded'\n");

        let output = sh()
            .execute(&TestCase::new("Home Page", script))
            .await
            .unwrap();

        assert!(output.success());
        assert_eq!(output.stdout, "page loaded\n");
        assert!(output.stderr.is_empty());
    }

    #[tokio::test]
    async fn test_captures_nonzero_exit_and_stderr() {
        let dir = tempdir().unwrap();
        let script = write_script(dir.path(), "fail.sh", "echo 'boom' >&2\nexit 3\n");

        let output = sh()
            .execute(&TestCase::new("Checkout", script))
            .await
            .unwrap();

        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stderr, "boom\n");
    }

    #[tokio::test]
    async fn test_spawn_failure() {
        let executor = ProcessExecutor::new().interpreter(Some("definitely-not-a-real-program-e2e"));

        let err = executor
            .execute(&TestCase::new("Login", "tests/login.js"))
            .await
            .unwrap_err();

        assert!(matches!(err, RunError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_runs_in_working_dir() {
        let dir = tempdir().unwrap();
        write_script(dir.path(), "pwd.sh", "pwd\n");

        let output = sh()
            .working_dir(Some(dir.path()))
            .execute(&TestCase::new("Cwd", "pwd.sh"))
            .await
            .unwrap();

        let printed = PathBuf::from(output.stdout.trim());
        assert_eq!(
            printed.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }

    #[tokio::test]
    async fn test_timeout_kills_child() {
        let dir = tempdir().unwrap();
        let script = write_script(dir.path(), "hang.sh", "sleep 30\n");

        let err = sh()
            .timeout(Some(1))
            .execute(&TestCase::new("Hang", script))
            .await
            .unwrap_err();

        assert!(matches!(err, RunError::Timeout { secs: 1 }));
    }
}
