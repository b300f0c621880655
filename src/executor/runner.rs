//! Sequential test runner
//!
//! Runs test cases one at a time in configured order and stops at the first
//! failure.

use anyhow::Result;
use std::io::Write;
use tracing::{debug, info, warn};

use super::process::CaseExecutor;
use crate::models::{ProcessOutput, RunError, RunOutcome, RunResult, RunState, TestCase};
use crate::output::Reporter;
use crate::utils::Timer;

/// Fail-fast runner over an ordered list of test cases
pub struct SequentialRunner<X: CaseExecutor, O: Write, E: Write> {
    executor: X,
    reporter: Reporter<O, E>,
    strict_stderr: bool,
    state: RunState,
}

impl<X: CaseExecutor, O: Write, E: Write> SequentialRunner<X, O, E> {
    pub fn new(executor: X, reporter: Reporter<O, E>) -> Self {
        Self {
            executor,
            reporter,
            strict_stderr: true,
            state: RunState::Idle,
        }
    }

    /// Treat any stderr output from a zero-exit case as failure (default)
    pub fn strict_stderr(mut self, strict: bool) -> Self {
        self.strict_stderr = strict;
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    #[cfg(test)]
    pub fn reporter(&self) -> &Reporter<O, E> {
        &self.reporter
    }

    /// Run every case in order, stopping at the first failure.
    ///
    /// Errors are only returned when the console cannot be written or the
    /// runner has already finished; test failures are reported through
    /// [`RunOutcome::Failed`].
    pub async fn run(&mut self, cases: &[TestCase]) -> Result<RunOutcome> {
        anyhow::ensure!(
            self.state == RunState::Idle,
            "runner cannot be restarted (state: {})",
            self.state
        );

        info!("Starting run of {} test cases", cases.len());
        let timer = Timer::start("run");
        self.reporter.start(cases.len())?;

        let mut executed = Vec::with_capacity(cases.len());

        for (index, case) in cases.iter().enumerate() {
            self.state = RunState::Running(index);
            info!("Running {}", case);
            executed.push(case.name.clone());

            let case_timer = Timer::start(&case.name);
            let launched = self.executor.execute(case).await;
            let duration_ms = case_timer.stop().as_millis() as u64;

            let result = evaluate(case, launched, self.strict_stderr, duration_ms);
            debug!("  {}", result);

            if !result.succeeded {
                self.state = RunState::DoneFailure;
                info!(
                    "Stopping after {} of {} cases",
                    executed.len(),
                    cases.len()
                );
                self.reporter.case_failed(&result)?;
                return Ok(RunOutcome::Failed {
                    executed,
                    failure: result,
                });
            }

            self.reporter.case_passed(&result)?;
        }

        self.state = RunState::DoneSuccess;
        self.reporter.finished()?;
        info!("All {} cases passed in {}ms", cases.len(), timer.elapsed_ms());

        Ok(RunOutcome::Passed { executed })
    }
}

/// Classify one launched case as pass or fail
pub fn evaluate(
    case: &TestCase,
    launched: Result<ProcessOutput, RunError>,
    strict_stderr: bool,
    duration_ms: u64,
) -> RunResult {
    match classify(launched, strict_stderr) {
        Ok(output) => {
            if !output.stderr.is_empty() {
                warn!("{} wrote to stderr: {}", case.name, output.stderr.trim_end());
            }
            RunResult::pass(&case.name, output.stdout, duration_ms)
        }
        Err((stdout, error)) => RunResult::fail(&case.name, stdout, &error, duration_ms),
    }
}

fn classify(
    launched: Result<ProcessOutput, RunError>,
    strict_stderr: bool,
) -> Result<ProcessOutput, (String, RunError)> {
    let output = launched.map_err(|e| (String::new(), e))?;

    if !output.success() {
        return Err((
            output.stdout,
            RunError::ExitStatus {
                code: output.exit_code,
                stderr: output.stderr,
            },
        ));
    }

    if strict_stderr && !output.stderr.is_empty() {
        return Err((
            output.stdout,
            RunError::UnexpectedStderr {
                stderr: output.stderr,
            },
        ));
    }

    Ok(output)
}
