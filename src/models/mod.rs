//! Data models for end-to-end test runs
//!
//! Test case definitions, per-case results and the run outcome.

mod run_result;
mod test_case;

pub use run_result::{flatten, ProcessOutput, RunError, RunOutcome, RunResult, RunState};
pub use test_case::TestCase;
