//! Test execution engine
//!
//! Launches test scripts as child processes and sequences them fail-fast.

mod process;
mod runner;

pub use process::{CaseExecutor, ProcessExecutor};
pub use runner::{evaluate, SequentialRunner};
