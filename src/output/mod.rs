//! Output module
//!
//! Human-readable console reporting for test runs.

mod reporter;

pub use reporter::Reporter;
