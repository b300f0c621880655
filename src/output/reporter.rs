//! Console reporter for test runs
//!
//! Passing output and banners go to stdout, the failure line to stderr.

use chrono::Local;
use std::io::{self, Stderr, Stdout, Write};

use crate::models::{flatten, RunResult};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Writes run progress to an output and an error sink
pub struct Reporter<O: Write, E: Write> {
    out: O,
    err: E,
    colorize: bool,
}

impl Reporter<Stdout, Stderr> {
    /// Reporter bound to the process console
    pub fn console(colorize: bool) -> Self {
        Self::new(io::stdout(), io::stderr(), colorize)
    }
}

impl<O: Write, E: Write> Reporter<O, E> {
    pub fn new(out: O, err: E, colorize: bool) -> Self {
        Self { out, err, colorize }
    }

    #[cfg(test)]
    pub fn out(&self) -> &O {
        &self.out
    }

    #[cfg(test)]
    pub fn err(&self) -> &E {
        &self.err
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.colorize {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Progress banner printed before the first case
    pub fn start(&mut self, total: usize) -> io::Result<()> {
        let banner = self.paint(
            BOLD,
            &format!(
                "Running {} end-to-end test{} ({})",
                total,
                if total == 1 { "" } else { "s" },
                Local::now().format("%Y-%m-%d %H:%M:%S")
            ),
        );
        writeln!(self.out, "{banner}")?;
        self.out.flush()
    }

    /// Captured stdout of a passing case, verbatim
    pub fn case_passed(&mut self, result: &RunResult) -> io::Result<()> {
        let output = &result.captured_output;
        if output.is_empty() {
            return Ok(());
        }

        self.out.write_all(output.as_bytes())?;
        if !output.ends_with('\n') {
            writeln!(self.out)?;
        }
        self.out.flush()
    }

    /// The single failure line for the case that stopped the run
    pub fn case_failed(&mut self, result: &RunResult) -> io::Result<()> {
        let detail = result
            .error_detail
            .clone()
            .unwrap_or_else(|| flatten(&result.captured_output));
        let marker = self.paint(RED, "✗");

        writeln!(self.err, "{} {}: {}", marker, result.test_name, detail)?;
        self.err.flush()
    }

    /// Closing banner after every case passed
    pub fn finished(&mut self) -> io::Result<()> {
        let banner = self.paint(GREEN, "✓ All end-to-end tests passed");
        writeln!(self.out, "{banner}")?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RunError;

    fn buffered() -> Reporter<Vec<u8>, Vec<u8>> {
        Reporter::new(Vec::new(), Vec::new(), false)
    }

    fn text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).to_string()
    }

    #[test]
    fn test_start_banner() {
        let mut reporter = buffered();
        reporter.start(31).unwrap();
        assert!(text(reporter.out()).starts_with("Running 31 end-to-end tests ("));

        let mut reporter = buffered();
        reporter.start(1).unwrap();
        assert!(text(reporter.out()).starts_with("Running 1 end-to-end test ("));
    }

    #[test]
    fn test_passed_output_verbatim() {
        let mut reporter = buffered();
        reporter
            .case_passed(&RunResult::pass("Home Page", "title ok\nlinks ok", 10))
            .unwrap();
        reporter
            .case_passed(&RunResult::pass("Search", "", 10))
            .unwrap();

        assert_eq!(text(reporter.out()), "title ok\nlinks ok\n");
        assert!(reporter.err().is_empty());
    }

    #[test]
    fn test_failure_line() {
        let mut reporter = buffered();
        let err = RunError::ExitStatus {
            code: Some(2),
            stderr: "element not found\n".to_string(),
        };
        reporter
            .case_failed(&RunResult::fail("Checkout", "", &err, 10))
            .unwrap();

        assert_eq!(
            text(reporter.err()),
            "✗ Checkout: exited with code 2: element not found\n"
        );
        assert!(reporter.out().is_empty());
    }

    #[test]
    fn test_finished_banner_colored() {
        let mut reporter = Reporter::new(Vec::new(), Vec::new(), true);
        reporter.finished().unwrap();
        assert_eq!(
            text(reporter.out()),
            "\x1b[32m✓ All end-to-end tests passed\x1b[0m\n"
        );
    }
}
