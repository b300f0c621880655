//! CLI argument parsing
//!
//! Every flag is optional; running with no arguments executes the configured
//! suite.

use clap::Parser;
use std::path::PathBuf;

/// Run the end-to-end test scripts in order, stopping at the first failure
#[derive(Parser, Debug, Default)]
#[command(name = "e2e-runner")]
#[command(version)]
#[command(about = "Run end-to-end test scripts sequentially, failing fast")]
#[command(long_about = None)]
pub struct Args {
    /// Config file (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Program used to run each script (empty to execute scripts directly)
    #[arg(long)]
    pub interpreter: Option<String>,

    /// Per-test timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Working directory for test processes
    #[arg(long)]
    pub workdir: Option<PathBuf>,

    /// Do not fail tests that exit 0 but write to stderr
    #[arg(long)]
    pub allow_stderr: bool,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,

    /// List the configured tests in execution order and exit
    #[arg(short, long)]
    pub list: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let args = Args::parse_from(["e2e-runner"]);
        assert!(args.config.is_none());
        assert!(args.timeout.is_none());
        assert!(!args.allow_stderr);
        assert!(!args.list);
    }

    #[test]
    fn test_all_flags() {
        let args = Args::parse_from([
            "e2e-runner",
            "-c",
            "ci.yaml",
            "--interpreter",
            "deno",
            "--timeout",
            "60",
            "--workdir",
            "/srv/app",
            "--allow-stderr",
            "--no-color",
            "-l",
            "-v",
        ]);

        assert_eq!(args.config, Some(PathBuf::from("ci.yaml")));
        assert_eq!(args.interpreter.as_deref(), Some("deno"));
        assert_eq!(args.timeout, Some(60));
        assert_eq!(args.workdir, Some(PathBuf::from("/srv/app")));
        assert!(args.allow_stderr && args.no_color && args.list && args.verbose);
    }

    #[test]
    fn test_verify_command() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
