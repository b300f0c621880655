//! e2e-runner - Sequential End-to-End Test Orchestrator
//!
//! Runs the business directory's browser automation scripts one at a time,
//! in a fixed order, and stops at the first failure.
//!
//! ## Usage
//!
//! ```bash
//! # Run the built-in suite with `node`
//! e2e-runner
//!
//! # Show the execution order
//! e2e-runner --list
//!
//! # Use a custom suite and a per-test timeout
//! e2e-runner --config ci.yaml --timeout 120
//! ```
//!
//! Exit code 0 means every test passed; 1 means a test failed (or the
//! configuration could not be loaded).

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::info;

mod cli;
mod config;
mod executor;
mod models;
mod output;
mod utils;

use cli::Args;
use config::{AppConfig, EnvConfig};
use executor::{ProcessExecutor, SequentialRunner};
use models::TestCase;
use output::Reporter;
use utils::{init_logger, LogLevel};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let env = EnvConfig::load();

    let verbose = args.verbose || env.verbose.unwrap_or(false);
    let (level, directive) = match env.log.as_deref().map(|log| (log, LogLevel::from_str(log))) {
        Some((_, Some(level))) => (level, None),
        Some((directive, None)) => (LogLevel::for_verbosity(verbose), Some(directive)),
        None => (LogLevel::for_verbosity(verbose), None),
    };
    init_logger(level, directive);

    let config = AppConfig::resolve(&args, &env)?;
    let cases = config.cases();

    if args.list {
        list_tests(&cases);
        return Ok(ExitCode::SUCCESS);
    }

    let executor = ProcessExecutor::new()
        .interpreter(config.interpreter.clone())
        .working_dir(config.working_dir.clone())
        .timeout(config.timeout_secs);

    let mut runner = SequentialRunner::new(executor, Reporter::console(config.colorize()))
        .strict_stderr(config.strict_stderr);

    let outcome = runner.run(&cases).await?;
    debug_assert!(runner.state().is_terminal());
    info!(
        "Run finished after {} of {} tests: {}",
        outcome.executed().len(),
        cases.len(),
        runner.state()
    );

    Ok(ExitCode::from(outcome.exit_code() as u8))
}

fn list_tests(cases: &[TestCase]) {
    println!("\nEnd-to-end tests ({} total, in execution order)\n", cases.len());
    for (index, case) in cases.iter().enumerate() {
        println!("  {:2}. {:20} {}", index + 1, case.name, case.path.display());
    }
    println!();
}
