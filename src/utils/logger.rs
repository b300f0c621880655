//! Logging utilities
//!
//! Diagnostics go to stderr so stdout carries only the run report.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Log level configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    /// `warn` by default, `debug` when verbose
    pub fn for_verbosity(verbose: bool) -> Self {
        if verbose {
            LogLevel::Debug
        } else {
            LogLevel::Warn
        }
    }
}

/// Build the filter: an explicit directive wins over the level
pub fn build_filter(level: LogLevel, directive: Option<&str>) -> EnvFilter {
    match directive {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::new(format!(
            "e2e_runner={}",
            level.to_tracing_level().as_str().to_lowercase()
        )),
    }
}

/// Initialize the logger with specified level
pub fn init_logger(level: LogLevel, directive: Option<&str>) {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(level, directive))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_str() {
        assert_eq!(LogLevel::from_str("info"), Some(LogLevel::Info));
        assert_eq!(LogLevel::from_str("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_str("unknown"), None);
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(LogLevel::for_verbosity(false), LogLevel::Warn);
        assert_eq!(LogLevel::for_verbosity(true), LogLevel::Debug);
    }

    #[test]
    fn test_build_filter() {
        let filter = build_filter(LogLevel::Debug, None);
        assert_eq!(filter.to_string(), "e2e_runner=debug");

        let filter = build_filter(LogLevel::Warn, Some("trace"));
        assert_eq!(filter.to_string(), "trace");
    }
}
