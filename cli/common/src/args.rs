//! Arguments shared by every binary.

use clap::ValueEnum;

/// Log level argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Trace level (most verbose)
    Trace,
    /// Per-object listing output
    Debug,
    /// Account and container progress (default)
    #[default]
    Info,
    /// Recorded scan errors only
    Warn,
    /// Error level (least verbose)
    Error,
}

impl LogLevel {
    /// Pick the level implied by the `--quiet` and `--debug` switches.
    ///
    /// An explicit level other than the default wins; `debug` beats `quiet`.
    pub fn effective(self, quiet: bool, debug: bool) -> LogLevel {
        match self {
            LogLevel::Info if debug => LogLevel::Debug,
            LogLevel::Info if quiet => LogLevel::Error,
            other => other,
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switches_adjust_default_level() {
        assert_eq!(LogLevel::Info.effective(false, false), LogLevel::Info);
        assert_eq!(LogLevel::Info.effective(true, false), LogLevel::Error);
        assert_eq!(LogLevel::Info.effective(true, true), LogLevel::Debug);
    }

    #[test]
    fn test_explicit_level_wins() {
        assert_eq!(LogLevel::Error.effective(false, true), LogLevel::Error);
        assert_eq!(LogLevel::Trace.effective(true, false), LogLevel::Trace);
    }
}
