//! Logging initialization.

use anyhow::{Result, anyhow};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use crate::LogLevel;

/// Initialize logging at the given level.
///
/// `RUST_LOG` directives, when set, refine the level per target. AWS SDK
/// internals are held at `warn` unless `RUST_LOG` says otherwise. Logs go to
/// stderr so stdout stays free for the summary.
pub fn init_logging(level: LogLevel) -> Result<()> {
    let level: Level = level.into();

    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.is_empty() => EnvFilter::try_new(directives)?,
        _ => EnvFilter::new(format!(
            "{},aws_config=warn,aws_smithy_runtime=warn,hyper=warn",
            level.as_str().to_ascii_lowercase()
        )),
    };

    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}
