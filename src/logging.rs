//! Stderr logging for the binary.
//!
//! `RUST_LOG` wins over the level chosen on the command line. The returned
//! handle must stay alive for as long as logging is wanted.

use anyhow::{Context, Result};
use flexi_logger::{Logger, LoggerHandle};

pub fn init_logging(level: &str) -> Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(level)
        .with_context(|| format!("Invalid log level `{level}`"))?
        .log_to_stderr()
        .start()
        .context("Failed to start logger")?;

    log::info!("logging initialized at `{level}`");
    Ok(handle)
}
