//! Logging Infrastructure
//!
//! Console logging for hosts embedding the client. `RUST_LOG` wins over
//! the level passed in.

use tracing_subscriber::EnvFilter;

/// Initialize the logger at `info`
pub fn init_logger() -> anyhow::Result<()> {
    init_logger_with_level(None)
}

/// Initialize the logger with an explicit default level
pub fn init_logger_with_level(log_level: Option<&str>) -> anyhow::Result<()> {
    let level = log_level.unwrap_or("info");
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("warn,amplify_client={level},shared={level}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_reports_error() {
        // Either this test or another installed the global subscriber first
        let _ = init_logger_with_level(Some("debug"));
        assert!(init_logger().is_err());
    }
}
