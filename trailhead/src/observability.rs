//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::config::{Config, LogFormat};
use crate::error::{Error, Result};

/// Install the global tracing subscriber described by `config.logging`
///
/// An unparseable filter directive falls back to `info`. Fails if a global
/// subscriber is already installed.
pub fn init_tracing(config: &Config) -> Result<()> {
    let filter = build_filter(&config.logging.level);

    let installed = match config.logging.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .try_init(),
    };
    installed.map_err(|e| Error::Logging(e.to_string()))?;

    tracing::info!(
        base_url = %config.client.base_url,
        "Tracing initialized"
    );

    Ok(())
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_falls_back_on_garbage() {
        let filter = build_filter("trailhead=notalevel");
        assert_eq!(filter.to_string(), "info");
    }

    #[test]
    fn test_build_filter_keeps_valid_directive() {
        let filter = build_filter("trailhead=debug");
        assert_eq!(filter.to_string(), "trailhead=debug");
    }

    #[test]
    fn test_second_init_reports_error() {
        let config = Config::default();
        // Whichever call wins the race, the other must fail instead of panicking
        let first = init_tracing(&config);
        let second = init_tracing(&config);
        assert!(first.is_err() || second.is_err());
    }
}
