//! Tracing subscriber setup

use crate::settings::LoggingConfig;
use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. `RUST_LOG` wins over the configured
/// level. A no-op when a subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let configured = EnvFilter::try_new(&config.level)
        .with_context(|| format!("Invalid log level directive: {:?}", config.level))?;

    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or(configured);
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    match installed {
        Ok(()) => Ok(()),
        // Lost a race with another initializer
        Err(_) if tracing::dispatcher::has_been_set() => Ok(()),
        Err(e) => Err(anyhow!("Failed to install tracing subscriber: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let config = LoggingConfig::default();
        init_tracing(&config).unwrap();
        init_tracing(&config).unwrap();
    }

    #[test]
    fn test_invalid_level_rejected() {
        let config = LoggingConfig {
            level: "amm=notalevel".to_string(),
            json: false,
        };
        assert!(init_tracing(&config).is_err());
    }
}
