//! Engine Configuration Module
//!
//! Layers an optional TOML file under environment overrides
//! (`AMM_FEES__NUMERATOR=25`, `AMM_LOGGING__LEVEL=debug`). Every field has
//! a default, so an empty configuration yields the standard 0.3% engine.

use amm::fees::{DEFAULT_FEE_DENOMINATOR, DEFAULT_FEE_NUMERATOR, MAX_FEE_BPS};
use amm::{FeeSchedule, PricingEngine};
use anyhow::{Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "AMM";

/// Main engine configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Swap fee schedule
    pub fees: FeeSettings,

    /// Tracing output
    pub logging: LoggingConfig,
}

/// Swap fee as `numerator / denominator`, capped at `max_fee_bps`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FeeSettings {
    pub numerator: u64,
    pub denominator: u64,
    pub max_fee_bps: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG` when set
    pub level: String,
    pub json: bool,
}

impl Default for FeeSettings {
    fn default() -> Self {
        Self {
            numerator: DEFAULT_FEE_NUMERATOR,
            denominator: DEFAULT_FEE_DENOMINATOR,
            max_fee_bps: MAX_FEE_BPS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl EngineConfig {
    /// Load from `path` (if given) with `AMM_` environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    /// Load with a custom environment prefix
    pub fn load_with_prefix(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            info!("Loading engine config: {:?}", path);
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder
            .build()
            .context("Failed to build engine configuration")?
            .try_deserialize()
            .context("Failed to deserialize engine configuration")?;

        // Reject bad fees at load time rather than at first use
        config.fee_schedule()?;
        Ok(config)
    }

    /// Validated fee schedule
    pub fn fee_schedule(&self) -> Result<FeeSchedule> {
        let fees = &self.fees;
        FeeSchedule::with_max_bps(fees.numerator, fees.denominator, fees.max_fee_bps)
            .context("Invalid fee settings")
    }

    /// Pricing engine for this configuration
    pub fn engine(&self) -> Result<PricingEngine> {
        Ok(PricingEngine::new(self.fee_schedule()?))
    }
}
