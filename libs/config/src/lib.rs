//! # AMM Engine Configuration
//!
//! Loads engine settings (fee schedule, logging) from an optional TOML file
//! with `AMM_`-prefixed environment overrides, and installs the tracing
//! subscriber.
//!
//! ## Usage
//!
//! ```no_run
//! use amm_config::{init_tracing, EngineConfig};
//! use std::path::Path;
//!
//! let config = EngineConfig::load(Some(Path::new("config/amm.toml")))?;
//! init_tracing(&config.logging)?;
//! let engine = config.engine()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod logging;
pub mod settings;

pub use logging::init_tracing;
pub use settings::{EngineConfig, FeeSettings, LoggingConfig, ENV_PREFIX};
