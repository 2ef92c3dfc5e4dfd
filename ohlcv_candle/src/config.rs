//! Display configuration: parsing, validation, and loading.
//!
//! The only knob today is the number of decimal places used when rendering
//! a candle. Sources, in order of use:
//! - TOML string: [`load_display_config_str`]
//! - TOML file: [`load_display_config_path`]
//! - environment (`OHLCV_DISPLAY_PRECISION`): [`DisplayConfig::from_env`]
//!
//! ```toml
//! precision = 4
//! ```

use std::path::Path;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use shared_utils::parse_env_var;
use tracing::debug;

/// Environment variable read by [`DisplayConfig::from_env`].
pub const PRECISION_ENV_VAR: &str = "OHLCV_DISPLAY_PRECISION";

/// Largest scale a `rust_decimal::Decimal` can carry.
pub const MAX_PRECISION: u32 = 28;

/// How candles are rendered as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DisplayConfig {
    /// Decimal places for prices and volume.
    pub precision: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { precision: 2 }
    }
}

impl DisplayConfig {
    /// Default config, with precision overridden by `OHLCV_DISPLAY_PRECISION`
    /// when set.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut cfg = Self::default();
        if let Some(precision) = parse_env_var::<u32>(PRECISION_ENV_VAR)? {
            cfg.precision = precision;
        }
        cfg.validate()?;
        debug!(precision = cfg.precision, "display config from environment");
        Ok(cfg)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.precision > MAX_PRECISION {
            bail!(
                "precision {} exceeds maximum of {MAX_PRECISION}",
                self.precision
            );
        }
        Ok(())
    }
}

/// Parse and validate a display config from a TOML string.
pub fn load_display_config_str(s: &str) -> anyhow::Result<DisplayConfig> {
    let cfg: DisplayConfig = toml::from_str(s).context("parsing display config TOML")?;
    cfg.validate()?;
    debug!(precision = cfg.precision, "display config loaded");
    Ok(cfg)
}

/// Read, parse, and validate a display config file.
pub fn load_display_config_path(path: impl AsRef<Path>) -> anyhow::Result<DisplayConfig> {
    let path = path.as_ref();
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("reading display config {}", path.display()))?;
    load_display_config_str(&s).with_context(|| format!("loading {}", path.display()))
}
