//! Configuration loading for the payoff engine.
//!
//! YAML configuration with environment variable interpolation and
//! post-parse validation. Every section is optional and falls back to
//! defaults.
//!
//! # Usage
//!
//! ```rust,ignore
//! use payoff_engine::config::{EngineConfig, load_config};
//!
//! let config = load_config("config.yaml")?;
//! println!("points: {}", config.payoff.point_count);
//! ```
//!
//! # Example
//!
//! ```yaml
//! pricing:
//!   risk_free_rate: ${PAYOFF_RISK_FREE_RATE:-0.05}
//!   dividend_yield: 0.0
//! payoff:
//!   point_count: 101
//!   range_factor: 0.5
//!   bounds_mode:
//!     mode: analytic
//! observability:
//!   logging:
//!     level: info
//!     format: json
//! ```

mod observability;
mod payoff;
mod pricing;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use observability::{LoggingConfig, ObservabilityConfig};
pub use payoff::PayoffConfig;
pub use pricing::PricingConfig;

use crate::payoff::{BoundsMode, CurveConfig, RiskConfig};

/// Environment variable naming the config file used by the binary.
pub const CONFIG_PATH_ENV: &str = "PAYOFF_ENGINE_CONFIG";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Pricing defaults.
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Payoff curve and risk summary settings.
    #[serde(default)]
    pub payoff: PayoffConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl EngineConfig {
    /// Curve sampling settings derived from this configuration.
    #[must_use]
    pub const fn curve_config(&self) -> CurveConfig {
        CurveConfig {
            point_count: self.payoff.point_count,
            range_factor: self.payoff.range_factor,
            contract_multiplier: self.pricing.contract_multiplier,
        }
    }

    /// Risk summary settings derived from this configuration.
    #[must_use]
    pub const fn risk_config(&self) -> RiskConfig {
        RiskConfig {
            bounds_mode: self.payoff.bounds_mode,
            breakeven_epsilon: self.payoff.breakeven_epsilon,
            contract_multiplier: self.pricing.contract_multiplier,
        }
    }
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: impl AsRef<Path>) -> Result<EngineConfig, ConfigError> {
    let path = path.as_ref();

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from the file named by `PAYOFF_ENGINE_CONFIG`.
///
/// Returns the defaults when the variable is unset or empty.
///
/// # Errors
///
/// Returns a `ConfigError` if the named file cannot be read, parsed, or validated.
pub fn load_config_from_env() -> Result<EngineConfig, ConfigError> {
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) if !path.is_empty() => load_config(path),
        _ => Ok(EngineConfig::default()),
    }
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<EngineConfig, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: EngineConfig = if interpolated.trim().is_empty() {
        EngineConfig::default()
    } else {
        serde_yaml_bw::from_str(&interpolated)?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is a compile-time constant
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map(|m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.map_or_else(String::new, str::to_string),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &EngineConfig) -> Result<(), ConfigError> {
    let pricing = &config.pricing;
    if !(pricing.risk_free_rate.is_finite() && (-1.0..=1.0).contains(&pricing.risk_free_rate)) {
        return Err(ConfigError::ValidationError(
            "risk_free_rate must be between -1.0 and 1.0".to_string(),
        ));
    }

    if !(pricing.dividend_yield.is_finite() && (-1.0..=1.0).contains(&pricing.dividend_yield)) {
        return Err(ConfigError::ValidationError(
            "dividend_yield must be between -1.0 and 1.0".to_string(),
        ));
    }

    if !(pricing.contract_multiplier.is_finite() && pricing.contract_multiplier > 0.0) {
        return Err(ConfigError::ValidationError(
            "contract_multiplier must be positive".to_string(),
        ));
    }

    let payoff = &config.payoff;
    if payoff.point_count < 2 {
        return Err(ConfigError::ValidationError(
            "point_count must be at least 2".to_string(),
        ));
    }

    if !(payoff.range_factor.is_finite() && payoff.range_factor > 0.0) {
        return Err(ConfigError::ValidationError(
            "range_factor must be positive".to_string(),
        ));
    }

    if !(payoff.breakeven_epsilon.is_finite() && payoff.breakeven_epsilon >= 0.0) {
        return Err(ConfigError::ValidationError(
            "breakeven_epsilon must be non-negative".to_string(),
        ));
    }

    if let BoundsMode::SampledThreshold { threshold } = payoff.bounds_mode
        && !(threshold.is_finite() && threshold > 0.0)
    {
        return Err(ConfigError::ValidationError(
            "bounds_mode.threshold must be positive".to_string(),
        ));
    }

    let valid_formats = ["json", "pretty"];
    if !valid_formats.contains(&config.observability.logging.format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "logging.format must be one of: {valid_formats:?}"
        )));
    }

    Ok(())
}
