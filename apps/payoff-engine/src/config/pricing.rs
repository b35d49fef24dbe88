//! Pricing defaults applied when a request leaves them out.

use serde::{Deserialize, Serialize};

use crate::strategy::DEFAULT_CONTRACT_MULTIPLIER;

/// Pricing model configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Risk-free rate (annualized, continuous) used when a request omits it.
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,
    /// Continuous dividend yield used when a request omits it.
    #[serde(default)]
    pub dividend_yield: f64,
    /// Shares per option contract.
    #[serde(default = "default_contract_multiplier")]
    pub contract_multiplier: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: default_risk_free_rate(),
            dividend_yield: 0.0,
            contract_multiplier: default_contract_multiplier(),
        }
    }
}

pub(crate) const fn default_risk_free_rate() -> f64 {
    0.05
}

const fn default_contract_multiplier() -> f64 {
    DEFAULT_CONTRACT_MULTIPLIER
}
