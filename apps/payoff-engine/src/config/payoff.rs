//! Payoff curve and risk summary settings.

use serde::{Deserialize, Serialize};

use crate::payoff::{BoundsMode, DEFAULT_BREAKEVEN_EPSILON, DEFAULT_POINT_COUNT, DEFAULT_RANGE_FACTOR};

/// Payoff analysis configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoffConfig {
    /// Number of sampled underlying prices.
    #[serde(default = "default_point_count")]
    pub point_count: usize,
    /// Half-width of the sampled range as a fraction of spot.
    #[serde(default = "default_range_factor")]
    pub range_factor: f64,
    /// Minimum distance between two reported breakevens.
    #[serde(default = "default_breakeven_epsilon")]
    pub breakeven_epsilon: f64,
    /// Unlimited profit/loss detection.
    #[serde(default)]
    pub bounds_mode: BoundsMode,
    /// Also produce the mark-to-model curve at the current time to expiry.
    #[serde(default = "default_true")]
    pub include_value_curve: bool,
}

impl Default for PayoffConfig {
    fn default() -> Self {
        Self {
            point_count: DEFAULT_POINT_COUNT,
            range_factor: DEFAULT_RANGE_FACTOR,
            breakeven_epsilon: DEFAULT_BREAKEVEN_EPSILON,
            bounds_mode: BoundsMode::Analytic,
            include_value_curve: true,
        }
    }
}

const fn default_point_count() -> usize {
    DEFAULT_POINT_COUNT
}

const fn default_range_factor() -> f64 {
    DEFAULT_RANGE_FACTOR
}

const fn default_breakeven_epsilon() -> f64 {
    DEFAULT_BREAKEVEN_EPSILON
}

pub(crate) const fn default_true() -> bool {
    true
}
