//! Expiration payoff analysis.
//!
//! This module provides:
//! - P/L curve sampling across a price range (expiration and T+0)
//! - Breakeven detection by linear interpolation of zero crossings
//! - Max profit / max loss with unlimited detection

mod breakeven;
mod curve;
mod risk;

pub use breakeven::{DEFAULT_BREAKEVEN_EPSILON, find_breakevens, find_breakevens_with_epsilon};
pub use curve::{
    CurveConfig, DEFAULT_POINT_COUNT, DEFAULT_RANGE_FACTOR, PlDataPoint, generate_curve,
    generate_curve_priced, generate_value_curve, pnl_at_expiration, price_range,
};
pub use risk::{
    BoundsMode, DEFAULT_UNLIMITED_THRESHOLD, RiskConfig, RiskProfile, summarize,
    summarize_priced, terminal_slope,
};
