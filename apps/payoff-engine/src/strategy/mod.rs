//! Leg model and strategy aggregation.
//!
//! This module provides:
//! - Leg types (call, put, stock; long or short)
//! - Net entry cost and position Greeks across legs
//! - Templates for common multi-leg strategies

mod aggregate;
mod builder;
mod leg;
mod types;

pub use aggregate::{
    DEFAULT_CONTRACT_MULTIPLIER, PricedLeg, leg_entry_price, leg_greeks, net_debit,
    net_entry_cost, net_entry_cost_of, position_greeks, price_legs,
};
pub use builder::{Strategy, StrategyBuilder, StrategyType};
pub use leg::OptionLeg;
pub use types::{LegDirection, LegType};
