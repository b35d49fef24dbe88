// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Payoff Engine - Options Pricing and Strategy Risk Core
//!
//! Prices option legs on a single underlying and derives what a trader
//! needs to judge a multi-leg strategy before entering it.
//!
//! # Modules
//!
//! - **pricing**: Black-Scholes with a continuous dividend yield, Greeks,
//!   normal distribution helpers
//! - **strategy**: Leg model, net entry cost, position Greeks and templates
//!   for common strategies (spreads, straddles, condors, butterflies)
//! - **payoff**: Expiration and T+0 P/L curves, breakevens, max profit/loss
//! - **analysis**: The full pipeline in one call
//! - **config** / **telemetry**: YAML configuration and logging setup
//!
//! All calculations are pure functions over plain values. European
//! exercise only; one flat volatility and rate per calculation.
//!
//! # Example
//!
//! ```
//! use payoff_engine::{EngineConfig, MarketParameters, analyze};
//! use payoff_engine::strategy::StrategyBuilder;
//! use rust_decimal::Decimal;
//!
//! let market = MarketParameters::new(100.0, 30.0 / 365.0, 0.30, 0.05, 0.0);
//! let strategy = StrategyBuilder::new("2026-01-16").straddle(
//!     payoff_engine::strategy::LegDirection::Long,
//!     Decimal::from(100),
//! )?;
//!
//! let analysis = analyze(&strategy.legs, &market, &EngineConfig::default())?;
//! assert_eq!(analysis.risk.breakevens.len(), 2);
//! assert!(analysis.risk.has_unlimited_profit());
//! # Ok::<(), payoff_engine::PricingError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Full strategy analysis pipeline.
pub mod analysis;

/// YAML configuration loading and validation.
pub mod config;

/// Error types and codes.
pub mod error;

/// Market parameters.
pub mod market;

/// Payoff curves, breakevens and risk summary.
pub mod payoff;

/// Black-Scholes pricing and Greeks.
pub mod pricing;

/// Legs, aggregation and strategy templates.
pub mod strategy;

/// Logging setup.
pub mod telemetry;

pub use analysis::{AnalysisRequest, MarketInput, StrategyAnalysis, analyze};
pub use config::{ConfigError, EngineConfig};
pub use error::{ErrorCode, PricingError, PricingResult};
pub use market::MarketParameters;
pub use payoff::{PlDataPoint, RiskProfile};
pub use pricing::{Greeks, OptionType};
pub use strategy::{LegDirection, LegType, OptionLeg};
