//! Option pricing primitives.
//!
//! This module provides:
//! - Standard normal PDF/CDF
//! - Black-Scholes pricing with a continuous dividend yield
//! - Greeks (delta, gamma, theta, vega, rho)
//!
//! # Example
//!
//! ```
//! use payoff_engine::pricing::{OptionType, greeks, price};
//!
//! let call = price(100.0, 100.0, 30.0 / 365.0, 0.30, 0.05, 0.0, OptionType::Call)?;
//! let g = greeks(100.0, 100.0, 30.0 / 365.0, 0.30, 0.05, 0.0, OptionType::Call)?;
//! assert!(call > 3.6 && call < 3.7);
//! assert!(g.delta > 0.5);
//! # Ok::<(), payoff_engine::PricingError>(())
//! ```

mod black_scholes;
mod greeks;
pub mod normal;
mod types;

pub use black_scholes::{BsTerms, intrinsic_value, price};
pub use greeks::{Greeks, greeks};
pub use types::OptionType;
