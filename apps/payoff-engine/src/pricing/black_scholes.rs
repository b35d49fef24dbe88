//! Black-Scholes pricing for European options with a continuous dividend yield.
//!
//! ```text
//! d1 = [ln(S/K) + (r - q + sigma^2/2) T] / (sigma sqrt(T))
//! d2 = d1 - sigma sqrt(T)
//! C  = S e^(-qT) N(d1) - K e^(-rT) N(d2)
//! P  = K e^(-rT) N(-d2) - S e^(-qT) N(-d1)
//! ```
//!
//! At `T <= 0` (or `sigma <= 0`) the option is worth its intrinsic value.

// Black-Scholes uses standard mathematical notation (s, k, t, r, q, sigma)
// Financial formulas use standard notation where mul_add() obscures meaning
#![allow(clippy::many_single_char_names)]
#![allow(clippy::suboptimal_flops)]

use super::normal::norm_cdf;
use super::types::OptionType;
use crate::error::{PricingError, PricingResult, require_finite, require_positive};

/// Intermediate terms of the closed form, shared by the pricer and the Greeks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BsTerms {
    /// d1.
    pub d1: f64,
    /// d2 = d1 - sigma sqrt(T).
    pub d2: f64,
    /// sqrt(T).
    pub sqrt_t: f64,
    /// e^(-rT).
    pub discount_rate: f64,
    /// e^(-qT).
    pub discount_dividend: f64,
}

impl BsTerms {
    /// Compute the terms. Caller guarantees `s, k, t, sigma > 0`.
    #[must_use]
    pub fn new(s: f64, k: f64, t: f64, sigma: f64, r: f64, q: f64) -> Self {
        let sqrt_t = t.sqrt();
        let vol_sqrt_t = sigma * sqrt_t;
        let d1 = ((s / k).ln() + (r - q + 0.5 * sigma * sigma) * t) / vol_sqrt_t;
        Self {
            d1,
            d2: d1 - vol_sqrt_t,
            sqrt_t,
            discount_rate: (-r * t).exp(),
            discount_dividend: (-q * t).exp(),
        }
    }
}

/// Terminal payoff of a single option.
#[must_use]
pub fn intrinsic_value(s: f64, k: f64, kind: OptionType) -> f64 {
    match kind {
        OptionType::Call => (s - k).max(0.0),
        OptionType::Put => (k - s).max(0.0),
    }
}

/// Theoretical Black-Scholes price of one option (per share).
///
/// # Arguments
///
/// * `s` - Spot price of the underlying
/// * `k` - Strike price
/// * `t` - Time to expiration (years)
/// * `sigma` - Volatility (annualized)
/// * `r` - Risk-free rate (annualized, continuous)
/// * `q` - Dividend yield (continuous)
/// * `kind` - Option type (Call or Put)
///
/// # Errors
///
/// Returns `InvalidParameter` if spot or strike is not positive, if any
/// input is non-finite, or if the discount factors overflow.
#[allow(clippy::too_many_arguments)]
pub fn price(
    s: f64,
    k: f64,
    t: f64,
    sigma: f64,
    r: f64,
    q: f64,
    kind: OptionType,
) -> PricingResult<f64> {
    require_positive("spot", s)?;
    require_positive("strike", k)?;
    require_finite("time_to_expiry", t)?;
    require_finite("volatility", sigma)?;
    require_finite("risk_free_rate", r)?;
    require_finite("dividend_yield", q)?;

    if t <= 0.0 || sigma <= 0.0 {
        return Ok(intrinsic_value(s, k, kind));
    }

    let terms = BsTerms::new(s, k, t, sigma, r, q);
    let forward_leg = s * terms.discount_dividend;
    let strike_leg = k * terms.discount_rate;

    let value = match kind {
        OptionType::Call => forward_leg * norm_cdf(terms.d1) - strike_leg * norm_cdf(terms.d2),
        OptionType::Put => strike_leg * norm_cdf(-terms.d2) - forward_leg * norm_cdf(-terms.d1),
    };
    if !value.is_finite() {
        return Err(PricingError::invalid(format!(
            "{kind} price is not representable for s={s}, k={k}, t={t}, r={r}, q={q}"
        )));
    }
    Ok(value)
}
