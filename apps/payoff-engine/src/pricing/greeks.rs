//! Greeks calculation.
//!
//! Closed-form sensitivities of the Black-Scholes price, dividend-adjusted.
//! With `q = 0` these reduce to the textbook no-dividend formulas:
//!
//! - delta: `N(d1)` (call), `N(d1) - 1` (put)
//! - gamma: `phi(d1) / (S sigma sqrt(T))`
//! - vega: `S phi(d1) sqrt(T) / 100` (per 1 vol point)
//! - theta: per calendar day (`/365`)
//! - rho: per 1 rate point (`/100`)

#![allow(clippy::many_single_char_names)]
#![allow(clippy::suboptimal_flops)]

use serde::{Deserialize, Serialize};

use super::black_scholes::BsTerms;
use super::normal::{norm_cdf, norm_pdf};
use super::types::OptionType;
use crate::error::{PricingError, PricingResult, require_finite, require_positive};

/// Calendar days per year used to express theta per day.
const DAYS_PER_YEAR: f64 = 365.0;

/// Greeks for an option or a position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Delta - rate of change of option price with respect to underlying price.
    /// Range: -1.0 to 1.0 for individual options.
    pub delta: f64,
    /// Gamma - rate of change of delta with respect to underlying price.
    pub gamma: f64,
    /// Theta - rate of change of option price with respect to time (per day).
    /// Typically negative for long options.
    pub theta: f64,
    /// Vega - sensitivity to volatility (per 1% change in vol).
    pub vega: f64,
    /// Rho - sensitivity to interest rate changes (per 1% change in rates).
    pub rho: f64,
}

impl Greeks {
    /// Create new Greeks.
    #[must_use]
    pub const fn new(delta: f64, gamma: f64, theta: f64, vega: f64, rho: f64) -> Self {
        Self {
            delta,
            gamma,
            theta,
            vega,
            rho,
        }
    }

    /// Greeks of one share of the underlying.
    #[must_use]
    pub const fn underlying() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0, 0.0)
    }

    /// Scale Greeks by a quantity (positive for long, negative for short).
    #[must_use]
    pub fn scale(&self, quantity: f64) -> Self {
        Self {
            delta: self.delta * quantity,
            gamma: self.gamma * quantity,
            theta: self.theta * quantity,
            vega: self.vega * quantity,
            rho: self.rho * quantity,
        }
    }

    /// Add another Greeks to this one.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        Self {
            delta: self.delta + other.delta,
            gamma: self.gamma + other.gamma,
            theta: self.theta + other.theta,
            vega: self.vega + other.vega,
            rho: self.rho + other.rho,
        }
    }

    /// Create zero Greeks.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, 0.0)
    }
}

/// Compute Greeks for one option (per share).
///
/// # Errors
///
/// - `UndefinedAtExpiration` if `t <= 0` or `sigma <= 0`
/// - `InvalidParameter` if spot or strike is not positive, any input is
///   non-finite, or the result overflows
#[allow(clippy::too_many_arguments)]
pub fn greeks(
    s: f64,
    k: f64,
    t: f64,
    sigma: f64,
    r: f64,
    q: f64,
    kind: OptionType,
) -> PricingResult<Greeks> {
    require_positive("spot", s)?;
    require_positive("strike", k)?;
    require_finite("time_to_expiry", t)?;
    require_finite("volatility", sigma)?;
    require_finite("risk_free_rate", r)?;
    require_finite("dividend_yield", q)?;

    if t <= 0.0 || sigma <= 0.0 {
        return Err(PricingError::UndefinedAtExpiration {
            time_to_expiry: t,
            volatility: sigma,
        });
    }

    let terms = BsTerms::new(s, k, t, sigma, r, q);
    let pdf_d1 = norm_pdf(terms.d1);
    let nd1 = norm_cdf(terms.d1);
    let nd2 = norm_cdf(terms.d2);
    let dq = terms.discount_dividend;
    let dr = terms.discount_rate;

    let gamma = dq * pdf_d1 / (s * sigma * terms.sqrt_t);
    let vega = s * dq * pdf_d1 * terms.sqrt_t / 100.0;
    let decay = -s * dq * pdf_d1 * sigma / (2.0 * terms.sqrt_t);

    let greeks = match kind {
        OptionType::Call => Greeks {
            delta: dq * nd1,
            gamma,
            theta: (decay - r * k * dr * nd2 + q * s * dq * nd1) / DAYS_PER_YEAR,
            vega,
            rho: k * t * dr * nd2 / 100.0,
        },
        OptionType::Put => Greeks {
            delta: dq * (nd1 - 1.0),
            gamma,
            theta: (decay + r * k * dr * (1.0 - nd2) - q * s * dq * (1.0 - nd1))
                / DAYS_PER_YEAR,
            vega,
            rho: -k * t * dr * (1.0 - nd2) / 100.0,
        },
    };

    let values = [greeks.delta, greeks.gamma, greeks.theta, greeks.vega, greeks.rho];
    if values.iter().any(|v| !v.is_finite()) {
        return Err(PricingError::invalid(format!(
            "{kind} greeks are not representable for s={s}, k={k}, t={t}, r={r}, q={q}"
        )));
    }
    Ok(greeks)
}
