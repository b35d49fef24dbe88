//! Market parameters shared by every leg of one calculation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult, require_finite, require_positive};

/// Calendar days per year used to convert dates into a year fraction.
const DAYS_PER_YEAR: f64 = 365.0;

/// Market inputs for one calculation.
///
/// A plain value: supplied fresh per calculation, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketParameters {
    /// Spot price of the underlying (> 0).
    pub spot: f64,
    /// Time to expiration in years (>= 0).
    pub time_to_expiry: f64,
    /// Annualized volatility (>= 0).
    pub volatility: f64,
    /// Annualized continuously-compounded risk-free rate.
    pub risk_free_rate: f64,
    /// Annualized continuous dividend yield.
    #[serde(default)]
    pub dividend_yield: f64,
}

impl MarketParameters {
    /// Create market parameters.
    #[must_use]
    pub const fn new(
        spot: f64,
        time_to_expiry: f64,
        volatility: f64,
        risk_free_rate: f64,
        dividend_yield: f64,
    ) -> Self {
        Self {
            spot,
            time_to_expiry,
            volatility,
            risk_free_rate,
            dividend_yield,
        }
    }

    /// Return a copy with a different spot price.
    #[must_use]
    pub const fn with_spot(self, spot: f64) -> Self {
        Self { spot, ..self }
    }

    /// Return a copy with a different time to expiration.
    #[must_use]
    pub const fn with_time_to_expiry(self, time_to_expiry: f64) -> Self {
        Self {
            time_to_expiry,
            ..self
        }
    }

    /// Validate the parameters.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if spot is not positive, time or volatility
    /// is negative, or any value is non-finite.
    pub fn validate(&self) -> PricingResult<()> {
        require_positive("spot", self.spot)?;
        require_finite("time_to_expiry", self.time_to_expiry)?;
        require_finite("volatility", self.volatility)?;
        require_finite("risk_free_rate", self.risk_free_rate)?;
        require_finite("dividend_yield", self.dividend_yield)?;

        if self.time_to_expiry < 0.0 {
            return Err(PricingError::invalid(format!(
                "time_to_expiry must be >= 0, got {}",
                self.time_to_expiry
            )));
        }
        if self.volatility < 0.0 {
            return Err(PricingError::invalid(format!(
                "volatility must be >= 0, got {}",
                self.volatility
            )));
        }
        Ok(())
    }

    /// Whether the closed form applies (otherwise options are at intrinsic).
    #[must_use]
    pub fn has_time_value(&self) -> bool {
        self.time_to_expiry > 0.0 && self.volatility > 0.0
    }

    /// Year fraction between two dates (calendar days / 365), floored at 0.
    #[must_use]
    pub fn time_to_expiry_from_dates(as_of: NaiveDate, expiration: NaiveDate) -> f64 {
        let days = (expiration - as_of).num_days().max(0);
        days as f64 / DAYS_PER_YEAR
    }
}
