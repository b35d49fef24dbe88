//! Option leg type.
//!
//! A leg is immutable for the duration of a calculation. Edits go through
//! the `with_*` methods, which return a new leg.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::types::{LegDirection, LegType};
use crate::error::{PricingError, PricingResult};

/// A single leg of a strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionLeg {
    /// Instrument held.
    pub leg_type: LegType,
    /// Position direction.
    pub direction: LegDirection,
    /// Strike price. Ignored for stock legs.
    #[serde(default)]
    pub strike: Decimal,
    /// Number of contracts (each contract is one multiplier's worth of shares).
    pub quantity: u32,
    /// Expiration label (descriptive only, e.g. `"2026-01-16"`).
    #[serde(default)]
    pub expiration: String,
}

impl OptionLeg {
    /// Create a new leg.
    #[must_use]
    pub const fn new(
        leg_type: LegType,
        direction: LegDirection,
        strike: Decimal,
        quantity: u32,
        expiration: String,
    ) -> Self {
        Self {
            leg_type,
            direction,
            strike,
            quantity,
            expiration,
        }
    }

    /// A call leg with no expiration label.
    #[must_use]
    pub const fn call(direction: LegDirection, strike: Decimal, quantity: u32) -> Self {
        Self::new(LegType::Call, direction, strike, quantity, String::new())
    }

    /// A put leg with no expiration label.
    #[must_use]
    pub const fn put(direction: LegDirection, strike: Decimal, quantity: u32) -> Self {
        Self::new(LegType::Put, direction, strike, quantity, String::new())
    }

    /// A stock leg.
    #[must_use]
    pub const fn stock(direction: LegDirection, quantity: u32) -> Self {
        Self::new(
            LegType::Stock,
            direction,
            Decimal::ZERO,
            quantity,
            String::new(),
        )
    }

    /// Return a copy with an expiration label.
    #[must_use]
    pub fn with_expiration(self, expiration: impl Into<String>) -> Self {
        Self {
            expiration: expiration.into(),
            ..self
        }
    }

    /// Return a copy with a different quantity.
    #[must_use]
    pub fn with_quantity(self, quantity: u32) -> Self {
        Self { quantity, ..self }
    }

    /// Return a copy with a different strike.
    #[must_use]
    pub fn with_strike(self, strike: Decimal) -> Self {
        Self { strike, ..self }
    }

    /// Get signed quantity (positive for long, negative for short).
    #[must_use]
    pub fn signed_quantity(&self) -> i64 {
        let qty = i64::from(self.quantity);
        match self.direction {
            LegDirection::Long => qty,
            LegDirection::Short => -qty,
        }
    }

    /// Whether this leg is an option (not stock).
    #[must_use]
    pub const fn is_option(&self) -> bool {
        !matches!(self.leg_type, LegType::Stock)
    }

    /// Strike as `f64`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the strike is not positive.
    pub fn strike_f64(&self) -> PricingResult<f64> {
        if self.strike <= Decimal::ZERO {
            return Err(PricingError::invalid(format!(
                "{} strike must be positive, got {}",
                self.leg_type, self.strike
            )));
        }
        self.strike
            .to_f64()
            .ok_or_else(|| PricingError::invalid(format!("strike {} not representable", self.strike)))
    }

    /// Validate the leg.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a zero quantity or an option leg with a
    /// non-positive strike.
    pub fn validate(&self) -> PricingResult<()> {
        if self.quantity == 0 {
            return Err(PricingError::invalid(format!(
                "{} leg quantity cannot be zero",
                self.leg_type
            )));
        }
        if self.is_option() {
            self.strike_f64()?;
        }
        Ok(())
    }
}
