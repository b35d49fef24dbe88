//! Strategy templates.
//!
//! Builds leg lists for common strategies:
//! - Single legs: long call, long put, naked short call/put
//! - Stock overlays: covered call, protective put
//! - Vertical Spreads: bull call, bear call, bull put, bear put
//! - Straddles and Strangles (long or short)
//! - Iron Condor and Iron Butterfly
//! - Call and Put Butterflies
//!
//! All legs share one expiration label; strike ordering is validated.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::leg::OptionLeg;
use super::types::{LegDirection, LegType};
use crate::error::{PricingError, PricingResult};
use crate::pricing::OptionType;

/// Type of options strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyType {
    /// Single long call (bullish).
    LongCall,
    /// Single long put (bearish).
    LongPut,
    /// Naked short call.
    ShortCall,
    /// Naked short put.
    ShortPut,
    /// Long stock + short call.
    CoveredCall,
    /// Long stock + long put.
    ProtectivePut,
    /// Bull Call Spread (bullish).
    BullCallSpread,
    /// Bear Call Spread (bearish).
    BearCallSpread,
    /// Bull Put Spread (bullish).
    BullPutSpread,
    /// Bear Put Spread (bearish).
    BearPutSpread,
    /// Straddle (volatility play).
    Straddle,
    /// Strangle (volatility play).
    Strangle,
    /// Iron Condor (neutral strategy).
    IronCondor,
    /// Iron Butterfly (neutral).
    IronButterfly,
    /// Call Butterfly.
    CallButterfly,
    /// Put Butterfly.
    PutButterfly,
    /// Custom strategy (any combination of legs).
    Custom,
}

/// A named, ordered list of legs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strategy {
    /// Strategy type.
    pub strategy_type: StrategyType,
    /// All legs of the strategy, in display order.
    pub legs: Vec<OptionLeg>,
}

/// Builds template strategies with a shared expiration and size.
#[derive(Debug, Clone)]
pub struct StrategyBuilder {
    expiration: String,
    quantity: u32,
}

impl Default for StrategyBuilder {
    fn default() -> Self {
        Self::new("")
    }
}

impl StrategyBuilder {
    /// Create a builder for one contract per leg.
    #[must_use]
    pub fn new(expiration: impl Into<String>) -> Self {
        Self {
            expiration: expiration.into(),
            quantity: 1,
        }
    }

    /// Set the number of contracts per leg (ratio legs are multiplied).
    #[must_use]
    pub const fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    fn leg(
        &self,
        leg_type: LegType,
        direction: LegDirection,
        strike: Decimal,
        ratio: u32,
    ) -> PricingResult<OptionLeg> {
        let quantity = self.quantity.checked_mul(ratio).ok_or_else(|| {
            PricingError::invalid(format!(
                "leg quantity {} x {ratio} overflows",
                self.quantity
            ))
        })?;
        Ok(OptionLeg::new(
            leg_type,
            direction,
            strike,
            quantity,
            self.expiration.clone(),
        ))
    }

    fn option(
        &self,
        kind: OptionType,
        direction: LegDirection,
        strike: Decimal,
    ) -> PricingResult<OptionLeg> {
        self.leg(kind.into(), direction, strike, 1)
    }

    fn stock(&self, direction: LegDirection) -> PricingResult<OptionLeg> {
        self.leg(LegType::Stock, direction, Decimal::ZERO, 1)
    }

    fn build(&self, strategy_type: StrategyType, legs: Vec<OptionLeg>) -> PricingResult<Strategy> {
        if self.quantity == 0 {
            return Err(PricingError::invalid("strategy quantity cannot be zero"));
        }
        for leg in &legs {
            leg.validate()?;
        }
        Ok(Strategy {
            strategy_type,
            legs,
        })
    }

    /// Build a single-option strategy.
    ///
    /// # Errors
    ///
    /// Returns an error if the strike is not positive.
    pub fn single(&self, kind: OptionType, direction: LegDirection, strike: Decimal) -> PricingResult<Strategy> {
        let strategy_type = match (kind, direction) {
            (OptionType::Call, LegDirection::Long) => StrategyType::LongCall,
            (OptionType::Put, LegDirection::Long) => StrategyType::LongPut,
            (OptionType::Call, LegDirection::Short) => StrategyType::ShortCall,
            (OptionType::Put, LegDirection::Short) => StrategyType::ShortPut,
        };
        self.build(strategy_type, vec![self.option(kind, direction, strike)?])
    }

    /// Long stock plus a short call.
    ///
    /// # Errors
    ///
    /// Returns an error if the strike is not positive.
    pub fn covered_call(&self, call_strike: Decimal) -> PricingResult<Strategy> {
        self.build(
            StrategyType::CoveredCall,
            vec![
                self.stock(LegDirection::Long)?,
                self.option(OptionType::Call, LegDirection::Short, call_strike)?,
            ],
        )
    }

    /// Long stock plus a long put.
    ///
    /// # Errors
    ///
    /// Returns an error if the strike is not positive.
    pub fn protective_put(&self, put_strike: Decimal) -> PricingResult<Strategy> {
        self.build(
            StrategyType::ProtectivePut,
            vec![
                self.stock(LegDirection::Long)?,
                self.option(OptionType::Put, LegDirection::Long, put_strike)?,
            ],
        )
    }

    /// Build a vertical spread from its lower and upper strikes.
    ///
    /// # Errors
    ///
    /// Returns an error if `strategy_type` is not a vertical spread or the
    /// strikes are not strictly ascending.
    pub fn vertical_spread(
        &self,
        strategy_type: StrategyType,
        lower_strike: Decimal,
        upper_strike: Decimal,
    ) -> PricingResult<Strategy> {
        if lower_strike >= upper_strike {
            return Err(PricingError::invalid(format!(
                "Lower strike {lower_strike} must be below upper strike {upper_strike}"
            )));
        }

        let (kind, lower_direction) = match strategy_type {
            StrategyType::BullCallSpread => (OptionType::Call, LegDirection::Long), // Debit
            StrategyType::BearCallSpread => (OptionType::Call, LegDirection::Short), // Credit
            StrategyType::BullPutSpread => (OptionType::Put, LegDirection::Long),   // Credit
            StrategyType::BearPutSpread => (OptionType::Put, LegDirection::Short),  // Debit
            _ => {
                return Err(PricingError::invalid(format!(
                    "Invalid strategy type for vertical spread: {strategy_type:?}"
                )));
            }
        };
        let upper_direction = match lower_direction {
            LegDirection::Long => LegDirection::Short,
            LegDirection::Short => LegDirection::Long,
        };

        // Put spreads list the upper (ATM-side) leg first
        let legs = match kind {
            OptionType::Call => vec![
                self.option(kind, lower_direction, lower_strike)?,
                self.option(kind, upper_direction, upper_strike)?,
            ],
            OptionType::Put => vec![
                self.option(kind, upper_direction, upper_strike)?,
                self.option(kind, lower_direction, lower_strike)?,
            ],
        };
        self.build(strategy_type, legs)
    }

    /// Call and put at the same strike.
    ///
    /// # Errors
    ///
    /// Returns an error if the strike is not positive.
    pub fn straddle(&self, direction: LegDirection, strike: Decimal) -> PricingResult<Strategy> {
        self.build(
            StrategyType::Straddle,
            vec![
                self.option(OptionType::Call, direction, strike)?,
                self.option(OptionType::Put, direction, strike)?,
            ],
        )
    }

    /// OTM put and OTM call.
    ///
    /// # Errors
    ///
    /// Returns an error if the put strike is not below the call strike.
    pub fn strangle(
        &self,
        direction: LegDirection,
        put_strike: Decimal,
        call_strike: Decimal,
    ) -> PricingResult<Strategy> {
        if put_strike >= call_strike {
            return Err(PricingError::invalid(
                "Put strike must be below call strike for strangle",
            ));
        }
        self.build(
            StrategyType::Strangle,
            vec![
                self.option(OptionType::Put, direction, put_strike)?,
                self.option(OptionType::Call, direction, call_strike)?,
            ],
        )
    }

    /// Build an iron condor.
    ///
    /// An iron condor consists of:
    /// - Bull put spread (long put + short put at higher strike)
    /// - Bear call spread (short call + long call at higher strike)
    ///
    /// # Errors
    ///
    /// Returns an error unless
    /// `long_put < short_put < short_call < long_call`.
    pub fn iron_condor(
        &self,
        long_put: Decimal,
        short_put: Decimal,
        short_call: Decimal,
        long_call: Decimal,
    ) -> PricingResult<Strategy> {
        if !(long_put < short_put && short_put < short_call && short_call < long_call) {
            return Err(PricingError::invalid(
                "Iron condor strikes must satisfy long put < short put < short call < long call",
            ));
        }
        self.build(
            StrategyType::IronCondor,
            vec![
                self.option(OptionType::Put, LegDirection::Long, long_put)?,
                self.option(OptionType::Put, LegDirection::Short, short_put)?,
                self.option(OptionType::Call, LegDirection::Short, short_call)?,
                self.option(OptionType::Call, LegDirection::Long, long_call)?,
            ],
        )
    }

    /// Short straddle at `body` with long wings `width` away.
    ///
    /// # Errors
    ///
    /// Returns an error if the width is not positive or the lower wing is
    /// not above zero.
    pub fn iron_butterfly(&self, body: Decimal, width: Decimal) -> PricingResult<Strategy> {
        if width <= Decimal::ZERO || body - width <= Decimal::ZERO {
            return Err(PricingError::invalid(format!(
                "Iron butterfly width {width} invalid for body {body}"
            )));
        }
        self.build(
            StrategyType::IronButterfly,
            vec![
                self.option(OptionType::Put, LegDirection::Long, body - width)?,
                self.option(OptionType::Put, LegDirection::Short, body)?,
                self.option(OptionType::Call, LegDirection::Short, body)?,
                self.option(OptionType::Call, LegDirection::Long, body + width)?,
            ],
        )
    }

    /// Long 1 lower, short 2 middle, long 1 upper.
    ///
    /// # Errors
    ///
    /// Returns an error if strikes are not strictly ascending.
    pub fn butterfly(
        &self,
        kind: OptionType,
        lower: Decimal,
        middle: Decimal,
        upper: Decimal,
    ) -> PricingResult<Strategy> {
        if !(lower < middle && middle < upper) {
            return Err(PricingError::invalid(
                "Butterfly strikes must be strictly ascending",
            ));
        }
        let strategy_type = match kind {
            OptionType::Call => StrategyType::CallButterfly,
            OptionType::Put => StrategyType::PutButterfly,
        };
        self.build(
            strategy_type,
            vec![
                self.leg(kind.into(), LegDirection::Long, lower, 1)?,
                self.leg(kind.into(), LegDirection::Short, middle, 2)?,
                self.leg(kind.into(), LegDirection::Long, upper, 1)?,
            ],
        )
    }

    /// Wrap manually entered legs.
    ///
    /// # Errors
    ///
    /// Returns `EmptyStrategy` for no legs, or `InvalidParameter` for an
    /// invalid leg.
    pub fn custom(&self, legs: Vec<OptionLeg>) -> PricingResult<Strategy> {
        if legs.is_empty() {
            return Err(PricingError::EmptyStrategy);
        }
        self.build(StrategyType::Custom, legs)
    }
}
