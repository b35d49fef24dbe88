//! Strategy aggregation.
//!
//! Prices every leg once at the current market and combines entry costs
//! and Greeks across the strategy. Each leg's contribution is scaled by its
//! signed quantity (positive for long, negative for short).

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::leg::OptionLeg;
use super::types::{LegDirection, LegType};
use crate::error::{PricingError, PricingResult};
use crate::market::MarketParameters;
use crate::pricing::{Greeks, OptionType, greeks, intrinsic_value, price};

/// Shares represented by one option contract.
pub const DEFAULT_CONTRACT_MULTIPLIER: f64 = 100.0;

/// A leg resolved to plain numbers and priced at the current market.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricedLeg {
    /// Instrument held.
    pub leg_type: LegType,
    /// Position direction.
    pub direction: LegDirection,
    /// Strike (0 for stock legs).
    pub strike: f64,
    /// Number of contracts.
    pub quantity: u32,
    /// Per-share theoretical entry price.
    pub entry_price: f64,
}

impl PricedLeg {
    /// Signed contract count as `f64`.
    #[must_use]
    pub fn signed_quantity(&self) -> f64 {
        self.direction.sign() * f64::from(self.quantity)
    }

    /// Per-share value of the leg at expiration with the underlying at `price`.
    #[must_use]
    pub fn expiration_value(&self, price: f64) -> f64 {
        match self.leg_type.option_type() {
            Some(kind) => intrinsic_value(price, self.strike, kind),
            None => price,
        }
    }

    /// Position P/L at expiration with the underlying at `price`.
    #[must_use]
    pub fn pnl_at_expiration(&self, price: f64, multiplier: f64) -> f64 {
        (self.expiration_value(price) - self.entry_price) * self.signed_quantity() * multiplier
    }

    /// Position P/L if marked today at theoretical value with the underlying
    /// moved to `market.spot`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the moved spot is not positive.
    pub fn pnl_at_market(&self, market: &MarketParameters, multiplier: f64) -> PricingResult<f64> {
        let value = theoretical_value(self.leg_type, self.strike, market)?;
        Ok((value - self.entry_price) * self.signed_quantity() * multiplier)
    }
}

/// Per-share theoretical value of an instrument.
fn theoretical_value(leg_type: LegType, strike: f64, market: &MarketParameters) -> PricingResult<f64> {
    match leg_type.option_type() {
        // Worthless underlying: calls are worth 0, puts the discounted strike
        // while time value remains and the plain strike otherwise
        Some(kind) if market.spot == 0.0 => Ok(match kind {
            OptionType::Put if market.has_time_value() => {
                strike * (-market.risk_free_rate * market.time_to_expiry).exp()
            }
            _ => intrinsic_value(0.0, strike, kind),
        }),
        Some(kind) => price(
            market.spot,
            strike,
            market.time_to_expiry,
            market.volatility,
            market.risk_free_rate,
            market.dividend_yield,
            kind,
        ),
        None => Ok(market.spot),
    }
}

/// Per-share theoretical entry price of one leg.
///
/// Stock legs are priced at spot; option legs with Black-Scholes.
///
/// # Errors
///
/// Returns `InvalidParameter` if the leg or market is invalid.
pub fn leg_entry_price(leg: &OptionLeg, market: &MarketParameters) -> PricingResult<f64> {
    market.validate()?;
    leg.validate()?;
    let strike = if leg.is_option() { leg.strike_f64()? } else { 0.0 };
    theoretical_value(leg.leg_type, strike, market)
}

/// Validate inputs and price every leg once.
///
/// # Errors
///
/// - `EmptyStrategy` if `legs` is empty
/// - `InvalidParameter` if the market or any leg is invalid
pub fn price_legs(legs: &[OptionLeg], market: &MarketParameters) -> PricingResult<Vec<PricedLeg>> {
    if legs.is_empty() {
        return Err(PricingError::EmptyStrategy);
    }
    market.validate()?;

    legs.iter()
        .map(|leg| {
            let entry_price = leg_entry_price(leg, market)?;
            let strike = if leg.is_option() { leg.strike_f64()? } else { 0.0 };
            Ok(PricedLeg {
                leg_type: leg.leg_type,
                direction: leg.direction,
                strike,
                quantity: leg.quantity,
                entry_price,
            })
        })
        .collect()
}

/// Net entry cost per share: sum of (price x quantity x sign).
///
/// # Errors
///
/// - `EmptyStrategy` if `legs` is empty
/// - `InvalidParameter` if the market or any leg is invalid
pub fn net_entry_cost(legs: &[OptionLeg], market: &MarketParameters) -> PricingResult<f64> {
    let priced = price_legs(legs, market)?;
    Ok(net_entry_cost_of(&priced))
}

/// Net entry cost of already-priced legs.
#[must_use]
pub fn net_entry_cost_of(priced: &[PricedLeg]) -> f64 {
    priced
        .iter()
        .map(|leg| leg.entry_price * leg.signed_quantity())
        .sum()
}

/// Net debit (positive) or credit (negative) in currency.
///
/// # Errors
///
/// Same as [`net_entry_cost`].
pub fn net_debit(
    legs: &[OptionLeg],
    market: &MarketParameters,
    multiplier: f64,
) -> PricingResult<f64> {
    let cost = net_entry_cost(legs, market)?;
    debug!(net_entry_cost = cost, multiplier, "computed net debit");
    Ok(cost * multiplier)
}

/// Per-share Greeks of one leg. Stock legs have delta 1.
///
/// # Errors
///
/// - `UndefinedAtExpiration` for option legs when `T <= 0` or `sigma <= 0`
/// - `InvalidParameter` if the leg or market is invalid
pub fn leg_greeks(leg: &OptionLeg, market: &MarketParameters) -> PricingResult<Greeks> {
    market.validate()?;
    leg.validate()?;
    match leg.leg_type.option_type() {
        Some(kind) => option_greeks(leg.strike_f64()?, market, kind),
        None => Ok(Greeks::underlying()),
    }
}

fn option_greeks(strike: f64, market: &MarketParameters, kind: OptionType) -> PricingResult<Greeks> {
    greeks(
        market.spot,
        strike,
        market.time_to_expiry,
        market.volatility,
        market.risk_free_rate,
        market.dividend_yield,
        kind,
    )
}

/// Aggregate position Greeks across all legs.
///
/// Each leg's per-share Greeks are scaled by signed quantity and the
/// contract multiplier, then summed.
///
/// # Errors
///
/// - `EmptyStrategy` if `legs` is empty
/// - `UndefinedAtExpiration` if any option leg is at expiration
/// - `InvalidParameter` if the market or any leg is invalid
pub fn position_greeks(
    legs: &[OptionLeg],
    market: &MarketParameters,
    multiplier: f64,
) -> PricingResult<Greeks> {
    if legs.is_empty() {
        return Err(PricingError::EmptyStrategy);
    }
    market.validate()?;

    legs.iter().try_fold(Greeks::zero(), |acc, leg| {
        let per_share = leg_greeks(leg, market)?;
        let scale = leg.direction.sign() * f64::from(leg.quantity) * multiplier;
        Ok(acc.add(&per_share.scale(scale)))
    })
}
