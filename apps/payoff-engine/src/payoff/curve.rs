//! Payoff curve generation.
//!
//! Samples strategy P/L on an evenly spaced grid of underlying prices
//! centred on spot:
//!
//! ```text
//! start = max(0, S - S * range_factor)
//! end   = S + S * range_factor
//! step  = (end - start) / (point_count - 1)
//! ```
//!
//! Entry prices are computed once at the current market; only the
//! underlying price moves along the curve.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PricingError, PricingResult};
use crate::market::MarketParameters;
use crate::strategy::{DEFAULT_CONTRACT_MULTIPLIER, OptionLeg, PricedLeg, price_legs};

/// Default number of sampled prices.
pub const DEFAULT_POINT_COUNT: usize = 101;

/// Default half-width of the price range as a fraction of spot.
pub const DEFAULT_RANGE_FACTOR: f64 = 0.5;

/// One sample of the P/L curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlDataPoint {
    /// Underlying price.
    pub price: f64,
    /// Strategy profit/loss in currency at that price.
    pub pnl: f64,
}

impl PlDataPoint {
    /// Create a data point.
    #[must_use]
    pub const fn new(price: f64, pnl: f64) -> Self {
        Self { price, pnl }
    }
}

/// Curve sampling configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveConfig {
    /// Number of sampled prices (>= 2).
    #[serde(default = "default_point_count")]
    pub point_count: usize,
    /// Half-width of the range as a fraction of spot (> 0).
    #[serde(default = "default_range_factor")]
    pub range_factor: f64,
    /// Shares per contract.
    #[serde(default = "default_contract_multiplier")]
    pub contract_multiplier: f64,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            point_count: DEFAULT_POINT_COUNT,
            range_factor: DEFAULT_RANGE_FACTOR,
            contract_multiplier: DEFAULT_CONTRACT_MULTIPLIER,
        }
    }
}

const fn default_point_count() -> usize {
    DEFAULT_POINT_COUNT
}

const fn default_range_factor() -> f64 {
    DEFAULT_RANGE_FACTOR
}

const fn default_contract_multiplier() -> f64 {
    DEFAULT_CONTRACT_MULTIPLIER
}

impl CurveConfig {
    /// Return a copy with a different point count.
    #[must_use]
    pub const fn with_point_count(mut self, point_count: usize) -> Self {
        self.point_count = point_count;
        self
    }

    /// Return a copy with a different range factor.
    #[must_use]
    pub const fn with_range_factor(mut self, range_factor: f64) -> Self {
        self.range_factor = range_factor;
        self
    }

    /// Validate the sampling parameters.
    ///
    /// # Errors
    ///
    /// - `DegenerateRange` if fewer than two points are requested or the
    ///   range factor is not a positive finite number
    /// - `InvalidParameter` if the multiplier is not positive
    pub fn validate(&self) -> PricingResult<()> {
        if self.point_count < 2 {
            return Err(PricingError::degenerate(format!(
                "point_count must be at least 2, got {}",
                self.point_count
            )));
        }
        if !(self.range_factor.is_finite() && self.range_factor > 0.0) {
            return Err(PricingError::degenerate(format!(
                "range_factor must be positive, got {}",
                self.range_factor
            )));
        }
        if !(self.contract_multiplier.is_finite() && self.contract_multiplier > 0.0) {
            return Err(PricingError::invalid(format!(
                "contract_multiplier must be positive, got {}",
                self.contract_multiplier
            )));
        }
        Ok(())
    }
}

/// Sampled price bounds `[max(0, S - S*f), S + S*f]`.
///
/// # Errors
///
/// Returns `DegenerateRange` if the range has no width.
pub fn price_range(spot: f64, range_factor: f64) -> PricingResult<(f64, f64)> {
    let half_width = spot * range_factor;
    let start = (spot - half_width).max(0.0);
    let end = spot + half_width;
    if !(start.is_finite() && end.is_finite()) || end <= start {
        return Err(PricingError::degenerate(format!(
            "price range [{start}, {end}] has no width"
        )));
    }
    Ok((start, end))
}

/// Evenly spaced prices from `start` to `end`, both inclusive.
///
/// # Errors
///
/// Returns `DegenerateRange` if the step is too small to separate
/// neighbouring prices at this magnitude.
fn sample_prices(start: f64, end: f64, count: usize) -> PricingResult<Vec<f64>> {
    let step = (end - start) / (count - 1) as f64;
    let prices: Vec<f64> = (0..count)
        .map(|i| if i == count - 1 { end } else { start + step * i as f64 })
        .collect();
    if prices.windows(2).any(|w| w[0] >= w[1]) {
        return Err(PricingError::degenerate(format!(
            "{count} points cannot be separated within [{start}, {end}]"
        )));
    }
    Ok(prices)
}

/// Total strategy P/L at expiration with the underlying at `price`.
#[must_use]
pub fn pnl_at_expiration(priced: &[PricedLeg], price: f64, multiplier: f64) -> f64 {
    priced
        .iter()
        .map(|leg| leg.pnl_at_expiration(price, multiplier))
        .sum()
}

/// Generate the expiration P/L curve.
///
/// Returns exactly `config.point_count` points, strictly ascending in price.
///
/// # Errors
///
/// - `EmptyStrategy` if `legs` is empty
/// - `InvalidParameter` if the market or any leg is invalid
/// - `DegenerateRange` if the sampling configuration collapses
pub fn generate_curve(
    legs: &[OptionLeg],
    market: &MarketParameters,
    config: &CurveConfig,
) -> PricingResult<Vec<PlDataPoint>> {
    config.validate()?;
    let priced = price_legs(legs, market)?;
    generate_curve_priced(&priced, market.spot, config)
}

/// Generate the expiration P/L curve for already-priced legs.
///
/// # Errors
///
/// Returns `DegenerateRange` if the sampling configuration collapses.
pub fn generate_curve_priced(
    priced: &[PricedLeg],
    spot: f64,
    config: &CurveConfig,
) -> PricingResult<Vec<PlDataPoint>> {
    config.validate()?;
    if priced.is_empty() {
        return Err(PricingError::EmptyStrategy);
    }
    let (start, end) = price_range(spot, config.range_factor)?;
    debug!(start, end, points = config.point_count, "sampling expiration curve");

    Ok(sample_prices(start, end, config.point_count)?
        .into_iter()
        .map(|price| {
            PlDataPoint::new(
                price,
                pnl_at_expiration(priced, price, config.contract_multiplier),
            )
        })
        .collect())
}

/// Generate the "T+0" curve: P/L if the position were marked today at
/// theoretical value with the underlying moved to each sampled price.
///
/// Uses the market's time, volatility, rate and yield unchanged. At
/// `T = 0` this coincides with the expiration curve.
///
/// # Errors
///
/// Same as [`generate_curve`].
pub fn generate_value_curve(
    legs: &[OptionLeg],
    market: &MarketParameters,
    config: &CurveConfig,
) -> PricingResult<Vec<PlDataPoint>> {
    config.validate()?;
    let priced = price_legs(legs, market)?;
    let (start, end) = price_range(market.spot, config.range_factor)?;
    debug!(start, end, points = config.point_count, "sampling value curve");

    sample_prices(start, end, config.point_count)?
        .into_iter()
        .map(|price| {
            let moved = market.with_spot(price);
            let pnl = priced.iter().try_fold(0.0, |acc, leg| {
                Ok::<f64, PricingError>(acc + leg.pnl_at_market(&moved, config.contract_multiplier)?)
            })?;
            Ok(PlDataPoint::new(price, pnl))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::strategy::{LegDirection, leg_entry_price};
    use rust_decimal_macros::dec;

    fn market() -> MarketParameters {
        MarketParameters::new(100.0, 30.0 / 365.0, 0.30, 0.05, 0.0)
    }

    fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    #[test]
    fn test_curve_has_point_count_points_ascending() {
        let legs = [OptionLeg::call(LegDirection::Long, dec!(100), 1)];
        let curve = generate_curve(&legs, &market(), &CurveConfig::default()).unwrap();

        assert_eq!(curve.len(), 101);
        assert_eq!(curve[0].price, 50.0);
        assert_eq!(curve[100].price, 150.0);
        assert!(curve.windows(2).all(|w| w[0].price < w[1].price));
        assert!(approx_eq(curve[50].price, 100.0, 1e-9));
    }

    #[test]
    fn test_range_floors_at_zero() {
        let (start, end) = price_range(100.0, 1.5).unwrap();
        assert_eq!(start, 0.0);
        assert_eq!(end, 250.0);
    }

    #[test]
    fn test_long_call_curve_values() {
        let m = market();
        let leg = OptionLeg::call(LegDirection::Long, dec!(100), 2);
        let premium = leg_entry_price(&leg, &m).unwrap();
        let curve = generate_curve(&[leg], &m, &CurveConfig::default()).unwrap();

        // Below the strike the loss is the premium paid
        assert!(approx_eq(curve[0].pnl, -premium * 200.0, 1e-9));
        // At the top of the range: (150 - 100 - premium) * 2 * 100
        assert!(approx_eq(curve[100].pnl, (50.0 - premium) * 200.0, 1e-9));
    }

    #[test]
    fn test_short_put_curve_values() {
        let m = market();
        let leg = OptionLeg::put(LegDirection::Short, dec!(95), 1);
        let premium = leg_entry_price(&leg, &m).unwrap();
        let curve = generate_curve(&[leg], &m, &CurveConfig::default()).unwrap();

        assert!(approx_eq(curve[100].pnl, premium * 100.0, 1e-9));
        assert!(approx_eq(curve[0].pnl, (premium - 45.0) * 100.0, 1e-9));
    }

    #[test]
    fn test_custom_point_count_and_range() {
        let legs = [OptionLeg::stock(LegDirection::Long, 1)];
        let config = CurveConfig::default().with_point_count(5).with_range_factor(0.4);
        let curve = generate_curve(&legs, &market(), &config).unwrap();
        let prices: Vec<f64> = curve.iter().map(|p| p.price).collect();

        assert_eq!(prices.len(), 5);
        assert!(approx_eq(prices[0], 60.0, 1e-9));
        assert!(approx_eq(prices[2], 100.0, 1e-9));
        assert_eq!(prices[4], 140.0);
        assert!(approx_eq(curve[2].pnl, 0.0, 1e-9));
    }

    #[test]
    fn test_degenerate_configs() {
        let legs = [OptionLeg::call(LegDirection::Long, dec!(100), 1)];
        for config in [
            CurveConfig::default().with_point_count(1),
            CurveConfig::default().with_point_count(0),
            CurveConfig::default().with_range_factor(0.0),
            CurveConfig::default().with_range_factor(f64::NAN),
        ] {
            let err = generate_curve(&legs, &market(), &config).unwrap_err();
            assert_eq!(err.code(), ErrorCode::DegenerateRange, "{config:?}");
        }
    }

    #[test]
    fn test_range_too_narrow_to_separate_points() {
        let legs = [OptionLeg::call(LegDirection::Long, dec!(100), 1)];
        // Half-width of 3e-14 around 100 spans only a few ulps
        let config = CurveConfig::default().with_range_factor(3e-16).with_point_count(101);

        let err = generate_curve(&legs, &market(), &config).unwrap_err();
        assert_eq!(err.code(), ErrorCode::DegenerateRange);
        let err = generate_value_curve(&legs, &market(), &config).unwrap_err();
        assert_eq!(err.code(), ErrorCode::DegenerateRange);

        // Narrow but representable ranges still sample
        let config = CurveConfig::default().with_range_factor(1e-9).with_point_count(101);
        let curve = generate_curve(&legs, &market(), &config).unwrap();
        assert_eq!(curve.len(), 101);
        assert!(curve.windows(2).all(|w| w[0].price < w[1].price));
    }

    #[test]
    fn test_empty_legs() {
        assert_eq!(
            generate_curve(&[], &market(), &CurveConfig::default()).unwrap_err(),
            PricingError::EmptyStrategy
        );
        assert_eq!(
            generate_curve_priced(&[], 100.0, &CurveConfig::default()).unwrap_err(),
            PricingError::EmptyStrategy
        );
    }

    #[test]
    fn test_value_curve_matches_expiration_at_t_zero() {
        let m = market().with_time_to_expiry(0.0);
        let legs = [
            OptionLeg::call(LegDirection::Long, dec!(100), 1),
            OptionLeg::put(LegDirection::Short, dec!(90), 1),
        ];
        let config = CurveConfig::default().with_point_count(21);
        let expiry = generate_curve(&legs, &m, &config).unwrap();
        let value = generate_value_curve(&legs, &m, &config).unwrap();

        for (a, b) in expiry.iter().zip(&value) {
            assert_eq!(a.price, b.price);
            assert!(approx_eq(a.pnl, b.pnl, 1e-9));
        }
    }

    #[test]
    fn test_value_curve_is_zero_at_spot() {
        let legs = [OptionLeg::call(LegDirection::Long, dec!(105), 1)];
        let value = generate_value_curve(&legs, &market(), &CurveConfig::default()).unwrap();
        assert!(approx_eq(value[50].pnl, 0.0, 1e-9));
        // Long option is worth more than expiration value before expiry
        let expiry = generate_curve(&legs, &market(), &CurveConfig::default()).unwrap();
        assert!(value[70].pnl > expiry[70].pnl);
    }

    #[test]
    fn test_value_curve_handles_zero_price() {
        let legs = [
            OptionLeg::put(LegDirection::Long, dec!(100), 1),
            OptionLeg::stock(LegDirection::Long, 1),
        ];
        let config = CurveConfig::default().with_range_factor(1.0).with_point_count(11);
        let value = generate_value_curve(&legs, &market(), &config).unwrap();
        assert_eq!(value[0].price, 0.0);
        assert!(value[0].pnl.is_finite());
    }

    #[test]
    fn test_value_curve_zero_price_without_volatility() {
        // No volatility: the put is marked at its intrinsic value everywhere,
        // including the zero-price endpoint
        let m = MarketParameters::new(100.0, 1.0, 0.0, 0.10, 0.0);
        let legs = [OptionLeg::put(LegDirection::Long, dec!(100), 1)];
        let config = CurveConfig::default().with_range_factor(1.0).with_point_count(51);
        let value = generate_value_curve(&legs, &m, &config).unwrap();

        assert_eq!(value[0].price, 0.0);
        assert!(approx_eq(value[1].price, 4.0, 1e-9));
        assert!(approx_eq(value[0].pnl, 10_000.0, 1e-9));
        assert!(approx_eq(value[1].pnl, 9_600.0, 1e-9));
        assert!(approx_eq(value[0].pnl - value[1].pnl, 400.0, 1e-9));
    }
}
