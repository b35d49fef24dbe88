//! Risk summary: max profit, max loss and breakevens.
//!
//! The expiration payoff of any leg mix is piecewise linear in the
//! underlying price, with kinks only at strikes, and the price cannot fall
//! below zero. So the exact extremes over `[0, inf)` are found among:
//!
//! - the P/L at price 0 and at every strike, and
//! - the slope beyond the highest strike: calls and stock keep adding
//!   `sign * quantity * multiplier` per unit of price, puts add nothing.
//!
//! A positive terminal slope means unlimited profit, a negative one
//! unlimited loss. The sampled curve is included in the candidates so the
//! reported extremes never disagree with what the curve shows.
//!
//! `BoundsMode::SampledThreshold` keeps the older heuristic: the curve's own
//! max/min, reported as unlimited past a magnitude threshold.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::breakeven::{DEFAULT_BREAKEVEN_EPSILON, find_breakevens_with_epsilon};
use super::curve::{PlDataPoint, pnl_at_expiration};
use crate::error::{PricingError, PricingResult};
use crate::market::MarketParameters;
use crate::strategy::{DEFAULT_CONTRACT_MULTIPLIER, OptionLeg, PricedLeg, price_legs};

/// Magnitude past which a sampled extreme is treated as unlimited.
pub const DEFAULT_UNLIMITED_THRESHOLD: f64 = 1_000_000.0;

/// How unlimited profit/loss is detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BoundsMode {
    /// Exact bounds from the leg composition.
    #[default]
    Analytic,
    /// Curve extremes, unlimited past `threshold` in magnitude.
    SampledThreshold {
        /// Magnitude cutoff.
        threshold: f64,
    },
}

/// Risk summary configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Unlimited detection.
    #[serde(default)]
    pub bounds_mode: BoundsMode,
    /// Minimum distance between reported breakevens.
    #[serde(default = "default_breakeven_epsilon")]
    pub breakeven_epsilon: f64,
    /// Shares per contract.
    #[serde(default = "default_contract_multiplier")]
    pub contract_multiplier: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            bounds_mode: BoundsMode::Analytic,
            breakeven_epsilon: DEFAULT_BREAKEVEN_EPSILON,
            contract_multiplier: DEFAULT_CONTRACT_MULTIPLIER,
        }
    }
}

const fn default_breakeven_epsilon() -> f64 {
    DEFAULT_BREAKEVEN_EPSILON
}

const fn default_contract_multiplier() -> f64 {
    DEFAULT_CONTRACT_MULTIPLIER
}

/// Max profit, max loss and breakevens of a strategy at expiration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    /// Highest attainable P/L; `None` when unlimited.
    pub max_profit: Option<f64>,
    /// Lowest attainable P/L (negative for a loss); `None` when unlimited.
    pub max_loss: Option<f64>,
    /// Breakeven prices, ascending.
    pub breakevens: Vec<f64>,
}

impl RiskProfile {
    /// Whether profit is uncapped.
    #[must_use]
    pub const fn has_unlimited_profit(&self) -> bool {
        self.max_profit.is_none()
    }

    /// Whether loss is uncapped.
    #[must_use]
    pub const fn has_unlimited_loss(&self) -> bool {
        self.max_loss.is_none()
    }

    /// Reward-to-risk ratio when both sides are bounded and a loss is possible.
    #[must_use]
    pub fn reward_to_risk(&self) -> Option<f64> {
        match (self.max_profit, self.max_loss) {
            (Some(profit), Some(loss)) if loss < 0.0 => Some(profit / -loss),
            _ => None,
        }
    }
}

/// P/L slope per unit of underlying price beyond the highest strike.
#[must_use]
pub fn terminal_slope(priced: &[PricedLeg], multiplier: f64) -> f64 {
    priced
        .iter()
        .filter(|leg| leg.leg_type.is_upside_exposed())
        .map(|leg| leg.signed_quantity() * multiplier)
        .sum()
}

/// Summarize a strategy's risk from its curve and legs.
///
/// # Errors
///
/// - `EmptyStrategy` if `legs` is empty
/// - `InvalidParameter` if the market or any leg is invalid
/// - `DegenerateRange` if `curve` is empty
pub fn summarize(
    curve: &[PlDataPoint],
    legs: &[OptionLeg],
    market: &MarketParameters,
    config: &RiskConfig,
) -> PricingResult<RiskProfile> {
    let priced = price_legs(legs, market)?;
    summarize_priced(curve, &priced, config)
}

/// Summarize risk for already-priced legs.
///
/// # Errors
///
/// - `EmptyStrategy` if `priced` is empty
/// - `DegenerateRange` if `curve` is empty
pub fn summarize_priced(
    curve: &[PlDataPoint],
    priced: &[PricedLeg],
    config: &RiskConfig,
) -> PricingResult<RiskProfile> {
    if priced.is_empty() {
        return Err(PricingError::EmptyStrategy);
    }
    if curve.is_empty() {
        return Err(PricingError::degenerate("curve has no points"));
    }

    let sampled_max = curve.iter().map(|p| p.pnl).fold(f64::NEG_INFINITY, f64::max);
    let sampled_min = curve.iter().map(|p| p.pnl).fold(f64::INFINITY, f64::min);

    let (max_profit, max_loss) = match config.bounds_mode {
        BoundsMode::Analytic => {
            let multiplier = config.contract_multiplier;
            let slope = terminal_slope(priced, multiplier);

            let kinks = priced
                .iter()
                .filter(|leg| leg.leg_type.option_type().is_some())
                .map(|leg| leg.strike)
                .chain(std::iter::once(0.0))
                .map(|price| pnl_at_expiration(priced, price, multiplier));

            let (kink_max, kink_min) = kinks.fold((sampled_max, sampled_min), |(hi, lo), v| {
                (hi.max(v), lo.min(v))
            });

            debug!(slope, kink_max, kink_min, "analytic payoff bounds");
            (
                (slope <= 0.0).then_some(kink_max),
                (slope >= 0.0).then_some(kink_min),
            )
        }
        BoundsMode::SampledThreshold { threshold } => (
            (sampled_max <= threshold).then_some(sampled_max),
            (sampled_min >= -threshold).then_some(sampled_min),
        ),
    };

    Ok(RiskProfile {
        max_profit,
        max_loss,
        breakevens: find_breakevens_with_epsilon(curve, config.breakeven_epsilon),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payoff::curve::{CurveConfig, generate_curve};
    use crate::strategy::{LegDirection, LegType, StrategyBuilder, net_entry_cost};
    use rust_decimal_macros::dec;

    fn market() -> MarketParameters {
        MarketParameters::new(100.0, 30.0 / 365.0, 0.30, 0.05, 0.0)
    }

    fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    fn profile(legs: &[OptionLeg], config: &RiskConfig) -> RiskProfile {
        let m = market();
        let curve = generate_curve(legs, &m, &CurveConfig::default()).unwrap();
        summarize(&curve, legs, &m, config).unwrap()
    }

    #[test]
    fn test_long_call_profit_unlimited() {
        let legs = [OptionLeg::call(LegDirection::Long, dec!(100), 1)];
        let premium = net_entry_cost(&legs, &market()).unwrap();
        let risk = profile(&legs, &RiskConfig::default());

        assert!(risk.has_unlimited_profit());
        assert!(approx_eq(risk.max_loss.unwrap(), -premium * 100.0, 1e-9));
        assert_eq!(risk.breakevens.len(), 1);
        assert!(approx_eq(risk.breakevens[0], 100.0 + premium, 1e-6));
    }

    #[test]
    fn test_short_stock_loss_unlimited() {
        let legs = [OptionLeg::stock(LegDirection::Short, 1)];
        let risk = profile(&legs, &RiskConfig::default());
        assert!(risk.has_unlimited_loss());
        // Profit capped at the stock going to zero
        assert!(approx_eq(risk.max_profit.unwrap(), 10_000.0, 1e-9));
    }

    #[test]
    fn test_long_stock_loss_bounded_at_zero_price() {
        let legs = [OptionLeg::stock(LegDirection::Long, 1)];
        let risk = profile(&legs, &RiskConfig::default());
        assert!(risk.has_unlimited_profit());
        assert!(approx_eq(risk.max_loss.unwrap(), -10_000.0, 1e-9));
    }

    #[test]
    fn test_covered_call_is_bounded_above() {
        let strategy = StrategyBuilder::default().covered_call(dec!(110)).unwrap();
        let risk = profile(&strategy.legs, &RiskConfig::default());
        assert!(risk.max_profit.is_some());
        assert!(risk.max_loss.is_some());
    }

    #[test]
    fn test_iron_condor_bounded_both_sides() {
        let strategy = StrategyBuilder::default()
            .iron_condor(dec!(85), dec!(90), dec!(110), dec!(115))
            .unwrap();
        let m = market();
        let credit = -net_entry_cost(&strategy.legs, &m).unwrap() * 100.0;
        let risk = profile(&strategy.legs, &RiskConfig::default());

        assert!(approx_eq(risk.max_profit.unwrap(), credit, 1e-9));
        assert!(approx_eq(risk.max_loss.unwrap(), credit - 500.0, 1e-9));
        assert_eq!(risk.breakevens.len(), 2);
        assert!(risk.reward_to_risk().unwrap() > 0.0);
    }

    #[test]
    fn test_extremes_outside_sampled_range_found() {
        // Short put struck far below the sampled range still has a real max loss at 0
        let legs = [OptionLeg::put(LegDirection::Short, dec!(40), 1)];
        let risk = profile(&legs, &RiskConfig::default());
        let premium = net_entry_cost(&legs, &market()).unwrap();
        assert!(approx_eq(risk.max_loss.unwrap(), (premium - 40.0) * 100.0, 1e-9));
    }

    #[test]
    fn test_sampled_threshold_mode() {
        let legs = [OptionLeg::call(LegDirection::Long, dec!(100), 1)];
        let threshold = RiskConfig {
            bounds_mode: BoundsMode::SampledThreshold {
                threshold: DEFAULT_UNLIMITED_THRESHOLD,
            },
            ..RiskConfig::default()
        };
        let risk = profile(&legs, &threshold);
        // The sampled ceiling is far below the threshold, so it is reported as-is
        assert!(risk.max_profit.is_some());

        let big = [OptionLeg::call(LegDirection::Long, dec!(100), 1000)];
        let risk = profile(&big, &threshold);
        assert!(risk.has_unlimited_profit());
    }

    #[test]
    fn test_terminal_slope() {
        let priced = [
            PricedLeg {
                leg_type: LegType::Call,
                direction: LegDirection::Long,
                strike: 100.0,
                quantity: 2,
                entry_price: 1.0,
            },
            PricedLeg {
                leg_type: LegType::Call,
                direction: LegDirection::Short,
                strike: 110.0,
                quantity: 3,
                entry_price: 0.5,
            },
            PricedLeg {
                leg_type: LegType::Put,
                direction: LegDirection::Long,
                strike: 90.0,
                quantity: 5,
                entry_price: 0.5,
            },
        ];
        assert_eq!(terminal_slope(&priced, 100.0), -100.0);
    }

    #[test]
    fn test_empty_inputs() {
        let legs = [OptionLeg::call(LegDirection::Long, dec!(100), 1)];
        let err = summarize(&[], &legs, &market(), &RiskConfig::default()).unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::DegenerateRange);

        let curve = [PlDataPoint::new(100.0, 0.0)];
        assert_eq!(
            summarize(&curve, &[], &market(), &RiskConfig::default()).unwrap_err(),
            PricingError::EmptyStrategy
        );
    }

    #[test]
    fn test_bounds_mode_serde() {
        let mode: BoundsMode =
            serde_json::from_str(r#"{"mode":"sampled_threshold","threshold":1000000.0}"#).unwrap();
        assert_eq!(
            mode,
            BoundsMode::SampledThreshold {
                threshold: 1_000_000.0
            }
        );
        let analytic: BoundsMode = serde_json::from_str(r#"{"mode":"analytic"}"#).unwrap();
        assert_eq!(analytic, BoundsMode::Analytic);
    }
}
