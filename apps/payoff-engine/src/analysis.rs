//! End-to-end strategy analysis.
//!
//! Runs the whole pipeline for one set of legs: price every leg, compute
//! net cost and Greeks, sample the expiration and T+0 curves, then derive
//! breakevens and max profit/loss.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{EngineConfig, PricingConfig};
use crate::error::{PricingError, PricingResult};
use crate::market::MarketParameters;
use crate::payoff::{
    PlDataPoint, RiskProfile, generate_curve_priced, generate_value_curve, summarize_priced,
};
use crate::pricing::Greeks;
use crate::strategy::{OptionLeg, leg_greeks, net_entry_cost_of, price_legs};

/// Market inputs as supplied by a caller.
///
/// Rate and yield may be omitted; [`MarketInput::resolve`] fills them from
/// [`PricingConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketInput {
    /// Spot price of the underlying.
    pub spot: f64,
    /// Time to expiration in years.
    pub time_to_expiry: f64,
    /// Annualized volatility.
    pub volatility: f64,
    /// Risk-free rate; configured default when absent.
    #[serde(default)]
    pub risk_free_rate: Option<f64>,
    /// Dividend yield; configured default when absent.
    #[serde(default)]
    pub dividend_yield: Option<f64>,
}

impl MarketInput {
    /// Fill missing rate and yield from configuration.
    #[must_use]
    pub fn resolve(&self, pricing: &PricingConfig) -> MarketParameters {
        MarketParameters::new(
            self.spot,
            self.time_to_expiry,
            self.volatility,
            self.risk_free_rate.unwrap_or(pricing.risk_free_rate),
            self.dividend_yield.unwrap_or(pricing.dividend_yield),
        )
    }
}

impl From<MarketParameters> for MarketInput {
    fn from(market: MarketParameters) -> Self {
        Self {
            spot: market.spot,
            time_to_expiry: market.time_to_expiry,
            volatility: market.volatility,
            risk_free_rate: Some(market.risk_free_rate),
            dividend_yield: Some(market.dividend_yield),
        }
    }
}

/// An analysis request: one market and the strategy's legs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Market inputs.
    pub market: MarketInput,
    /// Strategy legs.
    pub legs: Vec<OptionLeg>,
}

impl AnalysisRequest {
    /// Resolve the market against `config` and run [`analyze`].
    ///
    /// # Errors
    ///
    /// Same as [`analyze`].
    pub fn run(&self, config: &EngineConfig) -> PricingResult<StrategyAnalysis> {
        let market = self.market.resolve(&config.pricing);
        analyze(&self.legs, &market, config)
    }
}

/// Everything computed for one strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyAnalysis {
    /// Market the strategy was analysed against.
    pub market: MarketParameters,
    /// Net entry cost per share (positive = debit).
    pub net_entry_cost: f64,
    /// Net debit (positive) or credit (negative) in currency.
    pub net_debit: f64,
    /// Per-share theoretical price of each leg, in leg order.
    pub leg_prices: Vec<f64>,
    /// Per-share Greeks of each leg; `None` for option legs at expiration.
    pub leg_greeks: Vec<Option<Greeks>>,
    /// Position Greeks in currency terms; `None` if any leg has none.
    pub position_greeks: Option<Greeks>,
    /// P/L at expiration across the sampled price range.
    pub curve: Vec<PlDataPoint>,
    /// P/L marked at theoretical value with the current time to expiry.
    pub value_curve: Option<Vec<PlDataPoint>>,
    /// Max profit, max loss and breakevens.
    pub risk: RiskProfile,
}

/// Analyse a strategy.
///
/// # Errors
///
/// - `EmptyStrategy` if `legs` is empty
/// - `InvalidParameter` if the market or any leg is invalid
/// - `DegenerateRange` if the configured sampling collapses
pub fn analyze(
    legs: &[OptionLeg],
    market: &MarketParameters,
    config: &EngineConfig,
) -> PricingResult<StrategyAnalysis> {
    analyze_inner(legs, market, config).inspect_err(|e| {
        warn!(code = %e.code(), error = %e, legs = legs.len(), "strategy analysis rejected");
    })
}

fn analyze_inner(
    legs: &[OptionLeg],
    market: &MarketParameters,
    config: &EngineConfig,
) -> PricingResult<StrategyAnalysis> {
    let curve_config = config.curve_config();
    let risk_config = config.risk_config();
    let multiplier = config.pricing.contract_multiplier;
    curve_config.validate()?;

    let priced = price_legs(legs, market)?;
    let net_entry_cost = net_entry_cost_of(&priced);
    let net_debit = net_entry_cost * multiplier;
    debug!(
        legs = priced.len(),
        spot = market.spot,
        net_entry_cost,
        net_debit,
        "priced strategy legs"
    );

    let leg_greeks = legs
        .iter()
        .map(|leg| match leg_greeks(leg, market) {
            Ok(g) => Ok(Some(g)),
            Err(PricingError::UndefinedAtExpiration { .. }) => Ok(None),
            Err(e) => Err(e),
        })
        .collect::<PricingResult<Vec<_>>>()?;

    let position_greeks = legs
        .iter()
        .zip(&leg_greeks)
        .try_fold(Greeks::zero(), |acc, (leg, &per_share)| {
            let scale = leg.direction.sign() * f64::from(leg.quantity) * multiplier;
            per_share.map(|g| acc.add(&g.scale(scale)))
        });

    let curve = generate_curve_priced(&priced, market.spot, &curve_config)?;
    let value_curve = if config.payoff.include_value_curve {
        Some(generate_value_curve(legs, market, &curve_config)?)
    } else {
        None
    };

    let risk = summarize_priced(&curve, &priced, &risk_config)?;
    debug!(
        max_profit = ?risk.max_profit,
        max_loss = ?risk.max_loss,
        breakevens = risk.breakevens.len(),
        "summarized strategy risk"
    );

    Ok(StrategyAnalysis {
        market: *market,
        net_entry_cost,
        net_debit,
        leg_prices: priced.iter().map(|leg| leg.entry_price).collect(),
        leg_greeks,
        position_greeks,
        curve,
        value_curve,
        risk,
    })
}
