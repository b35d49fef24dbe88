//! Property-based tests using proptest
//!
//! These tests verify pricing and payoff invariants over randomized inputs.

// Allow unwrap in tests - tests should panic on unexpected errors
#![allow(clippy::unwrap_used, clippy::float_cmp)]

use payoff_engine::payoff::{
    CurveConfig, PlDataPoint, find_breakevens, generate_curve, generate_value_curve,
};
use payoff_engine::pricing::{OptionType, greeks, intrinsic_value, price};
use payoff_engine::strategy::leg_entry_price;
use payoff_engine::{LegDirection, MarketParameters, OptionLeg};
use proptest::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// Strategies
// =============================================================================

/// Valid Black-Scholes inputs: (S, K, T, sigma, r, q).
fn bs_inputs() -> impl Strategy<Value = (f64, f64, f64, f64, f64, f64)> {
    (
        10.0f64..500.0,
        10.0f64..500.0,
        0.01f64..3.0,
        0.05f64..1.0,
        -0.02f64..0.10,
        0.0f64..0.08,
    )
}

fn option_type() -> impl Strategy<Value = OptionType> {
    prop_oneof![Just(OptionType::Call), Just(OptionType::Put)]
}

fn direction() -> impl Strategy<Value = LegDirection> {
    prop_oneof![Just(LegDirection::Long), Just(LegDirection::Short)]
}

// =============================================================================
// Pricer properties
// =============================================================================

proptest! {
    #[test]
    fn prop_put_call_parity((s, k, t, sigma, r, q) in bs_inputs()) {
        let call = price(s, k, t, sigma, r, q, OptionType::Call).unwrap();
        let put = price(s, k, t, sigma, r, q, OptionType::Put).unwrap();
        let forward = s * (-q * t).exp() - k * (-r * t).exp();

        prop_assert!((call - put - forward).abs() < 1e-6 * s.max(k));
    }

    #[test]
    fn prop_price_is_non_negative((s, k, t, sigma, r, q) in bs_inputs(), kind in option_type()) {
        let value = price(s, k, t, sigma, r, q, kind).unwrap();
        prop_assert!(value.is_finite());
        prop_assert!(value >= 0.0, "price {} < 0", value);
    }

    #[test]
    fn prop_price_converges_to_intrinsic(
        s in 10.0f64..500.0,
        k in 10.0f64..500.0,
        sigma in 0.05f64..1.0,
        kind in option_type(),
    ) {
        let t = 1e-10;
        let value = price(s, k, t, sigma, 0.05, 0.0, kind).unwrap();
        // Remaining time value is at most about 0.4 * S * sigma * sqrt(T)
        let tolerance = s * sigma * t.sqrt() + 1e-9;
        prop_assert!((value - intrinsic_value(s, k, kind)).abs() < tolerance);
    }

    #[test]
    fn prop_delta_bounds((s, k, t, sigma, r, q) in bs_inputs()) {
        let call = greeks(s, k, t, sigma, r, q, OptionType::Call).unwrap();
        let put = greeks(s, k, t, sigma, r, q, OptionType::Put).unwrap();

        prop_assert!((0.0..=1.0).contains(&call.delta));
        prop_assert!((-1.0..=0.0).contains(&put.delta));
    }

    #[test]
    fn prop_gamma_and_vega_shared((s, k, t, sigma, r, q) in bs_inputs()) {
        let call = greeks(s, k, t, sigma, r, q, OptionType::Call).unwrap();
        let put = greeks(s, k, t, sigma, r, q, OptionType::Put).unwrap();

        prop_assert!((call.gamma - put.gamma).abs() < 1e-12);
        prop_assert!((call.vega - put.vega).abs() < 1e-12);
        prop_assert!(call.gamma >= 0.0);
    }
}

// =============================================================================
// Payoff properties
// =============================================================================

proptest! {
    #[test]
    fn prop_curve_has_point_count_ascending(
        spot in 1.0f64..1000.0,
        strike in 1u32..1500,
        points in 2usize..400,
        range in 0.05f64..2.0,
        kind in option_type(),
        dir in direction(),
    ) {
        let market = MarketParameters::new(spot, 0.25, 0.3, 0.05, 0.0);
        let leg = OptionLeg::new(kind.into(), dir, Decimal::from(strike), 1, String::new());
        let config = CurveConfig::default().with_point_count(points).with_range_factor(range);

        let curve = generate_curve(&[leg], &market, &config).unwrap();

        prop_assert_eq!(curve.len(), points);
        prop_assert!(curve.windows(2).all(|w| w[0].price < w[1].price));
        prop_assert!(curve[0].price >= 0.0);
        prop_assert!(curve.iter().all(|p| p.pnl.is_finite()));
    }

    #[test]
    fn prop_single_crossing_single_breakeven(
        low in -1000.0f64..-0.001,
        high in 0.001f64..1000.0,
        a in 1.0f64..200.0,
        width in 0.01f64..50.0,
        rising in any::<bool>(),
    ) {
        let b = a + width;
        let (p1, p2) = if rising { (low, high) } else { (high, low) };
        let curve = [PlDataPoint::new(a, p1), PlDataPoint::new(b, p2)];

        let breakevens = find_breakevens(&curve);

        prop_assert_eq!(breakevens.len(), 1);
        prop_assert!(breakevens[0] > a && breakevens[0] < b);
    }

    #[test]
    fn prop_long_call_tail_matches_pricer(
        spot in 20.0f64..500.0,
        moneyness in 0.5f64..1.5,
        quantity in 1u32..20,
    ) {
        let strike = Decimal::from((spot * moneyness).round() as u32).max(Decimal::ONE);
        let market = MarketParameters::new(spot, 0.25, 0.3, 0.05, 0.0);
        let leg = OptionLeg::call(LegDirection::Long, strike, quantity);
        let entry = leg_entry_price(&leg, &market).unwrap();
        let k = leg.strike_f64().unwrap();

        let config = CurveConfig::default().with_range_factor(3.0);
        let curve = generate_curve(&[leg], &market, &config).unwrap();

        let last = curve[curve.len() - 1];
        if last.price > k {
            let expected = (last.price - k - entry) * f64::from(quantity) * 100.0;
            prop_assert!((last.pnl - expected).abs() < 1e-6 * expected.abs().max(1.0));
        }
    }

    #[test]
    fn prop_value_curve_converges_at_expiry(
        spot in 20.0f64..500.0,
        strike in 20u32..500,
        kind in option_type(),
        dir in direction(),
    ) {
        let market = MarketParameters::new(spot, 0.5, 0.3, 0.05, 0.0);
        let leg = OptionLeg::new(kind.into(), dir, Decimal::from(strike), 1, String::new());
        let config = CurveConfig::default();

        // The value curve prices entry at its own market; shift by the entry difference
        let expiry_curve = generate_curve(std::slice::from_ref(&leg), &market, &config).unwrap();
        let near_expiry = market.with_time_to_expiry(1e-14);
        let value_curve = generate_value_curve(std::slice::from_ref(&leg), &near_expiry, &config).unwrap();
        let entry_live = leg_entry_price(&leg, &market).unwrap();
        let entry_near = leg_entry_price(&leg, &near_expiry).unwrap();
        let offset = dir.sign() * (entry_live - entry_near) * 100.0;

        for (e, v) in expiry_curve.iter().zip(&value_curve) {
            prop_assert!((e.price - v.price).abs() < 1e-9);
            prop_assert!((e.pnl - (v.pnl - offset)).abs() < 1e-2, "{} vs {}", e.pnl, v.pnl - offset);
        }
    }
}
