//! Breakeven solver.
//!
//! Scans adjacent curve points for a sign change and linearly interpolates
//! the zero crossing. The crossing test is inclusive on the left point only:
//!
//! ```text
//! (p1 <= 0 && p2 > 0) || (p1 >= 0 && p2 < 0)
//! ```
//!
//! Because the right side is strict, a segment with both ends at zero never
//! matches and the interpolation denominator `|p1| + |p2|` is never zero.
//! Crossings closer than `epsilon` to the previous one are dropped.

use super::curve::PlDataPoint;

/// Default minimum distance between two reported breakevens.
pub const DEFAULT_BREAKEVEN_EPSILON: f64 = 1e-6;

fn crosses(p1: f64, p2: f64) -> bool {
    (p1 <= 0.0 && p2 > 0.0) || (p1 >= 0.0 && p2 < 0.0)
}

/// Find breakeven prices with the default dedupe epsilon.
#[must_use]
pub fn find_breakevens(curve: &[PlDataPoint]) -> Vec<f64> {
    find_breakevens_with_epsilon(curve, DEFAULT_BREAKEVEN_EPSILON)
}

/// Find breakeven prices in an ascending curve.
///
/// Returns interpolated prices in ascending order with near-duplicates
/// (within `epsilon`) removed.
#[must_use]
pub fn find_breakevens_with_epsilon(curve: &[PlDataPoint], epsilon: f64) -> Vec<f64> {
    let mut breakevens: Vec<f64> = Vec::new();

    for pair in curve.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if !crosses(a.pnl, b.pnl) {
            continue;
        }

        let fraction = a.pnl.abs() / (a.pnl.abs() + b.pnl.abs());
        let price = a.price + fraction * (b.price - a.price);

        if breakevens
            .last()
            .is_none_or(|&last| (price - last).abs() > epsilon)
        {
            breakevens.push(price);
        }
    }

    breakevens
}
