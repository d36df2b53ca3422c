//! Candle-range volatility

use crate::common::math;
use crate::models::indicators::Candle;

/// Average high-low range of the trailing `window` candles as a percentage of
/// `price`.
///
/// Unlike ATR this ignores gaps against the previous close; it measures the
/// typical intra-candle swing.
pub fn calculate_volatility(candles: &[Candle], window: usize, price: f64) -> f64 {
    if candles.is_empty() || window == 0 || price <= 0.0 {
        return 0.0;
    }

    let start = candles.len().saturating_sub(window);
    let ranges: Vec<f64> = candles[start..].iter().map(Candle::range).collect();
    match math::mean(&ranges) {
        Some(avg_range) => (avg_range / price * 100.0).max(0.0),
        None => 0.0,
    }
}
