use crate::common::math;

/// Percent change between the latest close and the close `lookback` candles
/// earlier. 0 when the series is too short or the base close is zero.
pub fn calculate_price_change(closes: &[f64], lookback: usize) -> f64 {
    if lookback == 0 || closes.len() <= lookback {
        return 0.0;
    }
    let latest = closes[closes.len() - 1];
    let base = closes[closes.len() - 1 - lookback];
    math::pct_change(base, latest)
}
