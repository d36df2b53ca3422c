//! Stochastic RSI indicator

use super::rsi::{rsi_samples, NEUTRAL_RSI};

/// Position of the latest RSI inside the min/max range of the last `period`
/// RSI samples, scaled to 0-100.
pub fn calculate_stoch_rsi(closes: &[f64], period: usize) -> f64 {
    let samples = rsi_samples(closes, period);
    stoch_from_samples(&samples, period)
}

/// Normalize the latest sample against the trailing `period` samples.
///
/// Returns 50 with fewer than `period` samples or a constant window.
pub fn stoch_from_samples(samples: &[f64], period: usize) -> f64 {
    if period == 0 || samples.len() < period {
        return NEUTRAL_RSI;
    }

    let recent = &samples[samples.len() - period..];
    let min = recent.iter().copied().fold(f64::INFINITY, f64::min);
    let max = recent.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return NEUTRAL_RSI;
    }

    let latest = recent[recent.len() - 1];
    ((latest - min) / (max - min) * 100.0).clamp(0.0, 100.0)
}
