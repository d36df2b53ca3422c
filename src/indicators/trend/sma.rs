//! SMA (Simple Moving Average) indicator

use crate::common::math;

/// Mean of the trailing `window` closes; missing with fewer than `window` closes
pub fn calculate_sma(closes: &[f64], window: usize) -> Option<f64> {
    math::sma(closes, window)
}
