//! EMA (Exponential Moving Average) indicator

use crate::common::math;

/// Latest bias-corrected EMA for `span`; `None` for an empty series
pub fn calculate_ema(closes: &[f64], span: usize) -> Option<f64> {
    math::ewm_last(closes, span)
}
