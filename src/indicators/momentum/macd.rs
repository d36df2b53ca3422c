//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdReading {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    /// Histogram one candle earlier
    pub previous_histogram: Option<f64>,
}

/// Calculate MACD indicator
///
/// MACD = EMA(fast) - EMA(slow), evaluated at every candle
/// Signal = EMA(signal) of the MACD series
/// Histogram = MACD - Signal
pub fn calculate_macd(
    closes: &[f64],
    fast_span: usize,
    slow_span: usize,
    signal_span: usize,
) -> Option<MacdReading> {
    if closes.is_empty() {
        return None;
    }

    let fast = math::ewm_adjusted(closes, fast_span);
    let slow = math::ewm_adjusted(closes, slow_span);
    let macd_line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal_line = math::ewm_adjusted(&macd_line, signal_span);

    let histogram: Vec<f64> = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();

    let last = histogram.len() - 1;
    Some(MacdReading {
        macd: macd_line[last],
        signal: signal_line[last],
        histogram: histogram[last],
        previous_histogram: last.checked_sub(1).map(|i| histogram[i]),
    })
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(closes: &[f64]) -> Option<MacdReading> {
    calculate_macd(closes, 12, 26, 9)
}
