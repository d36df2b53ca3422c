//! RSI (Relative Strength Index) indicator
//!
//! Gains and losses are averaged with a simple moving average over the
//! trailing `period` price changes. This is not Wilder's recursive smoothing,
//! so values differ from the textbook RSI on the same data.

/// Reading used when there is not enough history or no price movement
pub const NEUTRAL_RSI: f64 = 50.0;

const EPSILON: f64 = 1e-10;

/// Calculate RSI over the trailing `period` changes of `closes`
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / (Average Loss + ε)
pub fn calculate_rsi(closes: &[f64], period: usize) -> f64 {
    if period == 0 || closes.len() < period + 1 {
        return NEUTRAL_RSI;
    }

    let window = &closes[closes.len() - period - 1..];
    let (gain_sum, loss_sum) = window.windows(2).fold((0.0, 0.0), |(gains, losses), pair| {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            (gains + change, losses)
        } else {
            (gains, losses - change)
        }
    });

    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;

    // Flat window: without this branch RS = 0/ε = 0 and the reading would be 0
    if avg_gain == 0.0 && avg_loss == 0.0 {
        return NEUTRAL_RSI;
    }

    let rs = avg_gain / (avg_loss + EPSILON);
    (100.0 - (100.0 / (1.0 + rs))).clamp(0.0, 100.0)
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(closes: &[f64]) -> f64 {
    calculate_rsi(closes, 14)
}

/// RSI recomputed independently over every trailing window of `period`
/// changes, oldest first. Yields `closes.len() - period` samples.
pub fn rsi_samples(closes: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || closes.len() <= period {
        return Vec::new();
    }

    (period..closes.len())
        .map(|end| calculate_rsi(&closes[end - period..=end], period))
        .collect()
}
