//! Numeric helpers shared by the indicators

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean of the trailing `period` values; `None` with fewer than `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    mean(&values[values.len() - period..])
}

/// Exponentially weighted mean at every point, bias-corrected.
///
/// `y[t] = Σ (1-α)^i · x[t-i] / Σ (1-α)^i` over all `i ≤ t`, with `α = 2/(span+1)`.
/// Numerator and denominator are carried recursively.
pub fn ewm_adjusted(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);
    let decay = 1.0 - alpha;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    values
        .iter()
        .map(|&x| {
            numerator = x + decay * numerator;
            denominator = 1.0 + decay * denominator;
            numerator / denominator
        })
        .collect()
}

/// Latest value of [`ewm_adjusted`]
pub fn ewm_last(values: &[f64], span: usize) -> Option<f64> {
    ewm_adjusted(values, span).last().copied()
}

/// Percent change from `base` to `value`; 0 when `base` is zero or non-finite.
pub fn pct_change(base: f64, value: f64) -> f64 {
    if base == 0.0 || !base.is_finite() {
        return 0.0;
    }
    (value - base) / base * 100.0
}
