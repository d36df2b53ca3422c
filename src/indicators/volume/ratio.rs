use crate::common::math;

/// Neutral ratio, used when there is no average volume to compare against
pub const NEUTRAL_VOLUME_RATIO: f64 = 1.0;

/// Latest volume relative to the mean of the trailing `window` volumes
/// (latest included).
pub fn calculate_volume_ratio(volumes: &[f64], window: usize) -> f64 {
    let Some(&current) = volumes.last() else {
        return NEUTRAL_VOLUME_RATIO;
    };
    if window == 0 {
        return NEUTRAL_VOLUME_RATIO;
    }

    let start = volumes.len().saturating_sub(window);
    match math::mean(&volumes[start..]) {
        Some(avg) if avg > 0.0 => (current / avg).max(0.0),
        _ => NEUTRAL_VOLUME_RATIO,
    }
}
