//! Unit tests for shared numeric helpers

use sigscan::common::math::{ewm_adjusted, ewm_last, mean, pct_change, sma};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_mean_empty_is_none() {
    assert!(mean(&[]).is_none());
}

#[test]
fn test_mean_of_values() {
    assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
}

#[test]
fn test_sma_uses_trailing_window() {
    assert_eq!(sma(&[1.0, 2.0, 3.0, 4.0], 2), Some(3.5));
}

#[test]
fn test_sma_insufficient_data() {
    assert!(sma(&[1.0, 2.0], 3).is_none());
    assert!(sma(&[1.0, 2.0], 0).is_none());
}

#[test]
fn test_ewm_span_one_tracks_input() {
    let values = [3.0, 7.0, 1.0];
    assert_eq!(ewm_adjusted(&values, 1), values.to_vec());
}

#[test]
fn test_ewm_adjusted_weights() {
    // span 3 -> alpha 0.5: y1 = (2 + 0.5 * 1) / (1 + 0.5)
    let out = ewm_adjusted(&[1.0, 2.0], 3);
    assert_eq!(out.len(), 2);
    assert!(approx(out[0], 1.0));
    assert!(approx(out[1], 2.5 / 1.5));
}

#[test]
fn test_ewm_constant_series() {
    let values = vec![42.0; 30];
    let last = ewm_last(&values, 21).unwrap();
    assert!(approx(last, 42.0));
}

#[test]
fn test_ewm_last_empty() {
    assert!(ewm_last(&[], 8).is_none());
}

#[test]
fn test_pct_change() {
    assert!(approx(pct_change(100.0, 110.0), 10.0));
    assert!(approx(pct_change(100.0, 95.0), -5.0));
}

#[test]
fn test_pct_change_zero_base() {
    assert_eq!(pct_change(0.0, 5.0), 0.0);
    assert_eq!(pct_change(f64::NAN, 5.0), 0.0);
}
