//! Market scenarios run through the full indicator and scoring pipeline

use chrono::{Duration, TimeZone, Utc};
use sigscan::models::indicators::Candle;
use sigscan::models::signal::{SignalContext, SignalTier};
use sigscan::signals::categories::{advanced_profile, classic_profile};
use sigscan::signals::engine::SignalEngine;

fn candles_from(closes: &[f64], volumes: &[f64], spread: f64) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&close, &volume))| {
            Candle::new(
                close,
                close * (1.0 + spread),
                close * (1.0 - spread),
                close,
                volume,
                start + Duration::minutes(5 * i as i64),
            )
        })
        .collect()
}

/// 15 flat candles, a breakout to 100, then a steady 1% decline; the last
/// candle trades `spike` times the usual volume
fn breakout_pullback(spike: f64) -> Vec<Candle> {
    let mut closes = vec![50.0; 15];
    closes.extend((0..15).map(|k| 100.0 * 0.99f64.powi(k)));
    let mut volumes = vec![1000.0; 29];
    volumes.push(1000.0 * spike);
    candles_from(&closes, &volumes, 0.02)
}

fn flat_market() -> Vec<Candle> {
    candles_from(&[100.0; 30], &[1000.0; 30], 0.0)
}

#[test]
fn test_breakout_pullback_with_volume_spike_is_strong() {
    let engine = SignalEngine::from_profile(&advanced_profile()).unwrap();
    let (signal, indicators) = engine
        .evaluate_with_indicators("SOLUSDT", &breakout_pullback(5.0), SignalContext::now(1))
        .unwrap();

    assert!(indicators.rsi < 30.0);
    assert!(indicators.ema_fast > indicators.ema_slow);

    let signal = signal.expect("signal expected");
    assert_eq!(signal.tier, SignalTier::Strong);
    assert!(signal.conditions.iter().any(|c| c == "Uptrend"));
    assert!(signal.conditions.iter().any(|c| c == "Very High Volume"));
    assert_eq!(signal.confidence, 90);
}

#[test]
fn test_breakout_pullback_tier_follows_volume() {
    let engine = SignalEngine::from_profile(&advanced_profile()).unwrap();

    let moderate = engine
        .evaluate("SOLUSDT", &breakout_pullback(1.6), SignalContext::now(1))
        .unwrap();
    assert_eq!(moderate.confidence, 80);
    assert_eq!(moderate.tier, SignalTier::Moderate);

    let weak = engine
        .evaluate("SOLUSDT", &breakout_pullback(1.0), SignalContext::now(1))
        .unwrap();
    assert_eq!(weak.confidence, 70);
    assert_eq!(weak.tier, SignalTier::Weak);
}

#[test]
fn test_breakout_pullback_classic_profile() {
    let engine = SignalEngine::from_profile(&classic_profile()).unwrap();
    let signal = engine
        .evaluate("SOLUSDT", &breakout_pullback(5.0), SignalContext::now(1))
        .unwrap();

    // the 4-candle decline is below -2%, so no momentum points
    assert_eq!(signal.confidence, 60);
    assert_eq!(signal.tier, SignalTier::Moderate);
    assert!(!signal.conditions.iter().any(|c| c == "Good Momentum"));
}

#[test]
fn test_flat_market_yields_no_signal() {
    for profile in [advanced_profile(), classic_profile()] {
        let engine = SignalEngine::from_profile(&profile).unwrap();
        let (signal, indicators) = engine
            .evaluate_with_indicators("XRPUSDT", &flat_market(), SignalContext::now(1))
            .unwrap();
        assert_eq!(indicators.rsi, 50.0);
        assert!(signal.is_none(), "profile {}", profile.name);
    }
}
