//! Unit tests for scoring profile models

use sigscan::error::ConfigError;
use sigscan::models::indicators::IndicatorSet;
use sigscan::models::signal::SignalTier;
use sigscan::models::strategy::{Condition, Metric, ScoringProfile, TierThresholds};
use sigscan::signals::categories::{advanced_profile, classic_profile};

const MINIMAL_PROFILE: &str = r#"{
    "name": "rsi-only",
    "categories": [
        {
            "category": "oscillator",
            "cap": 30,
            "groups": [
                { "tiers": [
                    { "condition": { "type": "below", "metric": "rsi", "threshold": 30.0 },
                      "points": 30, "label": "RSI Oversold" }
                ] }
            ]
        }
    ],
    "tiers": { "minimum": 10, "moderate": 20, "strong": 30 }
}"#;

#[test]
fn test_condition_below_and_above() {
    let mut set = IndicatorSet::neutral(100.0);
    set.rsi = 29.9;
    assert!(Condition::Below { metric: Metric::Rsi, threshold: 30.0 }.holds(&set));
    assert!(!Condition::Above { metric: Metric::Rsi, threshold: 30.0 }.holds(&set));
}

#[test]
fn test_condition_between_is_exclusive() {
    let mut set = IndicatorSet::neutral(100.0);
    let between = Condition::Between { metric: Metric::Volatility, low: 2.0, high: 10.0 };

    set.volatility = 2.0;
    assert!(!between.holds(&set));
    set.volatility = 10.0;
    assert!(!between.holds(&set));
    set.volatility = 5.0;
    assert!(between.holds(&set));
}

#[test]
fn test_condition_missing_metric_never_holds() {
    let set = IndicatorSet::neutral(100.0);
    assert!(set.sma_mid.is_none());
    assert!(!Condition::Exceeds { left: Metric::EmaSlow, right: Metric::SmaMid }.holds(&set));
    assert!(!Condition::Exceeds { left: Metric::SmaMid, right: Metric::EmaSlow }.holds(&set));
    assert!(!Condition::Below { metric: Metric::MacdHistogramPrev, threshold: 1e9 }.holds(&set));
}

#[test]
fn test_tier_classification() {
    let tiers = TierThresholds { minimum: 65, moderate: 75, strong: 85 };
    assert_eq!(tiers.classify(64), None);
    assert_eq!(tiers.classify(65), Some(SignalTier::Weak));
    assert_eq!(tiers.classify(74), Some(SignalTier::Weak));
    assert_eq!(tiers.classify(75), Some(SignalTier::Moderate));
    assert_eq!(tiers.classify(85), Some(SignalTier::Strong));
    assert_eq!(tiers.classify(130), Some(SignalTier::Strong));
}

#[test]
fn test_tier_thresholds_must_increase() {
    let tiers = TierThresholds { minimum: 70, moderate: 70, strong: 85 };
    assert!(matches!(tiers.validate(), Err(ConfigError::Profile(_))));
}

#[test]
fn test_profile_from_json() {
    let profile = ScoringProfile::from_json(MINIMAL_PROFILE).unwrap();
    assert_eq!(profile.name, "rsi-only");
    assert_eq!(profile.indicators.rsi_period, 14);
    assert_eq!(profile.max_points(), 30);
    assert!(!profile.categories[0].groups[0].requires_previous);
}

#[test]
fn test_profile_from_invalid_json() {
    assert!(matches!(
        ScoringProfile::from_json("{ not json"),
        Err(ConfigError::Profile(_))
    ));
}

#[test]
fn test_profile_rejects_gated_first_group() {
    let json = MINIMAL_PROFILE.replace(
        r#"{ "tiers": ["#,
        r#"{ "requires_previous": true, "tiers": ["#,
    );
    assert!(matches!(ScoringProfile::from_json(&json), Err(ConfigError::Profile(_))));
}

#[test]
fn test_profile_rejects_zero_period() {
    let json = MINIMAL_PROFILE.replace(
        r#""name": "rsi-only","#,
        r#""name": "rsi-only", "indicators": { "rsi_period": 0 },"#,
    );
    assert!(matches!(ScoringProfile::from_json(&json), Err(ConfigError::Profile(_))));
}

#[test]
fn test_builtin_profiles_max_points() {
    assert_eq!(advanced_profile().max_points(), 130);
    assert_eq!(classic_profile().max_points(), 70);
}

#[test]
fn test_builtin_profile_loads_from_its_json() {
    let json = serde_json::to_string_pretty(&advanced_profile()).unwrap();
    let profile = ScoringProfile::from_json(&json).unwrap();
    assert_eq!(profile, advanced_profile());
}
