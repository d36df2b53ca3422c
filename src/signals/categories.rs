//! Built-in scoring profiles

use crate::error::ConfigError;
use crate::models::strategy::{
    Condition, IndicatorParams, Metric, RuleCategory, RuleGroup, RuleTier, ScoreCategory,
    ScoringProfile, TierThresholds,
};

pub const ADVANCED: &str = "advanced";
pub const CLASSIC: &str = "classic";

/// Look up a built-in profile by name
pub fn profile_by_name(name: &str) -> Result<ScoringProfile, ConfigError> {
    match name.trim().to_ascii_lowercase().as_str() {
        ADVANCED => Ok(advanced_profile()),
        CLASSIC => Ok(classic_profile()),
        other => Err(ConfigError::Profile(format!("unknown scoring profile '{}'", other))),
    }
}

/// Five-category table with gated trend confirmations.
///
/// Tiers: weak ≥ 65, moderate ≥ 75, strong ≥ 85.
pub fn advanced_profile() -> ScoringProfile {
    ScoringProfile {
        name: ADVANCED.to_string(),
        indicators: IndicatorParams::default(),
        categories: vec![
            RuleCategory {
                category: ScoreCategory::Oscillator,
                cap: 45,
                groups: vec![
                    RuleGroup::new(vec![
                        RuleTier::new(below(Metric::Rsi, 25.0), 25, "RSI Extremely Oversold (<25)"),
                        RuleTier::new(below(Metric::Rsi, 30.0), 20, "RSI Oversold (25-30)"),
                        RuleTier::new(below(Metric::Rsi, 35.0), 15, "RSI Low (30-35)"),
                    ]),
                    RuleGroup::new(vec![
                        RuleTier::new(below(Metric::StochRsi, 20.0), 20, "Stoch RSI Oversold (<20)"),
                        RuleTier::new(below(Metric::StochRsi, 30.0), 15, "Stoch RSI Low (20-30)"),
                    ]),
                ],
            },
            RuleCategory {
                category: ScoreCategory::Trend,
                cap: 40,
                groups: vec![
                    RuleGroup::new(vec![RuleTier::new(
                        exceeds(Metric::EmaFast, Metric::EmaSlow),
                        15,
                        "Uptrend",
                    )]),
                    RuleGroup::gated(vec![RuleTier::new(
                        exceeds(Metric::EmaSlow, Metric::SmaMid),
                        10,
                        "Strong Trend",
                    )]),
                    RuleGroup::new(vec![RuleTier::new(
                        above(Metric::MacdHistogram, 0.0),
                        10,
                        "MACD Positive",
                    )]),
                    RuleGroup::gated(vec![RuleTier::new(
                        exceeds(Metric::MacdHistogram, Metric::MacdHistogramPrev),
                        5,
                        "MACD Improving",
                    )]),
                ],
            },
            RuleCategory {
                category: ScoreCategory::Volume,
                cap: 20,
                groups: vec![RuleGroup::new(vec![
                    RuleTier::new(above(Metric::VolumeRatio, 3.0), 20, "Very High Volume"),
                    RuleTier::new(above(Metric::VolumeRatio, 2.0), 15, "High Volume"),
                    RuleTier::new(above(Metric::VolumeRatio, 1.5), 10, "Good Volume"),
                ])],
            },
            RuleCategory {
                category: ScoreCategory::Momentum,
                cap: 15,
                groups: vec![
                    RuleGroup::new(vec![
                        RuleTier::new(
                            above(Metric::PriceChangeShort, 1.0),
                            10,
                            "Strong Short-Term Momentum",
                        ),
                        RuleTier::new(
                            above(Metric::PriceChangeShort, 0.0),
                            5,
                            "Positive Short-Term Momentum",
                        ),
                    ]),
                    RuleGroup::new(vec![RuleTier::new(
                        above(Metric::PriceChangeMedium, 2.0),
                        5,
                        "Hourly Uptrend",
                    )]),
                ],
            },
            RuleCategory {
                category: ScoreCategory::Volatility,
                cap: 10,
                groups: vec![RuleGroup::new(vec![RuleTier::new(
                    Condition::Between {
                        metric: Metric::Volatility,
                        low: 2.0,
                        high: 10.0,
                    },
                    10,
                    "Tradable Volatility",
                )])],
            },
        ],
        tiers: TierThresholds {
            minimum: 65,
            moderate: 75,
            strong: 85,
        },
    }
}

/// Four-factor table with a 4-candle momentum horizon.
///
/// Tiers: weak ≥ 50, moderate ≥ 60, strong ≥ 70.
pub fn classic_profile() -> ScoringProfile {
    ScoringProfile {
        name: CLASSIC.to_string(),
        indicators: IndicatorParams {
            change_medium_lookback: 4,
            ..IndicatorParams::default()
        },
        categories: vec![
            RuleCategory {
                category: ScoreCategory::Oscillator,
                cap: 25,
                groups: vec![RuleGroup::new(vec![
                    RuleTier::new(below(Metric::Rsi, 30.0), 25, "RSI Oversold"),
                    RuleTier::new(below(Metric::Rsi, 40.0), 15, "RSI Near Oversold"),
                ])],
            },
            RuleCategory {
                category: ScoreCategory::Trend,
                cap: 20,
                groups: vec![RuleGroup::new(vec![RuleTier::new(
                    exceeds(Metric::EmaFast, Metric::EmaSlow),
                    20,
                    "Uptrend",
                )])],
            },
            RuleCategory {
                category: ScoreCategory::Volume,
                cap: 15,
                groups: vec![RuleGroup::new(vec![RuleTier::new(
                    above(Metric::VolumeRatio, 2.0),
                    15,
                    "High Volume",
                )])],
            },
            RuleCategory {
                category: ScoreCategory::Momentum,
                cap: 10,
                groups: vec![RuleGroup::new(vec![RuleTier::new(
                    above(Metric::PriceChangeMedium, -2.0),
                    10,
                    "Good Momentum",
                )])],
            },
        ],
        tiers: TierThresholds {
            minimum: 50,
            moderate: 60,
            strong: 70,
        },
    }
}

fn below(metric: Metric, threshold: f64) -> Condition {
    Condition::Below { metric, threshold }
}

fn above(metric: Metric, threshold: f64) -> Condition {
    Condition::Above { metric, threshold }
}

fn exceeds(left: Metric, right: Metric) -> Condition {
    Condition::Exceeds { left, right }
}
