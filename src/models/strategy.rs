//! Scoring profile data models
//!
//! A profile is a table of weighted rules plus the indicator parameters it
//! expects. Variants of the scanner are different profiles, not different
//! code paths.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::indicators::IndicatorSet;
use crate::models::signal::SignalTier;

/// Complete scoring configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringProfile {
    pub name: String,
    #[serde(default)]
    pub indicators: IndicatorParams,
    pub categories: Vec<RuleCategory>,
    pub tiers: TierThresholds,
}

impl ScoringProfile {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let profile: ScoringProfile = serde_json::from_str(json)
            .map_err(|e| ConfigError::Profile(format!("invalid profile JSON: {}", e)))?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tiers.validate()?;
        self.indicators.validate()?;
        for category in &self.categories {
            for (index, group) in category.groups.iter().enumerate() {
                if group.tiers.is_empty() {
                    return Err(ConfigError::Profile(format!(
                        "{:?} group {} has no tiers",
                        category.category, index
                    )));
                }
                if group.requires_previous && index == 0 {
                    return Err(ConfigError::Profile(format!(
                        "{:?} group 0 cannot be gated on a previous group",
                        category.category
                    )));
                }
            }
        }
        Ok(())
    }

    /// Highest total the rule table can award
    pub fn max_points(&self) -> u32 {
        self.categories.iter().map(RuleCategory::max_points).sum()
    }
}

/// Scoring category; every rule belongs to exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    Oscillator,
    Trend,
    Volume,
    Momentum,
    Volatility,
}

/// Category with its point cap and the rule groups evaluated inside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCategory {
    pub category: ScoreCategory,
    pub cap: u32,
    pub groups: Vec<RuleGroup>,
}

impl RuleCategory {
    pub fn max_points(&self) -> u32 {
        let uncapped: u32 = self
            .groups
            .iter()
            .map(|g| g.tiers.iter().map(|t| t.points).max().unwrap_or(0))
            .sum();
        uncapped.min(self.cap)
    }
}

/// Mutually exclusive thresholds on one metric; the first satisfied tier wins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleGroup {
    pub tiers: Vec<RuleTier>,
    /// Only evaluated when the preceding group of the category matched
    #[serde(default)]
    pub requires_previous: bool,
}

impl RuleGroup {
    pub fn new(tiers: Vec<RuleTier>) -> Self {
        Self {
            tiers,
            requires_previous: false,
        }
    }

    pub fn gated(tiers: Vec<RuleTier>) -> Self {
        Self {
            tiers,
            requires_previous: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTier {
    pub condition: Condition,
    pub points: u32,
    pub label: String,
}

impl RuleTier {
    pub fn new(condition: Condition, points: u32, label: &str) -> Self {
        Self {
            condition,
            points,
            label: label.to_string(),
        }
    }
}

/// Indicator values a condition can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Price,
    Rsi,
    StochRsi,
    EmaFast,
    EmaSlow,
    SmaMid,
    MacdHistogram,
    MacdHistogramPrev,
    VolumeRatio,
    Volatility,
    PriceChangeShort,
    PriceChangeMedium,
    PriceChangeLong,
}

impl Metric {
    pub fn value(&self, indicators: &IndicatorSet) -> Option<f64> {
        let value = match self {
            Metric::Price => indicators.price,
            Metric::Rsi => indicators.rsi,
            Metric::StochRsi => indicators.stoch_rsi,
            Metric::EmaFast => indicators.ema_fast,
            Metric::EmaSlow => indicators.ema_slow,
            Metric::SmaMid => indicators.sma_mid?,
            Metric::MacdHistogram => indicators.macd_histogram,
            Metric::MacdHistogramPrev => indicators.macd_histogram_prev?,
            Metric::VolumeRatio => indicators.volume_ratio,
            Metric::Volatility => indicators.volatility,
            Metric::PriceChangeShort => indicators.price_change_short,
            Metric::PriceChangeMedium => indicators.price_change_medium,
            Metric::PriceChangeLong => indicators.price_change_long,
        };
        value.is_finite().then_some(value)
    }
}

/// Rule condition. A condition over a missing metric never holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    Below { metric: Metric, threshold: f64 },
    Above { metric: Metric, threshold: f64 },
    /// Exclusive on both ends
    Between { metric: Metric, low: f64, high: f64 },
    Exceeds { left: Metric, right: Metric },
}

impl Condition {
    pub fn holds(&self, indicators: &IndicatorSet) -> bool {
        match self {
            Condition::Below { metric, threshold } => {
                metric.value(indicators).is_some_and(|v| v < *threshold)
            }
            Condition::Above { metric, threshold } => {
                metric.value(indicators).is_some_and(|v| v > *threshold)
            }
            Condition::Between { metric, low, high } => metric
                .value(indicators)
                .is_some_and(|v| v > *low && v < *high),
            Condition::Exceeds { left, right } => {
                match (left.value(indicators), right.value(indicators)) {
                    (Some(l), Some(r)) => l > r,
                    _ => false,
                }
            }
        }
    }
}

/// Point boundaries of the signal tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub minimum: u32,
    pub moderate: u32,
    pub strong: u32,
}

impl TierThresholds {
    /// Tier for a points total; `None` below the minimum
    pub fn classify(&self, points: u32) -> Option<SignalTier> {
        if points >= self.strong {
            Some(SignalTier::Strong)
        } else if points >= self.moderate {
            Some(SignalTier::Moderate)
        } else if points >= self.minimum {
            Some(SignalTier::Weak)
        } else {
            None
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.minimum < self.moderate && self.moderate < self.strong {
            Ok(())
        } else {
            Err(ConfigError::Profile(format!(
                "tier thresholds must increase strictly: minimum={} moderate={} strong={}",
                self.minimum, self.moderate, self.strong
            )))
        }
    }
}

/// Periods and lookbacks used by the indicator engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub min_candles: usize,
    pub rsi_period: usize,
    pub stoch_period: usize,
    pub ema_fast_span: usize,
    pub ema_slow_span: usize,
    pub sma_window: usize,
    pub macd_fast_span: usize,
    pub macd_slow_span: usize,
    pub macd_signal_span: usize,
    pub volume_window: usize,
    pub volatility_window: usize,
    pub change_short_lookback: usize,
    pub change_medium_lookback: usize,
    pub change_long_lookback: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            min_candles: crate::signals::MIN_CANDLES,
            rsi_period: 14,
            stoch_period: 14,
            ema_fast_span: 8,
            ema_slow_span: 21,
            sma_window: 50,
            macd_fast_span: 12,
            macd_slow_span: 26,
            macd_signal_span: 9,
            volume_window: 20,
            volatility_window: 14,
            change_short_lookback: 1,
            change_medium_lookback: 11,
            change_long_lookback: 47,
        }
    }
}

impl IndicatorParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let windows = [
            ("min_candles", self.min_candles),
            ("rsi_period", self.rsi_period),
            ("stoch_period", self.stoch_period),
            ("ema_fast_span", self.ema_fast_span),
            ("ema_slow_span", self.ema_slow_span),
            ("sma_window", self.sma_window),
            ("macd_fast_span", self.macd_fast_span),
            ("macd_slow_span", self.macd_slow_span),
            ("macd_signal_span", self.macd_signal_span),
            ("volume_window", self.volume_window),
            ("volatility_window", self.volatility_window),
            ("change_short_lookback", self.change_short_lookback),
            ("change_medium_lookback", self.change_medium_lookback),
            ("change_long_lookback", self.change_long_lookback),
        ];
        match windows.iter().find(|(_, value)| *value == 0) {
            Some((name, _)) => Err(ConfigError::Profile(format!("{} must be > 0", name))),
            None => Ok(()),
        }
    }
}
