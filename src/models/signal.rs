use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::indicators::IndicatorSet;

/// Buy-signal strength. "No signal" is represented by the absence of a
/// [`Signal`], not by a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalTier {
    Weak,
    Moderate,
    Strong,
}

impl SignalTier {
    pub fn label(&self) -> &'static str {
        match self {
            SignalTier::Weak => "WEAK BUY",
            SignalTier::Moderate => "MODERATE BUY",
            SignalTier::Strong => "STRONG BUY",
        }
    }

    pub fn alert_level(&self) -> &'static str {
        match self {
            SignalTier::Weak => "LOW",
            SignalTier::Moderate => "MEDIUM",
            SignalTier::Strong => "HIGH",
        }
    }
}

impl std::fmt::Display for SignalTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Key indicator readings captured when the signal was emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub rsi: f64,
    pub stoch_rsi: f64,
    pub volume_ratio: f64,
    pub price_change_short: f64,
    pub price_change_medium: f64,
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub macd_histogram: f64,
}

impl IndicatorSnapshot {
    pub fn from_indicators(indicators: &IndicatorSet) -> Self {
        Self {
            rsi: round_to(indicators.rsi, 1),
            stoch_rsi: round_to(indicators.stoch_rsi, 1),
            volume_ratio: round_to(indicators.volume_ratio, 1),
            price_change_short: round_to(indicators.price_change_short, 2),
            price_change_medium: round_to(indicators.price_change_medium, 2),
            ema_fast: indicators.ema_fast,
            ema_slow: indicators.ema_slow,
            macd_histogram: indicators.macd_histogram,
        }
    }
}

/// Caller-supplied context stamped onto every signal of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalContext {
    pub cycle_id: u64,
    pub timestamp: DateTime<Utc>,
}

impl SignalContext {
    pub fn new(cycle_id: u64, timestamp: DateTime<Utc>) -> Self {
        Self {
            cycle_id,
            timestamp,
        }
    }

    pub fn now(cycle_id: u64) -> Self {
        Self::new(cycle_id, Utc::now())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: String,
    pub tier: SignalTier,
    pub confidence: u32,
    pub price: f64,
    pub snapshot: IndicatorSnapshot,
    pub conditions: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub cycle_id: u64,
}

impl Signal {
    pub fn is_strong(&self) -> bool {
        self.tier == SignalTier::Strong
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
