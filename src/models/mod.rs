//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod signal;
pub mod strategy;

pub use indicators::{Candle, IndicatorSet};
pub use signal::{IndicatorSnapshot, Signal, SignalContext, SignalTier};
pub use strategy::{
    Condition, IndicatorParams, Metric, RuleCategory, RuleGroup, RuleTier, ScoreCategory,
    ScoringProfile, TierThresholds,
};
