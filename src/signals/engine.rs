//! Main signal evaluation engine: indicators, then the profile's rule table.

use crate::error::ConfigError;
use crate::indicators::IndicatorEngine;
use crate::models::indicators::{Candle, IndicatorSet};
use crate::models::signal::{Signal, SignalContext};
use crate::models::strategy::ScoringProfile;
use crate::signals::scoring::ScoringEngine;

pub const MIN_CANDLES: usize = 20;

#[derive(Debug, Clone)]
pub struct SignalEngine {
    profile_name: String,
    indicators: IndicatorEngine,
    scoring: ScoringEngine,
}

impl SignalEngine {
    pub fn from_profile(profile: &ScoringProfile) -> Result<Self, ConfigError> {
        profile.validate()?;
        Ok(Self {
            profile_name: profile.name.clone(),
            indicators: IndicatorEngine::new(profile.indicators.clone()),
            scoring: ScoringEngine::new(profile),
        })
    }

    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    pub fn scoring(&self) -> &ScoringEngine {
        &self.scoring
    }

    /// Evaluate one symbol's candle series.
    ///
    /// `None` when the series is too short or unusable, or when the score
    /// stays below the minimum tier.
    pub fn evaluate(&self, symbol: &str, candles: &[Candle], ctx: SignalContext) -> Option<Signal> {
        let indicators = self.indicators.compute(candles)?;
        self.scoring.evaluate(symbol, &indicators, indicators.price, ctx)
    }

    /// Evaluate signal and return the full indicator set (for debugging)
    pub fn evaluate_with_indicators(
        &self,
        symbol: &str,
        candles: &[Candle],
        ctx: SignalContext,
    ) -> Option<(Option<Signal>, IndicatorSet)> {
        let indicators = self.indicators.compute(candles)?;
        let signal = self
            .scoring
            .evaluate(symbol, &indicators, indicators.price, ctx);
        Some((signal, indicators))
    }
}
