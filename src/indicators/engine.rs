//! Candle series → indicator set

use crate::indicators::momentum::{
    calculate_macd, calculate_price_change, calculate_rsi, calculate_stoch_rsi,
};
use crate::indicators::trend::{calculate_ema, calculate_sma};
use crate::indicators::volatility::calculate_volatility;
use crate::indicators::volume::calculate_volume_ratio;
use crate::models::indicators::{Candle, IndicatorSet};
use crate::models::strategy::IndicatorParams;

/// Computes the fixed indicator battery from a candle series.
///
/// Pure: the output depends only on the series and the parameters.
#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine {
    params: IndicatorParams,
}

impl IndicatorEngine {
    pub fn new(params: IndicatorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &IndicatorParams {
        &self.params
    }

    /// Compute the indicator set, or `None` when the series is below the
    /// absolute minimum length or carries unusable prices.
    ///
    /// Individual indicators with too little history fall back to their
    /// neutral readings instead of failing the whole series.
    pub fn compute(&self, candles: &[Candle]) -> Option<IndicatorSet> {
        let p = &self.params;
        if candles.len() < p.min_candles.max(1) {
            return None;
        }
        if !candles.iter().all(is_usable) {
            return None;
        }

        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let volumes: Vec<f64> = candles.iter().map(|c| c.volume).collect();
        let price = *closes.last()?;

        let macd = calculate_macd(&closes, p.macd_fast_span, p.macd_slow_span, p.macd_signal_span)?;

        Some(IndicatorSet {
            price,
            rsi: calculate_rsi(&closes, p.rsi_period),
            stoch_rsi: calculate_stoch_rsi(&closes, p.stoch_period),
            ema_fast: calculate_ema(&closes, p.ema_fast_span)?,
            ema_slow: calculate_ema(&closes, p.ema_slow_span)?,
            sma_mid: calculate_sma(&closes, p.sma_window),
            macd_histogram: macd.histogram,
            macd_histogram_prev: macd.previous_histogram,
            volume_ratio: calculate_volume_ratio(&volumes, p.volume_window),
            volatility: calculate_volatility(candles, p.volatility_window, price),
            price_change_short: calculate_price_change(&closes, p.change_short_lookback),
            price_change_medium: calculate_price_change(&closes, p.change_medium_lookback),
            price_change_long: calculate_price_change(&closes, p.change_long_lookback),
        })
    }
}

fn is_usable(candle: &Candle) -> bool {
    let prices = [candle.open, candle.high, candle.low, candle.close];
    prices.iter().all(|v| v.is_finite() && *v > 0.0)
        && candle.volume.is_finite()
        && candle.volume >= 0.0
}
