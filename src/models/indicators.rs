use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV aggregate over a fixed interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        open_time: DateTime<Utc>,
    ) -> Self {
        Self {
            open_time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

/// Indicator values derived from a single candle series.
///
/// Every field is recomputed from scratch each cycle; a set is never updated
/// in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub price: f64,
    pub rsi: f64,
    pub stoch_rsi: f64,
    pub ema_fast: f64,
    pub ema_slow: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sma_mid: Option<f64>,
    pub macd_histogram: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd_histogram_prev: Option<f64>,
    pub volume_ratio: f64,
    pub volatility: f64,
    pub price_change_short: f64,
    pub price_change_medium: f64,
    pub price_change_long: f64,
}

impl IndicatorSet {
    /// Neutral readings at `price`: the values every indicator falls back to
    /// when it has no history to work with.
    pub fn neutral(price: f64) -> Self {
        Self {
            price,
            rsi: 50.0,
            stoch_rsi: 50.0,
            ema_fast: price,
            ema_slow: price,
            sma_mid: None,
            macd_histogram: 0.0,
            macd_histogram_prev: None,
            volume_ratio: 1.0,
            volatility: 0.0,
            price_change_short: 0.0,
            price_change_medium: 0.0,
            price_change_long: 0.0,
        }
    }
}
