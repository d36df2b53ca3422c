//! Binance-backed market data provider and symbol source

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{info, warn};

use super::client::{BinanceClient, ExchangeInfo, Ticker24h};
use crate::error::MarketDataError;
use crate::models::indicators::Candle;
use crate::services::market_data::{MarketDataProvider, SymbolSource};

const QUOTE_ASSET: &str = "USDT";

#[derive(Debug, Clone)]
pub struct BinanceMarketData {
    client: BinanceClient,
}

impl BinanceMarketData {
    pub fn new(client: BinanceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MarketDataProvider for BinanceMarketData {
    async fn get_candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let rows: Vec<Value> = self
            .client
            .get_json(
                "/api/v3/klines",
                &[
                    ("symbol", symbol.to_string()),
                    ("interval", interval.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;

        if rows.is_empty() {
            return Err(MarketDataError::Empty(symbol.to_string()));
        }
        rows.iter().map(parse_kline).collect()
    }
}

/// Kline row: `[open_time_ms, open, high, low, close, volume, ...]`,
/// prices and volume as decimal strings
pub fn parse_kline(row: &Value) -> Result<Candle, MarketDataError> {
    let fields = row
        .as_array()
        .ok_or_else(|| MarketDataError::Decode("kline row is not an array".to_string()))?;
    if fields.len() < 6 {
        return Err(MarketDataError::Decode(format!(
            "kline row has {} fields, expected at least 6",
            fields.len()
        )));
    }

    let open_ms = fields[0]
        .as_i64()
        .ok_or_else(|| MarketDataError::Decode("kline open time is not an integer".to_string()))?;
    let open_time = DateTime::<Utc>::from_timestamp_millis(open_ms)
        .ok_or_else(|| MarketDataError::Decode(format!("kline open time {} out of range", open_ms)))?;

    Ok(Candle::new(
        decimal(&fields[1], "open")?,
        decimal(&fields[2], "high")?,
        decimal(&fields[3], "low")?,
        decimal(&fields[4], "close")?,
        decimal(&fields[5], "volume")?,
        open_time,
    ))
}

fn decimal(value: &Value, field: &str) -> Result<f64, MarketDataError> {
    let parsed = match value {
        Value::String(s) => s.parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed.ok_or_else(|| MarketDataError::Decode(format!("kline {} is not a decimal: {}", field, value)))
}

/// Trading USDT pairs from `exchangeInfo`, leveraged tokens excluded,
/// optionally ranked by 24h quote volume
#[derive(Debug, Clone)]
pub struct BinanceSymbolSource {
    client: BinanceClient,
    max_symbols: usize,
    rank_by_volume: bool,
}

impl BinanceSymbolSource {
    pub fn new(client: BinanceClient, max_symbols: usize, rank_by_volume: bool) -> Self {
        Self {
            client,
            max_symbols,
            rank_by_volume,
        }
    }

    async fn rank(&self, symbols: Vec<String>) -> Result<Vec<String>, MarketDataError> {
        let tickers: Vec<Ticker24h> = self.client.get_json_with_retry("/api/v3/ticker/24hr", &[]).await?;
        let mut ranked: Vec<(String, f64)> = tickers
            .into_iter()
            .filter(|t| symbols.contains(&t.symbol))
            .map(|t| {
                let volume = t.quote_volume();
                (t.symbol, volume)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        Ok(ranked.into_iter().map(|(symbol, _)| symbol).collect())
    }
}

pub fn is_scannable(symbol: &str, status: &str, quote_asset: &str) -> bool {
    status == "TRADING"
        && quote_asset == QUOTE_ASSET
        && !symbol.ends_with("UPUSDT")
        && !symbol.ends_with("DOWNUSDT")
}

#[async_trait]
impl SymbolSource for BinanceSymbolSource {
    async fn list_symbols(&self) -> Result<Vec<String>, MarketDataError> {
        let info: ExchangeInfo = self.client.get_json_with_retry("/api/v3/exchangeInfo", &[]).await?;
        let symbols: Vec<String> = info
            .symbols
            .into_iter()
            .filter(|s| is_scannable(&s.symbol, &s.status, &s.quote_asset))
            .map(|s| s.symbol)
            .collect();

        let mut selected = if self.rank_by_volume {
            match self.rank(symbols.clone()).await {
                Ok(ranked) => ranked,
                Err(e) => {
                    warn!(error = %e, "Volume ranking failed, keeping exchange order");
                    symbols
                }
            }
        } else {
            symbols
        };
        selected.truncate(self.max_symbols);

        info!(count = selected.len(), "Listed {} USDT symbols", selected.len());
        Ok(selected)
    }
}
