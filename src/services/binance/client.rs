//! Binance spot REST client

use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::MarketDataError;

pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";

const MAX_RETRIES: usize = 3;

#[derive(Debug, Clone)]
pub struct BinanceClient {
    http: Client,
    base_url: String,
    retry: ExponentialBuilder,
}

impl BinanceClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MarketDataError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retry: ExponentialBuilder::default()
                .with_min_delay(Duration::from_millis(200))
                .with_max_times(MAX_RETRIES),
        })
    }

    /// GET `path` and decode the JSON body, retrying transient failures
    pub async fn get_json_with_retry<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, MarketDataError> {
        (|| self.get_json(path, query))
            .retry(self.retry)
            .when(MarketDataError::is_transient)
            .notify(|err: &MarketDataError, delay: Duration| {
                warn!(
                    path,
                    error = %err,
                    delay_ms = delay.as_millis() as u64,
                    "Binance request failed, retrying"
                );
            })
            .await
    }

    /// Single GET attempt
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, MarketDataError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| MarketDataError::Decode(e.to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeInfo {
    pub symbols: Vec<SymbolInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    pub symbol: String,
    pub status: String,
    pub quote_asset: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker24h {
    pub symbol: String,
    pub quote_volume: String,
}

impl Ticker24h {
    pub fn quote_volume(&self) -> f64 {
        self.quote_volume.parse().unwrap_or(0.0)
    }
}
