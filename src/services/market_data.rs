//! Market data and symbol source interfaces.

use async_trait::async_trait;

use crate::error::MarketDataError;
use crate::models::indicators::Candle;

/// USDT pairs scanned when no symbol list can be obtained
pub const DEFAULT_SYMBOLS: [&str; 30] = [
    "BTCUSDT", "ETHUSDT", "BNBUSDT", "SOLUSDT", "XRPUSDT", "ADAUSDT", "DOGEUSDT", "AVAXUSDT",
    "DOTUSDT", "LINKUSDT", "MATICUSDT", "LTCUSDT", "UNIUSDT", "ATOMUSDT", "FILUSDT", "NEARUSDT",
    "ALGOUSDT", "VETUSDT", "ICPUSDT", "ETCUSDT", "XLMUSDT", "HBARUSDT", "EGLDUSDT", "FTMUSDT",
    "SANDUSDT", "MANAUSDT", "ENJUSDT", "CHZUSDT", "BCHUSDT", "EOSUSDT",
];

pub fn default_symbols() -> Vec<String> {
    DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect()
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Get historical candles for a symbol, oldest first
    async fn get_candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError>;
}

#[async_trait]
pub trait SymbolSource: Send + Sync {
    /// Symbols to scan this cycle, in scan order
    async fn list_symbols(&self) -> Result<Vec<String>, MarketDataError>;
}

/// Fixed symbol list, from configuration or the built-in defaults
#[derive(Debug, Clone)]
pub struct StaticSymbolSource {
    symbols: Vec<String>,
}

impl StaticSymbolSource {
    pub fn new(symbols: Vec<String>) -> Self {
        Self { symbols }
    }

    pub fn defaults() -> Self {
        Self::new(default_symbols())
    }
}

#[async_trait]
impl SymbolSource for StaticSymbolSource {
    async fn list_symbols(&self) -> Result<Vec<String>, MarketDataError> {
        Ok(self.symbols.clone())
    }
}
