//! External data sources

pub mod binance;
pub mod market_data;

pub use market_data::{default_symbols, MarketDataProvider, StaticSymbolSource, SymbolSource, DEFAULT_SYMBOLS};
