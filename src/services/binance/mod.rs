pub mod client;
pub mod provider;

pub use client::{BinanceClient, DEFAULT_BASE_URL};
pub use provider::{BinanceMarketData, BinanceSymbolSource};
