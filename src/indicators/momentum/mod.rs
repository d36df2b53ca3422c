//! Momentum indicators: RSI, Stochastic RSI, MACD, price change

pub mod change;
pub mod macd;
pub mod rsi;
pub mod stoch_rsi;

pub use change::*;
pub use macd::*;
pub use rsi::*;
pub use stoch_rsi::*;
