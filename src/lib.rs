//! sigscan: periodic technical-analysis scanner for spot USDT pairs.
//!
//! Each cycle pulls candles for a symbol set in rate-limited batches, scores
//! every series against a weighted rule table and ranks the resulting buy
//! signals.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod history;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod reporting;
pub mod services;
pub mod signals;
