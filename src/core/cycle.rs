//! One analysis cycle: list symbols, fetch, score, rank

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::stream::{self, StreamExt};
use tokio::sync::watch;
use tokio::time::{timeout, Instant};
use tracing::{debug, info, warn};

use crate::core::rate_limiter::RateLimiter;
use crate::metrics::{reason, Metrics};
use crate::models::signal::{Signal, SignalContext};
use crate::services::market_data::{default_symbols, MarketDataProvider, SymbolSource};
use crate::signals::SignalEngine;

#[derive(Debug, Clone)]
pub struct CycleConfig {
    pub batch_size: usize,
    pub candle_interval: String,
    pub candle_limit: usize,
    pub fetch_timeout: Duration,
    pub list_timeout: Duration,
    pub concurrency: usize,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            candle_interval: "5m".to_string(),
            candle_limit: 100,
            fetch_timeout: Duration::from_secs(10),
            list_timeout: Duration::from_secs(30),
            concurrency: 4,
        }
    }
}

/// Summary of a completed cycle. `signals` is ranked by descending
/// confidence, ties in scan order.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub cycle_id: u64,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
    pub symbols_scanned: usize,
    pub symbols_analyzed: usize,
    pub symbols_failed: usize,
    pub signals: Vec<Signal>,
}

#[derive(Debug, Clone)]
pub enum CycleOutcome {
    Completed(CycleReport),
    /// Shutdown arrived before the last batch finished; partial results dropped
    Aborted { cycle_id: u64, batches_completed: usize },
}

/// Why a symbol produced no score this cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    Fetch,
    Timeout,
    InsufficientData,
}

impl Skip {
    fn reason(&self) -> &'static str {
        match self {
            Skip::Fetch => reason::FETCH,
            Skip::Timeout => reason::TIMEOUT,
            Skip::InsufficientData => reason::INSUFFICIENT_DATA,
        }
    }
}

pub struct CycleRunner {
    provider: Arc<dyn MarketDataProvider>,
    symbols: Arc<dyn SymbolSource>,
    engine: Arc<SignalEngine>,
    limiter: Arc<RateLimiter>,
    metrics: Arc<Metrics>,
    config: CycleConfig,
}

impl CycleRunner {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        symbols: Arc<dyn SymbolSource>,
        engine: Arc<SignalEngine>,
        limiter: Arc<RateLimiter>,
        metrics: Arc<Metrics>,
        config: CycleConfig,
    ) -> Self {
        Self {
            provider,
            symbols,
            engine,
            limiter,
            metrics,
            config,
        }
    }

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    pub async fn run(&self, cycle_id: u64, shutdown: &watch::Receiver<bool>) -> CycleOutcome {
        let started = Instant::now();
        let started_at = Utc::now();
        let ctx = SignalContext::new(cycle_id, started_at);

        let symbols = self.resolve_symbols().await;
        let batch_size = self.config.batch_size.max(1);
        let concurrency = self.config.concurrency.max(1);

        info!(
            cycle_id,
            symbols = symbols.len(),
            batch_size,
            "Starting cycle {} over {} symbols",
            cycle_id,
            symbols.len()
        );

        let mut signals = Vec::new();
        let mut analyzed = 0usize;
        let mut failed = 0usize;

        for (index, batch) in symbols.chunks(batch_size).enumerate() {
            if *shutdown.borrow() {
                return CycleOutcome::Aborted {
                    cycle_id,
                    batches_completed: index,
                };
            }

            let results: Vec<Result<Option<Signal>, Skip>> = stream::iter(batch.to_vec())
                .map(move |symbol| async move { self.analyze(&symbol, ctx).await })
                .buffered(concurrency)
                .collect()
                .await;

            for result in results {
                match result {
                    Ok(signal) => {
                        analyzed += 1;
                        signals.extend(signal);
                    }
                    Err(_) => failed += 1,
                }
            }
            debug!(cycle_id, batch = index + 1, "Batch {} complete", index + 1);
        }

        if *shutdown.borrow() {
            return CycleOutcome::Aborted {
                cycle_id,
                batches_completed: symbols.len().div_ceil(batch_size),
            };
        }

        rank_signals(&mut signals);

        CycleOutcome::Completed(CycleReport {
            cycle_id,
            started_at,
            duration: started.elapsed(),
            symbols_scanned: symbols.len(),
            symbols_analyzed: analyzed,
            symbols_failed: failed,
            signals,
        })
    }

    async fn resolve_symbols(&self) -> Vec<String> {
        match timeout(self.config.list_timeout, self.symbols.list_symbols()).await {
            Ok(Ok(symbols)) if !symbols.is_empty() => symbols,
            Ok(Ok(_)) => {
                warn!("Symbol source returned no symbols, using defaults");
                default_symbols()
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Symbol listing failed, using defaults");
                default_symbols()
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.config.list_timeout.as_millis() as u64,
                    "Symbol listing timed out, using defaults"
                );
                default_symbols()
            }
        }
    }

    async fn analyze(&self, symbol: &str, ctx: SignalContext) -> Result<Option<Signal>, Skip> {
        let result = self.fetch_and_score(symbol, ctx).await;
        match &result {
            Ok(_) => self.metrics.symbols_analyzed_total.inc(),
            Err(skip) => self.metrics.record_failure(skip.reason()),
        }
        result
    }

    async fn fetch_and_score(&self, symbol: &str, ctx: SignalContext) -> Result<Option<Signal>, Skip> {
        self.limiter.wait_if_needed().await;

        let fetch = self
            .provider
            .get_candles(symbol, &self.config.candle_interval, self.config.candle_limit);
        let candles = match timeout(self.config.fetch_timeout, fetch).await {
            Ok(Ok(candles)) => candles,
            Ok(Err(e)) => {
                warn!(%symbol, error = %e, "Failed to fetch candles for {}", symbol);
                return Err(Skip::Fetch);
            }
            Err(_) => {
                warn!(%symbol, "Candle fetch for {} timed out", symbol);
                return Err(Skip::Timeout);
            }
        };

        match self.engine.evaluate_with_indicators(symbol, &candles, ctx) {
            Some((signal, indicators)) => {
                debug!(
                    %symbol,
                    rsi = indicators.rsi,
                    stoch_rsi = indicators.stoch_rsi,
                    volume_ratio = indicators.volume_ratio,
                    signal = signal.is_some(),
                    "Scored {}",
                    symbol
                );
                Ok(signal)
            }
            None => {
                debug!(%symbol, candles = candles.len(), "Insufficient data for {}", symbol);
                Err(Skip::InsufficientData)
            }
        }
    }
}

/// Descending confidence; stable, so equal scores keep scan order
pub fn rank_signals(signals: &mut [Signal]) {
    signals.sort_by(|a, b| b.confidence.cmp(&a.confidence));
}
