//! sigscan scanner
//!
//! Runs analysis cycles on an interval until Ctrl-C.

use std::sync::Arc;

use dotenvy::dotenv;
use sigscan::config::AppConfig;
use sigscan::core::{CycleRunner, CycleScheduler, RateLimiter};
use sigscan::error::SigscanError;
use sigscan::history::HistoryStore;
use sigscan::logging;
use sigscan::metrics::Metrics;
use sigscan::reporting::ConsoleReporter;
use sigscan::services::binance::{BinanceClient, BinanceMarketData, BinanceSymbolSource};
use sigscan::services::{StaticSymbolSource, SymbolSource};
use sigscan::signals::SignalEngine;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = AppConfig::from_env()?;
    info!(environment = %config.environment, "Starting sigscan scanner");

    let reporter = Arc::new(ConsoleReporter::new());
    let (scheduler, metrics) = build_scheduler(&config, reporter.clone())?;
    let handle = scheduler.handle();

    let loop_task = tokio::spawn({
        let scheduler = scheduler.clone();
        async move { scheduler.run().await }
    });

    info!("Scanner started, waiting for shutdown signal...");
    signal::ctrl_c().await?;
    info!("Shutting down scanner...");
    handle.shutdown();

    if let Err(e) = loop_task.await {
        error!(error = %e, "Scheduler task failed");
    }

    reporter.report_final(&scheduler.history().statistics().await);
    match metrics.export() {
        Ok(text) => info!(metrics = %text, "Final metrics"),
        Err(e) => error!(error = %e, "Failed to export metrics"),
    }
    info!("Scanner stopped");

    Ok(())
}

fn build_scheduler(
    config: &AppConfig,
    reporter: Arc<ConsoleReporter>,
) -> Result<(Arc<CycleScheduler>, Arc<Metrics>), SigscanError> {
    let profile = config.load_profile()?;
    let engine = Arc::new(SignalEngine::from_profile(&profile)?);
    info!(
        profile = %engine.profile_name(),
        max_points = profile.max_points(),
        minimum = profile.tiers.minimum,
        "Scoring profile '{}' loaded",
        engine.profile_name()
    );

    let client = BinanceClient::new(config.binance_base_url.clone(), config.fetch_timeout)?;
    let symbols: Arc<dyn SymbolSource> = match &config.symbols {
        Some(list) => {
            info!(count = list.len(), "Using {} configured symbols", list.len());
            Arc::new(StaticSymbolSource::new(list.clone()))
        }
        None => Arc::new(BinanceSymbolSource::new(
            client.clone(),
            config.max_symbols,
            config.rank_by_volume,
        )),
    };
    let provider = Arc::new(BinanceMarketData::new(client));

    let metrics = Arc::new(Metrics::new()?);
    let history = Arc::new(HistoryStore::new(config.history_capacity));

    let runner = CycleRunner::new(
        provider,
        symbols,
        engine,
        Arc::new(RateLimiter::new(config.request_delay)),
        metrics.clone(),
        config.cycle_config(),
    );
    let scheduler = Arc::new(CycleScheduler::new(
        runner,
        history,
        reporter,
        metrics.clone(),
        config.scheduler_config(),
    ));

    Ok((scheduler, metrics))
}
