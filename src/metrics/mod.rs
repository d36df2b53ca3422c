//! Prometheus metrics for the scan loop

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

/// Reason label values for `sigscan_symbol_failures_total`
pub mod reason {
    pub const FETCH: &str = "fetch";
    pub const TIMEOUT: &str = "timeout";
    pub const INSUFFICIENT_DATA: &str = "insufficient_data";
}

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub cycles_total: IntCounter,
    pub cycles_aborted_total: IntCounter,
    pub signals_total: IntCounter,
    pub symbols_analyzed_total: IntCounter,
    pub symbol_failures_total: IntCounterVec,
    pub cycle_duration_seconds: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let cycles_total = IntCounter::new("sigscan_cycles_total", "Completed analysis cycles")?;
        let cycles_aborted_total =
            IntCounter::new("sigscan_cycles_aborted_total", "Cycles aborted by shutdown")?;
        let signals_total = IntCounter::new("sigscan_signals_total", "Signals emitted")?;
        let symbols_analyzed_total = IntCounter::new(
            "sigscan_symbols_analyzed_total",
            "Symbols whose candles were fetched and scored",
        )?;
        let symbol_failures_total = IntCounterVec::new(
            Opts::new("sigscan_symbol_failures_total", "Symbols skipped in a cycle"),
            &["reason"],
        )?;
        let cycle_duration_seconds = Histogram::with_opts(
            HistogramOpts::new("sigscan_cycle_duration_seconds", "Wall time of one cycle")
                .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]),
        )?;

        registry.register(Box::new(cycles_total.clone()))?;
        registry.register(Box::new(cycles_aborted_total.clone()))?;
        registry.register(Box::new(signals_total.clone()))?;
        registry.register(Box::new(symbols_analyzed_total.clone()))?;
        registry.register(Box::new(symbol_failures_total.clone()))?;
        registry.register(Box::new(cycle_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            cycles_total,
            cycles_aborted_total,
            signals_total,
            symbols_analyzed_total,
            symbol_failures_total,
            cycle_duration_seconds,
        })
    }

    pub fn record_failure(&self, reason: &str) {
        self.symbol_failures_total.with_label_values(&[reason]).inc();
    }

    pub fn failures(&self, reason: &str) -> u64 {
        self.symbol_failures_total.with_label_values(&[reason]).get()
    }

    /// Text exposition format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
