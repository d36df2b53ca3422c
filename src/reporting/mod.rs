//! Cycle reporting sinks

use chrono::Utc;
use tracing::info;

use crate::core::cycle::CycleReport;
use crate::history::Statistics;
use crate::models::signal::Signal;

pub const TOP_SIGNALS: usize = 10;
pub const CONDITIONS_SHOWN: usize = 3;
pub const RECENT_SHOWN: usize = 5;

pub trait ReportingSink: Send + Sync {
    fn report_cycle(&self, report: &CycleReport, stats: &Statistics, recent: &[Signal]);
}

/// Writes the cycle summary through `tracing`
#[derive(Debug, Clone, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    /// Totals for the whole run, logged once at shutdown
    pub fn report_final(&self, stats: &Statistics) {
        let last_signal = match stats.last_signal_time {
            Some(at) => at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            None => "never".to_string(),
        };
        info!(
            total_cycles = stats.total_cycles,
            total_signals = stats.total_signals,
            strong_signals = stats.strong_signal_count,
            "Final stats: {} cycles, {} signals ({} strong), last signal {}",
            stats.total_cycles,
            stats.total_signals,
            stats.strong_signal_count,
            last_signal
        );
    }
}

impl ReportingSink for ConsoleReporter {
    fn report_cycle(&self, report: &CycleReport, stats: &Statistics, recent: &[Signal]) {
        info!(
            cycle_id = report.cycle_id,
            symbols = report.symbols_scanned,
            analyzed = report.symbols_analyzed,
            failed = report.symbols_failed,
            signals = report.signals.len(),
            duration_ms = report.duration.as_millis() as u64,
            "Cycle {} complete: {} signals from {} symbols",
            report.cycle_id,
            report.signals.len(),
            report.symbols_scanned
        );

        if report.signals.is_empty() {
            info!(cycle_id = report.cycle_id, "No buy signals this cycle");
        }

        for (rank, signal) in report.signals.iter().take(TOP_SIGNALS).enumerate() {
            let conditions: Vec<&str> = signal
                .conditions
                .iter()
                .take(CONDITIONS_SHOWN)
                .map(String::as_str)
                .collect();
            info!(
                rank = rank + 1,
                symbol = %signal.symbol,
                tier = %signal.tier,
                confidence = signal.confidence,
                price = signal.price,
                rsi = signal.snapshot.rsi,
                stoch_rsi = signal.snapshot.stoch_rsi,
                volume_ratio = signal.snapshot.volume_ratio,
                "{} {} [{}] {}",
                signal.tier.alert_level(),
                signal.symbol,
                signal.confidence,
                conditions.join(", ")
            );
        }

        let last_signal = match stats.minutes_since_last_signal(Utc::now()) {
            Some(minutes) => format!("{} minutes ago", minutes),
            None => "never".to_string(),
        };
        info!(
            total_cycles = stats.total_cycles,
            total_signals = stats.total_signals,
            strong_signals = stats.strong_signal_count,
            "Stats: {} cycles, {} signals ({} strong), last signal {}",
            stats.total_cycles,
            stats.total_signals,
            stats.strong_signal_count,
            last_signal
        );

        let shown = recent.len().saturating_sub(RECENT_SHOWN);
        for signal in &recent[shown..] {
            info!(
                symbol = %signal.symbol,
                tier = %signal.tier,
                confidence = signal.confidence,
                at = %signal.timestamp.format("%H:%M:%S"),
                "History: {} {} ({})",
                signal.symbol,
                signal.tier.label(),
                signal.confidence
            );
        }
    }
}
