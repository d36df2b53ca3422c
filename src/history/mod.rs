//! Signal history and running statistics

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::models::signal::{Signal, SignalTier};

pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;

/// Process-lifetime counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_cycles: u64,
    pub total_signals: u64,
    pub strong_signal_count: u64,
    pub last_signal_time: Option<DateTime<Utc>>,
}

impl Statistics {
    /// Whole minutes elapsed since the last recorded signal
    pub fn minutes_since_last_signal(&self, now: DateTime<Utc>) -> Option<i64> {
        self.last_signal_time
            .map(|t| (now - t).num_minutes().max(0))
    }
}

/// Fixed-capacity FIFO of past signals
#[derive(Debug, Clone)]
pub struct SignalHistory {
    entries: VecDeque<Signal>,
    capacity: usize,
}

impl SignalHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, signal: Signal) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(signal);
    }

    /// Last `k` entries, most recent last
    pub fn recent(&self, k: usize) -> Vec<Signal> {
        let skip = self.entries.len().saturating_sub(k);
        self.entries.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[derive(Debug)]
struct StoreState {
    history: SignalHistory,
    stats: Statistics,
}

/// History plus statistics behind a single lock, so one cycle's record is
/// applied atomically
#[derive(Debug)]
pub struct HistoryStore {
    state: RwLock<StoreState>,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            state: RwLock::new(StoreState {
                history: SignalHistory::new(capacity),
                stats: Statistics::default(),
            }),
        }
    }

    /// Record one completed cycle's signals
    pub async fn record(&self, signals: &[Signal]) {
        self.record_at(signals, Utc::now()).await
    }

    pub async fn record_at(&self, signals: &[Signal], now: DateTime<Utc>) {
        let mut state = self.state.write().await;
        for signal in signals {
            state.history.push(signal.clone());
        }

        let strong = signals
            .iter()
            .filter(|s| s.tier == SignalTier::Strong)
            .count() as u64;
        state.stats.total_cycles += 1;
        state.stats.total_signals += signals.len() as u64;
        state.stats.strong_signal_count += strong;
        if !signals.is_empty() {
            state.stats.last_signal_time = Some(now);
        }
    }

    pub async fn recent(&self, k: usize) -> Vec<Signal> {
        self.state.read().await.history.recent(k)
    }

    pub async fn statistics(&self) -> Statistics {
        self.state.read().await.stats.clone()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.history.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.history.is_empty()
    }
}
