//! Environment-driven configuration

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::core::cycle::CycleConfig;
use crate::core::scheduler::SchedulerConfig;
use crate::error::ConfigError;
use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::models::strategy::ScoringProfile;
use crate::services::binance::DEFAULT_BASE_URL;
use crate::signals::categories::{profile_by_name, ADVANCED};

/// Deployment environment, lowercased; `sandbox` when unset
pub fn get_environment() -> String {
    env::var("ENVIRONMENT")
        .map(|e| e.trim().to_lowercase())
        .unwrap_or_else(|_| "sandbox".to_string())
}

pub fn is_production(environment: &str) -> bool {
    matches!(environment, "production" | "prod")
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub environment: String,
    pub analysis_interval: Duration,
    pub batch_size: usize,
    pub candle_interval: String,
    pub candle_limit: usize,
    pub request_delay: Duration,
    pub fetch_timeout: Duration,
    pub worker_concurrency: usize,
    /// Fixed symbol list; `None` means discover from the exchange
    pub symbols: Option<Vec<String>>,
    pub max_symbols: usize,
    pub rank_by_volume: bool,
    pub scoring_profile: String,
    pub scoring_profile_path: Option<PathBuf>,
    pub history_capacity: usize,
    pub run_on_start: bool,
    pub binance_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            analysis_interval: Duration::from_secs(120),
            batch_size: 10,
            candle_interval: "5m".to_string(),
            candle_limit: 100,
            request_delay: Duration::from_millis(100),
            fetch_timeout: Duration::from_secs(10),
            worker_concurrency: 4,
            symbols: None,
            max_symbols: 50,
            rank_by_volume: true,
            scoring_profile: ADVANCED.to_string(),
            scoring_profile_path: None,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            run_on_start: true,
            binance_base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or blank keys take defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let config = Self {
            environment: get("ENVIRONMENT")
                .map(|e| e.to_lowercase())
                .unwrap_or(defaults.environment),
            analysis_interval: Duration::from_secs(positive(
                "ANALYSIS_INTERVAL_SECONDS",
                get("ANALYSIS_INTERVAL_SECONDS"),
                defaults.analysis_interval.as_secs(),
            )?),
            batch_size: positive("BATCH_SIZE", get("BATCH_SIZE"), defaults.batch_size)?,
            candle_interval: get("CANDLE_INTERVAL").unwrap_or(defaults.candle_interval),
            candle_limit: positive("CANDLE_LIMIT", get("CANDLE_LIMIT"), defaults.candle_limit)?,
            request_delay: Duration::from_millis(parse(
                "REQUEST_DELAY_MS",
                get("REQUEST_DELAY_MS"),
                defaults.request_delay.as_millis() as u64,
            )?),
            fetch_timeout: Duration::from_secs(positive(
                "FETCH_TIMEOUT_SECONDS",
                get("FETCH_TIMEOUT_SECONDS"),
                defaults.fetch_timeout.as_secs(),
            )?),
            worker_concurrency: positive(
                "WORKER_CONCURRENCY",
                get("WORKER_CONCURRENCY"),
                defaults.worker_concurrency,
            )?,
            symbols: get("SYMBOLS").map(|raw| parse_symbols(&raw)).filter(|s| !s.is_empty()),
            max_symbols: positive("MAX_SYMBOLS", get("MAX_SYMBOLS"), defaults.max_symbols)?,
            rank_by_volume: flag("RANK_BY_VOLUME", get("RANK_BY_VOLUME"), defaults.rank_by_volume)?,
            scoring_profile: get("SCORING_PROFILE")
                .map(|p| p.to_lowercase())
                .unwrap_or(defaults.scoring_profile),
            scoring_profile_path: get("SCORING_PROFILE_PATH").map(PathBuf::from),
            history_capacity: positive(
                "HISTORY_CAPACITY",
                get("HISTORY_CAPACITY"),
                defaults.history_capacity,
            )?,
            run_on_start: flag("RUN_ON_START", get("RUN_ON_START"), defaults.run_on_start)?,
            binance_base_url: get("BINANCE_BASE_URL").unwrap_or(defaults.binance_base_url),
        };

        Ok(config)
    }

    /// Profile from `SCORING_PROFILE_PATH` if set, else the named built-in
    pub fn load_profile(&self) -> Result<ScoringProfile, ConfigError> {
        match &self.scoring_profile_path {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                ScoringProfile::from_json(&json)
            }
            None => profile_by_name(&self.scoring_profile),
        }
    }

    pub fn cycle_config(&self) -> CycleConfig {
        CycleConfig {
            batch_size: self.batch_size,
            candle_interval: self.candle_interval.clone(),
            candle_limit: self.candle_limit,
            fetch_timeout: self.fetch_timeout,
            list_timeout: self.fetch_timeout * 3,
            concurrency: self.worker_concurrency,
        }
    }

    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            interval: self.analysis_interval,
            run_on_start: self.run_on_start,
        }
    }
}

/// Comma-separated symbols, uppercased and deduplicated in order
pub fn parse_symbols(raw: &str) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();
    for symbol in raw.split(',').map(|s| s.trim().to_uppercase()) {
        if !symbol.is_empty() && !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }
    symbols
}

fn parse<T: FromStr>(key: &str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value: raw,
        }),
    }
}

fn positive<T>(key: &str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default,
{
    let raw = value.clone().unwrap_or_default();
    let parsed = parse(key, value, default)?;
    if parsed > T::default() {
        Ok(parsed)
    } else {
        Err(ConfigError::Invalid {
            key: key.to_string(),
            value: raw,
        })
    }
}

fn flag(key: &str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    match value.as_deref().map(str::to_lowercase).as_deref() {
        None => Ok(default),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(_) => Err(ConfigError::Invalid {
            key: key.to_string(),
            value: value.unwrap_or_default(),
        }),
    }
}
