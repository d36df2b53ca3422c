//! Unit tests for environment configuration

use std::collections::HashMap;
use std::time::Duration;

use sigscan::config::{parse_symbols, AppConfig};
use sigscan::error::ConfigError;

fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AppConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = config_from(&[]).unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.analysis_interval, Duration::from_secs(120));
    assert_eq!(config.batch_size, 10);
    assert_eq!(config.candle_interval, "5m");
    assert_eq!(config.candle_limit, 100);
    assert_eq!(config.request_delay, Duration::from_millis(100));
    assert_eq!(config.fetch_timeout, Duration::from_secs(10));
    assert_eq!(config.history_capacity, 1000);
    assert_eq!(config.scoring_profile, "advanced");
    assert!(config.symbols.is_none());
    assert!(config.rank_by_volume);
    assert!(config.run_on_start);
}

#[test]
fn test_overrides() {
    let config = config_from(&[
        ("ENVIRONMENT", "Production"),
        ("ANALYSIS_INTERVAL_SECONDS", "60"),
        ("BATCH_SIZE", "5"),
        ("CANDLE_INTERVAL", "15m"),
        ("REQUEST_DELAY_MS", "0"),
        ("WORKER_CONCURRENCY", "8"),
        ("SYMBOLS", "btcusdt, ethusdt"),
        ("RANK_BY_VOLUME", "false"),
        ("SCORING_PROFILE", "CLASSIC"),
        ("RUN_ON_START", "0"),
        ("BINANCE_BASE_URL", "http://localhost:9000"),
    ])
    .unwrap();

    assert_eq!(config.environment, "production");
    assert_eq!(config.analysis_interval, Duration::from_secs(60));
    assert_eq!(config.batch_size, 5);
    assert_eq!(config.candle_interval, "15m");
    assert_eq!(config.request_delay, Duration::ZERO);
    assert_eq!(config.worker_concurrency, 8);
    assert_eq!(
        config.symbols,
        Some(vec!["BTCUSDT".to_string(), "ETHUSDT".to_string()])
    );
    assert!(!config.rank_by_volume);
    assert_eq!(config.scoring_profile, "classic");
    assert!(!config.run_on_start);
    assert_eq!(config.binance_base_url, "http://localhost:9000");
}

#[test]
fn test_blank_values_take_defaults() {
    let config = config_from(&[("BATCH_SIZE", "  "), ("SYMBOLS", " , ")]).unwrap();
    assert_eq!(config.batch_size, 10);
    assert!(config.symbols.is_none());
}

#[test]
fn test_invalid_number() {
    match config_from(&[("BATCH_SIZE", "ten")]) {
        Err(ConfigError::Invalid { key, value }) => {
            assert_eq!(key, "BATCH_SIZE");
            assert_eq!(value, "ten");
        }
        other => panic!("expected invalid config, got {:?}", other),
    }
}

#[test]
fn test_zero_rejected_where_positive_required() {
    assert!(matches!(
        config_from(&[("ANALYSIS_INTERVAL_SECONDS", "0")]),
        Err(ConfigError::Invalid { .. })
    ));
    assert!(matches!(
        config_from(&[("WORKER_CONCURRENCY", "0")]),
        Err(ConfigError::Invalid { .. })
    ));
}

#[test]
fn test_invalid_flag() {
    assert!(matches!(
        config_from(&[("RUN_ON_START", "maybe")]),
        Err(ConfigError::Invalid { .. })
    ));
}

#[test]
fn test_parse_symbols_dedups_in_order() {
    assert_eq!(
        parse_symbols(" solusdt,BTCUSDT,,solUSDT "),
        vec!["SOLUSDT".to_string(), "BTCUSDT".to_string()]
    );
}

#[test]
fn test_load_named_profile() {
    let config = config_from(&[("SCORING_PROFILE", "classic")]).unwrap();
    assert_eq!(config.load_profile().unwrap().name, "classic");

    let config = config_from(&[("SCORING_PROFILE", "unknown")]).unwrap();
    assert!(matches!(config.load_profile(), Err(ConfigError::Profile(_))));
}

#[test]
fn test_load_profile_from_file() {
    let path = std::env::temp_dir().join(format!("sigscan-profile-{}.json", std::process::id()));
    let profile = sigscan::signals::categories::classic_profile();
    std::fs::write(&path, serde_json::to_string(&profile).unwrap()).unwrap();

    let config = config_from(&[("SCORING_PROFILE_PATH", path.to_str().unwrap())]).unwrap();
    let loaded = config.load_profile().unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, profile);
}

#[test]
fn test_load_profile_missing_file() {
    let config = config_from(&[("SCORING_PROFILE_PATH", "/nonexistent/sigscan/profile.json")]).unwrap();
    assert!(matches!(config.load_profile(), Err(ConfigError::Io(_))));
}

#[test]
fn test_cycle_and_scheduler_config() {
    let config = config_from(&[("BATCH_SIZE", "3"), ("ANALYSIS_INTERVAL_SECONDS", "30")]).unwrap();
    let cycle = config.cycle_config();
    assert_eq!(cycle.batch_size, 3);
    assert_eq!(cycle.candle_limit, 100);
    assert_eq!(cycle.fetch_timeout, Duration::from_secs(10));

    let scheduler = config.scheduler_config();
    assert_eq!(scheduler.interval, Duration::from_secs(30));
    assert!(scheduler.run_on_start);
}
