use thiserror::Error;

/// Failures at the market-data and symbol-source boundary.
#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("decode error: {0}")]
    Decode(String),

    #[error("no data returned for {0}")]
    Empty(String),
}

impl MarketDataError {
    /// Whether a retry has a reasonable chance of succeeding
    pub fn is_transient(&self) -> bool {
        match self {
            MarketDataError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            MarketDataError::Status { status, .. } => *status == 429 || *status >= 500,
            MarketDataError::Decode(_) | MarketDataError::Empty(_) => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: String, value: String },

    #[error("scoring profile error: {0}")]
    Profile(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("an analysis cycle is already running")]
    CycleInProgress,

    #[error("scheduler is shutting down")]
    ShuttingDown,
}

#[derive(Error, Debug)]
pub enum SigscanError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}
