use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::CoreError;

/// Which persistence backend the simulator writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// In-process key-value store (demo sessions, offline use)
    #[default]
    Local,
    /// PostgREST-compatible remote database
    Remote,
    /// Remote for UUID user ids, local for everything else
    Auto,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Local => write!(f, "local"),
            StorageBackend::Remote => write!(f, "remote"),
            StorageBackend::Auto => write!(f, "auto"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Base URL of the remote project, e.g. `https://xyz.supabase.co`
    #[serde(default)]
    pub remote_url: Option<String>,

    /// Anon/service key sent as `apikey` and bearer token
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Where the local store is loaded from and saved to, if anywhere
    #[serde(default)]
    pub snapshot_path: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            remote_url: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
            snapshot_path: None,
        }
    }
}

/// Top-level simulator configuration, usually read from a JSON file.
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    /// Local-mode activity log entries kept per user (oldest dropped first)
    #[serde(default = "default_activity_log_capacity")]
    pub activity_log_capacity: usize,

    /// Minimum time between two full data refreshes
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,

    /// Balance given to newly created profiles
    #[serde(default = "default_starting_balance")]
    pub starting_balance: f64,

    #[serde(default = "default_market_items_per_class")]
    pub market_items_per_class: usize,

    /// Recorded on every activity log entry
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Reject sells of more than the net quantity bought
    #[serde(default)]
    pub enforce_sell_holdings: bool,

    /// Seed an empty local history with generated demo transactions
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_activity_log_capacity() -> usize {
    100
}

fn default_refresh_interval_ms() -> u64 {
    1000
}

fn default_starting_balance() -> f64 {
    10_000.0
}

fn default_market_items_per_class() -> usize {
    50
}

fn default_user_agent() -> String {
    format!("aether-trading-core/{}", env!("CARGO_PKG_VERSION"))
}

fn default_seed_demo_data() -> bool {
    true
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            activity_log_capacity: default_activity_log_capacity(),
            refresh_interval_ms: default_refresh_interval_ms(),
            starting_balance: default_starting_balance(),
            market_items_per_class: default_market_items_per_class(),
            user_agent: default_user_agent(),
            enforce_sell_holdings: false,
            seed_demo_data: default_seed_demo_data(),
        }
    }
}

impl SimulatorConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let config: SimulatorConfig =
            serde_json::from_str(json).map_err(|e| CoreError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.activity_log_capacity == 0 {
            return Err(CoreError::Config(
                "activity_log_capacity must be at least 1".into(),
            ));
        }
        if !self.starting_balance.is_finite() || self.starting_balance < 0.0 {
            return Err(CoreError::Config(format!(
                "starting_balance must be a non-negative number, got {}",
                self.starting_balance
            )));
        }
        if self.storage.timeout_secs == 0 {
            return Err(CoreError::Config("storage.timeout_secs must be positive".into()));
        }
        if matches!(
            self.storage.backend,
            StorageBackend::Remote | StorageBackend::Auto
        ) {
            if self.storage.remote_url.as_deref().map_or(true, str::is_empty) {
                return Err(CoreError::Config(format!(
                    "storage.remote_url is required for the {} backend",
                    self.storage.backend
                )));
            }
            if self.storage.api_key.as_deref().map_or(true, str::is_empty) {
                return Err(CoreError::Config(format!(
                    "storage.api_key is required for the {} backend",
                    self.storage.backend
                )));
            }
        }
        Ok(())
    }
}
