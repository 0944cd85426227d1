use thiserror::Error;

/// Unified error type for the entire aether-trading-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Validation (raised before any write) ────────────────────────
    #[error("User not authenticated")]
    Unauthenticated,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Insufficient funds: balance {balance:.2}, requested {requested:.2}")]
    InsufficientFunds { balance: f64, requested: f64 },

    // ── Ledger / Store ──────────────────────────────────────────────
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Balance changed concurrently for {user_id}: expected {expected:.2}, found {actual:.2}")]
    BalanceConflict {
        user_id: String,
        expected: f64,
        actual: f64,
    },

    /// Backend failure raised by a custom `LedgerStore` implementation.
    /// The bundled stores never produce it.
    #[error("Storage error ({backend}): {message}")]
    Storage { backend: String, message: String },

    // ── Snapshot / File ─────────────────────────────────────────────
    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("Unsupported file version: {0}")]
    UnsupportedVersion(u16),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Remote API / Network ────────────────────────────────────────
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CoreError {
    /// Shorthand for a backend failure tagged with the store name, for
    /// `LedgerStore` implementations outside this crate.
    pub fn storage(backend: impl Into<String>, message: impl Into<String>) -> Self {
        CoreError::Storage {
            backend: backend.into(),
            message: message.into(),
        }
    }

    /// True for errors raised by precondition checks, before anything was written.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CoreError::Unauthenticated
                | CoreError::Validation(_)
                | CoreError::InsufficientFunds { .. }
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<bincode::Error> for CoreError {
    fn from(e: bincode::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the full URL; PostgREST filters live in the query string.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
