use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::activity::ActivityLogEntry;
use crate::models::profile::UserProfile;
use crate::models::trade::{TradePosition, TradeRecord};
use crate::models::transaction::Transaction;

/// Persistence contract shared by every backend (local key-value, remote
/// database, identifier-routed).
///
/// The ledger only ever talks to this trait, so swapping the backend is a
/// configuration change. Lists are always returned newest first.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait LedgerStore: Send + Sync {
    /// Human-readable name of this backend (for logs/errors).
    fn name(&self) -> &str;

    // ── Profiles ────────────────────────────────────────────────────

    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, CoreError>;

    /// Create or replace a profile.
    async fn put_profile(&self, profile: &UserProfile) -> Result<(), CoreError>;

    /// Conditionally set a user's balance.
    ///
    /// Applies `new_balance` only if the stored balance still equals
    /// `expected_balance`. Fails with `BalanceConflict` when it does not,
    /// with `InsufficientFunds` when `new_balance` is negative, and with
    /// `Validation` when it is not finite.
    /// Returns the updated profile.
    async fn update_balance(
        &self,
        user_id: &str,
        expected_balance: f64,
        new_balance: f64,
    ) -> Result<UserProfile, CoreError>;

    // ── Transactions ────────────────────────────────────────────────

    async fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>, CoreError>;

    async fn insert_transaction(&self, transaction: &Transaction) -> Result<(), CoreError>;

    /// Remove a transaction by id. Missing ids are not an error.
    async fn delete_transaction(&self, user_id: &str, id: Uuid) -> Result<(), CoreError>;

    // ── Trades ──────────────────────────────────────────────────────

    async fn list_trades(&self, user_id: &str) -> Result<Vec<TradeRecord>, CoreError>;

    async fn insert_trade(&self, trade: &TradeRecord) -> Result<(), CoreError>;

    /// Remove a trade; the ledger uses this to undo a half-written trade.
    async fn delete_trade(&self, user_id: &str, id: Uuid) -> Result<(), CoreError>;

    // ── Activity log ────────────────────────────────────────────────

    async fn append_activity(&self, entry: &ActivityLogEntry) -> Result<(), CoreError>;

    async fn list_activity(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<ActivityLogEntry>, CoreError>;

    // ── Portfolio cache ─────────────────────────────────────────────

    /// Persist the last valued portfolio. Backends without a portfolio
    /// table ignore it; positions can always be rebuilt from trades.
    async fn save_portfolio(
        &self,
        _user_id: &str,
        _positions: &[TradePosition],
    ) -> Result<(), CoreError> {
        Ok(())
    }

    async fn load_portfolio(
        &self,
        _user_id: &str,
    ) -> Result<Option<Vec<TradePosition>>, CoreError> {
        Ok(None)
    }
}
