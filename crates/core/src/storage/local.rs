use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::activity::ActivityLogEntry;
use crate::models::profile::UserProfile;
use crate::models::trade::{TradePosition, TradeRecord};
use crate::models::transaction::Transaction;

use super::format;
use super::traits::LedgerStore;
use super::balances_match;

/// Prefix shared by every key the local store writes.
pub const KEY_PREFIX: &str = "aether";

/// Kind of record stored under a per-user key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Profile,
    Transactions,
    Portfolio,
    Trades,
    ActivityLogs,
}

impl KeyKind {
    fn as_str(&self) -> &'static str {
        match self {
            KeyKind::Profile => "profile",
            KeyKind::Transactions => "transactions",
            KeyKind::Portfolio => "portfolio",
            KeyKind::Trades => "trades",
            KeyKind::ActivityLogs => "activity_logs",
        }
    }
}

/// Namespaced storage key, e.g. `aether_transactions_user-k3j9x1a`.
pub fn storage_key(kind: KeyKind, user_id: &str) -> String {
    format!("{KEY_PREFIX}_{}_{user_id}", kind.as_str())
}

/// In-process key-value store used for demo sessions and as the fallback
/// when the remote store is unreachable.
///
/// Values are JSON strings, one key per (record kind, user). Each trait call
/// takes the lock once, so a read-modify-write on a key is atomic with
/// respect to other calls on the same store.
pub struct LocalStore {
    entries: Mutex<BTreeMap<String, String>>,
    activity_capacity: usize,
}

impl LocalStore {
    pub fn new(activity_capacity: usize) -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            activity_capacity: activity_capacity.max(1),
        }
    }

    pub fn activity_capacity(&self) -> usize {
        self.activity_capacity
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    // ── Raw key access ──────────────────────────────────────────────

    /// Raw value stored under `key`, if any.
    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    /// Overwrite the raw value under `key`.
    pub fn set_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.lock().insert(key.into(), value.into());
    }

    pub fn remove_raw(&self, key: &str) -> Option<String> {
        self.lock().remove(key)
    }

    /// All keys currently stored, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    // ── Snapshots ───────────────────────────────────────────────────

    /// Serialize the whole key space into a framed snapshot.
    pub fn to_snapshot_bytes(&self) -> Result<Vec<u8>, CoreError> {
        let payload = bincode::serialize(&*self.lock())
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize store: {e}")))?;
        Ok(format::write_snapshot(format::CURRENT_VERSION, &payload))
    }

    /// Rebuild a store from snapshot bytes written by [`Self::to_snapshot_bytes`].
    pub fn from_snapshot_bytes(data: &[u8], activity_capacity: usize) -> Result<Self, CoreError> {
        let (_header, payload) = format::read_snapshot(data)?;
        let entries: BTreeMap<String, String> = bincode::deserialize(payload)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize store: {e}")))?;
        let store = Self::new(activity_capacity);
        *store.lock() = entries;
        Ok(store)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), CoreError> {
        let bytes = self.to_snapshot_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>, activity_capacity: usize) -> Result<Self, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::from_snapshot_bytes(&bytes, activity_capacity)
    }
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore")
            .field("keys", &self.lock().len())
            .field("activity_capacity", &self.activity_capacity)
            .finish()
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new(100)
    }
}

// ── Typed helpers over the raw map ──────────────────────────────────

fn read_value<T: DeserializeOwned>(
    map: &BTreeMap<String, String>,
    key: &str,
) -> Result<Option<T>, CoreError> {
    match map.get(key) {
        Some(raw) => serde_json::from_str(raw)
            .map(Some)
            .map_err(|e| CoreError::Deserialization(format!("Corrupt value under {key}: {e}"))),
        None => Ok(None),
    }
}

fn read_list<T: DeserializeOwned>(
    map: &BTreeMap<String, String>,
    key: &str,
) -> Result<Vec<T>, CoreError> {
    Ok(read_value(map, key)?.unwrap_or_default())
}

fn write_value<T: Serialize + ?Sized>(
    map: &mut BTreeMap<String, String>,
    key: String,
    value: &T,
) -> Result<(), CoreError> {
    let raw = serde_json::to_string(value)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize {key}: {e}")))?;
    map.insert(key, raw);
    Ok(())
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl LedgerStore for LocalStore {
    fn name(&self) -> &str {
        "local"
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, CoreError> {
        read_value(&self.lock(), &storage_key(KeyKind::Profile, user_id))
    }

    async fn put_profile(&self, profile: &UserProfile) -> Result<(), CoreError> {
        write_value(
            &mut self.lock(),
            storage_key(KeyKind::Profile, &profile.id),
            profile,
        )
    }

    async fn update_balance(
        &self,
        user_id: &str,
        expected_balance: f64,
        new_balance: f64,
    ) -> Result<UserProfile, CoreError> {
        if !new_balance.is_finite() {
            return Err(CoreError::Validation(format!(
                "Balance must be a finite number, got {new_balance}"
            )));
        }
        let key = storage_key(KeyKind::Profile, user_id);
        let mut map = self.lock();
        let profile: UserProfile = read_value(&map, &key)?
            .ok_or_else(|| CoreError::ProfileNotFound(user_id.to_string()))?;

        if !balances_match(profile.balance, expected_balance) {
            return Err(CoreError::BalanceConflict {
                user_id: user_id.to_string(),
                expected: expected_balance,
                actual: profile.balance,
            });
        }
        if new_balance < 0.0 {
            return Err(CoreError::InsufficientFunds {
                balance: profile.balance,
                requested: profile.balance - new_balance,
            });
        }

        let updated = profile.with_balance(new_balance);
        write_value(&mut map, key, &updated)?;
        Ok(updated)
    }

    async fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>, CoreError> {
        read_list(&self.lock(), &storage_key(KeyKind::Transactions, user_id))
    }

    async fn insert_transaction(&self, transaction: &Transaction) -> Result<(), CoreError> {
        let key = storage_key(KeyKind::Transactions, &transaction.user_id);
        let mut map = self.lock();
        let mut list: Vec<Transaction> = read_list(&map, &key)?;
        list.insert(0, transaction.clone());
        write_value(&mut map, key, &list)
    }

    async fn delete_transaction(&self, user_id: &str, id: Uuid) -> Result<(), CoreError> {
        let key = storage_key(KeyKind::Transactions, user_id);
        let mut map = self.lock();
        let mut list: Vec<Transaction> = read_list(&map, &key)?;
        list.retain(|t| t.id != id);
        write_value(&mut map, key, &list)
    }

    async fn list_trades(&self, user_id: &str) -> Result<Vec<TradeRecord>, CoreError> {
        read_list(&self.lock(), &storage_key(KeyKind::Trades, user_id))
    }

    async fn insert_trade(&self, trade: &TradeRecord) -> Result<(), CoreError> {
        let key = storage_key(KeyKind::Trades, &trade.user_id);
        let mut map = self.lock();
        let mut list: Vec<TradeRecord> = read_list(&map, &key)?;
        list.insert(0, trade.clone());
        write_value(&mut map, key, &list)
    }

    async fn delete_trade(&self, user_id: &str, id: Uuid) -> Result<(), CoreError> {
        let key = storage_key(KeyKind::Trades, user_id);
        let mut map = self.lock();
        let mut list: Vec<TradeRecord> = read_list(&map, &key)?;
        list.retain(|t| t.id != id);
        write_value(&mut map, key, &list)
    }

    async fn append_activity(&self, entry: &ActivityLogEntry) -> Result<(), CoreError> {
        let key = storage_key(KeyKind::ActivityLogs, &entry.user_id);
        let mut map = self.lock();
        let mut list: Vec<ActivityLogEntry> = read_list(&map, &key)?;
        list.insert(0, entry.clone());
        list.truncate(self.activity_capacity);
        write_value(&mut map, key, &list)
    }

    async fn list_activity(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<ActivityLogEntry>, CoreError> {
        let mut list: Vec<ActivityLogEntry> =
            read_list(&self.lock(), &storage_key(KeyKind::ActivityLogs, user_id))?;
        list.truncate(limit);
        Ok(list)
    }

    async fn save_portfolio(
        &self,
        user_id: &str,
        positions: &[TradePosition],
    ) -> Result<(), CoreError> {
        write_value(
            &mut self.lock(),
            storage_key(KeyKind::Portfolio, user_id),
            positions,
        )
    }

    async fn load_portfolio(
        &self,
        user_id: &str,
    ) -> Result<Option<Vec<TradePosition>>, CoreError> {
        read_value(&self.lock(), &storage_key(KeyKind::Portfolio, user_id))
    }
}
