// Shared fixtures for the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use aether_trading_core::errors::CoreError;
use aether_trading_core::models::activity::ActivityLogEntry;
use aether_trading_core::models::asset::AssetType;
use aether_trading_core::models::profile::UserProfile;
use aether_trading_core::models::trade::{AssetRef, TradeRecord};
use aether_trading_core::models::transaction::Transaction;
use aether_trading_core::services::activity_logger::ActivityLogger;
use aether_trading_core::services::ledger_service::LedgerService;
use aether_trading_core::storage::local::LocalStore;
use aether_trading_core::storage::traits::LedgerStore;

pub const USER: &str = "user-test001";

pub fn asset(symbol: &str) -> AssetRef {
    AssetRef {
        id: format!("asset-{symbol}"),
        symbol: symbol.to_string(),
        name: format!("{symbol} Inc."),
        asset_type: AssetType::Stock,
    }
}

/// Local store with a profile for [`USER`] holding `balance`.
pub async fn seeded_local(balance: f64) -> (Arc<LocalStore>, UserProfile) {
    let store = Arc::new(LocalStore::new(100));
    let profile = UserProfile::new(USER, "Test User", "test@example.com", balance);
    store.put_profile(&profile).await.unwrap();
    (store, profile)
}

pub fn ledger_over(store: Arc<dyn LedgerStore>) -> LedgerService {
    let logger = Arc::new(ActivityLogger::new(store.clone(), "test-agent"));
    LedgerService::new(store, logger)
}

// ═══════════════════════════════════════════════════════════════════
// Failing store: a LocalStore whose individual writes can be broken
// ═══════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct Faults {
    pub insert_transaction: AtomicBool,
    pub insert_trade: AtomicBool,
    pub list_trades: AtomicBool,
    pub append_activity: AtomicBool,
    pub list_transactions: AtomicBool,
    pub list_activity: AtomicBool,
}

pub struct FlakyStore {
    pub inner: Arc<LocalStore>,
    pub faults: Faults,
    pub balance_updates: AtomicUsize,
}

impl FlakyStore {
    pub fn new(inner: Arc<LocalStore>) -> Self {
        Self {
            inner,
            faults: Faults::default(),
            balance_updates: AtomicUsize::new(0),
        }
    }

    fn fail_if(flag: &AtomicBool, what: &str) -> Result<(), CoreError> {
        if flag.load(Ordering::SeqCst) {
            Err(CoreError::storage("flaky", format!("{what} unavailable")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl LedgerStore for FlakyStore {
    fn name(&self) -> &str {
        "flaky"
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, CoreError> {
        self.inner.get_profile(user_id).await
    }

    async fn put_profile(&self, profile: &UserProfile) -> Result<(), CoreError> {
        self.inner.put_profile(profile).await
    }

    async fn update_balance(
        &self,
        user_id: &str,
        expected_balance: f64,
        new_balance: f64,
    ) -> Result<UserProfile, CoreError> {
        self.balance_updates.fetch_add(1, Ordering::SeqCst);
        self.inner
            .update_balance(user_id, expected_balance, new_balance)
            .await
    }

    async fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>, CoreError> {
        Self::fail_if(&self.faults.list_transactions, "transactions")?;
        self.inner.list_transactions(user_id).await
    }

    async fn insert_transaction(&self, transaction: &Transaction) -> Result<(), CoreError> {
        Self::fail_if(&self.faults.insert_transaction, "transactions")?;
        self.inner.insert_transaction(transaction).await
    }

    async fn delete_transaction(&self, user_id: &str, id: Uuid) -> Result<(), CoreError> {
        self.inner.delete_transaction(user_id, id).await
    }

    async fn list_trades(&self, user_id: &str) -> Result<Vec<TradeRecord>, CoreError> {
        Self::fail_if(&self.faults.list_trades, "trades")?;
        self.inner.list_trades(user_id).await
    }

    async fn insert_trade(&self, trade: &TradeRecord) -> Result<(), CoreError> {
        Self::fail_if(&self.faults.insert_trade, "trades")?;
        self.inner.insert_trade(trade).await
    }

    async fn delete_trade(&self, user_id: &str, id: Uuid) -> Result<(), CoreError> {
        self.inner.delete_trade(user_id, id).await
    }

    async fn append_activity(&self, entry: &ActivityLogEntry) -> Result<(), CoreError> {
        Self::fail_if(&self.faults.append_activity, "activity_logs")?;
        self.inner.append_activity(entry).await
    }

    async fn list_activity(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<ActivityLogEntry>, CoreError> {
        Self::fail_if(&self.faults.list_activity, "activity_logs")?;
        self.inner.list_activity(user_id, limit).await
    }
}
