use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::activity::ActivityLogEntry;
use crate::models::profile::UserProfile;
use crate::models::trade::{TradePosition, TradeRecord};
use crate::models::transaction::Transaction;

use super::is_valid_uuid;
use super::traits::LedgerStore;

/// Routes every call by the shape of the user id: UUIDs go to the primary
/// (remote) store, anything else to the fallback (local) store.
///
/// Selected with `backend = "auto"`; lets registered users and demo
/// sessions share one simulator instance.
pub struct RoutedStore {
    primary: Arc<dyn LedgerStore>,
    fallback: Arc<dyn LedgerStore>,
}

impl RoutedStore {
    pub fn new(primary: Arc<dyn LedgerStore>, fallback: Arc<dyn LedgerStore>) -> Self {
        Self { primary, fallback }
    }

    /// The store that owns `user_id`.
    pub fn route(&self, user_id: &str) -> &dyn LedgerStore {
        if is_valid_uuid(user_id) {
            self.primary.as_ref()
        } else {
            self.fallback.as_ref()
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl LedgerStore for RoutedStore {
    fn name(&self) -> &str {
        "auto"
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, CoreError> {
        self.route(user_id).get_profile(user_id).await
    }

    async fn put_profile(&self, profile: &UserProfile) -> Result<(), CoreError> {
        self.route(&profile.id).put_profile(profile).await
    }

    async fn update_balance(
        &self,
        user_id: &str,
        expected_balance: f64,
        new_balance: f64,
    ) -> Result<UserProfile, CoreError> {
        self.route(user_id)
            .update_balance(user_id, expected_balance, new_balance)
            .await
    }

    async fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>, CoreError> {
        self.route(user_id).list_transactions(user_id).await
    }

    async fn insert_transaction(&self, transaction: &Transaction) -> Result<(), CoreError> {
        self.route(&transaction.user_id)
            .insert_transaction(transaction)
            .await
    }

    async fn delete_transaction(&self, user_id: &str, id: Uuid) -> Result<(), CoreError> {
        self.route(user_id).delete_transaction(user_id, id).await
    }

    async fn list_trades(&self, user_id: &str) -> Result<Vec<TradeRecord>, CoreError> {
        self.route(user_id).list_trades(user_id).await
    }

    async fn insert_trade(&self, trade: &TradeRecord) -> Result<(), CoreError> {
        self.route(&trade.user_id).insert_trade(trade).await
    }

    async fn delete_trade(&self, user_id: &str, id: Uuid) -> Result<(), CoreError> {
        self.route(user_id).delete_trade(user_id, id).await
    }

    async fn append_activity(&self, entry: &ActivityLogEntry) -> Result<(), CoreError> {
        self.route(&entry.user_id).append_activity(entry).await
    }

    async fn list_activity(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<ActivityLogEntry>, CoreError> {
        self.route(user_id).list_activity(user_id, limit).await
    }

    async fn save_portfolio(
        &self,
        user_id: &str,
        positions: &[TradePosition],
    ) -> Result<(), CoreError> {
        self.route(user_id).save_portfolio(user_id, positions).await
    }

    async fn load_portfolio(
        &self,
        user_id: &str,
    ) -> Result<Option<Vec<TradePosition>>, CoreError> {
        self.route(user_id).load_portfolio(user_id).await
    }
}
