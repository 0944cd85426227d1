use log::{error, info, warn};
use serde_json::json;
use std::sync::Arc;

use crate::errors::CoreError;
use crate::models::activity::{details_from, ActivityType};
use crate::models::profile::UserProfile;
use crate::models::trade::{TradeRecord, TradeRequest, TradeSide};
use crate::models::transaction::{Transaction, TransactionType};
use crate::services::activity_logger::ActivityLogger;
use crate::storage::traits::LedgerStore;

/// Quantities closer than this are treated as equal when checking holdings.
const QUANTITY_EPSILON: f64 = 1e-9;

/// Settles deposits, withdrawals and trades against a user's cash balance.
///
/// Every operation is a small saga over the store:
/// 1. conditional balance update (fails on a stale expected balance or a
///    negative result)
/// 2. trade row insert (trades only)
/// 3. transaction row insert
///
/// If step 2 or 3 fails, the earlier steps are undone and the original error
/// is returned. The activity entry is written last and never fails the
/// operation.
pub struct LedgerService {
    store: Arc<dyn LedgerStore>,
    logger: Arc<ActivityLogger>,
    enforce_sell_holdings: bool,
}

impl LedgerService {
    pub fn new(store: Arc<dyn LedgerStore>, logger: Arc<ActivityLogger>) -> Self {
        Self {
            store,
            logger,
            enforce_sell_holdings: false,
        }
    }

    /// Reject sells of more than the net quantity bought so far.
    pub fn with_sell_holdings_check(mut self, enabled: bool) -> Self {
        self.enforce_sell_holdings = enabled;
        self
    }

    /// Add `amount` to the balance and record a `DEPOSIT` transaction.
    /// Returns the updated profile.
    pub async fn deposit(
        &self,
        user_id: &str,
        amount: f64,
        profile: &UserProfile,
    ) -> Result<UserProfile, CoreError> {
        Self::check_user(user_id, profile)?;
        Self::check_positive("Deposit amount", amount)?;

        let transaction = Transaction::deposit(user_id, amount);
        let updated = self
            .settle(user_id, profile, amount, &transaction, None)
            .await?;

        info!("Deposited {amount:.2} for {user_id}, balance now {:.2}", updated.balance);
        self.logger
            .log(
                user_id,
                ActivityType::Deposit,
                details_from(json!({
                    "amount": amount,
                    "newBalance": updated.balance,
                    "transactionType": TransactionType::Deposit.to_string(),
                    "backend": self.store.name(),
                })),
            )
            .await;

        Ok(updated)
    }

    /// Take `amount` from the balance and record a `WITHDRAWAL` transaction.
    /// Fails with `InsufficientFunds` before any write if the cached balance
    /// does not cover it.
    pub async fn withdraw(
        &self,
        user_id: &str,
        amount: f64,
        profile: &UserProfile,
    ) -> Result<UserProfile, CoreError> {
        Self::check_user(user_id, profile)?;
        Self::check_positive("Withdrawal amount", amount)?;
        if profile.balance < amount {
            return Err(CoreError::InsufficientFunds {
                balance: profile.balance,
                requested: amount,
            });
        }

        let transaction = Transaction::withdrawal(user_id, amount);
        let updated = self
            .settle(user_id, profile, -amount, &transaction, None)
            .await?;

        info!("Withdrew {amount:.2} for {user_id}, balance now {:.2}", updated.balance);
        self.logger
            .log(
                user_id,
                ActivityType::Withdrawal,
                details_from(json!({
                    "amount": -amount,
                    "newBalance": updated.balance,
                    "transactionType": TransactionType::Withdrawal.to_string(),
                    "backend": self.store.name(),
                })),
            )
            .await;

        Ok(updated)
    }

    /// Settle a buy or sell: store the trade, move cash by the trade amount
    /// and record a `TRADE` transaction with the signed amount.
    pub async fn record_trade(
        &self,
        user_id: &str,
        profile: &UserProfile,
        trade: &TradeRequest,
    ) -> Result<UserProfile, CoreError> {
        Self::check_user(user_id, profile)?;
        Self::check_positive("Trade quantity", trade.quantity)?;
        Self::check_positive("Trade price", trade.price)?;
        Self::check_positive("Trade amount", trade.amount)?;
        if trade.asset.symbol.trim().is_empty() {
            return Err(CoreError::Validation("Trade asset symbol is empty".into()));
        }

        let delta = trade.signed_amount();
        if profile.balance + delta < 0.0 {
            return Err(CoreError::InsufficientFunds {
                balance: profile.balance,
                requested: trade.amount,
            });
        }

        if self.enforce_sell_holdings && trade.side == TradeSide::Sell {
            self.check_holdings(user_id, trade).await?;
        }

        let record = TradeRecord::from_request(user_id, trade);
        let transaction = Transaction::completed(
            user_id,
            TransactionType::Trade,
            delta,
            trade.description(),
        );
        let updated = self
            .settle(user_id, profile, delta, &transaction, Some(&record))
            .await?;

        info!(
            "Recorded {} {} {} @ {} for {user_id}, balance now {:.2}",
            trade.side, trade.quantity, trade.asset.symbol, trade.price, updated.balance
        );
        self.logger
            .log(
                user_id,
                ActivityType::Trade,
                details_from(json!({
                    "assetSymbol": trade.asset.symbol,
                    "assetName": trade.asset.name,
                    "assetType": trade.asset.asset_type.as_str(),
                    "quantity": trade.quantity,
                    "price": trade.price,
                    "amount": trade.amount,
                    "tradeType": trade.side.to_string(),
                    "newBalance": updated.balance,
                    "backend": self.store.name(),
                })),
            )
            .await;

        Ok(updated)
    }

    // ── Internals ───────────────────────────────────────────────────

    async fn settle(
        &self,
        user_id: &str,
        profile: &UserProfile,
        delta: f64,
        transaction: &Transaction,
        trade: Option<&TradeRecord>,
    ) -> Result<UserProfile, CoreError> {
        let expected = profile.balance;
        let new_balance = expected + delta;
        if !new_balance.is_finite() {
            return Err(CoreError::Validation(format!(
                "Resulting balance for {user_id} is out of range"
            )));
        }
        let updated = self
            .store
            .update_balance(user_id, expected, new_balance)
            .await?;

        if let Some(record) = trade {
            if let Err(e) = self.store.insert_trade(record).await {
                warn!("Trade insert failed for {user_id}, rolling back balance: {e}");
                self.restore_balance(user_id, updated.balance, expected).await;
                return Err(e);
            }
        }

        if let Err(e) = self.store.insert_transaction(transaction).await {
            warn!("Transaction insert failed for {user_id}, rolling back: {e}");
            if let Some(record) = trade {
                if let Err(undo) = self.store.delete_trade(user_id, record.id).await {
                    error!("Failed to remove trade {} for {user_id}: {undo}", record.id);
                }
            }
            self.restore_balance(user_id, updated.balance, expected).await;
            return Err(e);
        }

        Ok(updated)
    }

    async fn restore_balance(&self, user_id: &str, current: f64, original: f64) {
        if let Err(e) = self.store.update_balance(user_id, current, original).await {
            error!("Failed to restore balance {original:.2} for {user_id}: {e}");
        }
    }

    async fn check_holdings(&self, user_id: &str, trade: &TradeRequest) -> Result<(), CoreError> {
        let trades = self.store.list_trades(user_id).await?;
        let held: f64 = trades
            .iter()
            .filter(|t| t.asset.symbol.eq_ignore_ascii_case(&trade.asset.symbol))
            .map(TradeRecord::signed_quantity)
            .sum();

        if held + QUANTITY_EPSILON < trade.quantity {
            return Err(CoreError::Validation(format!(
                "Cannot sell {} {}, only {} held",
                trade.quantity, trade.asset.symbol, held.max(0.0)
            )));
        }
        Ok(())
    }

    fn check_user(user_id: &str, profile: &UserProfile) -> Result<(), CoreError> {
        if user_id.trim().is_empty() {
            return Err(CoreError::Unauthenticated);
        }
        if profile.id != user_id {
            return Err(CoreError::Validation(format!(
                "Profile {} does not belong to user {user_id}",
                profile.id
            )));
        }
        Ok(())
    }

    fn check_positive(what: &str, value: f64) -> Result<(), CoreError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(CoreError::Validation(format!(
                "{what} must be a positive number, got {value}"
            )));
        }
        Ok(())
    }
}
