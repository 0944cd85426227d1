// ═══════════════════════════════════════════════════════════════════
// Ledger Tests: deposit, withdraw, record_trade, conditional balance
// updates and compensation of partially failed writes
// ═══════════════════════════════════════════════════════════════════

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use aether_trading_core::errors::CoreError;
use aether_trading_core::models::activity::ActivityType;
use aether_trading_core::models::trade::{TradeRequest, TradeSide};
use aether_trading_core::models::transaction::{TransactionStatus, TransactionType};
use aether_trading_core::storage::traits::LedgerStore;

use common::{asset, ledger_over, seeded_local, FlakyStore, USER};

// ═══════════════════════════════════════════════════════════════════
// Deposit
// ═══════════════════════════════════════════════════════════════════

mod deposit {
    use super::*;

    #[tokio::test]
    async fn deposit_500_on_1000() {
        let (store, profile) = seeded_local(1000.0).await;
        let ledger = ledger_over(store.clone());

        let updated = ledger.deposit(USER, 500.0, &profile).await.unwrap();
        assert_eq!(updated.balance, 1500.0);

        let stored = store.get_profile(USER).await.unwrap().unwrap();
        assert_eq!(stored.balance, 1500.0);

        let txs = store.list_transactions(USER).await.unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].kind, TransactionType::Deposit);
        assert_eq!(txs[0].amount, 500.0);
        assert_eq!(txs[0].status, TransactionStatus::Completed);
        assert_eq!(txs[0].description, "Deposit funds");
        assert_eq!(txs[0].user_id, USER);
    }

    #[tokio::test]
    async fn balance_grows_by_each_amount() {
        let (store, mut profile) = seeded_local(0.0).await;
        let ledger = ledger_over(store.clone());

        let mut expected = 0.0;
        for amount in [0.01, 1.0, 250.5, 10_000.0, 99_999.99] {
            profile = ledger.deposit(USER, amount, &profile).await.unwrap();
            expected += amount;
            assert!((profile.balance - expected).abs() < 1e-6);
        }

        let txs = store.list_transactions(USER).await.unwrap();
        assert_eq!(txs.len(), 5);
        assert!(txs.iter().all(|t| t.kind == TransactionType::Deposit && t.amount > 0.0));
    }

    #[tokio::test]
    async fn logs_activity_with_new_balance() {
        let (store, profile) = seeded_local(1000.0).await;
        let ledger = ledger_over(store.clone());

        ledger.deposit(USER, 500.0, &profile).await.unwrap();

        let logs = store.list_activity(USER, 10).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].action_type, ActivityType::Deposit);
        assert_eq!(logs[0].details["amount"], 500.0);
        assert_eq!(logs[0].details["newBalance"], 1500.0);
        assert_eq!(logs[0].details["transactionType"], "DEPOSIT");
        assert_eq!(logs[0].user_agent, "test-agent");
    }

    #[tokio::test]
    async fn empty_user_is_unauthenticated() {
        let (store, profile) = seeded_local(1000.0).await;
        let ledger = ledger_over(store.clone());

        let err = ledger.deposit("", 100.0, &profile).await.unwrap_err();
        assert!(matches!(err, CoreError::Unauthenticated));
        assert!(store.list_transactions(USER).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_non_positive_amounts() {
        let (store, profile) = seeded_local(1000.0).await;
        let ledger = ledger_over(store.clone());

        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = ledger.deposit(USER, amount, &profile).await.unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)), "amount {amount}");
        }
        assert_eq!(store.get_profile(USER).await.unwrap().unwrap().balance, 1000.0);
    }

    #[tokio::test]
    async fn rejects_profile_of_another_user() {
        let (store, profile) = seeded_local(1000.0).await;
        let ledger = ledger_over(store.clone());

        let err = ledger
            .deposit("user-someone-else", 100.0, &profile)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Withdraw
// ═══════════════════════════════════════════════════════════════════

mod withdraw {
    use super::*;

    #[tokio::test]
    async fn withdraw_within_balance() {
        let (store, profile) = seeded_local(1000.0).await;
        let ledger = ledger_over(store.clone());

        let updated = ledger.withdraw(USER, 400.0, &profile).await.unwrap();
        assert_eq!(updated.balance, 600.0);

        let txs = store.list_transactions(USER).await.unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].kind, TransactionType::Withdrawal);
        assert_eq!(txs[0].amount, -400.0);
        assert_eq!(txs[0].description, "Withdraw funds");
    }

    #[tokio::test]
    async fn withdraw_entire_balance() {
        let (store, profile) = seeded_local(1000.0).await;
        let ledger = ledger_over(store.clone());

        let updated = ledger.withdraw(USER, 1000.0, &profile).await.unwrap();
        assert_eq!(updated.balance, 0.0);
    }

    #[tokio::test]
    async fn withdraw_1500_on_1000_is_rejected() {
        let (store, profile) = seeded_local(1000.0).await;
        let ledger = ledger_over(store.clone());

        let err = ledger.withdraw(USER, 1500.0, &profile).await.unwrap_err();
        match err {
            CoreError::InsufficientFunds { balance, requested } => {
                assert_eq!(balance, 1000.0);
                assert_eq!(requested, 1500.0);
            }
            other => panic!("expected InsufficientFunds, got {other:?}"),
        }

        assert_eq!(store.get_profile(USER).await.unwrap().unwrap().balance, 1000.0);
        assert!(store.list_transactions(USER).await.unwrap().is_empty());
        assert!(store.list_activity(USER, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn logs_negative_amount() {
        let (store, profile) = seeded_local(1000.0).await;
        let ledger = ledger_over(store.clone());

        ledger.withdraw(USER, 250.0, &profile).await.unwrap();

        let logs = store.list_activity(USER, 10).await.unwrap();
        assert_eq!(logs[0].action_type, ActivityType::Withdrawal);
        assert_eq!(logs[0].details["amount"], -250.0);
        assert_eq!(logs[0].details["newBalance"], 750.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Trades
// ═══════════════════════════════════════════════════════════════════

mod trades {
    use super::*;

    #[tokio::test]
    async fn buy_two_at_100() {
        let (store, profile) = seeded_local(1000.0).await;
        let ledger = ledger_over(store.clone());
        let trade = TradeRequest::buy(asset("AAPL"), 2.0, 100.0);
        assert_eq!(trade.amount, 200.0);

        let updated = ledger.record_trade(USER, &profile, &trade).await.unwrap();
        assert_eq!(updated.balance, 800.0);

        let txs = store.list_transactions(USER).await.unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].kind, TransactionType::Trade);
        assert_eq!(txs[0].amount, -200.0);
        assert_eq!(txs[0].description, "BUY 2 AAPL at 100 per unit");

        let trades = store.list_trades(USER).await.unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].side, TradeSide::Buy);
        assert_eq!(trades[0].quantity, 2.0);
        assert_eq!(trades[0].amount, 200.0);
    }

    #[tokio::test]
    async fn sell_increases_balance() {
        let (store, profile) = seeded_local(1000.0).await;
        let ledger = ledger_over(store.clone());
        let trade = TradeRequest::sell(asset("TSLA"), 3.0, 50.0);

        let updated = ledger.record_trade(USER, &profile, &trade).await.unwrap();
        assert_eq!(updated.balance, 1150.0);

        let txs = store.list_transactions(USER).await.unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].amount, 150.0);
    }

    #[tokio::test]
    async fn sell_without_holdings_is_allowed_by_default() {
        let (store, profile) = seeded_local(0.0).await;
        let ledger = ledger_over(store.clone());

        let trade = TradeRequest::sell(asset("NVDA"), 10.0, 5.0);
        let updated = ledger.record_trade(USER, &profile, &trade).await.unwrap();
        assert_eq!(updated.balance, 50.0);
    }

    #[tokio::test]
    async fn sell_check_rejects_more_than_held() {
        let (store, profile) = seeded_local(1000.0).await;
        let ledger = ledger_over(store.clone()).with_sell_holdings_check(true);

        let profile = ledger
            .record_trade(USER, &profile, &TradeRequest::buy(asset("AAPL"), 2.0, 100.0))
            .await
            .unwrap();

        let err = ledger
            .record_trade(USER, &profile, &TradeRequest::sell(asset("AAPL"), 3.0, 100.0))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(store.list_trades(USER).await.unwrap().len(), 1);

        let profile = ledger
            .record_trade(USER, &profile, &TradeRequest::sell(asset("aapl"), 2.0, 110.0))
            .await
            .unwrap();
        assert_eq!(profile.balance, 1020.0);
    }

    #[tokio::test]
    async fn buy_beyond_balance_is_rejected() {
        let (store, profile) = seeded_local(100.0).await;
        let ledger = ledger_over(store.clone());

        let err = ledger
            .record_trade(USER, &profile, &TradeRequest::buy(asset("AMZN"), 1.0, 150.0))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::InsufficientFunds { .. }));
        assert!(store.list_trades(USER).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_trade_fields() {
        let (store, profile) = seeded_local(1000.0).await;
        let ledger = ledger_over(store.clone());

        let zero_qty = TradeRequest::buy(asset("AAPL"), 0.0, 100.0);
        let negative_price = TradeRequest::buy(asset("AAPL"), 1.0, -1.0);
        let mut blank_symbol = TradeRequest::buy(asset("AAPL"), 1.0, 1.0);
        blank_symbol.asset.symbol = "  ".into();

        for trade in [zero_qty, negative_price, blank_symbol] {
            let err = ledger.record_trade(USER, &profile, &trade).await.unwrap_err();
            assert!(err.is_validation(), "{trade:?}");
        }
    }

    #[tokio::test]
    async fn trade_activity_details() {
        let (store, profile) = seeded_local(1000.0).await;
        let ledger = ledger_over(store.clone());

        ledger
            .record_trade(USER, &profile, &TradeRequest::buy(asset("AAPL"), 2.0, 100.0))
            .await
            .unwrap();

        let logs = store.list_activity(USER, 10).await.unwrap();
        assert_eq!(logs.len(), 1);
        let d = &logs[0].details;
        assert_eq!(logs[0].action_type, ActivityType::Trade);
        assert_eq!(d["assetSymbol"], "AAPL");
        assert_eq!(d["assetType"], "STOCK");
        assert_eq!(d["tradeType"], "BUY");
        assert_eq!(d["amount"], 200.0);
        assert_eq!(d["newBalance"], 800.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Conditional updates & compensation
// ═══════════════════════════════════════════════════════════════════

mod consistency {
    use super::*;

    #[tokio::test]
    async fn stale_profile_conflicts() {
        let (store, profile) = seeded_local(1000.0).await;
        let ledger = ledger_over(store.clone());

        // Two operations issued from the same cached profile.
        ledger.deposit(USER, 100.0, &profile).await.unwrap();
        let err = ledger.withdraw(USER, 100.0, &profile).await.unwrap_err();

        match err {
            CoreError::BalanceConflict { expected, actual, .. } => {
                assert_eq!(expected, 1000.0);
                assert_eq!(actual, 1100.0);
            }
            other => panic!("expected BalanceConflict, got {other:?}"),
        }
        assert_eq!(store.get_profile(USER).await.unwrap().unwrap().balance, 1100.0);
        assert_eq!(store.list_transactions(USER).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_transaction_insert_restores_balance_and_removes_trade() {
        let (local, profile) = seeded_local(1000.0).await;
        let flaky = Arc::new(FlakyStore::new(local.clone()));
        flaky.faults.insert_transaction.store(true, Ordering::SeqCst);
        let ledger = ledger_over(flaky.clone());

        let err = ledger
            .record_trade(USER, &profile, &TradeRequest::buy(asset("AAPL"), 2.0, 100.0))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Storage { .. }));

        assert_eq!(local.get_profile(USER).await.unwrap().unwrap().balance, 1000.0);
        assert!(local.list_trades(USER).await.unwrap().is_empty());
        assert!(local.list_transactions(USER).await.unwrap().is_empty());
        assert!(local.list_activity(USER, 10).await.unwrap().is_empty());
        // forward update + compensation
        assert_eq!(flaky.balance_updates.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_trade_insert_restores_balance() {
        let (local, profile) = seeded_local(1000.0).await;
        let flaky = Arc::new(FlakyStore::new(local.clone()));
        flaky.faults.insert_trade.store(true, Ordering::SeqCst);
        let ledger = ledger_over(flaky.clone());

        let err = ledger
            .record_trade(USER, &profile, &TradeRequest::sell(asset("BTC"), 1.0, 500.0))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Storage { .. }));
        assert_eq!(local.get_profile(USER).await.unwrap().unwrap().balance, 1000.0);
        assert!(local.list_transactions(USER).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_deposit_transaction_restores_balance() {
        let (local, profile) = seeded_local(1000.0).await;
        let flaky = Arc::new(FlakyStore::new(local.clone()));
        flaky.faults.insert_transaction.store(true, Ordering::SeqCst);
        let ledger = ledger_over(flaky.clone());

        assert!(ledger.deposit(USER, 500.0, &profile).await.is_err());
        assert_eq!(local.get_profile(USER).await.unwrap().unwrap().balance, 1000.0);
    }

    #[tokio::test]
    async fn activity_failure_does_not_fail_the_operation() {
        let (local, profile) = seeded_local(1000.0).await;
        let flaky = Arc::new(FlakyStore::new(local.clone()));
        flaky.faults.append_activity.store(true, Ordering::SeqCst);
        let ledger = ledger_over(flaky.clone());

        let updated = ledger.deposit(USER, 500.0, &profile).await.unwrap();
        assert_eq!(updated.balance, 1500.0);
        assert_eq!(local.list_transactions(USER).await.unwrap().len(), 1);
        assert!(local.list_activity(USER, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_profile_is_reported() {
        let (store, profile) = seeded_local(1000.0).await;
        let ledger = ledger_over(store.clone());
        let ghost = profile_for("user-ghost", &profile);

        let err = ledger.deposit("user-ghost", 1.0, &ghost).await.unwrap_err();
        assert!(matches!(err, CoreError::ProfileNotFound(_)));
    }

    #[tokio::test]
    async fn overflowing_deposit_is_rejected_and_profile_stays_readable() {
        let (store, profile) = seeded_local(f64::MAX).await;
        let ledger = ledger_over(store.clone());

        let err = ledger.deposit(USER, f64::MAX, &profile).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let stored = store.get_profile(USER).await.unwrap().unwrap();
        assert_eq!(stored.balance, f64::MAX);
        assert!(store.list_transactions(USER).await.unwrap().is_empty());

        let updated = ledger.withdraw(USER, 1.0e300, &stored).await.unwrap();
        assert!(updated.balance.is_finite());
    }

    fn profile_for(
        id: &str,
        template: &aether_trading_core::models::profile::UserProfile,
    ) -> aether_trading_core::models::profile::UserProfile {
        let mut p = template.clone();
        p.id = id.to_string();
        p
    }
}
