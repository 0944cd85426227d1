pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use chrono::Utc;
use log::{debug, info, warn};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use config::SimulatorConfig;
use errors::CoreError;
use models::{
    activity::{details_from, ActivityDetails, ActivityLogEntry, ActivityType},
    asset::{AssetType, Candle, MarketData},
    overview::AccountOverview,
    profile::UserProfile,
    trade::{TradePosition, TradeRequest},
    transaction::Transaction,
};
use services::{
    activity_logger::ActivityLogger,
    ledger_service::LedgerService,
    market_data_service::{MarketDataGenerator, DEFAULT_PERFORMANCE_START},
    portfolio_service::PortfolioService,
    refresh::RefreshThrottle,
};
use storage::{local::LocalStore, open_store, traits::LedgerStore};

/// Days covered by the performance series in an overview.
const PERFORMANCE_DAYS: u32 = 30;

/// Demo transactions seeded into an empty local history.
const DEMO_TRANSACTION_COUNT: usize = 10;

/// Main entry point for the trading simulator core.
/// Holds the configured store and every service that operates on it.
#[must_use]
pub struct TradingSimulator {
    config: SimulatorConfig,
    store: Arc<dyn LedgerStore>,
    local: Arc<LocalStore>,
    ledger: LedgerService,
    logger: Arc<ActivityLogger>,
    market: MarketDataGenerator,
    portfolio_service: PortfolioService,
    throttle: RefreshThrottle,
}

impl std::fmt::Debug for TradingSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradingSimulator")
            .field("store", &self.store.name())
            .field("local_keys", &self.local.keys().len())
            .field("refresh_interval", &self.throttle.interval())
            .finish()
    }
}

impl TradingSimulator {
    /// Validate the configuration and open the configured store.
    pub fn new(config: SimulatorConfig) -> Result<Self, CoreError> {
        config.validate()?;
        let handles = open_store(&config)?;
        Ok(Self::with_store(config, handles.primary, handles.local))
    }

    /// Simulator over an explicit store. `local` serves fallback reads.
    pub fn with_store(
        config: SimulatorConfig,
        store: Arc<dyn LedgerStore>,
        local: Arc<LocalStore>,
    ) -> Self {
        let logger = Arc::new(ActivityLogger::new(store.clone(), config.user_agent.clone()));
        let ledger = LedgerService::new(store.clone(), logger.clone())
            .with_sell_holdings_check(config.enforce_sell_holdings);
        let throttle = RefreshThrottle::new(Duration::from_millis(config.refresh_interval_ms));

        Self {
            config,
            store,
            local,
            ledger,
            logger,
            market: MarketDataGenerator::new(),
            portfolio_service: PortfolioService::new(),
            throttle,
        }
    }

    /// Simulator backed only by a fresh local store.
    pub fn in_memory(config: SimulatorConfig) -> Self {
        let local = Arc::new(LocalStore::new(config.activity_log_capacity));
        Self::with_store(config, local.clone(), local)
    }

    /// Replace the market-data generator (e.g. with a seeded one).
    pub fn with_market_generator(mut self, generator: MarketDataGenerator) -> Self {
        self.market = generator;
        self
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn LedgerStore> {
        &self.store
    }

    pub fn local_store(&self) -> &Arc<LocalStore> {
        &self.local
    }

    pub fn ledger(&self) -> &LedgerService {
        &self.ledger
    }

    // ── Profiles ────────────────────────────────────────────────────

    /// Identifier for a non-persistent demo session, e.g. `user-k3j9x1a`.
    pub fn demo_user_id() -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(7)
            .map(|b| char::from(b).to_ascii_lowercase())
            .collect();
        format!("user-{suffix}")
    }

    /// Load a profile, creating it with the starting balance if missing.
    pub async fn ensure_profile(
        &self,
        user_id: &str,
        name: &str,
        email: &str,
    ) -> Result<UserProfile, CoreError> {
        if user_id.trim().is_empty() {
            return Err(CoreError::Unauthenticated);
        }
        if let Some(profile) = self.store.get_profile(user_id).await? {
            return Ok(profile);
        }

        let profile = UserProfile::new(user_id, name, email, self.config.starting_balance);
        self.store.put_profile(&profile).await?;
        info!("Created profile {user_id} with balance {:.2}", profile.balance);
        self.logger
            .log(
                user_id,
                ActivityType::ProfileUpdate,
                details_from(json!({
                    "created": true,
                    "balance": profile.balance,
                })),
            )
            .await;
        Ok(profile)
    }

    pub async fn profile(&self, user_id: &str) -> Result<UserProfile, CoreError> {
        if user_id.trim().is_empty() {
            return Err(CoreError::Unauthenticated);
        }
        self.store
            .get_profile(user_id)
            .await?
            .ok_or_else(|| CoreError::ProfileNotFound(user_id.to_string()))
    }

    // ── Ledger ──────────────────────────────────────────────────────

    /// Deposit against the stored profile. Returns the updated profile.
    pub async fn deposit(&self, user_id: &str, amount: f64) -> Result<UserProfile, CoreError> {
        let profile = self.profile(user_id).await?;
        self.ledger.deposit(user_id, amount, &profile).await
    }

    pub async fn withdraw(&self, user_id: &str, amount: f64) -> Result<UserProfile, CoreError> {
        let profile = self.profile(user_id).await?;
        self.ledger.withdraw(user_id, amount, &profile).await
    }

    pub async fn trade(
        &self,
        user_id: &str,
        trade: &TradeRequest,
    ) -> Result<UserProfile, CoreError> {
        let profile = self.profile(user_id).await?;
        self.ledger.record_trade(user_id, &profile, trade).await
    }

    // ── Reads ───────────────────────────────────────────────────────

    /// Transaction history, newest first.
    ///
    /// Reads the configured store; if that fails or has nothing, the local
    /// history is used instead (seeded with demo transactions when empty and
    /// `seed_demo_data` is on).
    pub async fn fetch_transactions(&self, user_id: &str) -> Result<Vec<Transaction>, CoreError> {
        match self.store.list_transactions(user_id).await {
            Ok(list) if !list.is_empty() => return Ok(list),
            Ok(_) => debug!("No stored transactions for {user_id}, using local history"),
            Err(e) => warn!("Loading transactions for {user_id} failed, using local history: {e}"),
        }
        self.local_transactions(user_id).await
    }

    async fn local_transactions(&self, user_id: &str) -> Result<Vec<Transaction>, CoreError> {
        let existing = self.local.list_transactions(user_id).await?;
        if !existing.is_empty() || !self.config.seed_demo_data {
            return Ok(existing);
        }

        let demo = self
            .market
            .demo_transactions(user_id, DEMO_TRANSACTION_COUNT, Utc::now());
        // Inserts prepend, so oldest goes in first.
        for tx in demo.iter().rev() {
            self.local.insert_transaction(tx).await?;
        }
        info!("Seeded {} demo transactions for {user_id}", demo.len());
        Ok(demo)
    }

    /// Fresh synthetic quotes for every asset class.
    pub fn market_data(&self) -> MarketData {
        self.market
            .generate_market_data(self.config.market_items_per_class)
    }

    /// Daily candles for an asset class, ending today.
    pub fn historical_data(&self, asset_type: AssetType, days: u32) -> Vec<Candle> {
        self.market
            .generate_historical(asset_type, days, Utc::now().date_naive())
    }

    /// Positions built from the user's trades and marked to `market`.
    ///
    /// The valued portfolio is cached in the local store. If the trades
    /// cannot be loaded, the cached positions are re-marked to `market`
    /// and returned instead; without a cache the load error is returned.
    pub async fn portfolio(
        &self,
        user_id: &str,
        market: &MarketData,
    ) -> Result<Vec<TradePosition>, CoreError> {
        let trades = match self.store.list_trades(user_id).await {
            Ok(trades) => trades,
            Err(e) => {
                warn!("Loading trades for {user_id} failed, trying cached portfolio: {e}");
                return match self.local.load_portfolio(user_id).await {
                    Ok(Some(mut cached)) => {
                        self.portfolio_service.revalue(&mut cached, market);
                        Ok(cached)
                    }
                    Ok(None) => Err(e),
                    Err(cache_err) => {
                        warn!("Cached portfolio for {user_id} is unreadable: {cache_err}");
                        Err(e)
                    }
                };
            }
        };

        let positions = self.portfolio_service.positions_from_trades(&trades, market);
        if let Err(e) = self.local.save_portfolio(user_id, &positions).await {
            warn!("Failed to cache portfolio for {user_id}: {e}");
        }
        Ok(positions)
    }

    /// Full dashboard refresh, or `None` when called again within the
    /// configured refresh interval.
    pub async fn refresh(&self, user_id: &str) -> Result<Option<AccountOverview>, CoreError> {
        if user_id.trim().is_empty() {
            return Err(CoreError::Unauthenticated);
        }
        if !self.throttle.try_acquire() {
            debug!("Throttling data refresh for {user_id}");
            return Ok(None);
        }
        self.build_overview(user_id).await.map(Some)
    }

    /// Full dashboard refresh, ignoring the throttle.
    pub async fn force_refresh(&self, user_id: &str) -> Result<AccountOverview, CoreError> {
        self.throttle.reset();
        self.throttle.try_acquire();
        self.build_overview(user_id).await
    }

    async fn build_overview(&self, user_id: &str) -> Result<AccountOverview, CoreError> {
        let profile = self.profile(user_id).await?;
        let market_data = self.market_data();
        let transactions = self.fetch_transactions(user_id).await?;
        let portfolio = self.portfolio(user_id, &market_data).await?;
        let portfolio_performance = self.market.performance_series(
            PERFORMANCE_DAYS,
            DEFAULT_PERFORMANCE_START,
            Utc::now().date_naive(),
        );

        debug!(
            "Refreshed {user_id}: {} transactions, {} positions",
            transactions.len(),
            portfolio.len()
        );

        Ok(AccountOverview {
            portfolio_value: self.portfolio_service.portfolio_value(&portfolio),
            portfolio_profit_loss: self.portfolio_service.portfolio_profit_loss(&portfolio),
            profile,
            market_data,
            transactions,
            portfolio,
            portfolio_performance,
        })
    }

    // ── Activity log ────────────────────────────────────────────────

    /// Record a user action. Never fails; returns whether it was stored.
    pub async fn log_activity(
        &self,
        user_id: &str,
        action_type: ActivityType,
        details: ActivityDetails,
    ) -> bool {
        self.logger.log(user_id, action_type, details).await
    }

    pub async fn recent_activity(&self, user_id: &str, limit: usize) -> Vec<ActivityLogEntry> {
        self.logger.recent(user_id, limit).await
    }

    // ── Persistence ─────────────────────────────────────────────────

    /// Write the local store to `storage.snapshot_path`, if configured.
    /// Returns whether a snapshot was written.
    pub fn save_snapshot(&self) -> Result<bool, CoreError> {
        match self.config.storage.snapshot_path.as_deref() {
            Some(path) => {
                self.local.save_to_file(path)?;
                info!("Saved local store snapshot to {path}");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
