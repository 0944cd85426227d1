use serde::{Deserialize, Serialize};

use super::asset::MarketData;
use super::chart::PerformancePoint;
use super::profile::UserProfile;
use super::trade::TradePosition;
use super::transaction::Transaction;

/// Everything a dashboard needs after a full data refresh.
///
/// Produced by `TradingSimulator::refresh`; market data and the performance
/// series are regenerated on every refresh, the rest is read from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountOverview {
    pub profile: UserProfile,

    pub market_data: MarketData,

    /// Newest first
    pub transactions: Vec<Transaction>,

    /// One position per recorded trade, marked to the fresh market data
    pub portfolio: Vec<TradePosition>,

    /// Sum of `current_price * quantity` over all positions
    pub portfolio_value: f64,

    /// Sum of per-position profit/loss
    pub portfolio_profit_loss: f64,

    pub portfolio_performance: Vec<PerformancePoint>,
}
