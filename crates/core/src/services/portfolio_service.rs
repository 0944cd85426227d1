use crate::models::asset::MarketData;
use crate::models::trade::{TradePosition, TradeRecord};

/// Builds and values positions from recorded trades.
///
/// Pure business logic, no I/O. Positions are not merged: every trade
/// becomes its own position, sells with a negative quantity.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    /// One position per trade, marked to the matching quote in `market`.
    /// Assets missing from the market data keep their entry price.
    pub fn positions_from_trades(
        &self,
        trades: &[TradeRecord],
        market: &MarketData,
    ) -> Vec<TradePosition> {
        trades
            .iter()
            .map(|trade| {
                let mut position = TradePosition::from_trade(trade);
                if let Some(asset) = market.find_by_symbol(&trade.asset.symbol) {
                    position.revalue(asset.price.current);
                }
                position
            })
            .collect()
    }

    /// Re-mark existing positions to fresh quotes.
    pub fn revalue(&self, positions: &mut [TradePosition], market: &MarketData) {
        for position in positions.iter_mut() {
            if let Some(asset) = market.find_by_symbol(&position.asset.symbol) {
                position.revalue(asset.price.current);
            }
        }
    }

    /// Σ current price × quantity.
    pub fn portfolio_value(&self, positions: &[TradePosition]) -> f64 {
        positions.iter().map(TradePosition::market_value).sum()
    }

    /// Σ per-position profit/loss.
    pub fn portfolio_profit_loss(&self, positions: &[TradePosition]) -> f64 {
        positions.iter().map(|p| p.profit_loss).sum()
    }

    /// Net quantity of `symbol` (buys minus sells), case-insensitive.
    pub fn held_quantity(&self, trades: &[TradeRecord], symbol: &str) -> f64 {
        trades
            .iter()
            .filter(|t| t.asset.symbol.eq_ignore_ascii_case(symbol))
            .map(TradeRecord::signed_quantity)
            .sum()
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
