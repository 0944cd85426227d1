use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::asset::{Asset, AssetType};

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    /// Spends cash, acquires the asset
    Buy,
    /// Disposes of the asset, receives cash
    Sell,
}

impl TradeSide {
    /// Sign applied to the trade amount when it hits the cash balance.
    pub fn cash_sign(&self) -> f64 {
        match self {
            TradeSide::Buy => -1.0,
            TradeSide::Sell => 1.0,
        }
    }
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "BUY"),
            TradeSide::Sell => write!(f, "SELL"),
        }
    }
}

/// Identity of the traded asset, as copied onto trade rows and positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRef {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
}

impl From<&Asset> for AssetRef {
    fn from(asset: &Asset) -> Self {
        Self {
            id: asset.id.clone(),
            symbol: asset.symbol.clone(),
            name: asset.name.clone(),
            asset_type: asset.asset_type,
        }
    }
}

/// A trade the caller wants settled against the user's balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRequest {
    pub asset: AssetRef,
    pub side: TradeSide,
    pub quantity: f64,
    /// Unit price
    pub price: f64,
    /// Total cash amount of the trade (always positive)
    pub amount: f64,
}

impl TradeRequest {
    /// Build a request whose amount is `quantity * price`.
    pub fn new(asset: AssetRef, side: TradeSide, quantity: f64, price: f64) -> Self {
        Self {
            asset,
            side,
            quantity,
            price,
            amount: quantity * price,
        }
    }

    pub fn buy(asset: AssetRef, quantity: f64, price: f64) -> Self {
        Self::new(asset, TradeSide::Buy, quantity, price)
    }

    pub fn sell(asset: AssetRef, quantity: f64, price: f64) -> Self {
        Self::new(asset, TradeSide::Sell, quantity, price)
    }

    /// Cash effect on the balance: negative for buys, positive for sells.
    pub fn signed_amount(&self) -> f64 {
        self.side.cash_sign() * self.amount
    }

    /// Text used for the matching `TRADE` transaction.
    pub fn description(&self) -> String {
        format!(
            "{} {} {} at {} per unit",
            self.side, self.quantity, self.asset.symbol, self.price
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Completed,
}

/// A settled trade, one row per [`TradeRequest`] that went through the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    pub id: Uuid,
    pub user_id: String,
    pub asset: AssetRef,
    pub quantity: f64,
    pub price: f64,
    pub amount: f64,
    pub side: TradeSide,
    pub status: TradeStatus,
    pub created_at: DateTime<Utc>,
}

impl TradeRecord {
    pub fn from_request(user_id: impl Into<String>, request: &TradeRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            asset: request.asset.clone(),
            quantity: request.quantity,
            price: request.price,
            amount: request.amount,
            side: request.side,
            status: TradeStatus::Completed,
            created_at: Utc::now(),
        }
    }

    /// Quantity with the trade direction applied (sells are negative).
    pub fn signed_quantity(&self) -> f64 {
        match self.side {
            TradeSide::Buy => self.quantity,
            TradeSide::Sell => -self.quantity,
        }
    }
}

/// A holding with its cost basis and mark-to-market result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradePosition {
    pub id: Uuid,
    pub user_id: String,
    pub asset: AssetRef,
    /// Negative for positions synthesized from sell trades
    pub quantity: f64,
    pub entry_price: f64,
    pub current_price: f64,
    pub profit_loss: f64,
    pub profit_loss_percent: f64,
    pub created_at: DateTime<Utc>,
}

impl TradePosition {
    /// One position per trade; the trade price becomes both entry and current price.
    pub fn from_trade(trade: &TradeRecord) -> Self {
        let mut position = Self {
            id: trade.id,
            user_id: trade.user_id.clone(),
            asset: trade.asset.clone(),
            quantity: trade.signed_quantity(),
            entry_price: trade.price,
            current_price: trade.price,
            profit_loss: 0.0,
            profit_loss_percent: 0.0,
            created_at: trade.created_at,
        };
        position.revalue(trade.price);
        position
    }

    /// Mark the position to `current_price` and recompute profit/loss.
    ///
    /// `profit_loss` is scaled by the signed quantity, while
    /// `profit_loss_percent` is the raw price move from entry. For a sell
    /// (negative quantity) the two therefore carry opposite signs.
    pub fn revalue(&mut self, current_price: f64) {
        self.current_price = current_price;
        self.profit_loss = (current_price - self.entry_price) * self.quantity;
        self.profit_loss_percent = if self.entry_price.abs() > f64::EPSILON {
            (current_price - self.entry_price) / self.entry_price * 100.0
        } else {
            0.0
        };
    }

    /// Current market value of the position.
    pub fn market_value(&self) -> f64 {
        self.current_price * self.quantity
    }
}
