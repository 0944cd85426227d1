use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The market an asset trades in.
/// Serialized in upper case (`"STOCK"`, `"CRYPTO"`, ...) to match stored rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetType {
    Stock,
    Crypto,
    Forex,
    Fund,
}

impl AssetType {
    pub const ALL: [AssetType; 4] = [
        AssetType::Stock,
        AssetType::Crypto,
        AssetType::Forex,
        AssetType::Fund,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Stock => "STOCK",
            AssetType::Crypto => "CRYPTO",
            AssetType::Forex => "FOREX",
            AssetType::Fund => "FUND",
        }
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AssetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "STOCK" => Ok(AssetType::Stock),
            "CRYPTO" => Ok(AssetType::Crypto),
            "FOREX" => Ok(AssetType::Forex),
            "FUND" => Ok(AssetType::Fund),
            other => Err(format!("unknown asset type: {other}")),
        }
    }
}

/// Price snapshot for an asset at generation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPrice {
    pub current: f64,
    pub previous: f64,
    /// Absolute change, `current - previous`
    pub change: f64,
    /// Change relative to `previous`, in percent
    pub change_percent: f64,
}

/// A tradable instrument with its latest (synthetic) quote.
///
/// Assets are regenerated on every market-data fetch and never persisted;
/// the `id` is therefore only stable within one [`MarketData`] value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,

    /// Ticker symbol (e.g., "AAPL", "BTC", "EUR/USD", "VFIAX")
    pub symbol: String,

    /// Human-readable name
    pub name: String,

    #[serde(rename = "type")]
    pub asset_type: AssetType,

    pub price: AssetPrice,

    /// Traded volume
    pub volume: u64,
}

/// One full market-data fetch, grouped by asset class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    pub stocks: Vec<Asset>,
    pub crypto: Vec<Asset>,
    pub forex: Vec<Asset>,
    pub funds: Vec<Asset>,
}

impl MarketData {
    /// Assets of one class.
    pub fn by_type(&self, asset_type: AssetType) -> &[Asset] {
        match asset_type {
            AssetType::Stock => &self.stocks,
            AssetType::Crypto => &self.crypto,
            AssetType::Forex => &self.forex,
            AssetType::Fund => &self.funds,
        }
    }

    /// Iterate over every asset, stocks first.
    pub fn iter(&self) -> impl Iterator<Item = &Asset> {
        self.stocks
            .iter()
            .chain(self.crypto.iter())
            .chain(self.forex.iter())
            .chain(self.funds.iter())
    }

    /// Look up an asset by symbol (case-insensitive).
    pub fn find_by_symbol(&self, symbol: &str) -> Option<&Asset> {
        self.iter().find(|a| a.symbol.eq_ignore_ascii_case(symbol))
    }

    pub fn len(&self) -> usize {
        self.stocks.len() + self.crypto.len() + self.forex.len() + self.funds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One daily OHLCV candle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}
