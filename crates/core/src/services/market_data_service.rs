use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::models::asset::{Asset, AssetPrice, AssetType, Candle, MarketData};
use crate::models::chart::PerformancePoint;
use crate::models::transaction::{Transaction, TransactionStatus, TransactionType};

use super::catalog;

/// Maximum daily move applied to a snapshot's previous price (±5%).
const SNAPSHOT_VOLATILITY: f64 = 0.05;

/// Value the synthetic performance series starts from.
pub const DEFAULT_PERFORMANCE_START: f64 = 10_000.0;

/// Generates synthetic quotes, candles and demo history.
///
/// Nothing here is persisted: every call draws fresh numbers. The RNG can be
/// seeded so tests get reproducible output.
pub struct MarketDataGenerator {
    rng: Mutex<StdRng>,
}

impl MarketDataGenerator {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic generator: the same seed yields the same sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Quotes for the first `count` instruments of every asset class.
    pub fn generate_market_data(&self, count: usize) -> MarketData {
        let mut rng = self.rng();
        let mut build = |asset_type: AssetType, list: &[(&str, &str)]| -> Vec<Asset> {
            list.iter()
                .take(count)
                .map(|(symbol, name)| generate_asset(&mut *rng, symbol, name, asset_type))
                .collect()
        };

        MarketData {
            stocks: build(AssetType::Stock, catalog::STOCKS),
            crypto: build(AssetType::Crypto, catalog::CRYPTO),
            forex: build(AssetType::Forex, catalog::FOREX),
            funds: build(AssetType::Fund, catalog::FUNDS),
        }
    }

    /// `days + 1` daily candles ending on `end`, oldest first.
    ///
    /// Volatility depends on the asset class; each series gets a random
    /// trend (50% up, 30% down, 20% sideways).
    pub fn generate_historical(
        &self,
        asset_type: AssetType,
        days: u32,
        end: NaiveDate,
    ) -> Vec<Candle> {
        let mut rng = self.rng();

        let (mut base, volatility): (f64, f64) = match asset_type {
            AssetType::Crypto => (rng.gen_range(100.0..2000.0), 0.05),
            AssetType::Forex => (rng.gen_range(0.5..2.0), 0.01),
            AssetType::Fund => (rng.gen_range(50.0..200.0), 0.015),
            AssetType::Stock => (rng.gen_range(50.0..500.0), 0.02),
        };

        let bias: f64 = rng.gen();
        let trend = if bias < 0.5 {
            0.002
        } else if bias < 0.8 {
            -0.002
        } else {
            0.0
        };

        let mut candles = Vec::with_capacity(days as usize + 1);
        for i in (0..=days).rev() {
            let date = end - Duration::days(i64::from(i));
            base *= 1.0 + trend + rng.gen_range(-volatility..volatility);

            let open = base;
            let close = base * (1.0 + rng.gen_range(-volatility..volatility));
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..volatility));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..volatility));

            candles.push(Candle {
                date,
                open: round2(open),
                high: round2(high),
                low: round2(low),
                close: round2(close),
                volume: rng.gen_range(100_000..10_000_000),
            });
        }
        candles
    }

    /// Daily portfolio value random walk over `days + 1` days ending on `end`.
    /// Daily change is drawn from -2%..+2.5%, a slight upward drift.
    pub fn performance_series(
        &self,
        days: u32,
        start_value: f64,
        end: NaiveDate,
    ) -> Vec<PerformancePoint> {
        let mut rng = self.rng();
        let mut value = start_value;
        (0..=days)
            .rev()
            .map(|i| {
                value += value * rng.gen_range(-0.02..0.025);
                PerformancePoint {
                    date: end - Duration::days(i64::from(i)),
                    value: round2(value),
                }
            })
            .collect()
    }

    /// Completed demo transactions, one per day going back from `now`,
    /// newest first. Withdrawals carry a negative amount.
    pub fn demo_transactions(
        &self,
        user_id: &str,
        count: usize,
        now: DateTime<Utc>,
    ) -> Vec<Transaction> {
        const KINDS: [TransactionType; 3] = [
            TransactionType::Deposit,
            TransactionType::Withdrawal,
            TransactionType::Trade,
        ];

        let mut rng = self.rng();
        (0..count)
            .map(|i| {
                let kind = KINDS[rng.gen_range(0..KINDS.len())];
                let magnitude = rng.gen_range(100.0_f64..5000.0).floor();
                let amount = match kind {
                    TransactionType::Withdrawal => -magnitude,
                    _ => magnitude,
                };
                Transaction {
                    id: random_uuid(&mut *rng),
                    user_id: user_id.to_string(),
                    kind,
                    amount,
                    status: TransactionStatus::Completed,
                    description: format!("{kind} transaction"),
                    created_at: now - Duration::days(i as i64),
                }
            })
            .collect()
    }
}

impl Default for MarketDataGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn generate_asset<R: Rng>(rng: &mut R, symbol: &str, name: &str, asset_type: AssetType) -> Asset {
    let (base, volume) = match asset_type {
        AssetType::Stock => (
            rng.gen_range(10.0..1000.0),
            rng.gen_range(100_000..10_000_000),
        ),
        AssetType::Crypto => {
            let base = match symbol {
                "BTC" => rng.gen_range(30_000.0..60_000.0),
                "ETH" => rng.gen_range(1500.0..3500.0),
                _ => rng.gen_range(0.01..200.0),
            };
            (base, rng.gen_range(1_000_000..10_000_000_000))
        }
        AssetType::Forex => {
            let mut base = rng.gen_range(0.5..2.0);
            if symbol.contains("JPY") {
                base *= 100.0;
            }
            (base, rng.gen_range(10_000_000..100_000_000_000))
        }
        AssetType::Fund => (rng.gen_range(10.0..500.0), rng.gen_range(10_000..1_000_000)),
    };

    Asset {
        id: random_uuid(rng).to_string(),
        symbol: symbol.to_string(),
        name: name.to_string(),
        asset_type,
        price: price_snapshot(rng, base),
        volume,
    }
}

/// Move `base` by up to ±5% and describe the move.
fn price_snapshot<R: Rng>(rng: &mut R, base: f64) -> AssetPrice {
    let change = base * rng.gen_range(-SNAPSHOT_VOLATILITY..SNAPSHOT_VOLATILITY);
    AssetPrice {
        current: round2(base + change),
        previous: base,
        change: round2(change),
        change_percent: round2(change / base * 100.0),
    }
}

fn random_uuid<R: Rng>(rng: &mut R) -> Uuid {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}

/// Round to cents.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
