use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::activity::{ActivityDetails, ActivityLogEntry, ActivityType};
use crate::models::asset::AssetType;
use crate::models::profile::UserProfile;
use crate::models::trade::{AssetRef, TradeRecord, TradeSide, TradeStatus};
use crate::models::transaction::{Transaction, TransactionStatus, TransactionType};

use super::traits::LedgerStore;

const REST_PATH: &str = "rest/v1";

/// Remote store speaking the PostgREST dialect (as exposed by Supabase).
///
/// - **Tables**: `profiles`, `transactions`, `trades`, `activity_logs`
/// - **Auth**: the configured key is sent as `apikey` and as a bearer token
/// - **Writes**: ids are generated client-side so failed ledger writes can be
///   compensated by id
///
/// No retries and no backoff: a failed request is returned to the caller.
pub struct RemoteStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RemoteStore {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CoreError> {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(timeout);
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;
        let client = builder
            .build()
            .map_err(|e| CoreError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Full REST endpoint for a table, e.g. `https://x.supabase.co/rest/v1/trades`.
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/{REST_PATH}/{table}", self.base_url)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn check(response: Response) -> Result<Response, CoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown").to_string());
        Err(CoreError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, CoreError> {
        let url = self.table_url(table);
        debug!("GET {url}");
        let response = self
            .authorized(self.client.get(&url))
            .query(&[("select", "*")])
            .query(filters)
            .send()
            .await?;
        let rows = Self::check(response).await?.json::<Vec<T>>().await?;
        Ok(rows)
    }

    async fn insert<T: Serialize + ?Sized>(&self, table: &str, row: &T) -> Result<(), CoreError> {
        let url = self.table_url(table);
        debug!("POST {url}");
        let response = self
            .authorized(self.client.post(&url))
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete(&self, table: &str, filters: &[(&str, String)]) -> Result<(), CoreError> {
        let url = self.table_url(table);
        debug!("DELETE {url}");
        let response = self
            .authorized(self.client.delete(&url))
            .query(filters)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

/// PostgREST equality filter value.
fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

// ── Row types (snake_case columns) ──────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRow {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub balance: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl From<ProfileRow> for UserProfile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            name: row.name.unwrap_or_default(),
            email: row.email.unwrap_or_default(),
            balance: row.balance.unwrap_or(0.0),
            created_at: row.created_at,
        }
    }
}

impl From<&UserProfile> for ProfileRow {
    fn from(p: &UserProfile) -> Self {
        Self {
            id: p.id.clone(),
            name: Some(p.name.clone()),
            email: Some(p.email.clone()),
            balance: Some(p.balance),
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: Uuid,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
    pub status: TransactionStatus,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<TransactionRow> for Transaction {
    fn from(row: TransactionRow) -> Self {
        Self {
            description: row
                .description
                .unwrap_or_else(|| format!("{} transaction", row.kind)),
            id: row.id,
            user_id: row.user_id,
            kind: row.kind,
            amount: row.amount,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id,
            user_id: t.user_id.clone(),
            kind: t.kind,
            amount: t.amount,
            status: t.status,
            description: Some(t.description.clone()),
            created_at: t.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRow {
    pub id: Uuid,
    pub user_id: String,
    pub asset_id: String,
    pub asset_symbol: String,
    pub asset_name: String,
    pub asset_type: AssetType,
    pub quantity: f64,
    pub price: f64,
    pub amount: f64,
    #[serde(rename = "type")]
    pub side: TradeSide,
    pub status: TradeStatus,
    pub created_at: DateTime<Utc>,
}

impl From<TradeRow> for TradeRecord {
    fn from(row: TradeRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            asset: AssetRef {
                id: row.asset_id,
                symbol: row.asset_symbol,
                name: row.asset_name,
                asset_type: row.asset_type,
            },
            quantity: row.quantity,
            price: row.price,
            amount: row.amount,
            side: row.side,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

impl From<&TradeRecord> for TradeRow {
    fn from(t: &TradeRecord) -> Self {
        Self {
            id: t.id,
            user_id: t.user_id.clone(),
            asset_id: t.asset.id.clone(),
            asset_symbol: t.asset.symbol.clone(),
            asset_name: t.asset.name.clone(),
            asset_type: t.asset.asset_type,
            quantity: t.quantity,
            price: t.price,
            amount: t.amount,
            side: t.side,
            status: t.status,
            created_at: t.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLogRow {
    pub id: Uuid,
    pub user_id: String,
    pub action_type: ActivityType,
    #[serde(default)]
    pub details: Option<ActivityDetails>,
    #[serde(default)]
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ActivityLogRow> for ActivityLogEntry {
    fn from(row: ActivityLogRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            action_type: row.action_type,
            details: row.details.unwrap_or_default(),
            user_agent: row.user_agent.unwrap_or_else(|| "unknown".to_string()),
            created_at: row.created_at,
        }
    }
}

impl From<&ActivityLogEntry> for ActivityLogRow {
    fn from(e: &ActivityLogEntry) -> Self {
        Self {
            id: e.id,
            user_id: e.user_id.clone(),
            action_type: e.action_type.clone(),
            details: Some(e.details.clone()),
            user_agent: Some(e.user_agent.clone()),
            created_at: e.created_at,
        }
    }
}

#[derive(Serialize)]
struct BalancePatch {
    balance: f64,
    updated_at: DateTime<Utc>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl LedgerStore for RemoteStore {
    fn name(&self) -> &str {
        "remote"
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, CoreError> {
        let rows: Vec<ProfileRow> = self.select("profiles", &[("id", eq(user_id))]).await?;
        Ok(rows.into_iter().next().map(UserProfile::from))
    }

    async fn put_profile(&self, profile: &UserProfile) -> Result<(), CoreError> {
        let url = self.table_url("profiles");
        debug!("POST {url} (upsert)");
        let response = self
            .authorized(self.client.post(&url))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&ProfileRow::from(profile))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn update_balance(
        &self,
        user_id: &str,
        expected_balance: f64,
        new_balance: f64,
    ) -> Result<UserProfile, CoreError> {
        if !new_balance.is_finite() {
            return Err(CoreError::Validation(format!(
                "Balance must be a finite number, got {new_balance}"
            )));
        }
        if new_balance < 0.0 {
            return Err(CoreError::InsufficientFunds {
                balance: expected_balance,
                requested: expected_balance - new_balance,
            });
        }

        // The balance filter turns the PATCH into a compare-and-set:
        // no row matches if someone else changed the balance first.
        let url = self.table_url("profiles");
        debug!("PATCH {url}");
        let response = self
            .authorized(self.client.patch(&url))
            .header("Prefer", "return=representation")
            .query(&[("id", eq(user_id)), ("balance", eq(expected_balance))])
            .json(&BalancePatch {
                balance: new_balance,
                updated_at: Utc::now(),
            })
            .send()
            .await?;
        let rows: Vec<ProfileRow> = Self::check(response).await?.json().await?;

        if let Some(row) = rows.into_iter().next() {
            return Ok(row.into());
        }

        match self.get_profile(user_id).await? {
            Some(current) => Err(CoreError::BalanceConflict {
                user_id: user_id.to_string(),
                expected: expected_balance,
                actual: current.balance,
            }),
            None => Err(CoreError::ProfileNotFound(user_id.to_string())),
        }
    }

    async fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>, CoreError> {
        let rows: Vec<TransactionRow> = self
            .select(
                "transactions",
                &[("user_id", eq(user_id)), ("order", "created_at.desc".into())],
            )
            .await?;
        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    async fn insert_transaction(&self, transaction: &Transaction) -> Result<(), CoreError> {
        self.insert("transactions", &TransactionRow::from(transaction))
            .await
    }

    async fn delete_transaction(&self, user_id: &str, id: Uuid) -> Result<(), CoreError> {
        self.delete(
            "transactions",
            &[("id", eq(id)), ("user_id", eq(user_id))],
        )
        .await
    }

    async fn list_trades(&self, user_id: &str) -> Result<Vec<TradeRecord>, CoreError> {
        let rows: Vec<TradeRow> = self
            .select(
                "trades",
                &[("user_id", eq(user_id)), ("order", "created_at.desc".into())],
            )
            .await?;
        Ok(rows.into_iter().map(TradeRecord::from).collect())
    }

    async fn insert_trade(&self, trade: &TradeRecord) -> Result<(), CoreError> {
        self.insert("trades", &TradeRow::from(trade)).await
    }

    async fn delete_trade(&self, user_id: &str, id: Uuid) -> Result<(), CoreError> {
        self.delete("trades", &[("id", eq(id)), ("user_id", eq(user_id))])
            .await
    }

    async fn append_activity(&self, entry: &ActivityLogEntry) -> Result<(), CoreError> {
        self.insert("activity_logs", &ActivityLogRow::from(entry))
            .await
    }

    async fn list_activity(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<ActivityLogEntry>, CoreError> {
        let rows: Vec<ActivityLogRow> = self
            .select(
                "activity_logs",
                &[
                    ("user_id", eq(user_id)),
                    ("order", "created_at.desc".into()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(ActivityLogEntry::from).collect())
    }
}
