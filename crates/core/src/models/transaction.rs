use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of balance-affecting event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Trade,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Deposit => write!(f, "DEPOSIT"),
            TransactionType::Withdrawal => write!(f, "WITHDRAWAL"),
            TransactionType::Trade => write!(f, "TRADE"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "PENDING"),
            TransactionStatus::Completed => write!(f, "COMPLETED"),
            TransactionStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// A single entry in a user's transaction history.
///
/// Immutable once created. `amount` is signed: deposits and sell trades are
/// positive, withdrawals and buy trades negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
    pub status: TransactionStatus,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// A completed transaction stamped with the current time.
    pub fn completed(
        user_id: impl Into<String>,
        kind: TransactionType,
        amount: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            kind,
            amount,
            status: TransactionStatus::Completed,
            description: description.into(),
            created_at: Utc::now(),
        }
    }

    pub fn deposit(user_id: impl Into<String>, amount: f64) -> Self {
        Self::completed(user_id, TransactionType::Deposit, amount, "Deposit funds")
    }

    /// `amount` is the withdrawn sum; it is stored negated.
    pub fn withdrawal(user_id: impl Into<String>, amount: f64) -> Self {
        Self::completed(user_id, TransactionType::Withdrawal, -amount, "Withdraw funds")
    }
}
