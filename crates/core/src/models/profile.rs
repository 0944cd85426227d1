use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The account a ledger operates on.
///
/// `id` is a UUID for users of the remote store; demo sessions use free-form
/// identifiers such as `user-k3j9x1a`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,

    /// Cash balance. Stores refuse any update that would make it negative.
    pub balance: f64,

    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        balance: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            balance,
            created_at: Utc::now(),
        }
    }

    /// Copy of this profile carrying a different balance.
    pub fn with_balance(&self, balance: f64) -> Self {
        Self {
            balance,
            ..self.clone()
        }
    }
}
