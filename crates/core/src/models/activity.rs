use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// What the user did. Unknown action strings are kept as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActivityType {
    Login,
    Logout,
    Trade,
    Deposit,
    Withdrawal,
    ProfileUpdate,
    ViewAsset,
    System,
    Custom(String),
}

impl ActivityType {
    pub fn as_str(&self) -> &str {
        match self {
            ActivityType::Login => "LOGIN",
            ActivityType::Logout => "LOGOUT",
            ActivityType::Trade => "TRADE",
            ActivityType::Deposit => "DEPOSIT",
            ActivityType::Withdrawal => "WITHDRAWAL",
            ActivityType::ProfileUpdate => "PROFILE_UPDATE",
            ActivityType::ViewAsset => "VIEW_ASSET",
            ActivityType::System => "SYSTEM",
            ActivityType::Custom(s) => s,
        }
    }
}

impl From<&str> for ActivityType {
    fn from(s: &str) -> Self {
        match s {
            "LOGIN" => ActivityType::Login,
            "LOGOUT" => ActivityType::Logout,
            "TRADE" => ActivityType::Trade,
            "DEPOSIT" => ActivityType::Deposit,
            "WITHDRAWAL" => ActivityType::Withdrawal,
            "PROFILE_UPDATE" => ActivityType::ProfileUpdate,
            "VIEW_ASSET" => ActivityType::ViewAsset,
            "SYSTEM" => ActivityType::System,
            other => ActivityType::Custom(other.to_string()),
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ActivityType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ActivityType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ActivityType::from(s.as_str()))
    }
}

/// Free-form key/value payload attached to an activity entry.
pub type ActivityDetails = Map<String, Value>;

/// One audit-trail record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    pub id: Uuid,
    pub user_id: String,
    pub action_type: ActivityType,
    #[serde(default)]
    pub details: ActivityDetails,
    pub user_agent: String,
    pub created_at: DateTime<Utc>,
}

impl ActivityLogEntry {
    pub fn new(
        user_id: impl Into<String>,
        action_type: ActivityType,
        details: ActivityDetails,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            action_type,
            details,
            user_agent: user_agent.into(),
            created_at: Utc::now(),
        }
    }
}

/// Turn a JSON object into activity details; non-objects give an empty map.
pub fn details_from(value: Value) -> ActivityDetails {
    match value {
        Value::Object(map) => map,
        _ => ActivityDetails::new(),
    }
}
