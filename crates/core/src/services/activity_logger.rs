use log::{debug, warn};
use std::sync::Arc;

use crate::models::activity::{ActivityDetails, ActivityLogEntry, ActivityType};
use crate::storage::traits::LedgerStore;

/// Best-effort audit trail.
///
/// Writes go through the same store as the ledger. A failed write is logged
/// and dropped: callers never see activity-log errors.
pub struct ActivityLogger {
    store: Arc<dyn LedgerStore>,
    user_agent: String,
}

impl ActivityLogger {
    pub fn new(store: Arc<dyn LedgerStore>, user_agent: impl Into<String>) -> Self {
        Self {
            store,
            user_agent: user_agent.into(),
        }
    }

    /// Record an action. Returns `true` if the entry was stored.
    pub async fn log(
        &self,
        user_id: &str,
        action_type: ActivityType,
        details: ActivityDetails,
    ) -> bool {
        let entry = ActivityLogEntry::new(user_id, action_type, details, self.user_agent.clone());
        match self.store.append_activity(&entry).await {
            Ok(()) => {
                debug!("Activity logged: {} for {user_id}", entry.action_type);
                true
            }
            Err(e) => {
                warn!("Failed to log activity {} for {user_id}: {e}", entry.action_type);
                false
            }
        }
    }

    /// Most recent entries for a user, newest first. Empty on backend failure.
    pub async fn recent(&self, user_id: &str, limit: usize) -> Vec<ActivityLogEntry> {
        match self.store.list_activity(user_id, limit).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to load activity for {user_id}: {e}");
                Vec::new()
            }
        }
    }
}
