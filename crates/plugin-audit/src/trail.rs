//! In-memory audit trail.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use hookchain_plugin::HookName;

/// Point in a hooked call an audit record was taken at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditPhase {
    /// Before the rest of the chain ran.
    Before,
    /// After the rest of the chain returned a value.
    After,
    /// After the rest of the chain returned an error.
    Failed,
}

/// One audit entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Correlates the records of a single call.
    pub dispatch_id: Uuid,
    /// Hook name the call went through.
    pub hook: HookName,
    /// Phase of the call.
    pub phase: AuditPhase,
    /// When the record was taken.
    pub at: DateTime<Utc>,
}

/// Shared, append-only list of audit records.
#[derive(Debug, Clone, Default)]
pub struct AuditTrail {
    records: Arc<RwLock<Vec<AuditRecord>>>,
}

impl AuditTrail {
    /// Creates an empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record.
    pub async fn record(&self, dispatch_id: Uuid, hook: &HookName, phase: AuditPhase) {
        let mut records = self.records.write().await;
        records.push(AuditRecord {
            dispatch_id,
            hook: hook.clone(),
            phase,
            at: Utc::now(),
        });
    }

    /// Returns a copy of every record, oldest first.
    pub async fn records(&self) -> Vec<AuditRecord> {
        self.records.read().await.clone()
    }

    /// Returns the records for one hook name.
    pub async fn records_for(&self, hook: &str) -> Vec<AuditRecord> {
        let records = self.records.read().await;
        records
            .iter()
            .filter(|r| r.hook.as_str() == hook)
            .cloned()
            .collect()
    }

    /// Number of records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns whether the trail is empty.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}
