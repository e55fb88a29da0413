//! Audit log entries for state-changing actions.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of mutation an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// An employee submission was upserted.
    Submit,
    /// An existing entity changed state.
    Update,
    /// New entities were created.
    Create,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuditAction::Submit => "submit",
            AuditAction::Update => "update",
            AuditAction::Create => "create",
        };
        f.write_str(name)
    }
}

/// An immutable, append-only record of one action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Entry identifier.
    pub id: Uuid,
    /// Correlation id of the request that caused the action.
    pub request_id: String,
    /// Client address, when known.
    pub ip_address: Option<String>,
    /// What happened.
    pub action: AuditAction,
    /// What it happened to (e.g. "attendance", "payslips").
    pub target: String,
    /// Storage table affected.
    pub table: String,
    /// Username of the caller.
    pub actor: String,
    /// Snapshot of the data involved.
    pub payload: serde_json::Value,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
}
