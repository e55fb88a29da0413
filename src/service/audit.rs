//! Audit emitter.
//!
//! Every state-changing operation reports what it did here. Recording is
//! best effort: a failing sink is logged and never fails the operation that
//! triggered it.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{Actor, AuditAction, AuditLogEntry};
use crate::store::AuditSink;

/// Builds audit entries and hands them to an [`AuditSink`].
#[derive(Clone)]
pub struct AuditEmitter {
    sink: Arc<dyn AuditSink>,
}

impl AuditEmitter {
    /// Creates an emitter writing to `sink`.
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self { sink }
    }

    /// Records `action` on `target` by `actor`, with a JSON snapshot of
    /// `payload`. A payload that cannot be serialized is recorded as `{}`.
    pub fn emit<T: Serialize + ?Sized>(
        &self,
        actor: &Actor,
        action: AuditAction,
        target: &str,
        table: &str,
        payload: &T,
    ) {
        let payload = serde_json::to_value(payload).unwrap_or_else(|err| {
            warn!(request_id = %actor.request_id, error = %err, "audit payload not serializable");
            serde_json::json!({})
        });

        let entry = AuditLogEntry {
            id: Uuid::new_v4(),
            request_id: actor.request_id.clone(),
            ip_address: actor.ip_address.clone(),
            action,
            target: target.to_string(),
            table: table.to_string(),
            actor: actor.username.clone(),
            payload,
            created_at: Utc::now(),
        };
        let entry_id = entry.id;

        match self.sink.record(entry) {
            Ok(()) => debug!(
                request_id = %actor.request_id,
                audit_id = %entry_id,
                action = %action,
                target,
                "audit entry recorded"
            ),
            Err(err) => warn!(
                request_id = %actor.request_id,
                action = %action,
                target,
                error = %err,
                "failed to record audit entry"
            ),
        }
    }
}
