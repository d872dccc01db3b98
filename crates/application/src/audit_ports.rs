use async_trait::async_trait;
use chrono::{DateTime, Utc};
use leadline_core::AppResult;
use leadline_domain::{AuditAction, AuditStatus};
use serde_json::Value;

/// Immutable audit event payload emitted by application services.
///
/// The store assigns the event id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEvent {
    /// Audit verb.
    pub action: AuditAction,
    /// Resource path, e.g. `users/<uid>`.
    pub resource: String,
    /// Resource identifier.
    pub resource_id: String,
    /// Resource type label.
    pub resource_type: String,
    /// Snapshot before the change.
    pub before: Option<Value>,
    /// Snapshot after the change.
    pub after: Option<Value>,
    /// Actor identifier, when known.
    pub actor_id: Option<String>,
    /// Actor email, when known.
    pub actor_email: Option<String>,
    /// Actor role, or `unknown` when it is not trusted.
    pub actor_role: String,
    /// Outcome.
    pub status: AuditStatus,
    /// Failure message. Present only on error entries.
    pub error: Option<String>,
}

/// Port for persisting append-only audit events.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Persists one audit event.
    async fn append_event(&self, event: AuditEvent) -> AppResult<()>;
}

/// Stored audit entry projection for dashboard views.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditLogEntry {
    /// Stable entry identifier.
    pub entry_id: String,
    /// Audit verb.
    pub action: AuditAction,
    /// Resource path.
    pub resource: String,
    /// Resource identifier.
    pub resource_id: String,
    /// Resource type label.
    pub resource_type: String,
    /// Snapshot before the change.
    pub before: Option<Value>,
    /// Snapshot after the change.
    pub after: Option<Value>,
    /// Actor identifier.
    pub actor_id: Option<String>,
    /// Actor email.
    pub actor_email: Option<String>,
    /// Actor role.
    pub actor_role: String,
    /// Outcome.
    pub status: AuditStatus,
    /// Failure message.
    pub error: Option<String>,
    /// Server-assigned timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query parameters for audit log listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogQuery {
    /// Maximum rows returned.
    pub limit: usize,
    /// Number of rows skipped for offset pagination.
    pub offset: usize,
    /// Optional outcome filter.
    pub status: Option<AuditStatus>,
    /// Optional actor filter.
    pub actor_id: Option<String>,
}

/// Repository port for reading the audit log.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Lists most recent audit entries, newest first.
    async fn list_recent_entries(&self, query: AuditLogQuery) -> AppResult<Vec<AuditLogEntry>>;
}
