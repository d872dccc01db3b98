use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use leadline_application::{
    AuditEvent, AuditLogEntry, AuditLogQuery, AuditLogRepository, AuditRepository,
};
use leadline_core::AppResult;

/// In-memory audit log used when no database is configured.
#[derive(Debug, Default)]
pub struct InMemoryAuditRepository {
    entries: RwLock<Vec<AuditLogEntry>>,
}

impl InMemoryAuditRepository {
    /// Creates an empty in-memory audit log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditRepository for InMemoryAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        let entry = AuditLogEntry {
            entry_id: Uuid::new_v4().to_string(),
            action: event.action,
            resource: event.resource,
            resource_id: event.resource_id,
            resource_type: event.resource_type,
            before: event.before,
            after: event.after,
            actor_id: event.actor_id,
            actor_email: event.actor_email,
            actor_role: event.actor_role,
            status: event.status,
            error: event.error,
            created_at: Utc::now(),
        };

        self.entries.write().await.push(entry);
        Ok(())
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditRepository {
    async fn list_recent_entries(&self, query: AuditLogQuery) -> AppResult<Vec<AuditLogEntry>> {
        let entries = self.entries.read().await;

        Ok(entries
            .iter()
            .rev()
            .filter(|entry| query.status.is_none_or(|status| entry.status == status))
            .filter(|entry| {
                query
                    .actor_id
                    .as_deref()
                    .is_none_or(|actor_id| entry.actor_id.as_deref() == Some(actor_id))
            })
            .skip(query.offset)
            .take(query.limit.clamp(1, 200))
            .cloned()
            .collect())
    }
}
