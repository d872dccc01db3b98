use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};

use leadline_application::{AuditLogEntry, AuditLogQuery, AuditLogRepository};
use leadline_core::{AppError, AppResult};
use leadline_domain::{AuditAction, AuditStatus};

/// PostgreSQL-backed repository for audit log read models.
#[derive(Clone)]
pub struct PostgresAuditLogRepository {
    pool: PgPool,
}

impl PostgresAuditLogRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuditLogRow {
    id: uuid::Uuid,
    action: String,
    resource: String,
    resource_id: String,
    resource_type: String,
    before_state: Option<Value>,
    after_state: Option<Value>,
    actor_id: Option<String>,
    actor_email: Option<String>,
    actor_role: String,
    status: String,
    error: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AuditLogRow> for AuditLogEntry {
    type Error = AppError;

    fn try_from(row: AuditLogRow) -> Result<Self, Self::Error> {
        let action = AuditAction::from_str(&row.action).map_err(|error| {
            AppError::Internal(format!("stored audit entry '{}' is corrupt: {error}", row.id))
        })?;
        let status = AuditStatus::from_str(&row.status).map_err(|error| {
            AppError::Internal(format!("stored audit entry '{}' is corrupt: {error}", row.id))
        })?;

        Ok(Self {
            entry_id: row.id.to_string(),
            action,
            resource: row.resource,
            resource_id: row.resource_id,
            resource_type: row.resource_type,
            before: row.before_state,
            after: row.after_state,
            actor_id: row.actor_id,
            actor_email: row.actor_email,
            actor_role: row.actor_role,
            status,
            error: row.error,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl AuditLogRepository for PostgresAuditLogRepository {
    async fn list_recent_entries(&self, query: AuditLogQuery) -> AppResult<Vec<AuditLogEntry>> {
        let capped_limit = query.limit.clamp(1, 200) as i64;
        let capped_offset = query.offset.min(5_000) as i64;
        let rows = sqlx::query_as::<_, AuditLogRow>(
            r#"
            SELECT
                id,
                action,
                resource,
                resource_id,
                resource_type,
                before_state,
                after_state,
                actor_id,
                actor_email,
                actor_role,
                status,
                error,
                created_at
            FROM audit_logs
            WHERE ($1::TEXT IS NULL OR status = $1)
                AND ($2::TEXT IS NULL OR actor_id = $2)
            ORDER BY created_at DESC, id DESC
            LIMIT $3
            OFFSET $4
            "#,
        )
        .bind(query.status.map(|status| status.as_str()))
        .bind(query.actor_id)
        .bind(capped_limit)
        .bind(capped_offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list audit log entries: {error}"))
        })?;

        rows.into_iter().map(AuditLogEntry::try_from).collect()
    }
}
