use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use leadline_application::{AuditEvent, AuditRepository};
use leadline_core::{AppError, AppResult};

/// PostgreSQL-backed append-only audit repository.
#[derive(Clone)]
pub struct PostgresAuditRepository {
    pool: PgPool,
}

impl PostgresAuditRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditRepository for PostgresAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO audit_logs (
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
                error
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(event.action.as_str())
        .bind(event.resource)
        .bind(event.resource_id)
        .bind(event.resource_type)
        .bind(event.before)
        .bind(event.after)
        .bind(event.actor_id)
        .bind(event.actor_email)
        .bind(event.actor_role)
        .bind(event.status.as_str())
        .bind(event.error)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to append audit event: {error}")))?;

        Ok(())
    }
}
