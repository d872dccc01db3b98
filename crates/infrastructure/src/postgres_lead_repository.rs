use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use leadline_application::{
    LEAD_PAGE_LIMIT_MAX, LEAD_PAGE_OFFSET_MAX, LeadQuery, LeadRepository, LeadUpdate,
};
use leadline_core::{AppError, AppResult};
use leadline_domain::{EmailAddress, Lead, LeadId, LeadPriority, LeadStats, LeadStatus, NewLead};

/// PostgreSQL-backed lead repository.
#[derive(Clone)]
pub struct PostgresLeadRepository {
    pool: PgPool,
}

impl PostgresLeadRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct LeadRow {
    id: Uuid,
    email: String,
    service_interest: String,
    status: String,
    priority: String,
    source: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct LeadStatsRow {
    total: i64,
    new: i64,
    contacted: i64,
    qualified: i64,
}

impl TryFrom<LeadRow> for Lead {
    type Error = AppError;

    fn try_from(row: LeadRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt =
            |error: AppError| AppError::Internal(format!("stored lead '{id}' is corrupt: {error}"));

        Ok(Self {
            lead_id: LeadId::from_uuid(id),
            email: EmailAddress::new(row.email).map_err(corrupt)?,
            service_interest: row.service_interest,
            status: LeadStatus::from_str(&row.status).map_err(corrupt)?,
            priority: LeadPriority::from_str(&row.priority).map_err(corrupt)?,
            source: row.source,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

#[async_trait]
impl LeadRepository for PostgresLeadRepository {
    async fn insert_lead(&self, lead: NewLead) -> AppResult<Lead> {
        let row = sqlx::query_as::<_, LeadRow>(
            r#"
            INSERT INTO leads (id, email, service_interest, status, priority, source)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, email, service_interest, status, priority, source, created_at, updated_at
            "#,
        )
        .bind(lead.lead_id.as_uuid())
        .bind(lead.email.as_str())
        .bind(lead.service_interest.as_str())
        .bind(lead.status.as_str())
        .bind(lead.priority.as_str())
        .bind(lead.source.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to insert lead: {error}")))?;

        Lead::try_from(row)
    }

    async fn list_leads(&self, query: LeadQuery) -> AppResult<Vec<Lead>> {
        let rows = sqlx::query_as::<_, LeadRow>(
            r#"
            SELECT id, email, service_interest, status, priority, source, created_at, updated_at
            FROM leads
            WHERE ($1::TEXT IS NULL OR status = $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            OFFSET $3
            "#,
        )
        .bind(query.status.map(|status| status.as_str()))
        .bind(query.limit.clamp(1, LEAD_PAGE_LIMIT_MAX) as i64)
        .bind(query.offset.min(LEAD_PAGE_OFFSET_MAX) as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list leads: {error}")))?;

        rows.into_iter().map(Lead::try_from).collect()
    }

    async fn lead_stats(&self) -> AppResult<LeadStats> {
        let row = sqlx::query_as::<_, LeadStatsRow>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'new') AS new,
                COUNT(*) FILTER (WHERE status = 'contacted') AS contacted,
                COUNT(*) FILTER (WHERE status = 'qualified') AS qualified
            FROM leads
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to compute lead stats: {error}")))?;

        Ok(LeadStats {
            total: count(row.total),
            new: count(row.new),
            contacted: count(row.contacted),
            qualified: count(row.qualified),
        })
    }

    async fn find_lead(&self, lead_id: LeadId) -> AppResult<Option<Lead>> {
        let row = sqlx::query_as::<_, LeadRow>(
            r#"
            SELECT id, email, service_interest, status, priority, source, created_at, updated_at
            FROM leads
            WHERE id = $1
            "#,
        )
        .bind(lead_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find lead '{lead_id}': {error}")))?;

        row.map(Lead::try_from).transpose()
    }

    async fn update_lead(&self, lead_id: LeadId, update: LeadUpdate) -> AppResult<Lead> {
        let row = sqlx::query_as::<_, LeadRow>(
            r#"
            UPDATE leads
            SET
                status = COALESCE($2, status),
                priority = COALESCE($3, priority),
                updated_at = now()
            WHERE id = $1
            RETURNING id, email, service_interest, status, priority, source, created_at, updated_at
            "#,
        )
        .bind(lead_id.as_uuid())
        .bind(update.status.map(|status| status.as_str()))
        .bind(update.priority.map(|priority| priority.as_str()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update lead '{lead_id}': {error}")))?
        .ok_or_else(|| AppError::NotFound(format!("lead '{lead_id}' does not exist")))?;

        Lead::try_from(row)
    }

    async fn delete_lead(&self, lead_id: LeadId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(lead_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to delete lead '{lead_id}': {error}"))
            })?;

        Ok(result.rows_affected() > 0)
    }
}
