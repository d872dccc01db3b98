use std::str::FromStr;

use leadline_application::{AuditLogEntry, AuditLogQuery};
use leadline_core::AppResult;
use leadline_domain::AuditStatus;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use super::common::DEFAULT_PAGE_LIMIT;

/// Query parameters for audit log listing.
#[derive(Debug, Default, Deserialize)]
pub struct AuditLogListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub status: Option<String>,
    pub actor_id: Option<String>,
}

impl AuditLogListQuery {
    pub fn into_query(self) -> AppResult<AuditLogQuery> {
        Ok(AuditLogQuery {
            limit: self.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
            offset: self.offset.unwrap_or(0),
            status: self
                .status
                .as_deref()
                .map(AuditStatus::from_str)
                .transpose()?,
            actor_id: self.actor_id.filter(|value| !value.trim().is_empty()),
        })
    }
}

/// API representation of an audit log entry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/audit-log-entry-response.ts"
)]
pub struct AuditLogEntryResponse {
    pub entry_id: String,
    pub action: String,
    pub resource: String,
    pub resource_id: String,
    pub resource_type: String,
    #[ts(type = "unknown | null")]
    pub before: Option<Value>,
    #[ts(type = "unknown | null")]
    pub after: Option<Value>,
    pub actor_id: Option<String>,
    pub actor_email: Option<String>,
    pub actor_role: String,
    pub status: String,
    pub error: Option<String>,
    pub created_at: String,
}

impl From<AuditLogEntry> for AuditLogEntryResponse {
    fn from(value: AuditLogEntry) -> Self {
        Self {
            entry_id: value.entry_id,
            action: value.action.as_str().to_owned(),
            resource: value.resource,
            resource_id: value.resource_id,
            resource_type: value.resource_type,
            before: value.before,
            after: value.after,
            actor_id: value.actor_id,
            actor_email: value.actor_email,
            actor_role: value.actor_role,
            status: value.status.as_str().to_owned(),
            error: value.error,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}
