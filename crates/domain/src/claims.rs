//! Custom claims document attached to a user identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::security::{Permission, Role, permissions_for};

/// Claims document written to the identity store on every role assignment.
///
/// The identity store owns one record per user. Each assignment replaces the
/// prior record wholesale; fields outside this document are not preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimsRecord {
    /// Assigned role.
    pub role: Role,
    /// Email of the user the claims belong to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Permissions derived from the role.
    pub permissions: Vec<Permission>,
    /// Creation time, epoch milliseconds on the wire.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Last update time, epoch milliseconds on the wire.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
    /// Identifier of the actor that wrote the claims.
    pub updated_by: String,
}

impl ClaimsRecord {
    /// Builds a fresh claims record for a role assignment performed at `now`.
    #[must_use]
    pub fn for_assignment(
        role: Role,
        email: Option<String>,
        updated_by: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            role,
            email,
            permissions: permissions_for(role).to_vec(),
            created_at: now,
            updated_at: now,
            updated_by: updated_by.into(),
        }
    }
}
