use std::str::FromStr;

use leadline_application::{LeadQuery, LeadUpdate};
use leadline_core::AppResult;
use leadline_domain::{Lead, LeadPriority, LeadStats, LeadStatus};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::common::DEFAULT_PAGE_LIMIT;

/// Incoming lead capture payload.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/capture-lead-request.ts"
)]
pub struct CaptureLeadRequest {
    pub email: String,
    #[serde(default)]
    #[ts(optional)]
    pub service_interest: Option<String>,
}

/// Incoming lead update payload.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-lead-request.ts"
)]
pub struct UpdateLeadRequest {
    #[serde(default)]
    #[ts(optional)]
    pub status: Option<String>,
    #[serde(default)]
    #[ts(optional)]
    pub priority: Option<String>,
}

impl UpdateLeadRequest {
    pub fn into_update(self) -> AppResult<LeadUpdate> {
        Ok(LeadUpdate {
            status: self
                .status
                .as_deref()
                .map(LeadStatus::from_str)
                .transpose()?,
            priority: self
                .priority
                .as_deref()
                .map(LeadPriority::from_str)
                .transpose()?,
        })
    }
}

/// Query parameters for lead listing.
#[derive(Debug, Default, Deserialize)]
pub struct LeadListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub status: Option<String>,
}

impl LeadListQuery {
    pub fn into_query(self) -> AppResult<LeadQuery> {
        Ok(LeadQuery {
            limit: self.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
            offset: self.offset.unwrap_or(0),
            status: self
                .status
                .as_deref()
                .map(LeadStatus::from_str)
                .transpose()?,
        })
    }
}

/// API representation of a lead.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/lead-response.ts"
)]
pub struct LeadResponse {
    pub lead_id: String,
    pub email: String,
    pub service_interest: String,
    pub status: String,
    pub priority: String,
    pub source: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Lead> for LeadResponse {
    fn from(value: Lead) -> Self {
        Self {
            lead_id: value.lead_id.to_string(),
            email: value.email.as_str().to_owned(),
            service_interest: value.service_interest,
            status: value.status.as_str().to_owned(),
            priority: value.priority.as_str().to_owned(),
            source: value.source,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Lead pipeline counters.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/lead-stats-response.ts"
)]
pub struct LeadStatsResponse {
    pub total: u64,
    pub new: u64,
    pub contacted: u64,
    pub qualified: u64,
}

impl From<LeadStats> for LeadStatsResponse {
    fn from(value: LeadStats) -> Self {
        Self {
            total: value.total,
            new: value.new,
            contacted: value.contacted,
            qualified: value.qualified,
        }
    }
}
