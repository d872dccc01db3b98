//! Lead pipeline vocabulary.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use leadline_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::email::EmailAddress;

/// Service interest recorded when the visitor picks none.
pub const DEFAULT_SERVICE_INTEREST: &str = "general";

/// Source label for leads captured by the website form.
pub const WEBSITE_FORM_SOURCE: &str = "website-form";

/// Longest accepted service-interest label.
pub const SERVICE_INTEREST_MAX_LENGTH: usize = 64;

/// Unique identifier for a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeadId(Uuid);

impl LeadId {
    /// Creates a new random lead identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a lead identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Parses a transport value into a lead identifier.
    pub fn parse(value: &str) -> AppResult<Self> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|error| AppError::InvalidArgument(format!("invalid lead id '{value}': {error}")))
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for LeadId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LeadId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Pipeline stage of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    /// Freshly captured.
    New,
    /// First contact made.
    Contacted,
    /// Confirmed fit.
    Qualified,
    /// Proposal sent.
    Proposal,
    /// Won or lost.
    Closed,
}

impl LeadStatus {
    /// Returns a stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Qualified => "qualified",
            Self::Proposal => "proposal",
            Self::Closed => "closed",
        }
    }
}

impl FromStr for LeadStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "new" => Ok(Self::New),
            "contacted" => Ok(Self::Contacted),
            "qualified" => Ok(Self::Qualified),
            "proposal" => Ok(Self::Proposal),
            "closed" => Ok(Self::Closed),
            _ => Err(AppError::InvalidArgument(format!(
                "unknown lead status '{value}'"
            ))),
        }
    }
}

/// Follow-up priority of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadPriority {
    /// Low priority.
    Low,
    /// Default priority.
    Medium,
    /// High priority.
    High,
    /// Needs immediate follow-up.
    Critical,
}

impl LeadPriority {
    /// Returns a stable storage value for this priority.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl FromStr for LeadPriority {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(AppError::InvalidArgument(format!(
                "unknown lead priority '{value}'"
            ))),
        }
    }
}

/// Captured lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    /// Stable lead identifier.
    pub lead_id: LeadId,
    /// Contact email of the visitor.
    pub email: EmailAddress,
    /// Service the visitor asked about.
    pub service_interest: String,
    /// Pipeline stage.
    pub status: LeadStatus,
    /// Follow-up priority.
    pub priority: LeadPriority,
    /// Capture channel.
    pub source: String,
    /// Capture time.
    pub created_at: DateTime<Utc>,
    /// Last change time.
    pub updated_at: DateTime<Utc>,
}

/// Lead payload before the store assigns timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
    /// Identifier assigned at capture.
    pub lead_id: LeadId,
    /// Contact email of the visitor.
    pub email: EmailAddress,
    /// Service the visitor asked about.
    pub service_interest: String,
    /// Initial pipeline stage.
    pub status: LeadStatus,
    /// Initial priority.
    pub priority: LeadPriority,
    /// Capture channel.
    pub source: String,
}

impl NewLead {
    /// Builds a website-form lead with the default status and priority.
    pub fn from_website_form(email: &str, service_interest: Option<&str>) -> AppResult<Self> {
        let email = EmailAddress::new(email)?;
        let service_interest = service_interest
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_SERVICE_INTEREST);

        if service_interest.chars().count() > SERVICE_INTEREST_MAX_LENGTH {
            return Err(AppError::InvalidArgument(format!(
                "service interest must not exceed {SERVICE_INTEREST_MAX_LENGTH} characters"
            )));
        }

        Ok(Self {
            lead_id: LeadId::new(),
            email,
            service_interest: service_interest.to_owned(),
            status: LeadStatus::New,
            priority: LeadPriority::Medium,
            source: WEBSITE_FORM_SOURCE.to_owned(),
        })
    }
}

/// Pipeline counters shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeadStats {
    /// All leads.
    pub total: u64,
    /// Leads in `new`.
    pub new: u64,
    /// Leads in `contacted`.
    pub contacted: u64,
    /// Leads in `qualified`.
    pub qualified: u64,
}

impl LeadStats {
    /// Counts one lead into the stats.
    pub fn record(&mut self, status: LeadStatus) {
        self.total += 1;
        match status {
            LeadStatus::New => self.new += 1,
            LeadStatus::Contacted => self.contacted += 1,
            LeadStatus::Qualified => self.qualified += 1,
            LeadStatus::Proposal | LeadStatus::Closed => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{LeadPriority, LeadStats, LeadStatus, NewLead};

    #[test]
    fn website_lead_gets_defaults() {
        let lead = NewLead::from_website_form("Visitor@Agency.gov", None);
        let Ok(lead) = lead else {
            panic!("lead should be valid");
        };

        assert_eq!(lead.email.as_str(), "visitor@agency.gov");
        assert_eq!(lead.service_interest, "general");
        assert_eq!(lead.status, LeadStatus::New);
        assert_eq!(lead.priority, LeadPriority::Medium);
        assert_eq!(lead.source, "website-form");
    }

    #[test]
    fn blank_interest_falls_back_to_general() {
        let lead = NewLead::from_website_form("a@x.com", Some("   "));
        assert_eq!(
            lead.ok().map(|value| value.service_interest).as_deref(),
            Some("general")
        );
    }

    #[test]
    fn invalid_email_is_rejected() {
        assert!(NewLead::from_website_form("not-an-email", Some("web-dev")).is_err());
    }

    #[test]
    fn priority_rejects_urgent() {
        assert!(LeadPriority::from_str("urgent").is_err());
        assert_eq!(
            LeadPriority::from_str("critical").ok(),
            Some(LeadPriority::Critical)
        );
    }

    #[test]
    fn stats_count_pipeline_stages() {
        let mut stats = LeadStats::default();
        for status in [
            LeadStatus::New,
            LeadStatus::New,
            LeadStatus::Contacted,
            LeadStatus::Closed,
        ] {
            stats.record(status);
        }

        assert_eq!(stats.total, 4);
        assert_eq!(stats.new, 2);
        assert_eq!(stats.contacted, 1);
        assert_eq!(stats.qualified, 0);
    }
}
