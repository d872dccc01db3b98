use async_trait::async_trait;
use leadline_core::AppResult;
use leadline_domain::{Lead, LeadId, LeadPriority, LeadStats, LeadStatus, NewLead};

/// Query parameters for lead listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadQuery {
    /// Maximum rows returned.
    pub limit: usize,
    /// Number of rows skipped for offset pagination.
    pub offset: usize,
    /// Optional pipeline stage filter.
    pub status: Option<LeadStatus>,
}

/// Partial update applied to a lead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeadUpdate {
    /// New pipeline stage.
    pub status: Option<LeadStatus>,
    /// New priority.
    pub priority: Option<LeadPriority>,
}

impl LeadUpdate {
    /// Returns whether the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none()
    }
}

/// Repository port for captured leads.
#[async_trait]
pub trait LeadRepository: Send + Sync {
    /// Appends a lead. The store assigns timestamps.
    async fn insert_lead(&self, lead: NewLead) -> AppResult<Lead>;

    /// Lists leads, newest first.
    async fn list_leads(&self, query: LeadQuery) -> AppResult<Vec<Lead>>;

    /// Returns pipeline counters over all leads.
    async fn lead_stats(&self) -> AppResult<LeadStats>;

    /// Finds one lead.
    async fn find_lead(&self, lead_id: LeadId) -> AppResult<Option<Lead>>;

    /// Applies a partial update. Unknown leads fail with `AppError::NotFound`.
    async fn update_lead(&self, lead_id: LeadId, update: LeadUpdate) -> AppResult<Lead>;

    /// Deletes a lead. Returns whether a row was removed.
    async fn delete_lead(&self, lead_id: LeadId) -> AppResult<bool>;
}
