mod audit;
mod common;
mod contact;
mod functions;
mod leads;

pub use audit::{AuditLogEntryResponse, AuditLogListQuery};
pub use common::HealthResponse;
pub use contact::{ContactRequest, ContactResponse};
pub use functions::{SetUserRoleRequest, SetUserRoleResponse};
pub use leads::{
    CaptureLeadRequest, LeadListQuery, LeadResponse, LeadStatsResponse, UpdateLeadRequest,
};
