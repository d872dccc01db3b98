//! Application services and ports.

#![forbid(unsafe_code)]

mod audit_log_service;
mod audit_ports;
mod authorization_service;
mod contact_service;
mod email_ports;
mod identity_ports;
mod lead_ports;
mod lead_service;
mod role_assignment_service;

#[cfg(test)]
mod testing;

pub use audit_log_service::{AUDIT_PAGE_LIMIT_MAX, AuditLogService};
pub use audit_ports::{
    AuditEvent, AuditLogEntry, AuditLogQuery, AuditLogRepository, AuditRepository,
};
pub use authorization_service::{AuthorizationService, VerifiedCaller};
pub use contact_service::ContactService;
pub use email_ports::{EmailService, OutgoingEmail};
pub use identity_ports::{IdentityStore, IdentityUser, VerifiedToken};
pub use lead_ports::{LeadQuery, LeadRepository, LeadUpdate};
pub use lead_service::{LEAD_PAGE_LIMIT_MAX, LEAD_PAGE_OFFSET_MAX, LeadService};
pub use role_assignment_service::{
    AssignedUser, RoleAssignmentOutcome, RoleAssignmentService, SetUserRoleInput,
};
