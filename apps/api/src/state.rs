use leadline_application::{AuditLogService, ContactService, LeadService, RoleAssignmentService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub role_assignment_service: RoleAssignmentService,
    pub contact_service: ContactService,
    pub lead_service: LeadService,
    pub audit_log_service: AuditLogService,
}
