use std::sync::Arc;

use leadline_application::{
    AuditLogRepository, AuditLogService, AuditRepository, AuthorizationService, ContactService,
    EmailService, IdentityStore, LeadRepository, LeadService, RoleAssignmentService,
};
use leadline_core::AppError;
use leadline_infrastructure::{
    InMemoryAuditRepository, InMemoryLeadRepository, PostgresAuditLogRepository,
    PostgresAuditRepository, PostgresLeadRepository,
};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::api_config::ApiConfig;
use crate::state::AppState;

use super::email::build_email_service;
use super::identity::build_identity_store;

/// Adapters the application services are built from.
pub struct ServicePorts {
    pub identity_store: Arc<dyn IdentityStore>,
    pub audit_repository: Arc<dyn AuditRepository>,
    pub audit_log_repository: Arc<dyn AuditLogRepository>,
    pub lead_repository: Arc<dyn LeadRepository>,
    pub email_service: Arc<dyn EmailService>,
}

pub async fn build_service_ports(
    pool: Option<PgPool>,
    config: &ApiConfig,
) -> Result<ServicePorts, AppError> {
    let identity_store = build_identity_store(config).await?;
    let email_service = build_email_service(config);

    let ports = match pool {
        Some(pool) => {
            info!("using postgres audit and lead stores");
            ServicePorts {
                identity_store,
                audit_repository: Arc::new(PostgresAuditRepository::new(pool.clone())),
                audit_log_repository: Arc::new(PostgresAuditLogRepository::new(pool.clone())),
                lead_repository: Arc::new(PostgresLeadRepository::new(pool)),
                email_service,
            }
        }
        None => {
            warn!("DATABASE_URL is not set; audit log and leads are kept in memory");
            let audit = Arc::new(InMemoryAuditRepository::new());
            ServicePorts {
                identity_store,
                audit_repository: audit.clone(),
                audit_log_repository: audit,
                lead_repository: Arc::new(InMemoryLeadRepository::new()),
                email_service,
            }
        }
    };

    Ok(ports)
}

pub fn build_app_state(ports: ServicePorts, contact_recipient: &str) -> AppState {
    let authorization_service = AuthorizationService::new(ports.identity_store.clone());

    AppState {
        role_assignment_service: RoleAssignmentService::new(
            ports.identity_store,
            ports.audit_repository.clone(),
        ),
        contact_service: ContactService::new(ports.email_service, contact_recipient),
        lead_service: LeadService::new(
            authorization_service.clone(),
            ports.lead_repository,
            ports.audit_repository,
        ),
        audit_log_service: AuditLogService::new(authorization_service, ports.audit_log_repository),
    }
}
