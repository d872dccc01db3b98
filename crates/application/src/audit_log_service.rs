use std::sync::Arc;

use leadline_core::{AppResult, CallerToken};
use leadline_domain::Permission;

use crate::{AuditLogEntry, AuditLogQuery, AuditLogRepository, AuthorizationService};

/// Largest page size served by audit log listings.
pub const AUDIT_PAGE_LIMIT_MAX: usize = 200;

/// Read side of the audit log.
#[derive(Clone)]
pub struct AuditLogService {
    authorization_service: AuthorizationService,
    repository: Arc<dyn AuditLogRepository>,
}

impl AuditLogService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        repository: Arc<dyn AuditLogRepository>,
    ) -> Self {
        Self {
            authorization_service,
            repository,
        }
    }

    /// Lists recent audit entries for callers allowed to read the log.
    pub async fn list_audit_log(
        &self,
        caller: Option<&CallerToken>,
        query: AuditLogQuery,
    ) -> AppResult<Vec<AuditLogEntry>> {
        self.authorization_service
            .require_permission(caller, Permission::AuditRead)
            .await?;

        self.repository
            .list_recent_entries(AuditLogQuery {
                limit: query.limit.clamp(1, AUDIT_PAGE_LIMIT_MAX),
                ..query
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use leadline_core::{AppError, CallerToken};

    use crate::testing::{FakeAuditLogRepository, FakeIdentityStore};
    use crate::{AuditLogQuery, AuthorizationService};

    use super::AuditLogService;

    fn service() -> (AuditLogService, Arc<FakeAuditLogRepository>) {
        let identity_store = FakeIdentityStore::default()
            .with_caller("tok-auditor", "aud-1", "aud@x.com", "auditor")
            .with_caller("tok-viewer", "view-1", "view@x.com", "viewer");
        let repository = Arc::new(FakeAuditLogRepository::default());
        let service = AuditLogService::new(
            AuthorizationService::new(Arc::new(identity_store)),
            repository.clone(),
        );
        (service, repository)
    }

    fn query(limit: usize) -> AuditLogQuery {
        AuditLogQuery {
            limit,
            offset: 0,
            status: None,
            actor_id: None,
        }
    }

    #[tokio::test]
    async fn auditor_reads_with_clamped_limit() {
        let (service, repository) = service();
        let token = CallerToken::new("tok-auditor");

        let result = service.list_audit_log(token.as_ref(), query(0)).await;

        assert!(result.is_ok());
        assert_eq!(repository.queries.lock().await[0].limit, 1);
    }

    #[tokio::test]
    async fn viewer_is_denied() {
        let (service, repository) = service();
        let token = CallerToken::new("tok-viewer");

        let result = service.list_audit_log(token.as_ref(), query(50)).await;

        assert!(matches!(result, Err(AppError::PermissionDenied(_))));
        assert!(repository.queries.lock().await.is_empty());
    }
}
