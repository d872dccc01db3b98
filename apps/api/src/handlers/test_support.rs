//! In-memory application state for handler tests.

use std::sync::Arc;

use leadline_core::CallerToken;
use leadline_domain::Role;
use leadline_infrastructure::{
    ConsoleEmailService, InMemoryAuditRepository, InMemoryIdentityStore, InMemoryLeadRepository,
};

use crate::api_services::{ServicePorts, build_app_state};
use crate::middleware::RequestCaller;
use crate::state::AppState;

pub const ADMIN_TOKEN: &str = "tok-admin";
pub const AUDITOR_TOKEN: &str = "tok-auditor";
pub const VIEWER_TOKEN: &str = "tok-viewer";

pub struct TestFixture {
    pub state: AppState,
    pub audit: Arc<InMemoryAuditRepository>,
}

pub async fn test_state() -> TestFixture {
    let identity_store = InMemoryIdentityStore::new();
    let users = [
        ("admin-1", "boss@x.com", Some(Role::Admin), Some(ADMIN_TOKEN)),
        ("auditor-1", "aud@x.com", Some(Role::Auditor), Some(AUDITOR_TOKEN)),
        ("viewer-1", "v@x.com", Some(Role::Viewer), Some(VIEWER_TOKEN)),
        ("u1", "a@x.com", Some(Role::Viewer), None),
    ];
    for (uid, email, role, token) in users {
        if let Err(error) = identity_store.upsert_user(uid, Some(email), role).await {
            panic!("seeding {uid} should succeed: {error}");
        }
        if let Some(token) = token {
            if let Err(error) = identity_store.issue_token(token, uid).await {
                panic!("issuing token for {uid} should succeed: {error}");
            }
        }
    }

    let audit = Arc::new(InMemoryAuditRepository::new());
    let state = build_app_state(
        ServicePorts {
            identity_store: Arc::new(identity_store),
            audit_repository: audit.clone(),
            audit_log_repository: audit.clone(),
            lead_repository: Arc::new(InMemoryLeadRepository::new()),
            email_service: Arc::new(ConsoleEmailService::new()),
        },
        "inbox@leadline.test",
    );

    TestFixture { state, audit }
}

pub fn caller(token: Option<&str>) -> RequestCaller {
    RequestCaller(token.and_then(CallerToken::new))
}
