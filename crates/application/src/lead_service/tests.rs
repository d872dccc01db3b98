use std::sync::Arc;

use serde_json::json;

use leadline_core::{AppError, CallerToken};
use leadline_domain::{AuditAction, LeadId, LeadPriority, LeadStatus};

use crate::testing::{FakeAuditRepository, FakeIdentityStore, FakeLeadRepository};
use crate::{AuthorizationService, LeadQuery, LeadUpdate};

use super::{LEAD_PAGE_OFFSET_MAX, LeadService};

const ADMIN_TOKEN: &str = "tok-admin";
const AUDITOR_TOKEN: &str = "tok-auditor";
const VIEWER_TOKEN: &str = "tok-viewer";

struct Fixture {
    service: LeadService,
    leads: Arc<FakeLeadRepository>,
    audit: Arc<FakeAuditRepository>,
}

fn fixture() -> Fixture {
    let identity_store = FakeIdentityStore::default()
        .with_caller(ADMIN_TOKEN, "admin-1", "boss@x.com", "admin")
        .with_caller(AUDITOR_TOKEN, "aud-1", "aud@x.com", "auditor")
        .with_caller(VIEWER_TOKEN, "view-1", "view@x.com", "viewer");
    let leads = Arc::new(FakeLeadRepository::default());
    let audit = Arc::new(FakeAuditRepository::default());
    let service = LeadService::new(
        AuthorizationService::new(Arc::new(identity_store)),
        leads.clone(),
        audit.clone(),
    );

    Fixture {
        service,
        leads,
        audit,
    }
}

fn token(value: &str) -> CallerToken {
    match CallerToken::new(value) {
        Some(token) => token,
        None => panic!("test token must not be blank"),
    }
}

async fn captured(service: &LeadService, email: &str) -> LeadId {
    match service.capture_lead(email, Some("cloud-migration")).await {
        Ok(lead) => lead.lead_id,
        Err(error) => panic!("capture should succeed: {error}"),
    }
}

#[tokio::test]
async fn capture_is_public_and_uses_defaults() {
    let fixture = fixture();

    let result = fixture.service.capture_lead(" Buyer@Agency.gov ", None).await;

    let Ok(lead) = result else {
        panic!("capture should succeed");
    };
    assert_eq!(lead.email.as_str(), "buyer@agency.gov");
    assert_eq!(lead.service_interest, "general");
    assert_eq!(lead.status, LeadStatus::New);
    assert_eq!(lead.priority, LeadPriority::Medium);
    assert_eq!(fixture.leads.leads.lock().await.len(), 1);
}

#[tokio::test]
async fn capture_rejects_invalid_email() {
    let fixture = fixture();

    let result = fixture.service.capture_lead("buyer@agency", None).await;

    assert!(matches!(result, Err(AppError::InvalidArgument(_))));
    assert!(fixture.leads.leads.lock().await.is_empty());
}

#[tokio::test]
async fn viewer_can_list_and_limit_is_clamped() {
    let fixture = fixture();
    captured(&fixture.service, "a@x.com").await;

    let result = fixture
        .service
        .list_leads(
            Some(&token(VIEWER_TOKEN)),
            LeadQuery {
                limit: 5_000,
                offset: 0,
                status: None,
            },
        )
        .await;

    assert_eq!(result.map(|leads| leads.len()), Ok(1));
    let queries = fixture.leads.queries.lock().await;
    assert_eq!(queries[0].limit, 200);
}

#[tokio::test]
async fn oversized_offset_is_bounded_before_the_store() {
    let fixture = fixture();

    let result = fixture
        .service
        .list_leads(
            Some(&token(VIEWER_TOKEN)),
            LeadQuery {
                limit: 10,
                offset: usize::MAX,
                status: None,
            },
        )
        .await;

    assert_eq!(result.map(|leads| leads.len()), Ok(0));
    let queries = fixture.leads.queries.lock().await;
    assert_eq!(queries[0].offset, LEAD_PAGE_OFFSET_MAX);
}

#[tokio::test]
async fn listing_requires_authentication() {
    let fixture = fixture();

    let result = fixture
        .service
        .list_leads(
            None,
            LeadQuery {
                limit: 10,
                offset: 0,
                status: None,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Unauthenticated(_))));
}

#[tokio::test]
async fn stats_count_captured_leads() {
    let fixture = fixture();
    captured(&fixture.service, "a@x.com").await;
    captured(&fixture.service, "b@x.com").await;

    let stats = fixture.service.lead_stats(Some(&token(AUDITOR_TOKEN))).await;

    let Ok(stats) = stats else {
        panic!("stats should load");
    };
    assert_eq!(stats.total, 2);
    assert_eq!(stats.new, 2);
}

#[tokio::test]
async fn admin_update_is_audited_with_snapshots() {
    let fixture = fixture();
    let lead_id = captured(&fixture.service, "a@x.com").await;

    let result = fixture
        .service
        .update_lead(
            Some(&token(ADMIN_TOKEN)),
            lead_id,
            LeadUpdate {
                status: Some(LeadStatus::Qualified),
                priority: None,
            },
        )
        .await;

    let Ok(lead) = result else {
        panic!("update should succeed");
    };
    assert_eq!(lead.status, LeadStatus::Qualified);
    assert_eq!(lead.priority, LeadPriority::Medium);

    let events = fixture.audit.events.lock().await;
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.action, AuditAction::Update);
    assert_eq!(event.resource, format!("leads/{lead_id}"));
    assert_eq!(event.resource_type, "lead");
    assert_eq!(
        event.before,
        Some(json!({ "status": "new", "priority": "medium" }))
    );
    assert_eq!(
        event.after,
        Some(json!({ "status": "qualified", "priority": "medium" }))
    );
    assert_eq!(event.actor_id.as_deref(), Some("admin-1"));
    assert_eq!(event.actor_role, "admin");
}

#[tokio::test]
async fn auditor_cannot_update_leads() {
    let fixture = fixture();
    let lead_id = captured(&fixture.service, "a@x.com").await;

    let result = fixture
        .service
        .update_lead(
            Some(&token(AUDITOR_TOKEN)),
            lead_id,
            LeadUpdate {
                status: Some(LeadStatus::Closed),
                priority: None,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::PermissionDenied(_))));
    assert!(fixture.audit.events.lock().await.is_empty());
}

#[tokio::test]
async fn empty_update_is_rejected() {
    let fixture = fixture();
    let lead_id = captured(&fixture.service, "a@x.com").await;

    let result = fixture
        .service
        .update_lead(Some(&token(ADMIN_TOKEN)), lead_id, LeadUpdate::default())
        .await;

    assert!(matches!(result, Err(AppError::InvalidArgument(_))));
}

#[tokio::test]
async fn updating_unknown_lead_is_not_found() {
    let fixture = fixture();

    let result = fixture
        .service
        .update_lead(
            Some(&token(ADMIN_TOKEN)),
            LeadId::new(),
            LeadUpdate {
                status: None,
                priority: Some(LeadPriority::High),
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert!(fixture.audit.events.lock().await.is_empty());
}

#[tokio::test]
async fn admin_delete_removes_lead_and_audits() {
    let fixture = fixture();
    let lead_id = captured(&fixture.service, "a@x.com").await;

    let result = fixture
        .service
        .delete_lead(Some(&token(ADMIN_TOKEN)), lead_id)
        .await;

    assert_eq!(result, Ok(()));
    assert!(fixture.leads.leads.lock().await.is_empty());
    let events = fixture.audit.events.lock().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, AuditAction::Delete);
    assert!(events[0].after.is_none());
}

#[tokio::test]
async fn deleting_twice_reports_not_found() {
    let fixture = fixture();
    let lead_id = captured(&fixture.service, "a@x.com").await;
    let caller = token(ADMIN_TOKEN);

    let first = fixture.service.delete_lead(Some(&caller), lead_id).await;
    let second = fixture.service.delete_lead(Some(&caller), lead_id).await;

    assert_eq!(first, Ok(()));
    assert!(matches!(second, Err(AppError::NotFound(_))));
    assert_eq!(fixture.audit.events.lock().await.len(), 1);
}
