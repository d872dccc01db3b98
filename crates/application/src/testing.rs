//! Fakes shared by the service tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use leadline_core::{AppError, AppResult, CallerToken};
use leadline_domain::{ClaimsRecord, Lead, LeadId, LeadStats, NewLead};

use crate::{
    AuditEvent, AuditLogEntry, AuditLogQuery, AuditLogRepository, AuditRepository, EmailService,
    IdentityStore, IdentityUser, LeadQuery, LeadRepository, LeadUpdate, OutgoingEmail,
    VerifiedToken,
};

#[derive(Default)]
pub(crate) struct FakeIdentityStore {
    callers: HashMap<String, VerifiedToken>,
    users: Mutex<HashMap<String, (IdentityUser, Option<Map<String, Value>>)>>,
    fail_claims_write: bool,
    pub(crate) calls: Mutex<Vec<&'static str>>,
    pub(crate) claims_writes: Mutex<Vec<(String, ClaimsRecord)>>,
}

impl FakeIdentityStore {
    pub(crate) fn with_caller(mut self, token: &str, uid: &str, email: &str, role: &str) -> Self {
        let mut claims = Map::new();
        claims.insert("role".to_owned(), Value::String(role.to_owned()));
        self.callers.insert(
            token.to_owned(),
            VerifiedToken {
                uid: uid.to_owned(),
                email: Some(email.to_owned()),
                claims,
            },
        );
        self
    }

    pub(crate) fn with_user(mut self, uid: &str, email: &str, role: Option<&str>) -> Self {
        let claims = role.map(|role| {
            let mut claims = Map::new();
            claims.insert("role".to_owned(), Value::String(role.to_owned()));
            claims.insert("department".to_owned(), Value::String("sales".to_owned()));
            claims
        });
        self.users.get_mut().insert(
            uid.to_owned(),
            (
                IdentityUser {
                    uid: uid.to_owned(),
                    email: Some(email.to_owned()),
                },
                claims,
            ),
        );
        self
    }

    pub(crate) fn failing_claims_write(mut self) -> Self {
        self.fail_claims_write = true;
        self
    }

    pub(crate) async fn stored_claims(&self, uid: &str) -> Option<Map<String, Value>> {
        self.users
            .lock()
            .await
            .get(uid)
            .and_then(|(_, claims)| claims.clone())
    }
}

#[async_trait]
impl IdentityStore for FakeIdentityStore {
    async fn verify_token(&self, token: &CallerToken) -> AppResult<VerifiedToken> {
        self.calls.lock().await.push("verify_token");
        self.callers
            .get(token.as_str())
            .cloned()
            .ok_or_else(|| AppError::Unauthenticated("invalid identity token".to_owned()))
    }

    async fn get_user(&self, uid: &str) -> AppResult<IdentityUser> {
        self.calls.lock().await.push("get_user");
        self.users
            .lock()
            .await
            .get(uid)
            .map(|(user, _)| user.clone())
            .ok_or_else(|| AppError::NotFound(format!("no user record for uid '{uid}'")))
    }

    async fn get_custom_claims(&self, uid: &str) -> AppResult<Option<Map<String, Value>>> {
        self.calls.lock().await.push("get_custom_claims");
        self.users
            .lock()
            .await
            .get(uid)
            .map(|(_, claims)| claims.clone())
            .ok_or_else(|| AppError::NotFound(format!("no user record for uid '{uid}'")))
    }

    async fn set_custom_claims(&self, uid: &str, claims: &ClaimsRecord) -> AppResult<()> {
        self.calls.lock().await.push("set_custom_claims");
        if self.fail_claims_write {
            return Err(AppError::Internal("identity store unavailable".to_owned()));
        }

        let encoded = serde_json::to_value(claims)
            .map_err(|error| AppError::Internal(format!("failed to encode claims: {error}")))?;
        let mut users = self.users.lock().await;
        let entry = users
            .get_mut(uid)
            .ok_or_else(|| AppError::NotFound(format!("no user record for uid '{uid}'")))?;
        entry.1 = encoded.as_object().cloned();

        self.claims_writes
            .lock()
            .await
            .push((uid.to_owned(), claims.clone()));
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeAuditRepository {
    fail: bool,
    pub(crate) events: Mutex<Vec<AuditEvent>>,
}

impl FakeAuditRepository {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            events: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AuditRepository for FakeAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        if self.fail {
            return Err(AppError::Internal("audit store unavailable".to_owned()));
        }

        self.events.lock().await.push(event);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeEmailService {
    fail: bool,
    pub(crate) sent: Mutex<Vec<OutgoingEmail>>,
}

impl FakeEmailService {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl EmailService for FakeEmailService {
    async fn send_email(&self, email: OutgoingEmail) -> AppResult<()> {
        if self.fail {
            return Err(AppError::Internal("relay refused connection".to_owned()));
        }

        self.sent.lock().await.push(email);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeLeadRepository {
    pub(crate) leads: Mutex<Vec<Lead>>,
    pub(crate) queries: Mutex<Vec<LeadQuery>>,
}

#[async_trait]
impl LeadRepository for FakeLeadRepository {
    async fn insert_lead(&self, lead: NewLead) -> AppResult<Lead> {
        let now = Utc::now();
        let lead = Lead {
            lead_id: lead.lead_id,
            email: lead.email,
            service_interest: lead.service_interest,
            status: lead.status,
            priority: lead.priority,
            source: lead.source,
            created_at: now,
            updated_at: now,
        };
        self.leads.lock().await.push(lead.clone());
        Ok(lead)
    }

    async fn list_leads(&self, query: LeadQuery) -> AppResult<Vec<Lead>> {
        self.queries.lock().await.push(query.clone());
        Ok(self
            .leads
            .lock()
            .await
            .iter()
            .rev()
            .filter(|lead| query.status.is_none_or(|status| lead.status == status))
            .skip(query.offset)
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn lead_stats(&self) -> AppResult<LeadStats> {
        let mut stats = LeadStats::default();
        for lead in self.leads.lock().await.iter() {
            stats.record(lead.status);
        }
        Ok(stats)
    }

    async fn find_lead(&self, lead_id: LeadId) -> AppResult<Option<Lead>> {
        Ok(self
            .leads
            .lock()
            .await
            .iter()
            .find(|lead| lead.lead_id == lead_id)
            .cloned())
    }

    async fn update_lead(&self, lead_id: LeadId, update: LeadUpdate) -> AppResult<Lead> {
        let mut leads = self.leads.lock().await;
        let lead = leads
            .iter_mut()
            .find(|lead| lead.lead_id == lead_id)
            .ok_or_else(|| AppError::NotFound(format!("lead '{lead_id}' does not exist")))?;
        if let Some(status) = update.status {
            lead.status = status;
        }
        if let Some(priority) = update.priority {
            lead.priority = priority;
        }
        lead.updated_at = Utc::now();
        Ok(lead.clone())
    }

    async fn delete_lead(&self, lead_id: LeadId) -> AppResult<bool> {
        let mut leads = self.leads.lock().await;
        let before = leads.len();
        leads.retain(|lead| lead.lead_id != lead_id);
        Ok(leads.len() != before)
    }
}

#[derive(Default)]
pub(crate) struct FakeAuditLogRepository {
    pub(crate) entries: Vec<AuditLogEntry>,
    pub(crate) queries: Mutex<Vec<AuditLogQuery>>,
}

#[async_trait]
impl AuditLogRepository for FakeAuditLogRepository {
    async fn list_recent_entries(&self, query: AuditLogQuery) -> AppResult<Vec<AuditLogEntry>> {
        self.queries.lock().await.push(query.clone());
        Ok(self
            .entries
            .iter()
            .skip(query.offset)
            .take(query.limit)
            .cloned()
            .collect())
    }
}
