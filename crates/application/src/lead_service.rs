use std::sync::Arc;

use serde_json::{Value, json};
use tracing::info;

use leadline_core::{AppError, AppResult, CallerToken};
use leadline_domain::{AuditAction, AuditStatus, Lead, LeadId, LeadStats, NewLead, Permission};

use crate::{
    AuditEvent, AuditRepository, AuthorizationService, LeadQuery, LeadRepository, LeadUpdate,
    VerifiedCaller,
};

/// Largest page size served by lead listings.
pub const LEAD_PAGE_LIMIT_MAX: usize = 200;

/// Deepest offset served by lead listings.
pub const LEAD_PAGE_OFFSET_MAX: usize = 5_000;

/// Application service for lead capture and the lead dashboard.
#[derive(Clone)]
pub struct LeadService {
    authorization_service: AuthorizationService,
    repository: Arc<dyn LeadRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl LeadService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        repository: Arc<dyn LeadRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            authorization_service,
            repository,
            audit_repository,
        }
    }

    /// Captures a lead from the public website form.
    pub async fn capture_lead(&self, email: &str, service_interest: Option<&str>) -> AppResult<Lead> {
        let lead = NewLead::from_website_form(email, service_interest)?;
        let lead = self.repository.insert_lead(lead).await?;

        info!(
            lead_id = %lead.lead_id,
            service_interest = lead.service_interest.as_str(),
            "lead captured"
        );
        Ok(lead)
    }

    /// Lists leads, newest first.
    pub async fn list_leads(
        &self,
        caller: Option<&CallerToken>,
        query: LeadQuery,
    ) -> AppResult<Vec<Lead>> {
        self.authorization_service
            .require_permission(caller, Permission::LeadsRead)
            .await?;

        self.repository
            .list_leads(LeadQuery {
                limit: query.limit.clamp(1, LEAD_PAGE_LIMIT_MAX),
                offset: query.offset.min(LEAD_PAGE_OFFSET_MAX),
                ..query
            })
            .await
    }

    /// Returns pipeline counters.
    pub async fn lead_stats(&self, caller: Option<&CallerToken>) -> AppResult<LeadStats> {
        self.authorization_service
            .require_permission(caller, Permission::LeadsRead)
            .await?;

        self.repository.lead_stats().await
    }

    /// Changes status and/or priority of a lead and emits an audit event.
    pub async fn update_lead(
        &self,
        caller: Option<&CallerToken>,
        lead_id: LeadId,
        update: LeadUpdate,
    ) -> AppResult<Lead> {
        let caller = self
            .authorization_service
            .require_permission(caller, Permission::LeadsWrite)
            .await?;

        if update.is_empty() {
            return Err(AppError::InvalidArgument(
                "lead update must change status or priority".to_owned(),
            ));
        }

        let before = self.find_existing(lead_id).await?;
        let after = self.repository.update_lead(lead_id, update).await?;

        self.audit_repository
            .append_event(lead_event(
                &caller,
                AuditAction::Update,
                lead_id,
                Some(lead_snapshot(&before)),
                Some(lead_snapshot(&after)),
            ))
            .await?;

        Ok(after)
    }

    /// Deletes a lead and emits an audit event.
    pub async fn delete_lead(&self, caller: Option<&CallerToken>, lead_id: LeadId) -> AppResult<()> {
        let caller = self
            .authorization_service
            .require_permission(caller, Permission::LeadsDelete)
            .await?;

        let before = self.find_existing(lead_id).await?;
        if !self.repository.delete_lead(lead_id).await? {
            return Err(AppError::NotFound(format!("lead '{lead_id}' does not exist")));
        }

        self.audit_repository
            .append_event(lead_event(
                &caller,
                AuditAction::Delete,
                lead_id,
                Some(lead_snapshot(&before)),
                None,
            ))
            .await
    }

    async fn find_existing(&self, lead_id: LeadId) -> AppResult<Lead> {
        self.repository
            .find_lead(lead_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("lead '{lead_id}' does not exist")))
    }
}

fn lead_snapshot(lead: &Lead) -> Value {
    json!({
        "status": lead.status.as_str(),
        "priority": lead.priority.as_str(),
    })
}

fn lead_event(
    caller: &VerifiedCaller,
    action: AuditAction,
    lead_id: LeadId,
    before: Option<Value>,
    after: Option<Value>,
) -> AuditEvent {
    AuditEvent {
        action,
        resource: format!("leads/{lead_id}"),
        resource_id: lead_id.to_string(),
        resource_type: "lead".to_owned(),
        before,
        after,
        actor_id: Some(caller.uid.clone()),
        actor_email: caller.email.clone(),
        actor_role: caller.role.as_str().to_owned(),
        status: AuditStatus::Success,
        error: None,
    }
}

#[cfg(test)]
mod tests;
