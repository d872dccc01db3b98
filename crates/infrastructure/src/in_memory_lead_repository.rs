use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use leadline_application::{LeadQuery, LeadRepository, LeadUpdate};
use leadline_core::{AppError, AppResult};
use leadline_domain::{Lead, LeadId, LeadStats, NewLead};

/// In-memory lead store used when no database is configured.
#[derive(Debug, Default)]
pub struct InMemoryLeadRepository {
    leads: RwLock<Vec<Lead>>,
}

impl InMemoryLeadRepository {
    /// Creates an empty in-memory lead store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeadRepository for InMemoryLeadRepository {
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

        self.leads.write().await.push(lead.clone());
        Ok(lead)
    }

    async fn list_leads(&self, query: LeadQuery) -> AppResult<Vec<Lead>> {
        let leads = self.leads.read().await;

        Ok(leads
            .iter()
            .rev()
            .filter(|lead| query.status.is_none_or(|status| lead.status == status))
            .skip(query.offset)
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn lead_stats(&self) -> AppResult<LeadStats> {
        let leads = self.leads.read().await;

        let mut stats = LeadStats::default();
        for lead in leads.iter() {
            stats.record(lead.status);
        }
        Ok(stats)
    }

    async fn find_lead(&self, lead_id: LeadId) -> AppResult<Option<Lead>> {
        let leads = self.leads.read().await;
        Ok(leads.iter().find(|lead| lead.lead_id == lead_id).cloned())
    }

    async fn update_lead(&self, lead_id: LeadId, update: LeadUpdate) -> AppResult<Lead> {
        let mut leads = self.leads.write().await;
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
        let mut leads = self.leads.write().await;
        let before = leads.len();
        leads.retain(|lead| lead.lead_id != lead_id);
        Ok(leads.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use leadline_application::{LeadQuery, LeadRepository, LeadUpdate};
    use leadline_core::AppError;
    use leadline_domain::{LeadId, LeadStatus, NewLead};

    use super::InMemoryLeadRepository;

    async fn seeded(emails: &[&str]) -> (InMemoryLeadRepository, Vec<LeadId>) {
        let repository = InMemoryLeadRepository::new();
        let mut ids = Vec::new();
        for email in emails {
            let lead = match NewLead::from_website_form(email, None) {
                Ok(lead) => lead,
                Err(error) => panic!("test lead should be valid: {error}"),
            };
            match repository.insert_lead(lead).await {
                Ok(lead) => ids.push(lead.lead_id),
                Err(error) => panic!("insert should succeed: {error}"),
            }
        }
        (repository, ids)
    }

    #[tokio::test]
    async fn listing_is_newest_first_and_filterable() {
        let (repository, ids) = seeded(&["a@x.com", "b@x.com", "c@x.com"]).await;
        let promoted = repository
            .update_lead(
                ids[0],
                LeadUpdate {
                    status: Some(LeadStatus::Contacted),
                    priority: None,
                },
            )
            .await;
        assert!(promoted.is_ok());

        let all = repository
            .list_leads(LeadQuery {
                limit: 10,
                offset: 0,
                status: None,
            })
            .await
            .unwrap_or_default();
        let emails: Vec<&str> = all.iter().map(|lead| lead.email.as_str()).collect();
        assert_eq!(emails, vec!["c@x.com", "b@x.com", "a@x.com"]);

        let contacted = repository
            .list_leads(LeadQuery {
                limit: 10,
                offset: 0,
                status: Some(LeadStatus::Contacted),
            })
            .await
            .unwrap_or_default();
        assert_eq!(contacted.len(), 1);
        assert_eq!(contacted[0].lead_id, ids[0]);

        let stats = repository.lead_stats().await.unwrap_or_default();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.new, 2);
        assert_eq!(stats.contacted, 1);
    }

    #[tokio::test]
    async fn update_and_delete_unknown_leads() {
        let (repository, ids) = seeded(&["a@x.com"]).await;

        let update = repository
            .update_lead(LeadId::new(), LeadUpdate::default())
            .await;
        assert!(matches!(update, Err(AppError::NotFound(_))));

        assert_eq!(repository.delete_lead(LeadId::new()).await, Ok(false));
        assert_eq!(repository.delete_lead(ids[0]).await, Ok(true));
        assert_eq!(repository.find_lead(ids[0]).await, Ok(None));
    }
}
