//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod console_email_service;
mod http_identity_store;
mod in_memory_audit_repository;
mod in_memory_identity_store;
mod in_memory_lead_repository;
mod postgres_audit_log_repository;
mod postgres_audit_repository;
mod postgres_lead_repository;
mod smtp_email_service;

pub use console_email_service::ConsoleEmailService;
pub use http_identity_store::{HttpIdentityStore, HttpIdentityStoreConfig};
pub use in_memory_audit_repository::InMemoryAuditRepository;
pub use in_memory_identity_store::InMemoryIdentityStore;
pub use in_memory_lead_repository::InMemoryLeadRepository;
pub use postgres_audit_log_repository::PostgresAuditLogRepository;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_lead_repository::PostgresLeadRepository;
pub use smtp_email_service::{SmtpEmailConfig, SmtpEmailService};
