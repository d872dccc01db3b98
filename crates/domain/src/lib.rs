//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod audit;
mod claims;
mod contact;
mod email;
mod lead;
mod security;

pub use audit::{AuditAction, AuditStatus, UNKNOWN_ACTOR_ROLE};
pub use claims::ClaimsRecord;
pub use contact::{CONTACT_MESSAGE_MAX_LENGTH, ContactMessage, ContactSubmission};
pub use email::{EMAIL_MAX_LENGTH, EmailAddress, is_email_shaped};
pub use lead::{
    DEFAULT_SERVICE_INTEREST, Lead, LeadId, LeadPriority, LeadStats, LeadStatus, NewLead,
    SERVICE_INTEREST_MAX_LENGTH, WEBSITE_FORM_SOURCE,
};
pub use security::{Permission, Role, is_valid_role, permissions_for, permissions_for_role_name};
