use std::sync::Arc;

use tracing::{info, warn};

use leadline_core::AppResult;
use leadline_domain::{ContactMessage, ContactSubmission};

use crate::{EmailService, OutgoingEmail};

/// Relays website contact form submissions to the site owner's inbox.
#[derive(Clone)]
pub struct ContactService {
    email_service: Arc<dyn EmailService>,
    recipient: String,
}

impl ContactService {
    /// Creates a new service that relays to `recipient`.
    #[must_use]
    pub fn new(email_service: Arc<dyn EmailService>, recipient: impl Into<String>) -> Self {
        Self {
            email_service,
            recipient: recipient.into(),
        }
    }

    /// Validates and relays a submission.
    ///
    /// Invalid forms fail with `InvalidArgument`. A relay failure is logged and
    /// reported as `Ok(false)` so the website can show its retry message.
    pub async fn send_contact_email(&self, submission: ContactSubmission) -> AppResult<bool> {
        let message = ContactMessage::new(submission)?;

        let email = OutgoingEmail {
            to: self.recipient.clone(),
            reply_to: Some(message.email().to_owned()),
            subject: message.subject(),
            text_body: message.text_body(),
        };

        match self.email_service.send_email(email).await {
            Ok(()) => {
                info!(sender = message.email(), "contact message relayed");
                Ok(true)
            }
            Err(error) => {
                warn!(sender = message.email(), error = %error, "contact message relay failed");
                Ok(false)
            }
        }
    }
}
