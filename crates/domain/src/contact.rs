//! Contact form submission rules.

use leadline_core::{AppError, AppResult};

use crate::email::is_email_shaped;

/// Longest accepted message body.
pub const CONTACT_MESSAGE_MAX_LENGTH: usize = 5_000;

/// Contact form fields as submitted by the website.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    /// Sender name.
    pub name: String,
    /// Sender email.
    pub email: String,
    /// Optional company.
    pub company: Option<String>,
    /// Message body.
    pub message: String,
}

/// Validated contact message ready to relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    name: String,
    email: String,
    company: Option<String>,
    message: String,
}

impl ContactMessage {
    /// Validates a submission. All field problems are reported together.
    pub fn new(submission: ContactSubmission) -> AppResult<Self> {
        let name = submission.name.trim();
        let email = submission.email.trim();
        let message = submission.message.trim();
        let mut problems = Vec::new();

        if name.is_empty() {
            problems.push("name is required");
        }

        if email.is_empty() {
            problems.push("email is required");
        } else if !is_email_shaped(email) {
            problems.push("email is not valid");
        }

        if message.is_empty() {
            problems.push("message is required");
        } else if message.chars().count() > CONTACT_MESSAGE_MAX_LENGTH {
            problems.push("message is too long");
        }

        if !problems.is_empty() {
            return Err(AppError::InvalidArgument(problems.join(", ")));
        }

        let company = submission
            .company
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
            company,
            message: message.to_owned(),
        })
    }

    /// Returns the sender name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the sender email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns the company, if given.
    #[must_use]
    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    /// Returns the message body.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Subject line for the relayed email.
    #[must_use]
    pub fn subject(&self) -> String {
        match self.company() {
            Some(company) => format!("New contact form message from {} ({company})", self.name),
            None => format!("New contact form message from {}", self.name),
        }
    }

    /// Plain-text body for the relayed email.
    #[must_use]
    pub fn text_body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\nCompany: {}\n\nMessage:\n{}\n",
            self.name,
            self.email,
            self.company().unwrap_or("-"),
            self.message
        )
    }
}
