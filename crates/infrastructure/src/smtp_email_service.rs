//! SMTP email service using the `lettre` crate.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use leadline_application::{EmailService, OutgoingEmail};
use leadline_core::{AppError, AppResult};

/// SMTP email service configuration.
#[derive(Clone)]
pub struct SmtpEmailConfig {
    /// SMTP server hostname.
    pub host: String,
    /// SMTP server port.
    pub port: u16,
    /// SMTP username.
    pub username: String,
    /// SMTP password.
    pub password: String,
    /// Sender email address.
    pub from_address: String,
}

/// Production email service using SMTP.
#[derive(Clone)]
pub struct SmtpEmailService {
    config: SmtpEmailConfig,
}

impl SmtpEmailService {
    /// Creates a new SMTP email service.
    #[must_use]
    pub fn new(config: SmtpEmailConfig) -> Self {
        Self { config }
    }

    fn build_message(&self, email: &OutgoingEmail) -> AppResult<Message> {
        let from: Mailbox = self
            .config
            .from_address
            .parse()
            .map_err(|error| AppError::Internal(format!("invalid from address: {error}")))?;

        let to: Mailbox = email
            .to
            .parse()
            .map_err(|error| AppError::Internal(format!("invalid recipient address: {error}")))?;

        let mut builder = Message::builder()
            .from(from)
            .to(to)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_PLAIN);

        if let Some(reply_to) = email.reply_to.as_deref() {
            let reply_to: Mailbox = reply_to.parse().map_err(|error| {
                AppError::Internal(format!("invalid reply-to address: {error}"))
            })?;
            builder = builder.reply_to(reply_to);
        }

        builder
            .body(email.text_body.clone())
            .map_err(|error| AppError::Internal(format!("failed to build email: {error}")))
    }
}

#[async_trait]
impl EmailService for SmtpEmailService {
    async fn send_email(&self, email: OutgoingEmail) -> AppResult<()> {
        let message = self.build_message(&email)?;

        let credentials =
            Credentials::new(self.config.username.clone(), self.config.password.clone());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.host)
            .map_err(|error| {
                AppError::Internal(format!("failed to create SMTP transport: {error}"))
            })?
            .port(self.config.port)
            .credentials(credentials)
            .build();

        mailer
            .send(message)
            .await
            .map_err(|error| AppError::Internal(format!("failed to send email: {error}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use leadline_application::OutgoingEmail;
    use leadline_core::AppError;

    use super::{SmtpEmailConfig, SmtpEmailService};

    fn service(from_address: &str) -> SmtpEmailService {
        SmtpEmailService::new(SmtpEmailConfig {
            host: "smtp.example.com".to_owned(),
            port: 587,
            username: "relay".to_owned(),
            password: "secret".to_owned(),
            from_address: from_address.to_owned(),
        })
    }

    fn email(reply_to: Option<&str>) -> OutgoingEmail {
        OutgoingEmail {
            to: "inbox@example.com".to_owned(),
            reply_to: reply_to.map(str::to_owned),
            subject: "New contact form message from Grace".to_owned(),
            text_body: "Hello".to_owned(),
        }
    }

    #[test]
    fn message_carries_reply_to_header() {
        let message = service("Leadline <noreply@example.com>")
            .build_message(&email(Some("grace@navy.mil")));

        let Ok(message) = message else {
            panic!("message should build");
        };
        let formatted = String::from_utf8_lossy(&message.formatted()).into_owned();
        assert!(formatted.contains("Reply-To:"));
        assert!(formatted.contains("grace@navy.mil"));
        assert!(formatted.contains("inbox@example.com"));
    }

    #[test]
    fn invalid_sender_is_internal() {
        let message = service("not an address").build_message(&email(None));
        assert!(matches!(message, Err(AppError::Internal(_))));
    }
}
