use async_trait::async_trait;
use leadline_core::AppResult;

/// Plain-text email handed to the mail relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    /// Recipient address.
    pub to: String,
    /// Optional reply-to address.
    pub reply_to: Option<String>,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text_body: String,
}

/// Port for the outbound mail relay.
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Sends one email.
    async fn send_email(&self, email: OutgoingEmail) -> AppResult<()>;
}
