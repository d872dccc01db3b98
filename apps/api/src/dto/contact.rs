use leadline_domain::ContactSubmission;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming contact form payload.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/contact-request.ts"
)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    #[ts(optional)]
    pub company: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl From<ContactRequest> for ContactSubmission {
    fn from(value: ContactRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            company: value.company,
            message: value.message,
        }
    }
}

/// Contact relay outcome.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/contact-response.ts"
)]
pub struct ContactResponse {
    pub success: bool,
}
