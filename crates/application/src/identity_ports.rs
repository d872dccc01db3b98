use async_trait::async_trait;
use leadline_core::{AppResult, CallerToken};
use leadline_domain::{ClaimsRecord, Role};
use serde_json::{Map, Value};

/// Claims carried by a token after server-side verification.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedToken {
    /// Identity of the token holder.
    pub uid: String,
    /// Email of the token holder, when the provider knows one.
    pub email: Option<String>,
    /// Custom claims embedded in the token.
    pub claims: Map<String, Value>,
}

impl VerifiedToken {
    /// Returns the raw `role` claim, if present and a string.
    #[must_use]
    pub fn role_claim(&self) -> Option<&str> {
        self.claims.get("role").and_then(Value::as_str)
    }

    /// Returns the role granted by the token. Missing or unknown values fall
    /// back to the default role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role_claim()
            .and_then(|value| value.parse::<Role>().ok())
            .unwrap_or(Role::DEFAULT)
    }
}

/// User record held by the identity store.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityUser {
    /// Stable user identifier.
    pub uid: String,
    /// Primary email, when set.
    pub email: Option<String>,
}

/// Port for the external identity provider that owns users and their claims.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Verifies a raw caller token and returns its current claims.
    ///
    /// Invalid or expired tokens fail with `AppError::Unauthenticated`.
    async fn verify_token(&self, token: &CallerToken) -> AppResult<VerifiedToken>;

    /// Loads a user record. Unknown users fail with `AppError::NotFound`.
    async fn get_user(&self, uid: &str) -> AppResult<IdentityUser>;

    /// Returns the custom claims currently attached to a user, if any.
    async fn get_custom_claims(&self, uid: &str) -> AppResult<Option<Map<String, Value>>>;

    /// Replaces the custom claims of a user wholesale.
    async fn set_custom_claims(&self, uid: &str, claims: &ClaimsRecord) -> AppResult<()>;
}
