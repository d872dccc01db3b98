use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use leadline_application::{IdentityStore, IdentityUser, VerifiedToken};
use leadline_core::{AppError, AppResult, CallerToken};
use leadline_domain::{ClaimsRecord, Role};

#[derive(Debug, Clone)]
struct StoredUser {
    email: Option<String>,
    claims: Option<Map<String, Value>>,
}

/// Identity store held in process memory.
///
/// Tokens are opaque strings mapped to a user. Verification returns the
/// user's current claims, so a role change is visible on the next request.
#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
    tokens: RwLock<HashMap<String, String>>,
    users: RwLock<HashMap<String, StoredUser>>,
}

impl InMemoryIdentityStore {
    /// Creates an empty identity store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or replaces a user. `role` writes an initial claims document.
    pub async fn upsert_user(
        &self,
        uid: &str,
        email: Option<&str>,
        role: Option<Role>,
    ) -> AppResult<()> {
        let email = email.map(str::to_owned);
        let claims = match role {
            Some(role) => Some(encode_claims(&ClaimsRecord::for_assignment(
                role,
                email.clone(),
                "system",
                Utc::now(),
            ))?),
            None => None,
        };

        self.users
            .write()
            .await
            .insert(uid.to_owned(), StoredUser { email, claims });
        Ok(())
    }

    /// Associates an opaque bearer token with an existing user.
    pub async fn issue_token(&self, token: &str, uid: &str) -> AppResult<()> {
        if !self.users.read().await.contains_key(uid) {
            return Err(AppError::NotFound(format!("no user record for uid '{uid}'")));
        }

        self.tokens
            .write()
            .await
            .insert(token.to_owned(), uid.to_owned());
        Ok(())
    }
}

fn encode_claims(claims: &ClaimsRecord) -> AppResult<Map<String, Value>> {
    match serde_json::to_value(claims) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::Internal(
            "claims record did not encode to an object".to_owned(),
        )),
        Err(error) => Err(AppError::Internal(format!(
            "failed to encode claims: {error}"
        ))),
    }
}

fn missing_user(uid: &str) -> AppError {
    AppError::NotFound(format!("no user record for uid '{uid}'"))
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn verify_token(&self, token: &CallerToken) -> AppResult<VerifiedToken> {
        let uid = self
            .tokens
            .read()
            .await
            .get(token.as_str())
            .cloned()
            .ok_or_else(|| AppError::Unauthenticated("invalid identity token".to_owned()))?;

        let users = self.users.read().await;
        let user = users
            .get(&uid)
            .ok_or_else(|| AppError::Unauthenticated("invalid identity token".to_owned()))?;

        Ok(VerifiedToken {
            uid,
            email: user.email.clone(),
            claims: user.claims.clone().unwrap_or_default(),
        })
    }

    async fn get_user(&self, uid: &str) -> AppResult<IdentityUser> {
        let users = self.users.read().await;
        let user = users.get(uid).ok_or_else(|| missing_user(uid))?;

        Ok(IdentityUser {
            uid: uid.to_owned(),
            email: user.email.clone(),
        })
    }

    async fn get_custom_claims(&self, uid: &str) -> AppResult<Option<Map<String, Value>>> {
        let users = self.users.read().await;
        let user = users.get(uid).ok_or_else(|| missing_user(uid))?;
        Ok(user.claims.clone())
    }

    async fn set_custom_claims(&self, uid: &str, claims: &ClaimsRecord) -> AppResult<()> {
        let encoded = encode_claims(claims)?;

        let mut users = self.users.write().await;
        let user = users.get_mut(uid).ok_or_else(|| missing_user(uid))?;
        user.claims = Some(encoded);
        Ok(())
    }
}
