//! Identity store adapter for an HTTP identity provider.
//!
//! Provider contract:
//! - `POST /v1/tokens:verify` with `{ "token": .. }` returns `{ uid, email?, claims }`
//! - `GET /v1/users/{uid}` returns `{ uid, email? }`
//! - `GET /v1/users/{uid}/claims` returns `{ claims }` where `claims` may be null
//! - `PUT /v1/users/{uid}/claims` replaces the claims document

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use url::Url;

use leadline_application::{IdentityStore, IdentityUser, VerifiedToken};
use leadline_core::{AppError, AppResult, CallerToken};
use leadline_domain::ClaimsRecord;

/// HTTP identity provider settings.
#[derive(Debug, Clone)]
pub struct HttpIdentityStoreConfig {
    /// Provider base URL.
    pub base_url: Url,
    /// Service API key sent as bearer credentials.
    pub api_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Identity store backed by a remote identity provider.
#[derive(Clone)]
pub struct HttpIdentityStore {
    http_client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct VerifyTokenResponse {
    uid: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    claims: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    uid: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClaimsResponse {
    #[serde(default)]
    claims: Option<Map<String, Value>>,
}

impl HttpIdentityStore {
    /// Creates a new adapter with a client bound to the configured timeout.
    pub fn new(config: HttpIdentityStoreConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| {
                AppError::Internal(format!("failed to build identity provider client: {error}"))
            })?;

        Ok(Self {
            http_client,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        endpoint(&self.base_url, segments)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        context: &str,
    ) -> AppResult<reqwest::Response> {
        request
            .bearer_auth(self.api_key.as_str())
            .send()
            .await
            .map_err(|error| {
                AppError::Internal(format!("identity provider {context} failed: {error}"))
            })
    }

    async fn user_response(&self, uid: &str) -> AppResult<reqwest::Response> {
        let url = self.endpoint(&["v1", "users", uid])?;
        let response = self.send(self.http_client.get(url), "user lookup").await?;
        ensure_user_found(response, uid).await
    }
}

/// Appends path segments to the base URL, percent-encoding each segment.
///
/// Empty, `.` and `..` segments are rejected: the URL parser drops or
/// resolves them instead of encoding them.
fn endpoint(base_url: &Url, segments: &[&str]) -> AppResult<Url> {
    if let Some(segment) = segments
        .iter()
        .find(|segment| matches!(**segment, "" | "." | ".."))
    {
        return Err(AppError::InvalidArgument(format!(
            "'{segment}' is not a valid identity provider path segment"
        )));
    }

    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| {
            AppError::Internal(format!(
                "identity provider url '{base_url}' cannot carry a path"
            ))
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Maps a non-success provider status to the application error taxonomy.
fn status_error(status: StatusCode, context: &str, body: &str) -> AppError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            AppError::Unauthenticated("invalid identity token".to_owned())
        }
        StatusCode::NOT_FOUND => AppError::NotFound(format!("identity provider {context}: {body}")),
        _ => AppError::Internal(format!(
            "identity provider {context} failed with status {status}: {body}"
        )),
    }
}

async fn ensure_user_found(response: reqwest::Response, uid: &str) -> AppResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        return Err(AppError::NotFound(format!("no user record for uid '{uid}'")));
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<response body unavailable>".to_owned());
    Err(AppError::Internal(format!(
        "identity provider user lookup failed with status {status}: {body}"
    )))
}

async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    context: &str,
) -> AppResult<T> {
    response.json::<T>().await.map_err(|error| {
        AppError::Internal(format!(
            "identity provider {context} returned an invalid body: {error}"
        ))
    })
}

#[async_trait]
impl IdentityStore for HttpIdentityStore {
    async fn verify_token(&self, token: &CallerToken) -> AppResult<VerifiedToken> {
        let url = self.endpoint(&["v1", "tokens:verify"])?;
        let response = self
            .send(
                self.http_client
                    .post(url)
                    .json(&json!({ "token": token.as_str() })),
                "token verification",
            )
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<response body unavailable>".to_owned());
            return Err(status_error(status, "token verification", &body));
        }

        let verified: VerifyTokenResponse = decode(response, "token verification").await?;
        Ok(VerifiedToken {
            uid: verified.uid,
            email: verified.email,
            claims: verified.claims,
        })
    }

    async fn get_user(&self, uid: &str) -> AppResult<IdentityUser> {
        let response = self.user_response(uid).await?;
        let user: UserResponse = decode(response, "user lookup").await?;

        Ok(IdentityUser {
            uid: user.uid,
            email: user.email,
        })
    }

    async fn get_custom_claims(&self, uid: &str) -> AppResult<Option<Map<String, Value>>> {
        let url = self.endpoint(&["v1", "users", uid, "claims"])?;
        let response = self.send(self.http_client.get(url), "claims lookup").await?;
        let response = ensure_user_found(response, uid).await?;

        let claims: ClaimsResponse = decode(response, "claims lookup").await?;
        Ok(claims.claims)
    }

    async fn set_custom_claims(&self, uid: &str, claims: &ClaimsRecord) -> AppResult<()> {
        let url = self.endpoint(&["v1", "users", uid, "claims"])?;
        let response = self
            .send(self.http_client.put(url).json(claims), "claims write")
            .await?;
        ensure_user_found(response, uid).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use url::Url;

    use leadline_core::AppError;

    use super::{endpoint, status_error};

    fn base(value: &str) -> Url {
        match Url::parse(value) {
            Ok(url) => url,
            Err(error) => panic!("test url should parse: {error}"),
        }
    }

    #[test]
    fn endpoint_encodes_user_ids() {
        let url = endpoint(&base("https://id.example.com/api/"), &["v1", "users", "a/b c"]);
        assert_eq!(
            url.map(String::from).ok().as_deref(),
            Some("https://id.example.com/api/v1/users/a%2Fb%20c")
        );
    }

    #[test]
    fn endpoint_rejects_dot_segments() {
        let base = base("https://id.example.com/api/");
        for uid in ["..", ".", ""] {
            let url = endpoint(&base, &["v1", "users", uid, "claims"]);
            assert!(matches!(url, Err(AppError::InvalidArgument(_))));
        }

        let url = endpoint(&base, &["v1", "users", "..u1"]);
        assert_eq!(
            url.map(String::from).ok().as_deref(),
            Some("https://id.example.com/api/v1/users/..u1")
        );
    }

    #[test]
    fn endpoint_rejects_non_hierarchical_base() {
        let url = endpoint(&base("mailto:ops@example.com"), &["v1"]);
        assert!(matches!(url, Err(AppError::Internal(_))));
    }

    #[test]
    fn provider_statuses_map_to_error_kinds() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, "token verification", ""),
            AppError::Unauthenticated(_)
        ));
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, "user lookup", "missing"),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, "claims write", "upstream"),
            AppError::Internal(message) if message.contains("502")
        ));
    }
}
