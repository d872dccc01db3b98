use serde::{Deserialize, Serialize};

/// Raw identity token presented by a caller.
///
/// The token is only a claim of identity; services verify it against the
/// identity store before trusting anything it carries.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerToken(String);

impl CallerToken {
    /// Wraps a raw token value. Returns `None` for blank input.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }

        Some(Self(trimmed.to_owned()))
    }

    /// Parses an `Authorization` header value of the form `Bearer <token>`.
    #[must_use]
    pub fn from_authorization_header(value: &str) -> Option<Self> {
        let (scheme, token) = value.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return None;
        }

        Self::new(token)
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for CallerToken {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("CallerToken(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::CallerToken;

    #[test]
    fn bearer_header_is_parsed() {
        let token = CallerToken::from_authorization_header("Bearer abc.def");
        assert_eq!(token.as_ref().map(CallerToken::as_str), Some("abc.def"));
    }

    #[test]
    fn other_schemes_and_blank_tokens_are_rejected() {
        assert!(CallerToken::from_authorization_header("Basic abc").is_none());
        assert!(CallerToken::from_authorization_header("Bearer    ").is_none());
        assert!(CallerToken::from_authorization_header("abc").is_none());
    }

    #[test]
    fn debug_output_redacts_token() {
        let Some(token) = CallerToken::new("secret") else {
            panic!("token should be accepted");
        };
        assert!(!format!("{token:?}").contains("secret"));
    }
}
