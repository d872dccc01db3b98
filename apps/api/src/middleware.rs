use axum::extract::Request;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use leadline_core::CallerToken;

/// Identity token presented by the caller of the current request, if any.
///
/// The token is unverified here; services verify it against the identity
/// store before trusting it.
#[derive(Debug, Clone, Default)]
pub struct RequestCaller(pub Option<CallerToken>);

impl RequestCaller {
    pub fn token(&self) -> Option<&CallerToken> {
        self.0.as_ref()
    }
}

/// Reads the bearer token from the `Authorization` header into a request
/// extension. Missing or malformed headers yield an anonymous caller.
pub async fn attach_caller(mut request: Request, next: Next) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(CallerToken::from_authorization_header);

    request.extensions_mut().insert(RequestCaller(token));
    next.run(request).await
}
