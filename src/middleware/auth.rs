use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::Principal;
use crate::state::AppState;

/// Principal resolution middleware.
///
/// Reads the bearer token, validates it and loads the customer it names,
/// then stores the resulting [`Principal`] in the request extensions. It
/// never rejects a request: a missing, malformed or expired token simply
/// leaves the request anonymous for the policy layer to judge.
pub async fn resolve_principal(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let principal = match extract_bearer_token(request.headers()) {
        Some(token) => state.auth.resolve_principal(&token).await,
        None => Principal::Anonymous,
    };

    tracing::debug!(
        "{} {} as {}",
        request.method(),
        request.uri().path(),
        principal.display_name()
    );

    request.extensions_mut().insert(principal);
    next.run(request).await
}

/// Token text from the Authorization header. A value without the
/// `Bearer ` prefix is passed through whole and will fail validation.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    if value.trim().is_empty() {
        return None;
    }
    let token = value.strip_prefix("Bearer ").unwrap_or(value);
    Some(token.to_string())
}
