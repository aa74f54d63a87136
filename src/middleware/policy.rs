use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::{Decision, Principal};
use crate::error::ApiError;
use crate::state::AppState;

/// Authorization middleware. Runs after principal resolution and applies
/// the static route policy before any handler sees the request.
pub async fn enforce_policy(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let principal = request.extensions().get::<Principal>().cloned().unwrap_or_default();
    let decision = state.policy.evaluate(request.method(), request.uri().path(), &principal);

    match decision {
        Decision::Allow => next.run(request).await,
        Decision::Unauthenticated => {
            tracing::debug!("Unauthenticated {} {}", request.method(), request.uri().path());
            ApiError::unauthorized("Authentication is required to access this resource").into_response()
        }
        Decision::Forbidden => {
            tracing::info!(
                "{} denied {} {}",
                principal.display_name(),
                request.method(),
                request.uri().path()
            );
            ApiError::forbidden("Access denied").into_response()
        }
    }
}
