use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::handlers::{protected, public};
use crate::middleware::{enforce_policy, resolve_principal};
use crate::state::AppState;

/// Build the full router: routes, principal resolution, authorization
/// policy, then the optional CORS and request-logging layers.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(public::health))
        .merge(auth_public_routes())
        .merge(product_routes())
        // Resolution runs before the policy sees the request
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn_with_state(state.clone(), resolve_principal))
                .layer(middleware::from_fn_with_state(state.clone(), enforce_policy)),
        )
        .with_state(state);

    if let Some(cors) = cors_layer(&config.security) {
        router = router.layer(cors);
    }
    if config.server.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn auth_public_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/v1/auth/register", post(auth::register_post))
        .route("/v1/auth/login", post(auth::login_post))
}

fn product_routes() -> Router<AppState> {
    use protected::products;

    Router::new()
        .route(
            "/v1/products",
            get(products::product_list).post(products::product_create),
        )
        .route(
            "/v1/products/:id",
            get(products::product_show)
                .put(products::product_update)
                .delete(products::product_delete),
        )
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }
    if security.cors_origins.is_empty() {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
    )
}

/// Serve until Ctrl-C (or SIGTERM on unix).
pub async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::{
        body::Body,
        http::{header::AUTHORIZATION, Method, Request, StatusCode},
    };
    use tower::ServiceExt;

    fn test_config() -> AppConfig {
        let mut config = AppConfig::development();
        config.security.bcrypt_cost = 4;
        config
    }

    fn router() -> Router {
        let config = test_config();
        let state = AppState::in_memory(&config).unwrap();
        app(state, &config)
    }

    async fn error_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_public() {
        let response = router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn products_need_a_principal() {
        let response = router()
            .oneshot(Request::builder().uri("/v1/products").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = error_json(response).await;
        assert_eq!(body["status"], 401);
        assert_eq!(body["errors"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn invalid_token_is_treated_as_anonymous() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri("/v1/products/00000000-0000-0000-0000-000000000000")
                    .header(AUTHORIZATION, "Bearer not-a-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/v1/auth/register")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_json(response).await["status"], 400);
    }

    #[test]
    fn cors_is_optional() {
        let mut security = test_config().security;
        security.enable_cors = false;
        assert!(cors_layer(&security).is_none());
        security.enable_cors = true;
        assert!(cors_layer(&security).is_some());
    }
}
