//! REST API endpoints.
//!
//! Axum-based HTTP API for registering players, reporting match results
//! and reading standings and next-round pairings.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::tournament::TournamentError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Precondition failed: {0}")]
    Precheck(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Precheck(_) => (StatusCode::BAD_REQUEST, "PRECHECK_FAILED"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<TournamentError> for ApiError {
    fn from(err: TournamentError) -> Self {
        match err {
            TournamentError::Precheck(e) => ApiError::Precheck(e.to_string()),
            TournamentError::NotFound(id) => ApiError::NotFound(format!("player {}", id)),
            TournamentError::Store(e) => ApiError::Internal(e.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin == "*" {
        return layer.allow_origin(Any);
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            warn!("Invalid CORS origin {:?}, allowing any origin", origin);
            layer.allow_origin(Any)
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origin);

    Router::new()
        .route("/health", get(health))
        .route(
            "/api/players",
            post(routes::players::register_player).delete(routes::players::reset_players),
        )
        .route("/api/players/count", get(routes::players::count_players))
        .route(
            "/api/matches",
            post(routes::matches::report_match).delete(routes::matches::reset_matches),
        )
        .route("/api/standings", get(routes::standings::list_standings))
        .route("/api/pairings", get(routes::standings::list_pairings))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;

    use super::state::AppState;
    use crate::storage::MemoryStore;
    use crate::tournament::{Tournament, TournamentSettings};

    pub fn setup_test_state() -> AppState {
        AppState {
            tournament: Tournament::new(Arc::new(MemoryStore::new()), TournamentSettings::default()),
            cors_origin: "*".to_string(),
        }
    }

    pub async fn send(
        app: axum::Router,
        method: &str,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }
        let request = builder
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();

        let resp = app.oneshot(request).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{send, setup_test_state};
    use super::*;
    use crate::models::PlayerId;
    use crate::tournament::PrecheckError;

    #[tokio::test]
    async fn test_health() {
        let app = build_router(setup_test_state());
        let (status, json) = send(app, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[test]
    fn test_tournament_error_mapping() {
        let err: ApiError = TournamentError::from(PrecheckError::OddPlayerCount(3)).into();
        assert!(matches!(err, ApiError::Precheck(_)));

        let err: ApiError = TournamentError::NotFound(PlayerId::new(7)).into();
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "player 7"));
    }

    #[test]
    fn test_precheck_is_bad_request() {
        let resp = ApiError::Precheck("odd".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_error_status() {
        let resp = ApiError::Internal("disk".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
