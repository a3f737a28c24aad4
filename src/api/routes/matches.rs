use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::PlayerId;

#[derive(Debug, Deserialize)]
pub struct ReportMatchRequest {
    pub winner: PlayerId,
    pub loser: PlayerId,
}

pub async fn report_match(
    State(state): State<AppState>,
    Json(request): Json<ReportMatchRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .tournament
        .report_match(request.winner, request.loser)?;
    Ok(StatusCode::CREATED)
}

pub async fn reset_matches(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.tournament.reset_matches()?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::test_support::{send, setup_test_state};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_report_match() {
        let state = setup_test_state();
        state.tournament.register_player("Alice").unwrap();
        state.tournament.register_player("Bob").unwrap();

        let (status, _) = send(
            build_router(state.clone()),
            "POST",
            "/api/matches",
            Some(r#"{"winner":2,"loser":1}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let standings = state.tournament.standings().unwrap();
        assert_eq!(standings[0].name, "Bob");
        assert_eq!(standings[0].wins, 1);
    }

    #[tokio::test]
    async fn test_report_self_match() {
        let (status, json) = send(
            build_router(setup_test_state()),
            "POST",
            "/api/matches",
            Some(r#"{"winner":5,"loser":5}"#),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "PRECHECK_FAILED");
    }

    #[tokio::test]
    async fn test_reset_matches() {
        let state = setup_test_state();
        let a = state.tournament.register_player("Alice").unwrap();
        let b = state.tournament.register_player("Bob").unwrap();
        state.tournament.report_match(a, b).unwrap();

        let (status, _) = send(build_router(state.clone()), "DELETE", "/api/matches", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(state
            .tournament
            .standings()
            .unwrap()
            .iter()
            .all(|s| s.matches == 0));
    }
}
