use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{Pairing, StandingRecord};

#[derive(Debug, Serialize)]
pub struct StandingsResponse {
    pub standings: Vec<StandingRecord>,
}

#[derive(Debug, Serialize)]
pub struct PairingsResponse {
    pub pairings: Vec<Pairing>,
}

pub async fn list_standings(
    State(state): State<AppState>,
) -> Result<Json<StandingsResponse>, ApiError> {
    let standings = state.tournament.standings()?;
    Ok(Json(StandingsResponse { standings }))
}

pub async fn list_pairings(
    State(state): State<AppState>,
) -> Result<Json<PairingsResponse>, ApiError> {
    let pairings = state.tournament.pairings()?;
    Ok(Json(PairingsResponse { pairings }))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::test_support::{send, setup_test_state};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_standings_and_pairings() {
        let state = setup_test_state();
        let ids: Vec<_> = ["Alice", "Bob", "Carol", "Dave"]
            .iter()
            .map(|n| state.tournament.register_player(n).unwrap())
            .collect();
        state.tournament.report_match(ids[0], ids[1]).unwrap();
        state.tournament.report_match(ids[2], ids[3]).unwrap();

        let (status, json) = send(build_router(state.clone()), "GET", "/api/standings", None).await;
        assert_eq!(status, StatusCode::OK);
        let order: Vec<u64> = json["standings"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_u64().unwrap())
            .collect();
        assert_eq!(order, vec![1, 3, 2, 4]);
        assert_eq!(json["standings"][0]["wins"], 1);
        assert_eq!(json["standings"][3]["matches"], 1);

        let (status, json) = send(build_router(state), "GET", "/api/pairings", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["pairings"][0]["player1_id"], 1);
        assert_eq!(json["pairings"][0]["player2_id"], 3);
        assert_eq!(json["pairings"][1]["player1_name"], "Bob");
        assert_eq!(json["pairings"][1]["player2_name"], "Dave");
    }

    #[tokio::test]
    async fn test_pairings_odd_players() {
        let state = setup_test_state();
        state.tournament.register_player("Alice").unwrap();

        let (status, json) = send(build_router(state), "GET", "/api/pairings", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "PRECHECK_FAILED");
    }
}
