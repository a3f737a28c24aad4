use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::PlayerId;

#[derive(Debug, Deserialize)]
pub struct RegisterPlayerRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterPlayerResponse {
    pub id: PlayerId,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct PlayerCountResponse {
    pub count: usize,
}

pub async fn register_player(
    State(state): State<AppState>,
    Json(request): Json<RegisterPlayerRequest>,
) -> Result<(StatusCode, Json<RegisterPlayerResponse>), ApiError> {
    let id = state.tournament.register_player(&request.name)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterPlayerResponse {
            id,
            name: request.name.trim().to_string(),
        }),
    ))
}

pub async fn reset_players(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.tournament.reset_players()?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn count_players(
    State(state): State<AppState>,
) -> Result<Json<PlayerCountResponse>, ApiError> {
    let count = state.tournament.count_players()?;
    Ok(Json(PlayerCountResponse { count }))
}
