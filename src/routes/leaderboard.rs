use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::LeaderboardEntry;
use crate::services;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_leaderboard))
}

pub async fn get_leaderboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    info!("GET /leaderboard - Fetching top balances");
    let entries = services::leaderboard_service::top_by_balance(&state.pool)
        .await
        .map_err(|e| {
            error!("Failed to fetch leaderboard: {}", e);
            e
        })?;
    Ok(Json(entries))
}
