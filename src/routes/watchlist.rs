use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use tracing::{error, info};

use crate::errors::AppError;
use crate::middleware::auth::AuthUser;
use crate::models::{AddWatchRequest, WatchlistItem};
use crate::services;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_watchlist))
        .route("/", post(add_to_watchlist))
        .route("/:ticker", delete(remove_from_watchlist))
}

pub async fn get_watchlist(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<WatchlistItem>>, AppError> {
    info!("GET /watchlist - Fetching watchlist for {}", user_id);
    let items = services::watchlist_service::list(&state.pool, user_id)
        .await
        .map_err(|e| {
            error!("Failed to fetch watchlist for {}: {}", user_id, e);
            e
        })?;
    Ok(Json(items))
}

pub async fn add_to_watchlist(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<AddWatchRequest>,
) -> Result<Json<Vec<WatchlistItem>>, AppError> {
    info!("POST /watchlist - User {} watching {}", user_id, req.ticker);
    let items = services::watchlist_service::add(&state.pool, user_id, &req.ticker)
        .await
        .map_err(|e| {
            error!("Failed to add {} to watchlist for {}: {}", req.ticker, user_id, e);
            e
        })?;
    Ok(Json(items))
}

pub async fn remove_from_watchlist(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(ticker): Path<String>,
) -> Result<Json<Vec<WatchlistItem>>, AppError> {
    info!("DELETE /watchlist/{} - User {} unwatching", ticker, user_id);
    let items = services::watchlist_service::remove(&state.pool, user_id, &ticker)
        .await
        .map_err(|e| {
            error!("Failed to remove {} from watchlist for {}: {}", ticker, user_id, e);
            e
        })?;
    Ok(Json(items))
}
