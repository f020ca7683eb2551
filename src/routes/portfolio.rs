use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::middleware::auth::AuthUser;
use crate::models::HoldingView;
use crate::services;
use crate::services::trade_service::TradeReceipt;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_portfolio))
        .route("/buy", post(buy_stock))
        .route("/sell", post(sell_stock))
}

#[derive(Debug, Deserialize)]
pub struct TradeRequest {
    pub ticker: String,
}

pub async fn get_portfolio(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<HoldingView>>, AppError> {
    info!("GET /portfolio - Fetching holdings for {}", user_id);
    let holdings = services::portfolio_service::fetch_refreshed(&state.pool, user_id)
        .await
        .map_err(|e| {
            error!("Failed to fetch portfolio for {}: {}", user_id, e);
            e
        })?;
    Ok(Json(holdings))
}

pub async fn buy_stock(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<TradeRequest>,
) -> Result<Json<TradeReceipt>, AppError> {
    info!("POST /portfolio/buy - User {} buying {}", user_id, req.ticker);
    let receipt = services::trade_service::buy(&state.pool, user_id, &req.ticker)
        .await
        .map_err(|e| {
            match &e {
                AppError::InsufficientBalance | AppError::InvalidStockData => {
                    warn!("Buy of {} rejected for {}: {}", req.ticker, user_id, e)
                }
                _ => error!("Buy of {} failed for {}: {}", req.ticker, user_id, e),
            }
            e
        })?;
    Ok(Json(receipt))
}

pub async fn sell_stock(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<TradeRequest>,
) -> Result<Json<TradeReceipt>, AppError> {
    info!("POST /portfolio/sell - User {} selling {}", user_id, req.ticker);
    let receipt = services::trade_service::sell(&state.pool, user_id, &req.ticker)
        .await
        .map_err(|e| {
            match &e {
                AppError::NothingToSell => {
                    warn!("Sell of {} rejected for {}: {}", req.ticker, user_id, e)
                }
                _ => error!("Sell of {} failed for {}: {}", req.ticker, user_id, e),
            }
            e
        })?;
    Ok(Json(receipt))
}
