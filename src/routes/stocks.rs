use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};

use crate::db::stock_queries;
use crate::errors::AppError;
use crate::models::{StockDetail, StockSummary};
use crate::services;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stocks))
        .route("/:ticker", get(get_stock))
}

pub async fn list_stocks(
    State(state): State<AppState>,
) -> Result<Json<Vec<StockSummary>>, AppError> {
    info!("GET /stocks - Listing stock universe");
    let stocks = stock_queries::fetch_summaries(&state.pool).await.map_err(|e| {
        error!("Failed to list stocks: {}", e);
        AppError::Db(e)
    })?;
    Ok(Json(stocks))
}

pub async fn get_stock(
    Path(ticker): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StockDetail>, AppError> {
    info!("GET /stocks/{} - Fetching stock detail", ticker);
    let stock = stock_queries::fetch_one(&state.pool, &ticker)
        .await
        .map_err(|e| {
            error!("Failed to fetch stock {}: {}", ticker, e);
            AppError::Db(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Unknown ticker {}", ticker)))?;

    let prices = services::price_service::get_history(&state.pool, &ticker).await?;

    Ok(Json(StockDetail { stock, prices }))
}
