use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::errors::AppError;
use crate::jobs::daily_price_fetch_job;
use crate::services::job_scheduler_service::JobContext;
use crate::state::AppState;

// Manual trigger surface for the fetcher, the only one besides the cron
// schedule. Meant for operators and tests, not the UI.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/daily-fetch", post(trigger_daily_fetch))
        .route("/backfill", post(trigger_backfill))
}

#[derive(Debug, Deserialize)]
pub struct DailyFetchRequest {
    /// Day to fetch; defaults to yesterday when omitted.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct BackfillRequest {
    pub ticker: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct JobRunResponse {
    pub items_processed: usize,
    pub items_failed: usize,
}

fn job_context(state: &AppState) -> JobContext {
    JobContext {
        pool: Arc::new(state.pool.clone()),
        quote_provider: state.quote_provider.clone(),
        rate_limiter: state.rate_limiter.clone(),
    }
}

pub async fn trigger_daily_fetch(
    State(state): State<AppState>,
    Json(req): Json<DailyFetchRequest>,
) -> Result<Json<JobRunResponse>, AppError> {
    info!("POST /jobs/daily-fetch - Manual fetch trigger (date: {:?})", req.date);
    let ctx = job_context(&state);

    let result = match req.date {
        Some(date) => daily_price_fetch_job::fetch_closes_for_day(&ctx, date).await,
        None => daily_price_fetch_job::run_daily_price_fetch(ctx.clone()).await,
    }
    .map_err(|e| {
        error!("Manual daily fetch failed: {}", e);
        e
    })?;

    Ok(Json(JobRunResponse {
        items_processed: result.items_processed,
        items_failed: result.items_failed,
    }))
}

pub async fn trigger_backfill(
    State(state): State<AppState>,
    Json(req): Json<BackfillRequest>,
) -> Result<Json<JobRunResponse>, AppError> {
    info!(
        "POST /jobs/backfill - Backfilling {} from {} to {}",
        req.ticker, req.start, req.end
    );
    let ctx = job_context(&state);

    let result = daily_price_fetch_job::backfill_range(&ctx, &req.ticker, req.start, req.end)
        .await
        .map_err(|e| {
            error!("Backfill of {} failed: {}", req.ticker, e);
            e
        })?;

    Ok(Json(JobRunResponse {
        items_processed: result.items_processed,
        items_failed: result.items_failed,
    }))
}
