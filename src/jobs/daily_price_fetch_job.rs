use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::services::job_scheduler_service::{JobContext, JobResult};
use crate::services::price_service;

/// The fixed universe the daily fetch walks. Must stay in sync with the
/// seeded stocks table.
pub const FETCH_TICKERS: [&str; 20] = [
    "AAPL", "NVDA", "MSFT", "AMZN", "GOOGL", "META", "TSLA", "BRK.B", "TSM", "AVGO",
    "WMT", "LLY", "JPM", "V", "ORCL", "UNH", "XOM", "NVO", "MA", "COST",
];

/// Daily entry point: fetch yesterday's close for every ticker in the
/// universe and append it to the stored history.
pub async fn run_daily_price_fetch(ctx: JobContext) -> Result<JobResult, AppError> {
    let yesterday = Utc::now().date_naive() - ChronoDuration::days(1);
    fetch_closes_for_day(&ctx, yesterday).await
}

/// Fetch one day's close for every ticker. Each ticker is fetched through
/// the shared rate limiter and committed independently, so a failure (or a
/// platform abort) loses at most the tickers not yet reached.
pub async fn fetch_closes_for_day(ctx: &JobContext, date: NaiveDate) -> Result<JobResult, AppError> {
    info!("Fetching closes for {} across {} tickers", date, FETCH_TICKERS.len());

    let mut processed = 0;
    let mut failed = 0;

    for ticker in FETCH_TICKERS {
        match fetch_and_store(ctx, ticker, date).await {
            Ok(()) => processed += 1,
            Err(e) => {
                warn!("Skipping {} for {}: {}", ticker, date, e);
                failed += 1;
            }
        }
    }

    info!(
        "Daily price fetch for {} done: {} processed, {} failed",
        date, processed, failed
    );

    Ok(JobResult {
        items_processed: processed,
        items_failed: failed,
    })
}

/// Historical backfill for one ticker, one API call per day from start to
/// end inclusive. Used to seed a fresh database through the admin hook.
pub async fn backfill_range(
    ctx: &JobContext,
    ticker: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<JobResult, AppError> {
    if start > end {
        return Err(AppError::Validation("start date is after end date".into()));
    }

    info!("Backfilling {} from {} to {}", ticker, start, end);

    let mut processed = 0;
    let mut failed = 0;
    let mut date = start;

    while date <= end {
        match fetch_and_store(ctx, ticker, date).await {
            Ok(()) => processed += 1,
            Err(e) => {
                warn!("Skipping {} for {}: {}", ticker, date, e);
                failed += 1;
            }
        }
        date = date + ChronoDuration::days(1);
    }

    info!(
        "Backfill of {} done: {} processed, {} failed",
        ticker, processed, failed
    );

    Ok(JobResult {
        items_processed: processed,
        items_failed: failed,
    })
}

async fn fetch_and_store(ctx: &JobContext, ticker: &str, date: NaiveDate) -> Result<(), AppError> {
    let _permit = ctx.rate_limiter.acquire().await;

    let quote = ctx
        .quote_provider
        .fetch_daily_close(ticker, date)
        .await
        .map_err(|e| AppError::External(e.to_string()))?;

    match quote {
        Some(close) => {
            let inserted =
                price_service::append_close(&ctx.pool, ticker, close.date, &close.close).await?;
            if inserted {
                info!("Stored close for {} on {}: {}", ticker, close.date, close.close);
            }
        }
        None => {
            info!("No data for {} on {} (market closed)", ticker, date);
        }
    }

    Ok(())
}
