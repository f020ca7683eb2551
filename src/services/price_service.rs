use bigdecimal::BigDecimal;
use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use sqlx::PgPool;
use tracing::{error, info};

use crate::db::{price_queries, stock_queries};
use crate::errors::AppError;
use crate::models::PricePoint;

pub async fn get_history(pool: &PgPool, ticker: &str) -> Result<Vec<PricePoint>, AppError> {
    let prices = price_queries::fetch_all(pool, ticker).await.map_err(|e| {
        error!("Failed to fetch price history for ticker {}: {}", ticker, e);
        AppError::Db(e)
    })?;

    if prices.is_empty() && !stock_queries::exists(pool, ticker).await? {
        return Err(AppError::NotFound(format!("Unknown ticker {}", ticker)));
    }

    Ok(prices)
}

pub async fn get_latest(pool: &PgPool, ticker: &str) -> Result<PricePoint, AppError> {
    price_queries::fetch_latest(pool, ticker)
        .await
        .map_err(|e| {
            error!("Failed to fetch latest price for ticker {}: {}", ticker, e);
            AppError::Db(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("No price data found for ticker {}", ticker)))
}

/// Append one daily close, de-duplicated on (ticker, date). Returns whether
/// the history actually grew.
pub async fn append_close(
    pool: &PgPool,
    ticker: &str,
    date: NaiveDate,
    close: &BigDecimal,
) -> Result<bool, AppError> {
    let mut conn = pool.acquire().await?;
    let inserted = price_queries::insert_close(&mut conn, ticker, date, close).await?;
    if !inserted {
        info!("Close for {} on {} already stored, skipping", ticker, date);
    }
    Ok(inserted)
}

/// Seed a ticker with 180 days of random-walk closes. Demo affordance for
/// running without a quote API key; existing dates are left untouched.
pub async fn generate_mock(pool: &PgPool, ticker: &str) -> Result<(), AppError> {
    if !stock_queries::exists(pool, ticker).await? {
        return Err(AppError::NotFound(format!("Unknown ticker {}", ticker)));
    }

    let today = Utc::now().date_naive();
    let mut points: Vec<(NaiveDate, BigDecimal)> = Vec::new();
    let mut current = 100.0_f64;

    for i in 0..180 {
        current *= 1.0 + (rand::random::<f64>() - 0.5) * 0.02;
        let close = format!("{:.2}", current)
            .parse::<BigDecimal>()
            .map_err(|e| AppError::Internal(format!("mock price: {}", e)))?;
        points.push((today - ChronoDuration::days(180 - i), close));
    }

    let inserted = price_queries::append_many(pool, ticker, &points)
        .await
        .map_err(|e| {
            error!("Failed to store mock prices for ticker {}: {}", ticker, e);
            AppError::Db(e)
        })?;

    info!("Generated {} mock closes for {}", inserted, ticker);
    Ok(())
}
