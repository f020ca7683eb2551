use std::collections::HashMap;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};
use tracing::error;
use uuid::Uuid;

use crate::models::PricePoint;

pub async fn fetch_all(pool: &PgPool, ticker: &str) -> Result<Vec<PricePoint>, sqlx::Error> {
    sqlx::query_as::<_, PricePoint>(
        "SELECT id, ticker, date, close_price, created_at
         FROM price_points
         WHERE ticker = $1
         ORDER BY date ASC",
    )
    .bind(ticker)
    .fetch_all(pool)
    .await
}

pub async fn fetch_latest(pool: &PgPool, ticker: &str) -> Result<Option<PricePoint>, sqlx::Error> {
    sqlx::query_as::<_, PricePoint>(
        "SELECT id, ticker, date, close_price, created_at
         FROM price_points
         WHERE ticker = $1
         ORDER BY date DESC
         LIMIT 1",
    )
    .bind(ticker)
    .fetch_optional(pool)
    .await
}

pub async fn fetch_latest_batch(
    pool: &PgPool,
    tickers: &[String],
) -> Result<HashMap<String, PricePoint>, sqlx::Error> {
    if tickers.is_empty() {
        return Ok(HashMap::new());
    }

    let prices = sqlx::query_as::<_, PricePoint>(
        r#"
        SELECT DISTINCT ON (ticker) id, ticker, date, close_price, created_at
        FROM price_points
        WHERE ticker = ANY($1)
        ORDER BY ticker, date DESC
        "#,
    )
    .bind(tickers)
    .fetch_all(pool)
    .await?;

    Ok(prices.into_iter().map(|p| (p.ticker.clone(), p)).collect())
}

/// Append one daily close. An existing (ticker, date) row is left untouched;
/// returns whether a row was actually inserted.
pub async fn insert_close(
    conn: &mut PgConnection,
    ticker: &str,
    date: NaiveDate,
    close: &BigDecimal,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO price_points (id, ticker, date, close_price)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (ticker, date) DO NOTHING",
    )
    .bind(Uuid::new_v4())
    .bind(ticker)
    .bind(date)
    .bind(close)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Append a batch of closes for one ticker in a single transaction.
/// Existing dates are skipped; returns the number of rows inserted.
pub async fn append_many(
    pool: &PgPool,
    ticker: &str,
    points: &[(NaiveDate, BigDecimal)],
) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await.map_err(|e| {
        error!("Failed to begin transaction for ticker {}: {}", ticker, e);
        e
    })?;

    let mut inserted = 0;
    for (date, close) in points {
        if insert_close(&mut *tx, ticker, *date, close).await? {
            inserted += 1;
        }
    }

    tx.commit().await.map_err(|e| {
        error!("Failed to commit price batch for ticker {}: {}", ticker, e);
        e
    })?;
    Ok(inserted)
}
