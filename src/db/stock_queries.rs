use sqlx::PgPool;

use crate::models::{Stock, StockSummary};

pub async fn fetch_one(pool: &PgPool, ticker: &str) -> Result<Option<Stock>, sqlx::Error> {
    sqlx::query_as::<_, Stock>(
        "SELECT ticker, name, description, image_url, created_at
         FROM stocks
         WHERE ticker = $1",
    )
    .bind(ticker)
    .fetch_optional(pool)
    .await
}

pub async fn exists(pool: &PgPool, ticker: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM stocks WHERE ticker = $1)")
        .bind(ticker)
        .fetch_one(pool)
        .await
}

// Universe listing with each stock's latest close, when one exists.
pub async fn fetch_summaries(pool: &PgPool) -> Result<Vec<StockSummary>, sqlx::Error> {
    sqlx::query_as::<_, StockSummary>(
        r#"
        SELECT s.ticker, s.name, s.description, s.image_url,
               p.close_price AS latest_close, p.date AS latest_date
        FROM stocks s
        LEFT JOIN LATERAL (
            SELECT close_price, date
            FROM price_points
            WHERE ticker = s.ticker
            ORDER BY date DESC
            LIMIT 1
        ) p ON true
        ORDER BY s.ticker ASC
        "#,
    )
    .fetch_all(pool)
    .await
}
