use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::WatchlistItem;

pub async fn fetch_all_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<WatchlistItem>, sqlx::Error> {
    sqlx::query_as::<_, WatchlistItem>(
        "SELECT id, user_id, ticker, created_at
         FROM watchlist_items
         WHERE user_id = $1
         ORDER BY created_at ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn exists(pool: &PgPool, user_id: Uuid, ticker: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM watchlist_items WHERE user_id = $1 AND ticker = $2)",
    )
    .bind(user_id)
    .bind(ticker)
    .fetch_one(pool)
    .await
}

pub async fn insert(
    pool: &PgPool,
    user_id: Uuid,
    ticker: &str,
) -> Result<WatchlistItem, sqlx::Error> {
    sqlx::query_as::<_, WatchlistItem>(
        "INSERT INTO watchlist_items (id, user_id, ticker)
         VALUES ($1, $2, $3)
         RETURNING id, user_id, ticker, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(ticker)
    .fetch_one(pool)
    .await
}

pub async fn delete(
    conn: &mut PgConnection,
    user_id: Uuid,
    ticker: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM watchlist_items WHERE user_id = $1 AND ticker = $2")
        .bind(user_id)
        .bind(ticker)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}
