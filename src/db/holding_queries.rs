use bigdecimal::BigDecimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::Holding;

pub async fn fetch_all_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Holding>, sqlx::Error> {
    sqlx::query_as::<_, Holding>(
        "SELECT id, user_id, ticker, quantity, total_invested, current_price,
                percent_change, created_at, updated_at
         FROM holdings
         WHERE user_id = $1
         ORDER BY created_at ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn fetch_one(
    conn: &mut PgConnection,
    user_id: Uuid,
    ticker: &str,
) -> Result<Option<Holding>, sqlx::Error> {
    sqlx::query_as::<_, Holding>(
        "SELECT id, user_id, ticker, quantity, total_invested, current_price,
                percent_change, created_at, updated_at
         FROM holdings
         WHERE user_id = $1 AND ticker = $2",
    )
    .bind(user_id)
    .bind(ticker)
    .fetch_optional(conn)
    .await
}

pub async fn insert(
    conn: &mut PgConnection,
    user_id: Uuid,
    ticker: &str,
    quantity: i32,
    total_invested: &BigDecimal,
    current_price: &BigDecimal,
    percent_change: &BigDecimal,
) -> Result<Holding, sqlx::Error> {
    sqlx::query_as::<_, Holding>(
        "INSERT INTO holdings (id, user_id, ticker, quantity, total_invested,
                               current_price, percent_change)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING id, user_id, ticker, quantity, total_invested, current_price,
                   percent_change, created_at, updated_at",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(ticker)
    .bind(quantity)
    .bind(total_invested)
    .bind(current_price)
    .bind(percent_change)
    .fetch_one(conn)
    .await
}

pub async fn update(
    conn: &mut PgConnection,
    id: Uuid,
    quantity: i32,
    total_invested: &BigDecimal,
    current_price: &BigDecimal,
    percent_change: &BigDecimal,
) -> Result<Holding, sqlx::Error> {
    sqlx::query_as::<_, Holding>(
        "UPDATE holdings
         SET quantity = $2, total_invested = $3, current_price = $4,
             percent_change = $5, updated_at = now()
         WHERE id = $1
         RETURNING id, user_id, ticker, quantity, total_invested, current_price,
                   percent_change, created_at, updated_at",
    )
    .bind(id)
    .bind(quantity)
    .bind(total_invested)
    .bind(current_price)
    .bind(percent_change)
    .fetch_one(conn)
    .await
}

/// Opportunistic refresh of the market-facing fields only.
pub async fn update_market_data(
    conn: &mut PgConnection,
    id: Uuid,
    current_price: &BigDecimal,
    percent_change: &BigDecimal,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE holdings
         SET current_price = $2, percent_change = $3, updated_at = now()
         WHERE id = $1",
    )
    .bind(id)
    .bind(current_price)
    .bind(percent_change)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn delete(conn: &mut PgConnection, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM holdings WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

pub async fn exists(pool: &PgPool, user_id: Uuid, ticker: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM holdings WHERE user_id = $1 AND ticker = $2)",
    )
    .bind(user_id)
    .bind(ticker)
    .fetch_one(pool)
    .await
}
