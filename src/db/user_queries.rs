use bigdecimal::BigDecimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::{LeaderboardEntry, User};

/// Insert a new account. The virtual starting balance comes from the
/// schema default (10000.00).
pub async fn create(
    pool: &PgPool,
    email: &str,
    username: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (id, email, username, password_hash)
         VALUES ($1, $2, $3, $4)
         RETURNING id, email, username, password_hash, balance, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(username)
    .bind(password_hash)
    .fetch_one(pool)
    .await
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, email, username, password_hash, balance, created_at
         FROM users
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn fetch_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, email, username, password_hash, balance, created_at
         FROM users
         WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Balance lookup inside a trade transaction. FOR UPDATE keeps two
/// concurrent trades by the same user from reading the same balance.
pub async fn fetch_balance_for_update(
    conn: &mut PgConnection,
    id: Uuid,
) -> Result<Option<BigDecimal>, sqlx::Error> {
    sqlx::query_scalar::<_, BigDecimal>("SELECT balance FROM users WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(conn)
        .await
}

pub async fn update_balance(
    conn: &mut PgConnection,
    id: Uuid,
    balance: &BigDecimal,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET balance = $2 WHERE id = $1")
        .bind(id)
        .bind(balance)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn fetch_top_by_balance(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
    sqlx::query_as::<_, LeaderboardEntry>(
        "SELECT username, balance
         FROM users
         ORDER BY balance DESC
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}
