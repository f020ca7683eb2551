use sqlx::PgPool;

use crate::db::user_queries;
use crate::errors::AppError;
use crate::models::LeaderboardEntry;

// Fixed page size; the leaderboard has no pagination.
const LEADERBOARD_SIZE: i64 = 5;

pub async fn top_by_balance(pool: &PgPool) -> Result<Vec<LeaderboardEntry>, AppError> {
    Ok(user_queries::fetch_top_by_balance(pool, LEADERBOARD_SIZE).await?)
}
