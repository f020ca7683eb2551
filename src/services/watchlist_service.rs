use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::db::{holding_queries, stock_queries, watchlist_queries};
use crate::errors::AppError;
use crate::models::WatchlistItem;

pub async fn list(pool: &PgPool, user_id: Uuid) -> Result<Vec<WatchlistItem>, AppError> {
    Ok(watchlist_queries::fetch_all_for_user(pool, user_id).await?)
}

/// Add a ticker to the watchlist. Already-watched and already-held tickers
/// are silent no-ops (owned stocks are never watched). Returns the
/// refreshed watchlist either way.
pub async fn add(
    pool: &PgPool,
    user_id: Uuid,
    ticker: &str,
) -> Result<Vec<WatchlistItem>, AppError> {
    if !stock_queries::exists(pool, ticker).await? {
        return Err(AppError::NotFound(format!("Unknown ticker {}", ticker)));
    }

    if holding_queries::exists(pool, user_id, ticker).await? {
        info!("{} is already in the portfolio of user {}, not watching", ticker, user_id);
        return list(pool, user_id).await;
    }

    if watchlist_queries::exists(pool, user_id, ticker).await? {
        info!("{} is already on the watchlist of user {}", ticker, user_id);
        return list(pool, user_id).await;
    }

    watchlist_queries::insert(pool, user_id, ticker).await?;
    info!("Added {} to watchlist of user {}", ticker, user_id);
    list(pool, user_id).await
}

/// Remove a ticker from the watchlist; removing an unwatched ticker is a
/// no-op. Returns the refreshed watchlist.
pub async fn remove(
    pool: &PgPool,
    user_id: Uuid,
    ticker: &str,
) -> Result<Vec<WatchlistItem>, AppError> {
    let mut conn = pool.acquire().await?;
    let removed = watchlist_queries::delete(&mut conn, user_id, ticker).await?;
    if removed > 0 {
        info!("Removed {} from watchlist of user {}", ticker, user_id);
    }
    list(pool, user_id).await
}
