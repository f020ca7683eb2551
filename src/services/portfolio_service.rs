use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::db::{holding_queries, price_queries};
use crate::errors::AppError;
use crate::models::HoldingView;
use crate::services::trade_service;

/// The caller's holdings with current prices refreshed from the latest
/// stored closes. Holdings whose ticker has newer data get their
/// current_price and percent_change persisted before the view is returned.
pub async fn fetch_refreshed(pool: &PgPool, user_id: Uuid) -> Result<Vec<HoldingView>, AppError> {
    let holdings = holding_queries::fetch_all_for_user(pool, user_id).await?;
    if holdings.is_empty() {
        return Ok(Vec::new());
    }

    let tickers: Vec<String> = holdings.iter().map(|h| h.ticker.clone()).collect();
    let latest = price_queries::fetch_latest_batch(pool, &tickers).await?;

    let mut conn = pool.acquire().await?;
    let mut views = Vec::with_capacity(holdings.len());

    for mut holding in holdings {
        match latest.get(&holding.ticker) {
            Some(point) if point.close_price != holding.current_price => {
                let pct = trade_service::percent_change(&point.close_price, &holding.average_cost());
                holding_queries::update_market_data(&mut conn, holding.id, &point.close_price, &pct)
                    .await?;
                holding.current_price = point.close_price.clone();
                holding.percent_change = pct;
            }
            Some(_) => {}
            None => {
                // A held ticker with no price rows should not happen; keep
                // the stale stored price rather than failing the whole page.
                warn!("No price history for held ticker {}", holding.ticker);
            }
        }
        views.push(holding.into());
    }

    Ok(views)
}
