use bigdecimal::{BigDecimal, Zero};
use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::{holding_queries, price_queries, stock_queries, user_queries, watchlist_queries};
use crate::errors::AppError;
use crate::models::HoldingView;

/// Lifetime change of a position in percent, measured against average cost.
/// A zero purchase price cannot come out of the price feed, but it must not
/// take the process down either.
pub fn percent_change(current: &BigDecimal, purchase: &BigDecimal) -> BigDecimal {
    if purchase.is_zero() {
        warn!("percent_change called with zero purchase price");
        return BigDecimal::zero();
    }
    (current - purchase) * BigDecimal::from(100) / purchase
}

/// Quantity and canonical invested capital of one position. Average cost is
/// always derived from these two, never stored independently.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionState {
    pub quantity: i32,
    pub total_invested: BigDecimal,
}

impl PositionState {
    pub fn average_cost(&self) -> BigDecimal {
        if self.quantity <= 0 {
            return BigDecimal::zero();
        }
        &self.total_invested / BigDecimal::from(self.quantity)
    }
}

#[derive(Debug)]
pub struct BuyOutcome {
    pub new_balance: BigDecimal,
    pub position: PositionState,
}

#[derive(Debug)]
pub struct SellOutcome {
    pub new_balance: BigDecimal,
    /// None means the last share was sold and the holding is deleted.
    pub position: Option<PositionState>,
}

/// Pure buy decision: one share at `price` against the current balance and
/// position. No mutation happens on error.
pub fn decide_buy(
    balance: &BigDecimal,
    existing: Option<&PositionState>,
    price: &BigDecimal,
) -> Result<BuyOutcome, AppError> {
    if balance < price {
        return Err(AppError::InsufficientBalance);
    }

    let position = match existing {
        Some(p) => PositionState {
            quantity: p.quantity + 1,
            total_invested: &p.total_invested + price,
        },
        None => PositionState {
            quantity: 1,
            total_invested: price.clone(),
        },
    };

    Ok(BuyOutcome {
        new_balance: balance - price,
        position,
    })
}

/// Pure sell decision: one share at the fresh close. The remaining invested
/// capital drops by the current average cost, so the average is unchanged
/// for the shares still held.
pub fn decide_sell(
    balance: &BigDecimal,
    position: &PositionState,
    current_price: &BigDecimal,
) -> Result<SellOutcome, AppError> {
    if position.quantity <= 0 {
        return Err(AppError::NothingToSell);
    }

    let remaining = position.quantity - 1;
    let next = if remaining <= 0 {
        None
    } else {
        Some(PositionState {
            quantity: remaining,
            total_invested: &position.total_invested - position.average_cost(),
        })
    };

    Ok(SellOutcome {
        new_balance: balance + current_price,
        position: next,
    })
}

#[derive(Debug, Serialize)]
pub struct TradeReceipt {
    pub ticker: String,
    pub price: BigDecimal,
    pub balance: BigDecimal,
    pub holding: Option<HoldingView>,
}

/// Buy one share of `ticker` at its latest close. Balance update, holding
/// upsert and watchlist eviction commit in one transaction.
pub async fn buy(pool: &PgPool, user_id: Uuid, ticker: &str) -> Result<TradeReceipt, AppError> {
    if !stock_queries::exists(pool, ticker).await? {
        return Err(AppError::NotFound(format!("Unknown ticker {}", ticker)));
    }

    let latest = price_queries::fetch_latest(pool, ticker).await?.ok_or_else(|| {
        warn!("Buy rejected: {} has no price history", ticker);
        AppError::InvalidStockData
    })?;
    let price = latest.close_price;

    let mut tx = pool.begin().await?;

    let balance = user_queries::fetch_balance_for_update(&mut tx, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

    let existing = holding_queries::fetch_one(&mut tx, user_id, ticker).await?;
    let state = existing.as_ref().map(|h| PositionState {
        quantity: h.quantity,
        total_invested: h.total_invested.clone(),
    });

    let outcome = decide_buy(&balance, state.as_ref(), &price)?;

    user_queries::update_balance(&mut tx, user_id, &outcome.new_balance).await?;

    let pct = percent_change(&price, &outcome.position.average_cost());
    let holding = match existing {
        Some(h) => {
            holding_queries::update(
                &mut tx,
                h.id,
                outcome.position.quantity,
                &outcome.position.total_invested,
                &price,
                &pct,
            )
            .await?
        }
        None => {
            holding_queries::insert(
                &mut tx,
                user_id,
                ticker,
                outcome.position.quantity,
                &outcome.position.total_invested,
                &price,
                &pct,
            )
            .await?
        }
    };

    // Owned stocks are not watched.
    if watchlist_queries::delete(&mut tx, user_id, ticker).await? > 0 {
        info!("Removed {} from watchlist of user {} after buy", ticker, user_id);
    }

    tx.commit().await?;

    info!("User {} bought 1 {} at {}", user_id, ticker, price);
    Ok(TradeReceipt {
        ticker: ticker.to_string(),
        price,
        balance: outcome.new_balance,
        holding: Some(holding.into()),
    })
}

/// Sell one share of `ticker` at its latest close (looked up fresh, not the
/// stale price stored on the holding).
pub async fn sell(pool: &PgPool, user_id: Uuid, ticker: &str) -> Result<TradeReceipt, AppError> {
    let latest = price_queries::fetch_latest(pool, ticker).await?.ok_or_else(|| {
        warn!("Sell rejected: {} has no price history", ticker);
        AppError::InvalidStockData
    })?;
    let price = latest.close_price;

    let mut tx = pool.begin().await?;

    let balance = user_queries::fetch_balance_for_update(&mut tx, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

    let holding = holding_queries::fetch_one(&mut tx, user_id, ticker)
        .await?
        .ok_or(AppError::NothingToSell)?;

    let state = PositionState {
        quantity: holding.quantity,
        total_invested: holding.total_invested.clone(),
    };
    let outcome = decide_sell(&balance, &state, &price)?;

    user_queries::update_balance(&mut tx, user_id, &outcome.new_balance).await?;

    let view = match outcome.position {
        Some(position) => {
            let pct = percent_change(&price, &position.average_cost());
            let updated = holding_queries::update(
                &mut tx,
                holding.id,
                position.quantity,
                &position.total_invested,
                &price,
                &pct,
            )
            .await?;
            Some(updated.into())
        }
        None => {
            holding_queries::delete(&mut tx, holding.id).await?;
            info!("User {} closed position in {}", user_id, ticker);
            None
        }
    };

    tx.commit().await?;

    info!("User {} sold 1 {} at {}", user_id, ticker, price);
    Ok(TradeReceipt {
        ticker: ticker.to_string(),
        price,
        balance: outcome.new_balance,
        holding: view,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn percent_change_basic() {
        assert_eq!(percent_change(&dec("110"), &dec("100")), dec("10"));
        assert_eq!(percent_change(&dec("90"), &dec("100")), dec("-10"));
    }

    #[test]
    fn percent_change_zero_purchase_is_guarded() {
        assert_eq!(percent_change(&dec("50"), &dec("0")), dec("0"));
    }

    #[test]
    fn buy_fails_when_balance_below_price() {
        let result = decide_buy(&dec("49.99"), None, &dec("50.00"));
        assert!(matches!(result, Err(AppError::InsufficientBalance)));
    }

    #[test]
    fn buy_opens_a_new_position() {
        let outcome = decide_buy(&dec("10000.00"), None, &dec("50.00")).unwrap();
        assert_eq!(outcome.new_balance, dec("9950.00"));
        assert_eq!(outcome.position.quantity, 1);
        assert_eq!(outcome.position.total_invested, dec("50.00"));
        assert_eq!(outcome.position.average_cost(), dec("50.00"));
    }

    #[test]
    fn buy_at_exact_balance_is_allowed() {
        let outcome = decide_buy(&dec("50.00"), None, &dec("50.00")).unwrap();
        assert_eq!(outcome.new_balance, dec("0"));
    }

    #[test]
    fn repeat_buy_accumulates_invested_capital() {
        let first = PositionState {
            quantity: 1,
            total_invested: dec("50.00"),
        };
        let outcome = decide_buy(&dec("9950.00"), Some(&first), &dec("60.00")).unwrap();
        assert_eq!(outcome.new_balance, dec("9890.00"));
        assert_eq!(outcome.position.quantity, 2);
        assert_eq!(outcome.position.total_invested, dec("110.00"));
        assert_eq!(outcome.position.average_cost(), dec("55.00"));
    }

    #[test]
    fn sell_credits_fresh_price_and_keeps_average() {
        let position = PositionState {
            quantity: 2,
            total_invested: dec("110.00"),
        };
        let outcome = decide_sell(&dec("9890.00"), &position, &dec("70.00")).unwrap();
        assert_eq!(outcome.new_balance, dec("9960.00"));
        let remaining = outcome.position.unwrap();
        assert_eq!(remaining.quantity, 1);
        assert_eq!(remaining.total_invested, dec("55.00"));
        assert_eq!(remaining.average_cost(), dec("55.00"));
    }

    #[test]
    fn selling_last_share_deletes_the_position() {
        let position = PositionState {
            quantity: 1,
            total_invested: dec("55.00"),
        };
        let outcome = decide_sell(&dec("100.00"), &position, &dec("70.00")).unwrap();
        assert_eq!(outcome.new_balance, dec("170.00"));
        assert!(outcome.position.is_none());
    }

    #[test]
    fn sell_with_empty_position_is_rejected() {
        let position = PositionState {
            quantity: 0,
            total_invested: dec("0"),
        };
        let result = decide_sell(&dec("100.00"), &position, &dec("70.00"));
        assert!(matches!(result, Err(AppError::NothingToSell)));
    }

    // The walkthrough from the product brief: fresh account, two buys at
    // different prices, one sell at a third price.
    #[test]
    fn buy_buy_sell_walkthrough() {
        let buy1 = decide_buy(&dec("10000.00"), None, &dec("50.00")).unwrap();
        assert_eq!(buy1.new_balance, dec("9950.00"));

        let buy2 = decide_buy(&buy1.new_balance, Some(&buy1.position), &dec("60.00")).unwrap();
        assert_eq!(buy2.new_balance, dec("9890.00"));
        assert_eq!(buy2.position.quantity, 2);
        assert_eq!(buy2.position.average_cost(), dec("55.00"));

        let sell = decide_sell(&buy2.new_balance, &buy2.position, &dec("70.00")).unwrap();
        assert_eq!(sell.new_balance, dec("9960.00"));
        assert_eq!(sell.position.unwrap().quantity, 1);
    }
}
