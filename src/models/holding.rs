use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// A user's current position in one ticker. quantity is always > 0 in
// storage; the position is deleted outright when the last share is sold.
// total_invested is the canonical cost figure, average cost is derived.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Holding {
    pub id: Uuid,
    pub user_id: Uuid,
    pub ticker: String,
    pub quantity: i32,
    pub total_invested: BigDecimal,
    pub current_price: BigDecimal,
    pub percent_change: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Holding {
    pub fn average_cost(&self) -> BigDecimal {
        if self.quantity <= 0 {
            return BigDecimal::zero();
        }
        &self.total_invested / BigDecimal::from(self.quantity)
    }
}

// Portfolio panel row: the stored holding plus the derived average cost.
#[derive(Debug, Serialize)]
pub struct HoldingView {
    pub ticker: String,
    pub quantity: i32,
    pub average_cost: BigDecimal,
    pub total_invested: BigDecimal,
    pub current_price: BigDecimal,
    pub percent_change: BigDecimal,
}

impl From<Holding> for HoldingView {
    fn from(h: Holding) -> Self {
        let average_cost = h.average_cost();
        Self {
            ticker: h.ticker,
            quantity: h.quantity,
            average_cost,
            total_invested: h.total_invested,
            current_price: h.current_price,
            percent_change: h.percent_change,
        }
    }
}
