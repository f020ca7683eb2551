use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// One historical daily close for a ticker. (ticker, date) is unique;
// the latest row by date is the stock's current price.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PricePoint {
    pub id: Uuid,
    pub ticker: String,
    pub date: NaiveDate,
    pub close_price: BigDecimal,
    pub created_at: DateTime<Utc>,
}
