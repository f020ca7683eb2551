use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::PricePoint;

// One row per ticker in the fixed trading universe.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Stock {
    pub ticker: String,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// List view: a stock plus its latest close, when price history exists.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StockSummary {
    pub ticker: String,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub latest_close: Option<BigDecimal>,
    pub latest_date: Option<chrono::NaiveDate>,
}

// Detail view: the stock and its full ascending price history.
#[derive(Debug, Serialize)]
pub struct StockDetail {
    #[serde(flatten)]
    pub stock: Stock,
    pub prices: Vec<PricePoint>,
}
