use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct DailyClose {
    pub date: NaiveDate,
    pub close: BigDecimal,
}

#[derive(Debug, Error)]
pub enum QuoteProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("rate limited")]
    RateLimited,
}

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch the adjusted closing price for one ticker on one trading day.
    ///
    /// `Ok(None)` means the provider has no bar for that day (weekend or
    /// market holiday) — not an error.
    async fn fetch_daily_close(
        &self,
        ticker: &str,
        date: NaiveDate,
    ) -> Result<Option<DailyClose>, QuoteProviderError>;
}
