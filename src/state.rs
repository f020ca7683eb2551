use std::sync::Arc;
use sqlx::PgPool;
use crate::config::Config;
use crate::external::quote_provider::QuoteProvider;
use crate::services::rate_limiter::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub quote_provider: Arc<dyn QuoteProvider>,
    pub rate_limiter: Arc<RateLimiter>,
    pub config: Config,
}
