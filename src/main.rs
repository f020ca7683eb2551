mod app;
mod config;
mod db;
mod errors;
mod external;
mod jobs;
mod logging;
mod middleware;
mod models;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::external::polygon::PolygonProvider;
use crate::external::quote_provider::QuoteProvider;
use crate::logging::LoggingConfig;
use crate::services::job_scheduler_service::JobSchedulerService;
use crate::services::rate_limiter::RateLimiter;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    logging::init_logging(LoggingConfig::from_env())
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!("📊 Using quote provider: Polygon daily open/close");
    let provider: Arc<dyn QuoteProvider> = Arc::new(PolygonProvider::new(
        config.polygon_api_key.clone(),
        config.polygon_base_url.clone(),
    ));

    // One limiter shared by the scheduler and the manual job routes; the
    // quote API quota is per key, not per caller.
    let rate_limiter = Arc::new(RateLimiter::new(1, 5));

    let mut scheduler = JobSchedulerService::new(
        Arc::new(pool.clone()),
        provider.clone(),
        rate_limiter.clone(),
    )
    .await?;

    if config.scheduler_enabled {
        scheduler.start().await?;
    } else {
        tracing::info!("Job scheduler disabled by SCHEDULER_ENABLED=false");
    }

    let state = AppState {
        pool,
        quote_provider: provider,
        rate_limiter,
        config: config.clone(),
    };
    let app = app::create_app(state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("🚀 papertrader backend running at http://{}/", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
