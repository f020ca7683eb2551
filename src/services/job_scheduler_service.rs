use std::sync::Arc;

use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::errors::AppError;
use crate::external::quote_provider::QuoteProvider;
use crate::jobs::daily_price_fetch_job;
use crate::services::rate_limiter::RateLimiter;

// Context passed to job functions.
#[derive(Clone)]
pub struct JobContext {
    pub pool: Arc<PgPool>,
    pub quote_provider: Arc<dyn QuoteProvider>,
    pub rate_limiter: Arc<RateLimiter>,
}

#[derive(Debug, Clone, Copy)]
pub struct JobResult {
    pub items_processed: usize,
    pub items_failed: usize,
}

pub struct JobSchedulerService {
    scheduler: JobScheduler,
    context: JobContext,
}

impl JobSchedulerService {
    pub async fn new(
        pool: Arc<PgPool>,
        quote_provider: Arc<dyn QuoteProvider>,
        rate_limiter: Arc<RateLimiter>,
    ) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::External(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self {
            scheduler,
            context: JobContext {
                pool,
                quote_provider,
                rate_limiter,
            },
        })
    }

    /// Register and start all scheduled jobs.
    pub async fn start(&mut self) -> Result<(), AppError> {
        info!("🚀 Starting job scheduler...");

        // Test mode compresses the daily schedule to minutes.
        let test_mode = std::env::var("JOB_SCHEDULER_TEST_MODE")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .unwrap_or(false);

        if test_mode {
            info!("⚠️  JOB SCHEDULER IN TEST MODE - jobs run every few minutes!");
        }

        // Format: sec min hour day month weekday. The daily fetch fires an
        // hour after the US close so the provider has settled data.
        let fetch_schedule = if test_mode { "0 */2 * * * *" } else { "0 0 13 * * *" };
        let fetch_desc = if test_mode { "Every 2 minutes (TEST MODE)" } else { "Daily at 13:00 UTC" };

        self.schedule_job(
            fetch_schedule,
            "daily_price_fetch",
            fetch_desc,
            daily_price_fetch_job::run_daily_price_fetch,
        )
        .await?;

        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::External(format!("Failed to start scheduler: {}", e)))?;

        info!("✅ Job scheduler started");
        Ok(())
    }

    /// Stop the scheduler gracefully.
    #[allow(dead_code)]
    pub async fn stop(&mut self) -> Result<(), AppError> {
        info!("🛑 Stopping job scheduler...");
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::External(format!("Failed to stop scheduler: {}", e)))?;
        Ok(())
    }

    async fn schedule_job<F, Fut>(
        &mut self,
        schedule: &str,
        job_name: &'static str,
        description: &str,
        job_fn: F,
    ) -> Result<(), AppError>
    where
        F: Fn(JobContext) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<JobResult, AppError>> + Send + 'static,
    {
        let context = self.context.clone();
        let job_fn = Arc::new(job_fn);

        let job = Job::new_async(schedule, move |_uuid, _lock| {
            let context = context.clone();
            let job_fn = job_fn.clone();
            Box::pin(async move {
                info!("⏰ Job {} starting", job_name);
                let started = std::time::Instant::now();
                match job_fn(context).await {
                    Ok(result) => info!(
                        "✅ Job {} finished in {:?}: {} processed, {} failed",
                        job_name,
                        started.elapsed(),
                        result.items_processed,
                        result.items_failed
                    ),
                    Err(e) => error!("❌ Job {} failed: {}", job_name, e),
                }
            })
        })
        .map_err(|e| AppError::External(format!("Failed to create job {}: {}", job_name, e)))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::External(format!("Failed to add job {}: {}", job_name, e)))?;

        info!("📅 Scheduled {} ({})", job_name, description);
        Ok(())
    }
}
