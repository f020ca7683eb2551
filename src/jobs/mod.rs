//! Background jobs run by the scheduler, independent of user requests.
//!
//! Jobs are plain async functions over a [`JobContext`] and are written to
//! be idempotent: re-running a fetch for a day that is already stored
//! changes nothing. Per-item failures are logged and counted, never fatal
//! to the batch.
//!
//! [`JobContext`]: crate::services::job_scheduler_service::JobContext

pub mod daily_price_fetch_job;
