use std::sync::Arc;
use parking_lot::Mutex;
use tokio::sync::Semaphore;
use tokio::time::{sleep, Duration, Instant};

/// Spaces outbound quote-API calls so the batch fetch stays under the free
/// tier's request-per-minute quota (5/min for the daily open/close endpoint).
pub struct RateLimiter {
    semaphore: Arc<Semaphore>,
    last_request: Mutex<Instant>,
    min_delay: Duration,
}

impl RateLimiter {
    pub fn new(max_concurrent: usize, requests_per_minute: u32) -> Self {
        let min_delay_ms = 60_000 / requests_per_minute as u64;
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
            // Start far enough in the past that the first call is immediate.
            last_request: Mutex::new(Instant::now() - Duration::from_secs(60)),
            min_delay: Duration::from_millis(min_delay_ms),
        }
    }

    /// Waits for a concurrency slot, then for the minimum spacing since the
    /// previous request. The returned guard frees the slot on drop.
    pub async fn acquire(&self) -> RateLimitGuard {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .expect("rate limiter semaphore closed");

        let wait = {
            let last = self.last_request.lock();
            let elapsed = last.elapsed();
            (elapsed < self.min_delay).then(|| self.min_delay - elapsed)
        };

        if let Some(delay) = wait {
            sleep(delay).await;
        }

        *self.last_request.lock() = Instant::now();

        RateLimitGuard { _permit: permit }
    }
}

pub struct RateLimitGuard {
    _permit: tokio::sync::OwnedSemaphorePermit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn enforces_minimum_spacing() {
        // 60/min means one request per second.
        let limiter = RateLimiter::new(2, 60);

        let start = std::time::Instant::now();
        drop(limiter.acquire().await);
        assert!(start.elapsed().as_millis() < 100, "first call should not wait");

        drop(limiter.acquire().await);
        assert!(
            start.elapsed().as_millis() >= 900,
            "second call should wait about a second"
        );
    }

    #[tokio::test]
    async fn caps_concurrent_requests() {
        let limiter = Arc::new(RateLimiter::new(2, 240));

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let limiter = limiter.clone();
                tokio::spawn(async move {
                    let _guard = limiter.acquire().await;
                    sleep(Duration::from_millis(50)).await;
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }
    }
}
