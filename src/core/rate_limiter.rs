//! Minimum spacing between outbound requests

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Fixed-delay limiter shared by every fetch of a cycle.
///
/// The lock is held across the sleep, so concurrent callers queue up and
/// consecutive acquisitions are at least `delay` apart.
#[derive(Debug)]
pub struct RateLimiter {
    delay: Duration,
    last: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last: Mutex::new(None),
        }
    }

    pub async fn wait_if_needed(&self) {
        let mut last = self.last.lock().await;
        if let Some(previous) = *last {
            let ready_at = previous + self.delay;
            if ready_at > Instant::now() {
                tokio::time::sleep_until(ready_at).await;
            }
        }
        *last = Some(Instant::now());
    }
}
