use std::sync::Arc;
use std::time::Duration;

use sigscan::core::RateLimiter;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn test_first_acquire_is_immediate() {
    let limiter = RateLimiter::new(Duration::from_millis(100));
    let start = Instant::now();
    limiter.wait_if_needed().await;
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_consecutive_acquires_are_spaced() {
    let limiter = RateLimiter::new(Duration::from_millis(100));
    let start = Instant::now();
    for _ in 0..3 {
        limiter.wait_if_needed().await;
    }
    assert!(start.elapsed() >= Duration::from_millis(200));
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_callers_queue() {
    let limiter = Arc::new(RateLimiter::new(Duration::from_millis(50)));
    let start = Instant::now();

    let tasks: Vec<_> = (0..4)
        .map(|_| {
            let limiter = limiter.clone();
            tokio::spawn(async move {
                limiter.wait_if_needed().await;
                Instant::now()
            })
        })
        .collect();

    let mut times = Vec::new();
    for task in tasks {
        times.push(task.await.unwrap());
    }
    times.sort();
    for pair in times.windows(2) {
        assert!(pair[1] - pair[0] >= Duration::from_millis(50));
    }
    assert!(start.elapsed() >= Duration::from_millis(150));
}

#[tokio::test(start_paused = true)]
async fn test_no_wait_after_idle_period() {
    let limiter = RateLimiter::new(Duration::from_millis(100));
    limiter.wait_if_needed().await;
    tokio::time::sleep(Duration::from_millis(500)).await;

    let start = Instant::now();
    limiter.wait_if_needed().await;
    assert_eq!(start.elapsed(), Duration::ZERO);
}
