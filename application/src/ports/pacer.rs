//! Request pacing port
//!
//! Public geocoding services allow roughly one request per second per client.
//! The resolver acquires a [`RequestPacer`] before every lookup, which makes
//! the pacing policy a swappable unit instead of sleeps inside the loop.

use async_trait::async_trait;
use std::time::Duration;
use tracing::trace;

/// Gate acquired before each request of a batch.
#[async_trait]
pub trait RequestPacer: Send + Sync {
    /// Wait until request number `index` (0-based within the batch) may go out.
    async fn acquire(&self, index: usize);
}

/// No wait before the first request, a fixed interval before each later one.
#[derive(Debug, Clone, Copy)]
pub struct FixedIntervalPacer {
    interval: Duration,
}

impl FixedIntervalPacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[async_trait]
impl RequestPacer for FixedIntervalPacer {
    async fn acquire(&self, index: usize) {
        if index == 0 || self.interval.is_zero() {
            return;
        }
        trace!("Pacing request {} by {:?}", index, self.interval);
        tokio::time::sleep(self.interval).await;
    }
}

/// Pacer that never waits (for services without a rate limit, and tests).
pub struct NoPacing;

#[async_trait]
impl RequestPacer for NoPacing {
    async fn acquire(&self, _index: usize) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_first_request_is_not_delayed() {
        let pacer = FixedIntervalPacer::new(Duration::from_millis(1500));
        let started = Instant::now();
        pacer.acquire(0).await;
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_later_requests_wait_the_interval() {
        let pacer = FixedIntervalPacer::new(Duration::from_millis(1500));
        let started = Instant::now();
        for index in 0..3 {
            pacer.acquire(index).await;
        }
        assert_eq!(started.elapsed(), Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_never_waits() {
        let pacer = FixedIntervalPacer::new(Duration::ZERO);
        let started = Instant::now();
        pacer.acquire(5).await;
        assert_eq!(started.elapsed(), Duration::ZERO);
    }
}
