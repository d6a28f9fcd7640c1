use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::dispatcher::{callback, ChainCallback};

/// Middleware that counts requests and accumulates latency.
///
/// All counters are atomic, so a single instance can observe any number of
/// concurrent dispatches without locks. Keep a handle to the instance and
/// read the accessors from wherever metrics are scraped.
///
/// # Example
///
/// ```rust,ignore
/// let metrics = MetricsMiddleware::new();
/// router.middleware_callback(metrics.callback());
/// // later:
/// println!("served {} requests", metrics.request_count());
/// ```
#[derive(Debug, Default)]
pub struct MetricsMiddleware {
    request_count: AtomicUsize,
    error_count: AtomicUsize,
    total_latency_ns: AtomicU64,
}

impl MetricsMiddleware {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// The chain callback that records into this instance.
    #[must_use]
    pub fn callback(self: &Arc<Self>) -> ChainCallback {
        let metrics = Arc::clone(self);
        callback(move |_req, next| {
            let metrics = Arc::clone(&metrics);
            async move {
                let started = Instant::now();
                let result = next.run().await;
                metrics.request_count.fetch_add(1, Ordering::Relaxed);
                metrics
                    .total_latency_ns
                    .fetch_add(started.elapsed().as_nanos() as u64, Ordering::Relaxed);
                if result.is_err() {
                    metrics.error_count.fetch_add(1, Ordering::Relaxed);
                }
                result
            }
        })
    }

    /// Requests that have passed through this middleware.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Requests whose downstream chain returned an error.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Mean latency across all observed requests.
    #[must_use]
    pub fn average_latency(&self) -> Duration {
        let count = self.request_count.load(Ordering::Relaxed);
        if count == 0 {
            return Duration::ZERO;
        }
        Duration::from_nanos(self.total_latency_ns.load(Ordering::Relaxed) / count as u64)
    }
}
