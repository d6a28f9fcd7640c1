use std::time::Instant;

use tracing::{info_span, warn, Instrument};

use crate::dispatcher::{callback, ChainCallback};

/// Middleware that wraps the downstream chain in a request span and records
/// the outcome after it resolves.
///
/// The span carries the method and URL; completion is logged with the status
/// the downstream chain left in the context and the observed latency.
#[must_use]
pub fn trace_requests() -> ChainCallback {
    callback(|req, next| async move {
        let span = info_span!(
            "request",
            method = %req.context.method,
            url = %req.context.url,
        );
        let started = Instant::now();
        let result = next.run().instrument(span).await;
        let latency_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(()) => tracing::info!(
                method = %req.context.method,
                url = %req.context.url,
                status = req.context.status(),
                latency_ms,
                "Request complete"
            ),
            Err(err) => warn!(
                method = %req.context.method,
                url = %req.context.url,
                error = %err,
                latency_ms,
                "Request failed"
            ),
        }
        result
    })
}
