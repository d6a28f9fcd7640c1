use std::time::Duration;

use tracing::warn;

use crate::dispatcher::{callback, ChainCallback, Response};

/// Middleware that bounds the downstream chain's wall-clock time.
///
/// The continuation is raced against a timer; on expiry the downstream
/// future is dropped, a `504` outcome is written into the context, and the
/// chain terminates. Whatever work the downstream handler had in flight is
/// abandoned where it stood.
#[must_use]
pub fn timeout(limit: Duration) -> ChainCallback {
    callback(move |req, next| async move {
        match tokio::time::timeout(limit, next.run()).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    method = %req.context.method,
                    url = %req.context.url,
                    limit_ms = limit.as_millis() as u64,
                    "Request timed out"
                );
                req.context
                    .set_response(Response::error(504, "request timed out"));
                Ok(())
            }
        }
    })
}
