//! # Middleware Module
//!
//! Ready-made pattern-less chain callbacks: request tracing, atomic request
//! metrics, and a wall-clock timeout. Each constructor returns an ordinary
//! [`crate::ChainCallback`] for [`crate::Router::middleware_callback`];
//! none of them is special to the dispatch chain itself.

mod metrics;
mod timeout;
mod trace;

pub use self::metrics::MetricsMiddleware;
pub use self::timeout::timeout;
pub use self::trace::trace_requests;
