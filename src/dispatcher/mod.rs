//! # Dispatcher Module
//!
//! Per-request execution of the middleware + handler chain.
//!
//! ## Overview
//!
//! A dispatch walks the router's sequence - middleware first, in
//! registration order, then the priority-sorted handlers - behind a
//! [`DispatchCursor`] whose position only ever moves forward. Execution is
//! continuation-passing: each matched callback receives the shared
//! [`RequestContext`] view plus a [`Next`] handle, and decides whether the
//! rest of the chain runs.
//!
//! ## The onion
//!
//! Awaiting [`Next::run`] suspends the current callback until everything
//! downstream has completed, so a middleware can time, trace, or rewrite the
//! outcome *after* the handler ran:
//!
//! ```rust,ignore
//! router.middleware(|req, next| async move {
//!     let started = std::time::Instant::now();
//!     next.run().await?;
//!     tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "handled");
//!     Ok(())
//! });
//! ```
//!
//! Never calling `next` terminates the chain: no later entry executes.
//!
//! ## Concurrency
//!
//! A cursor belongs to exactly one request. The chain is cooperative and
//! logically single-threaded - there is no built-in timeout or
//! cancellation; see [`crate::middleware::timeout`] for layering one on top.

mod core;

pub use self::core::{
    callback, ChainCallback, ChainFuture, DispatchCursor, HeaderVec, MatchKind, MatchStep,
    MatchedRequest, Next, RequestContext, Response, MAX_INLINE_HEADERS,
};
