//! # Janus
//!
//! **Janus** is a bidirectional HTTP endpoint router: a single endpoint
//! declaration - an HTTP method plus a path pattern like `/todos/:id` - is
//! used on both ends of a request, to *build* request URLs and to *match*
//! incoming requests and dispatch them through a middleware + handler chain.
//!
//! ## Overview
//!
//! Janus is a pure routing core. It performs no network I/O, parses no
//! bodies, and enforces no schemas; an embedding transport adapter feeds it
//! `(method, url)` pairs and flushes whatever outcome the chain leaves in
//! the shared request context.
//!
//! ## Architecture
//!
//! The library is organized into a handful of modules, leaves first:
//!
//! - **[`url`]** - URL splitting ([`parse_url`]), the query-string codec
//!   ([`parse_query_string`] / [`stringify_query`]), and the URL builder
//!   ([`build_url`])
//! - **[`pattern`]** - compilation of `:name` patterns into anchored,
//!   stateless regex matchers
//! - **[`router`]** - the route table with its deterministic,
//!   priority-sorted handler view and unsorted middleware list
//! - **[`dispatcher`]** - the per-request cursor and the async
//!   continuation-passing ("onion") execution of the chain
//! - **[`middleware`]** - ready-made tracing, metrics, and timeout
//!   middleware
//!
//! ## Quick start
//!
//! ```
//! use http::Method;
//! use janus::{build_url, ParamMap, Response, Router};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let mut router = Router::new();
//!
//! // A middleware wraps everything downstream of it.
//! router.middleware(|_req, next| async move { next.run().await });
//!
//! // A handler sets the outcome on the shared context.
//! router.route(Method::GET, "/todos/:id", |req, _next| async move {
//!     let id = req.params.get_str("id").unwrap_or("").to_string();
//!     req.context
//!         .set_response(Response::json(200, serde_json::json!({ "id": id })));
//!     Ok(())
//! })?;
//!
//! // The same declaration builds URLs...
//! let params: ParamMap = [("id", "42"), ("format", "json")].into_iter().collect();
//! let url = build_url("/todos/:id", &params, Some("http://localhost"))?;
//! assert_eq!(url, "http://localhost/todos/42?format=json");
//!
//! // ...and dispatches requests.
//! let outcome = router.dispatch("GET", "/todos/42").await?;
//! assert_eq!(outcome.map(|r| r.status), Some(200));
//! # Ok(())
//! # }
//! ```
//!
//! ## Ordering
//!
//! Handlers are tried deepest-path first, then most-literal first, then in
//! lexicographic pattern order - so `/products/in-stock` always beats
//! `/products/:id` for the literal request. Middleware always runs before
//! any handler, in registration order.
//!
//! ## Concurrency
//!
//! Pattern matching, URL building, and the query codec are pure and safe
//! for unlimited concurrent use. The router's sorted view is cached behind
//! an atomic snapshot swap. The dispatch cursor is strictly per-request
//! state and is never shared between concurrent requests.

pub mod dispatcher;
pub mod error;
pub mod middleware;
pub mod params;
pub mod pattern;
pub mod router;
pub mod url;

pub use dispatcher::{
    callback, ChainCallback, ChainFuture, DispatchCursor, HeaderVec, MatchKind, MatchStep,
    MatchedRequest, Next, RequestContext, Response, MAX_INLINE_HEADERS,
};
pub use error::RouterError;
pub use params::{ParamMap, ParamValue, MAX_INLINE_PARAMS};
pub use pattern::{CompiledPattern, ParsedPathPattern, UrlMatch};
pub use router::{normalize_method, supported_methods, MiddlewareEntry, RouteEntry, Router};
pub use url::{build_url, parse_query_string, parse_url, stringify_query, ParsedUrl};
