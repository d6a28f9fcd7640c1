//! Dispatch chain: a per-request forward-only cursor over
//! `[middleware..., sorted handlers...]`, driven by an async
//! continuation-passing execution model.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::BoxFuture;
use http::Method;
use serde::Serialize;
use serde_json::Value;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::params::ParamMap;
use crate::router::{normalize_method, MiddlewareEntry, RouteEntry, Router};
use crate::url::{parse_query_string, parse_url, ParsedUrl};

/// Maximum response headers stored inline before spilling to the heap.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated response header storage. Header names are `Arc<str>`
/// since the common ones repeat across responses.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// The outcome a handler writes into the shared request context.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    #[serde(skip_serializing)]
    pub headers: HeaderVec,
    /// Response body as JSON
    pub body: Value,
}

impl Response {
    #[must_use]
    pub fn new(status: u16, headers: HeaderVec, body: Value) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A JSON response with the content-type header preset.
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("content-type"), "application/json".to_string()));
        Self {
            status,
            headers,
            body,
        }
    }

    /// An error response with a `{ "error": message }` body.
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, serde_json::json!({ "error": message }))
    }

    /// Get a header by name (case-insensitive).
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or replace a header (case-insensitive on the name).
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }
}

/// Shared per-request context.
///
/// Carries the normalized method and raw URL, and the single outcome slot
/// that exactly one callback in the chain is expected to fill. The context
/// is shared by reference through the whole chain; the outcome slot is the
/// only mutable part.
#[derive(Debug)]
pub struct RequestContext {
    /// Request method, canonical upper-case form
    pub method: Method,
    /// The raw request URL as supplied by the transport
    pub url: String,
    response: Mutex<Option<Response>>,
}

impl RequestContext {
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            response: Mutex::new(None),
        }
    }

    /// Set the request outcome, replacing any previous one.
    pub fn set_response(&self, response: Response) {
        *self.lock_response() = Some(response);
    }

    /// A clone of the current outcome, if any callback has set one.
    #[must_use]
    pub fn response(&self) -> Option<Response> {
        self.lock_response().clone()
    }

    /// Take the outcome out of the context, leaving it empty.
    #[must_use]
    pub fn take_response(&self) -> Option<Response> {
        self.lock_response().take()
    }

    /// Status code of the current outcome, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.lock_response().as_ref().map(|r| r.status)
    }

    fn lock_response(&self) -> std::sync::MutexGuard<'_, Option<Response>> {
        // The chain is cooperative: callbacks run one at a time, so this
        // lock is never contended within a request.
        self.response.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// What kind of chain entry produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// A pattern-less middleware entry (always matches)
    Middleware,
    /// A handler entry whose method and pattern both matched
    Handler,
}

/// A matched chain step as seen by its callback.
#[derive(Clone)]
pub struct MatchedRequest {
    /// Whether a middleware or a handler matched
    pub kind: MatchKind,
    /// The shared per-request context
    pub context: Arc<RequestContext>,
    /// The request URL split into its three pieces
    pub url: ParsedUrl,
    /// Path-captured parameters (handlers only) overlaid with query
    /// parameters; middleware sees query parameters alone
    pub params: ParamMap,
    /// The matched route's pattern; `None` for middleware
    pub pattern: Option<String>,
    /// The opaque binding token attached at registration, if any
    pub binding: Option<Arc<dyn Any + Send + Sync>>,
}

impl fmt::Debug for MatchedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchedRequest")
            .field("kind", &self.kind)
            .field("url", &self.url)
            .field("params", &self.params)
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

/// Future type returned by chain callbacks.
pub type ChainFuture = BoxFuture<'static, anyhow::Result<()>>;

/// A chain callback: invoked with the matched request and the continuation.
///
/// A callback may do work before calling [`Next::run`], await it and do work
/// after, or never call it at all - which terminates the chain. Errors are
/// opaque [`anyhow::Error`] values, propagated unchanged to the dispatch
/// caller.
pub type ChainCallback = Arc<dyn Fn(MatchedRequest, Next) -> ChainFuture + Send + Sync>;

/// Box an async closure into a [`ChainCallback`].
pub fn callback<F, Fut>(f: F) -> ChainCallback
where
    F: Fn(MatchedRequest, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Arc::new(move |req, next| Box::pin(f(req, next)))
}

enum ChainEntry {
    Middleware(MiddlewareEntry),
    Handler(Arc<RouteEntry>),
}

/// A matched step produced by [`DispatchCursor::next_match`].
pub struct MatchStep {
    /// Whether the step is a middleware or handler match
    pub kind: MatchKind,
    /// The request URL split into its three pieces
    pub url: ParsedUrl,
    /// Parameters exposed to the step's callback
    pub params: ParamMap,
    /// The matched route's pattern; `None` for middleware
    pub pattern: Option<String>,
    pub(crate) callback: ChainCallback,
    pub(crate) binding: Option<Arc<dyn Any + Send + Sync>>,
}

/// Per-request cursor over the concatenated middleware + handler sequence.
///
/// The position only moves forward and never resets. This is the sole
/// mutable state of a request in flight; a cursor must never be shared
/// between two concurrent requests.
pub struct DispatchCursor {
    sequence: Vec<ChainEntry>,
    position: usize,
}

impl DispatchCursor {
    /// Snapshot a router into a fresh cursor: all middleware in registration
    /// order, then the priority-sorted handlers.
    #[must_use]
    pub fn new(router: &Router) -> Self {
        let handlers = router.handlers();
        let mut sequence = Vec::with_capacity(router.middlewares().len() + handlers.len());
        for entry in router.middlewares() {
            sequence.push(ChainEntry::Middleware(entry.clone()));
        }
        for route in handlers.iter() {
            sequence.push(ChainEntry::Handler(Arc::clone(route)));
        }
        Self {
            sequence,
            position: 0,
        }
    }

    /// Number of entries in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Scan forward for the next matching entry, advancing past every
    /// checked entry.
    ///
    /// Middleware matches unconditionally; its parameters are the query
    /// parse of the URL with no path extraction. A handler matches when its
    /// declared method equals the request method and its compiled pattern
    /// matches the URL's path. Returns `None` once the sequence is
    /// exhausted.
    pub fn next_match(&mut self, method: &Method, url: &str) -> Option<MatchStep> {
        while self.position < self.sequence.len() {
            let entry = &self.sequence[self.position];
            self.position += 1;
            match entry {
                ChainEntry::Middleware(mw) => {
                    let parsed = parse_url(url);
                    let params = parse_query_string(&parsed.post_path);
                    return Some(MatchStep {
                        kind: MatchKind::Middleware,
                        url: parsed,
                        params,
                        pattern: None,
                        callback: Arc::clone(&mw.callback),
                        binding: None,
                    });
                }
                ChainEntry::Handler(route) => {
                    if route.method != *method {
                        continue;
                    }
                    if let Some(matched) = route.compiled.match_url(url) {
                        debug!(
                            method = %method,
                            url = %url,
                            pattern = %route.pattern,
                            params = ?matched.params,
                            "Route matched"
                        );
                        return Some(MatchStep {
                            kind: MatchKind::Handler,
                            url: matched.url,
                            params: matched.params,
                            pattern: Some(route.pattern.clone()),
                            callback: Arc::clone(&route.callback),
                            binding: route.binding.clone(),
                        });
                    }
                }
            }
        }
        debug!(method = %method, url = %url, "Dispatch sequence exhausted");
        None
    }
}

struct ChainState {
    // Serializes access from the nested continuation handles of a single
    // request; never contended across requests.
    cursor: Mutex<DispatchCursor>,
    context: Arc<RequestContext>,
}

/// The continuation handed to every chain callback.
///
/// Calling [`run`](Next::run) advances the cursor to the next matching
/// entry and invokes its callback with a fresh `Next`. When the sequence is
/// exhausted, `run` resolves immediately with no effect, unwinding back
/// through every caller that is awaiting it - which is what gives wrapping
/// middleware its "after" phase.
#[derive(Clone)]
pub struct Next {
    state: Arc<ChainState>,
}

impl Next {
    #[must_use]
    pub fn new(cursor: DispatchCursor, context: Arc<RequestContext>) -> Self {
        Self {
            state: Arc::new(ChainState {
                cursor: Mutex::new(cursor),
                context,
            }),
        }
    }

    /// Run the rest of the chain.
    pub fn run(&self) -> ChainFuture {
        let state = Arc::clone(&self.state);
        Box::pin(async move {
            let step = {
                let mut cursor = state
                    .cursor
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                cursor.next_match(&state.context.method, &state.context.url)
            };
            match step {
                None => Ok(()),
                Some(step) => {
                    let request = MatchedRequest {
                        kind: step.kind,
                        context: Arc::clone(&state.context),
                        url: step.url,
                        params: step.params,
                        pattern: step.pattern,
                        binding: step.binding,
                    };
                    let next = Next { state };
                    (step.callback)(request, next).await
                }
            }
        })
    }
}

impl Router {
    /// Dispatch one request through the chain.
    ///
    /// The method is canonicalized first (an unsupported method fails before
    /// anything runs). The chain then executes as a single logical thread of
    /// nested awaits. The returned outcome is whatever the callbacks left in
    /// the shared context - `None` when nothing matched or nothing set one;
    /// the embedding transport owns the not-found policy. A callback error
    /// is returned unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use http::Method;
    /// use janus::{Response, Router};
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() -> anyhow::Result<()> {
    /// let mut router = Router::new();
    /// router.route(Method::GET, "/ping", |req, _next| async move {
    ///     req.context.set_response(Response::json(200, serde_json::json!("pong")));
    ///     Ok(())
    /// })?;
    ///
    /// let outcome = router.dispatch("GET", "/ping").await?;
    /// assert_eq!(outcome.map(|r| r.status), Some(200));
    /// # Ok(())
    /// # }
    /// ```
    pub async fn dispatch(&self, method: &str, url: &str) -> anyhow::Result<Option<Response>> {
        let method = normalize_method(method)?;
        let context = Arc::new(RequestContext::new(method, url));
        let cursor = DispatchCursor::new(self);
        debug!(
            method = %context.method,
            url = %context.url,
            sequence_len = cursor.len(),
            "Dispatch start"
        );

        let next = Next::new(cursor, Arc::clone(&context));
        let result = next.run().await;
        if let Err(err) = &result {
            warn!(url = %context.url, error = %err, "Dispatch chain failed");
        }
        result?;

        Ok(context.take_response())
    }
}
