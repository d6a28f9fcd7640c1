//! Route table: registered handlers and middleware, plus the lazily cached,
//! priority-sorted handler view the dispatch chain walks.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use http::Method;
use tracing::{debug, info};

use crate::dispatcher::{callback, ChainCallback, MatchedRequest, Next};
use crate::error::RouterError;
use crate::pattern::CompiledPattern;

/// The HTTP methods this router recognizes. Anything else is rejected with
/// [`RouterError::UnsupportedHttpMethod`], both at route declaration and
/// when normalizing an incoming request.
#[must_use]
pub fn supported_methods() -> [Method; 5] {
    [
        Method::GET,
        Method::PUT,
        Method::POST,
        Method::PATCH,
        Method::DELETE,
    ]
}

/// Canonicalize a raw request method: trim, upper-case, and gate against
/// the supported set.
pub fn normalize_method(raw: &str) -> Result<Method, RouterError> {
    let canonical = raw.trim().to_ascii_uppercase();
    let method =
        Method::from_bytes(canonical.as_bytes()).map_err(|_| RouterError::UnsupportedHttpMethod {
            method: raw.to_string(),
        })?;
    if supported_methods().contains(&method) {
        Ok(method)
    } else {
        Err(RouterError::UnsupportedHttpMethod {
            method: raw.to_string(),
        })
    }
}

/// A registered handler: method + compiled pattern + callback.
/// Immutable once registered.
pub struct RouteEntry {
    /// Declared HTTP method, canonical upper-case form
    pub method: Method,
    /// The raw pattern string the entry was registered with
    pub pattern: String,
    /// Matcher compiled once at registration and reused for every request
    pub compiled: CompiledPattern,
    /// The handler callback
    pub callback: ChainCallback,
    /// Opaque token passed through to the matched request, never examined
    /// by the router itself (e.g. a validation or type-binding hook)
    pub binding: Option<Arc<dyn Any + Send + Sync>>,
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .field("parameters", &self.compiled.parameters())
            .finish_non_exhaustive()
    }
}

/// A registered middleware: a pattern-less callback that always matches.
#[derive(Clone)]
pub struct MiddlewareEntry {
    /// The middleware callback
    pub callback: ChainCallback,
}

impl fmt::Debug for MiddlewareEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareEntry").finish_non_exhaustive()
    }
}

/// Path depth of a pattern: the count of `/` separators in the raw string.
fn path_depth(pattern: &str) -> usize {
    pattern.matches('/').count()
}

/// Total order over handler entries, most significant key first:
/// deeper paths first, then fewer parameters (more literal routes) first,
/// then the pattern string itself as a deterministic tie-break.
///
/// At equal depth a literal sibling must sort before a parameterized one or
/// the parameterized route would swallow the literal request.
fn compare_entries(a: &RouteEntry, b: &RouteEntry) -> Ordering {
    path_depth(&b.pattern)
        .cmp(&path_depth(&a.pattern))
        .then_with(|| {
            a.compiled
                .parameters()
                .len()
                .cmp(&b.compiled.parameters().len())
        })
        .then_with(|| a.pattern.cmp(&b.pattern))
}

/// The route table.
///
/// Holds handlers (method + compiled pattern + callback) and pattern-less
/// middleware. Handlers are exposed through a priority-sorted view that is
/// computed lazily and cached; any registration invalidates the cache.
///
/// # Concurrency
///
/// The sorted view is the only shared mutable state in the crate. It lives
/// behind an [`ArcSwapOption`]: cache population is an atomic snapshot swap,
/// so a read racing an invalidation may recompute redundantly but never
/// observes a partially sorted list.
///
/// # Example
///
/// ```
/// use http::Method;
/// use janus::{Response, Router};
///
/// let mut router = Router::new();
/// router.route(Method::GET, "/todos/:id", |req, _next| async move {
///     let id = req.params.get_str("id").unwrap_or("").to_string();
///     req.context
///         .set_response(Response::json(200, serde_json::json!({ "id": id })));
///     Ok(())
/// })?;
/// # Ok::<(), janus::RouterError>(())
/// ```
#[derive(Debug)]
pub struct Router {
    middlewares: Vec<MiddlewareEntry>,
    routes: Vec<Arc<RouteEntry>>,
    sorted: ArcSwapOption<Vec<Arc<RouteEntry>>>,
}

impl Default for Router {
    fn default() -> Self {
        Self {
            middlewares: Vec::new(),
            routes: Vec::new(),
            sorted: ArcSwapOption::empty(),
        }
    }
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a middleware callback.
    ///
    /// Middleware is never sorted: it always runs before all handlers, in
    /// registration order, and matches every request unconditionally.
    pub fn middleware<F, Fut>(&mut self, f: F)
    where
        F: Fn(MatchedRequest, Next) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.middlewares.push(MiddlewareEntry {
            callback: callback(f),
        });
        debug!(
            total_middleware = self.middlewares.len(),
            "Middleware registered"
        );
    }

    /// Register an already-boxed middleware callback, e.g. one produced by
    /// the constructors in [`crate::middleware`].
    pub fn middleware_callback(&mut self, callback: ChainCallback) {
        self.middlewares.push(MiddlewareEntry { callback });
        debug!(
            total_middleware = self.middlewares.len(),
            "Middleware registered"
        );
    }

    /// Register a handler for `method` + `pattern`.
    ///
    /// The pattern is compiled here, once; registration fails if the method
    /// is unsupported or the pattern contains a query string.
    pub fn route<F, Fut>(&mut self, method: Method, pattern: &str, f: F) -> Result<(), RouterError>
    where
        F: Fn(MatchedRequest, Next) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.register(method, pattern, None, callback(f))
    }

    /// Register a handler carrying an opaque binding token.
    ///
    /// The token is stored on the entry and handed to the callback with each
    /// matched request; the router never looks inside it.
    pub fn route_with_binding<F, Fut>(
        &mut self,
        method: Method,
        pattern: &str,
        binding: Arc<dyn Any + Send + Sync>,
        f: F,
    ) -> Result<(), RouterError>
    where
        F: Fn(MatchedRequest, Next) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.register(method, pattern, Some(binding), callback(f))
    }

    fn register(
        &mut self,
        method: Method,
        pattern: &str,
        binding: Option<Arc<dyn Any + Send + Sync>>,
        callback: ChainCallback,
    ) -> Result<(), RouterError> {
        if !supported_methods().contains(&method) {
            return Err(RouterError::UnsupportedHttpMethod {
                method: method.to_string(),
            });
        }
        let compiled = CompiledPattern::compile(pattern)?;
        self.routes.push(Arc::new(RouteEntry {
            method: method.clone(),
            pattern: pattern.to_string(),
            compiled,
            callback,
            binding,
        }));
        // Invalidate the sorted view; the next read recomputes it.
        self.sorted.store(None);
        info!(
            method = %method,
            pattern = %pattern,
            total_routes = self.routes.len(),
            "Route registered"
        );
        Ok(())
    }

    /// Registered middleware, in registration order.
    #[must_use]
    pub fn middlewares(&self) -> &[MiddlewareEntry] {
        &self.middlewares
    }

    /// The priority-sorted handler view.
    ///
    /// Recomputed lazily after an invalidation; the fresh snapshot is
    /// published with an atomic swap. Concurrent readers either see the
    /// previous complete snapshot or recompute their own.
    #[must_use]
    pub fn handlers(&self) -> Arc<Vec<Arc<RouteEntry>>> {
        if let Some(sorted) = self.sorted.load_full() {
            return sorted;
        }
        let mut entries = self.routes.clone();
        entries.sort_by(|a, b| compare_entries(a, b));
        let snapshot = Arc::new(entries);
        self.sorted.store(Some(Arc::clone(&snapshot)));
        debug!(route_count = snapshot.len(), "Sorted handler view recomputed");
        snapshot
    }

    /// Print the sorted route table to stdout. Useful for debugging.
    pub fn dump_routes(&self) {
        let handlers = self.handlers();
        println!(
            "[routes] middleware={} handlers={}",
            self.middlewares.len(),
            handlers.len()
        );
        for entry in handlers.iter() {
            println!(
                "[route] {} {} params={:?}",
                entry.method,
                entry.pattern,
                entry.compiled.parameters()
            );
        }
    }
}
