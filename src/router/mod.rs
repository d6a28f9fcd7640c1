//! # Router Module
//!
//! The route table: handler registration, method normalization, and the
//! deterministic priority order the dispatch chain relies on.
//!
//! ## Ordering
//!
//! The sorted handler view is a total order, most-significant key first:
//!
//! 1. Path depth (count of `/` separators) - descending, deeper first.
//! 2. Parameter count - ascending, more literal routes first.
//! 3. Pattern string - ascending, a deterministic tie-break.
//!
//! So given `/products/in-stock` and `/products/:id`, the literal route is
//! always tried first; otherwise the parameterized sibling would swallow the
//! literal request.
//!
//! The view is computed lazily and cached behind an atomic snapshot swap;
//! every registration invalidates it. Middleware is kept apart: never
//! sorted, always ahead of all handlers, in registration order.

mod core;

pub use self::core::{normalize_method, supported_methods, MiddlewareEntry, RouteEntry, Router};
