//! # Pattern Module
//!
//! Compilation of `:name` path patterns into reusable matchers.
//!
//! A pattern is compiled once at registration time: its parameter names are
//! extracted in left-to-right order and its path is turned into a single
//! anchored regex whose literal spans are escaped. The resulting
//! [`CompiledPattern`] matches incoming URLs against the path piece only and
//! merges path captures with query-string parameters into one
//! [`crate::ParamMap`].
//!
//! No other placeholder syntax is supported: no wildcards, no optional
//! segments, no inline regex literals.

mod core;

pub(crate) use self::core::PARAM_TOKEN;
pub use self::core::{CompiledPattern, ParsedPathPattern, UrlMatch};
