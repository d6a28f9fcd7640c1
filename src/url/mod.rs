//! # URL Module
//!
//! String-level URL plumbing shared by the pattern compiler, the URL
//! builder, and the dispatch chain:
//!
//! - [`parse_url`] splits any URL or pattern string into
//!   `(pre_path, path, post_path)` with no error conditions.
//! - [`parse_query_string`] / [`stringify_query`] convert between a query
//!   string and an ordered parameter multimap.
//! - [`build_url`] substitutes path parameters into a pattern and appends
//!   unconsumed parameters as a percent-encoded query string.
//!
//! All functions here are pure and safe for unlimited concurrent use.

mod build;
mod query;
mod split;

pub use self::build::build_url;
pub use self::query::{parse_query_string, stringify_query};
pub use self::split::{parse_url, ParsedUrl};
