//! Pattern compilation: turn a `:name` path pattern into an ordered
//! parameter list and an anchored regex matcher.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::error::RouterError;
use crate::params::ParamMap;
use crate::url::{parse_query_string, parse_url, ParsedUrl};

/// Matches a `:name` parameter token: a colon followed by a run of
/// non-whitespace, non-slash characters whose first character is also not a
/// digit (so port numbers like `:8080` stay literal).
pub(crate) static PARAM_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r":([^\d\s/][^\s/]*)").expect("parameter token regex is valid")
});

/// A path pattern split like a URL, plus the ordered list of `:name`
/// parameters found in its path.
///
/// Construction rejects patterns containing `?`: query strings are not
/// expressible in a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedPathPattern {
    /// The pattern split into pre-path, path, and post-path pieces
    pub url: ParsedUrl,
    /// Parameter names in left-to-right order of occurrence. This order is
    /// canonical: capture groups are zipped against it positionally.
    pub parameters: Vec<String>,
}

impl ParsedPathPattern {
    /// Split a pattern string and extract its parameter names.
    pub fn parse(pattern: &str) -> Result<Self, RouterError> {
        if pattern.contains('?') {
            return Err(RouterError::UnsupportedPathPattern {
                pattern: pattern.to_string(),
            });
        }
        let url = parse_url(pattern);
        let parameters = PARAM_TOKEN
            .captures_iter(&url.path)
            .map(|caps| caps[1].to_string())
            .collect();
        Ok(Self { url, parameters })
    }
}

/// A successful match of a URL against a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlMatch {
    /// The matched URL split into its three pieces
    pub url: ParsedUrl,
    /// Path-captured parameters overlaid with query-string parameters
    pub params: ParamMap,
}

/// A pattern compiled once at registration time and reused for every
/// incoming URL.
///
/// Matching is stateless per call: the anchored regex carries no scan
/// position between invocations, so a single `CompiledPattern` is safe for
/// unlimited concurrent use.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pattern: ParsedPathPattern,
    raw: String,
    regex: Regex,
}

impl CompiledPattern {
    /// Compile a path pattern into a reusable matcher.
    ///
    /// Each `:name` token becomes a capturing group matching one or more
    /// characters excluding `/`, `?`, `&`, and backslash; every literal span
    /// is escaped so regex metacharacters in the pattern match themselves.
    /// The whole expression is anchored at both ends of the path.
    ///
    /// # Example
    ///
    /// ```
    /// use janus::CompiledPattern;
    ///
    /// let compiled = CompiledPattern::compile("/todos/:id")?;
    /// let matched = compiled.match_url("/todos/42?format=json").unwrap();
    /// assert_eq!(matched.params.get_str("id"), Some("42"));
    /// assert_eq!(matched.params.get_str("format"), Some("json"));
    /// # Ok::<(), janus::RouterError>(())
    /// ```
    pub fn compile(pattern: &str) -> Result<Self, RouterError> {
        let parsed = ParsedPathPattern::parse(pattern)?;

        let path = &parsed.url.path;
        let mut source = String::with_capacity(path.len() + 16);
        source.push('^');
        let mut literal_start = 0;
        for token in PARAM_TOKEN.find_iter(path) {
            source.push_str(&regex::escape(&path[literal_start..token.start()]));
            source.push_str(r"([^/?&\\]+)");
            literal_start = token.end();
        }
        source.push_str(&regex::escape(&path[literal_start..]));
        source.push('$');

        // Literal spans are escaped, so the assembled source is always valid.
        let regex = Regex::new(&source).expect("escaped pattern regex is valid");

        debug!(
            pattern = %pattern,
            regex = %source,
            parameters = ?parsed.parameters,
            "Pattern compiled"
        );

        Ok(Self {
            pattern: parsed,
            raw: pattern.to_string(),
            regex,
        })
    }

    /// The raw pattern string this matcher was compiled from.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.raw
    }

    /// Declared parameter names in canonical (left-to-right) order.
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.pattern.parameters
    }

    /// Match an arbitrary URL against this pattern.
    ///
    /// The URL is split first and the regex runs against its path only,
    /// never the pre-path or post-path. On a match, captured groups are
    /// zipped positionally with the declared parameter order, then the
    /// post-path is parsed as a query string and overlaid: path parameters
    /// are written first, query parameters last (last writer wins).
    #[must_use]
    pub fn match_url(&self, url: &str) -> Option<UrlMatch> {
        let parsed = parse_url(url);
        let captures = self.regex.captures(&parsed.path)?;

        let mut params = ParamMap::new();
        for (name, group) in self
            .pattern
            .parameters
            .iter()
            .zip(captures.iter().skip(1))
        {
            if let Some(value) = group {
                params.set(name.clone(), value.as_str());
            }
        }
        params.overlay(&parse_query_string(&parsed.post_path));

        Some(UrlMatch {
            url: parsed,
            params,
        })
    }
}
