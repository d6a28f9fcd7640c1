//! URL building: substitute path parameters into a pattern and append the
//! rest as a query string.

use crate::error::RouterError;
use crate::params::ParamMap;
use crate::pattern::{ParsedPathPattern, PARAM_TOKEN};
use crate::url::stringify_query;

/// Build a concrete URL from a path pattern and parameter values.
///
/// Every parameter declared in the pattern must be present in `params`;
/// otherwise the call fails with
/// [`RouterError::RequiredPathParametersNotFound`] listing *all* missing
/// names in declaration order. Caller-supplied parameters not declared in
/// the pattern become the query string.
///
/// Path substitution is literal: values replace their `:name` tokens with no
/// percent-encoding. Only the generated query string is percent-encoded.
/// The query string is appended with `?` when the built path carries no `?`
/// yet, `&` otherwise. `server`, when given, is prepended verbatim with no
/// normalization.
///
/// # Example
///
/// ```
/// use janus::{build_url, ParamMap};
///
/// let params: ParamMap = [("id", "42"), ("format", "json")].into_iter().collect();
/// let url = build_url("/todos/:id", &params, Some("http://example.com"))?;
/// assert_eq!(url, "http://example.com/todos/42?format=json");
/// # Ok::<(), janus::RouterError>(())
/// ```
pub fn build_url(
    pattern: &str,
    params: &ParamMap,
    server: Option<&str>,
) -> Result<String, RouterError> {
    let parsed = ParsedPathPattern::parse(pattern)?;

    let mut missing: Vec<String> = Vec::new();
    for name in &parsed.parameters {
        if !params.contains(name) && !missing.iter().any(|m| m == name) {
            missing.push(name.clone());
        }
    }
    if !missing.is_empty() {
        return Err(RouterError::RequiredPathParametersNotFound {
            pattern: pattern.to_string(),
            missing,
        });
    }

    // Substitute :name tokens in the raw pattern. Tokens outside the path
    // piece (none are declared there) are left verbatim.
    let mut built = String::with_capacity(pattern.len());
    let mut literal_start = 0;
    for caps in PARAM_TOKEN.captures_iter(pattern) {
        let Some(token) = caps.get(0) else {
            continue;
        };
        let name = &caps[1];
        if !parsed.parameters.iter().any(|p| p == name) {
            continue;
        }
        built.push_str(&pattern[literal_start..token.start()]);
        built.push_str(params.get_str(name).unwrap_or(""));
        literal_start = token.end();
    }
    built.push_str(&pattern[literal_start..]);

    let mut query = ParamMap::new();
    for (name, value) in params.iter() {
        if !parsed.parameters.iter().any(|p| p == name) {
            query.set_value(name, value.clone());
        }
    }
    if !query.is_empty() {
        built.push(if built.contains('?') { '&' } else { '?' });
        built.push_str(&stringify_query(&query));
    }

    Ok(match server {
        Some(server) => format!("{server}{built}"),
        None => built,
    })
}
