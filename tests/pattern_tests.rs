//! Tests for pattern compilation and URL matching.

use janus::{CompiledPattern, ParamValue, ParsedPathPattern, RouterError};

#[test]
fn literal_pattern_matches_exactly() {
    let compiled = CompiledPattern::compile("/health").expect("compile");
    assert!(compiled.match_url("/health").is_some());
    assert!(compiled.match_url("/health/live").is_none());
    assert!(compiled.match_url("/healthz").is_none());
    assert!(compiled.parameters().is_empty());
}

#[test]
fn parameters_are_extracted_in_declaration_order() {
    let compiled =
        CompiledPattern::compile("/users/:userId/products/:productId").expect("compile");
    assert_eq!(compiled.parameters(), ["userId", "productId"]);

    let matched = compiled.match_url("/users/7/products/42").expect("match");
    assert_eq!(matched.params.get_str("userId"), Some("7"));
    assert_eq!(matched.params.get_str("productId"), Some("42"));
}

#[test]
fn regex_metacharacters_in_literals_match_literally() {
    let compiled = CompiledPattern::compile("/a.b(c)/:id").expect("compile");
    let matched = compiled.match_url("/a.b(c)/9").expect("literal match");
    assert_eq!(matched.params.get_str("id"), Some("9"));
    // `.` must not act as a wildcard
    assert!(compiled.match_url("/aXb(c)/9").is_none());
}

#[test]
fn captures_exclude_separator_characters() {
    let compiled = CompiledPattern::compile("/todos/:id").expect("compile");
    // a slash in the would-be capture means a deeper path, not a match
    assert!(compiled.match_url("/todos/1/2").is_none());
    assert!(compiled.match_url("/todos/").is_none());
}

#[test]
fn matching_ignores_pre_path_and_post_path() {
    let compiled = CompiledPattern::compile("/todos/:id").expect("compile");
    let matched = compiled
        .match_url("https://api.example.com:8443/todos/5?format=json#top")
        .expect("match");
    assert_eq!(matched.url.pre_path, "https://api.example.com:8443");
    assert_eq!(matched.params.get_str("id"), Some("5"));
    assert_eq!(matched.params.get_str("format"), Some("json"));
}

#[test]
fn query_params_overlay_path_params() {
    // Path params are written first, query params last: last writer wins.
    let compiled = CompiledPattern::compile("/todos/:id").expect("compile");
    let matched = compiled.match_url("/todos/5?id=9").expect("match");
    assert_eq!(matched.params.get_str("id"), Some("9"));
}

#[test]
fn repeated_query_keys_become_arrays() {
    let compiled = CompiledPattern::compile("/todos").expect("compile");
    let matched = compiled.match_url("/todos?id=1&id=2").expect("match");
    assert_eq!(
        matched.params.get("id"),
        Some(&ParamValue::Multi(vec!["1".into(), "2".into()]))
    );
}

#[test]
fn pattern_with_query_string_is_rejected() {
    let err = CompiledPattern::compile("/todos?done=true").unwrap_err();
    assert!(matches!(err, RouterError::UnsupportedPathPattern { .. }));
    let err = ParsedPathPattern::parse("/todos?done=true").unwrap_err();
    assert!(matches!(err, RouterError::UnsupportedPathPattern { .. }));
}

#[test]
fn port_numbers_are_not_parameters() {
    let parsed = ParsedPathPattern::parse("http://localhost:8080/todos/:id").expect("parse");
    assert_eq!(parsed.parameters, ["id"]);
}

#[test]
fn matcher_carries_no_state_between_calls() {
    let compiled = CompiledPattern::compile("/todos/:id").expect("compile");
    // Two invocations against the same matcher must be independent.
    let first = compiled.match_url("/todos/1").expect("first");
    let second = compiled.match_url("/todos/2").expect("second");
    assert_eq!(first.params.get_str("id"), Some("1"));
    assert_eq!(second.params.get_str("id"), Some("2"));
    // A non-match in between must not poison later matches.
    assert!(compiled.match_url("/other").is_none());
    assert!(compiled.match_url("/todos/3").is_some());
}
