//! Query-string codec: an ordered multimap in, a percent-encoded string out.

use crate::params::{ParamMap, ParamValue};

/// Parse a query string into an ordered parameter multimap.
///
/// The input must begin with `?` (after trimming surrounding whitespace) or
/// the result is empty. The body is scanned as `key=value` pairs separated
/// by `&` and terminated early by a `#`. A key with no `=` yields an
/// empty-string value (a flag parameter). Percent-decoding is applied to
/// values only, never to keys; a value that fails to decode is kept
/// verbatim. Repeated keys promote the stored value to an array, preserving
/// first-seen order.
///
/// # Example
///
/// ```
/// use janus::parse_query_string;
///
/// let params = parse_query_string("?format=json&id=1&id=2&id=3");
/// assert_eq!(params.get_str("format"), Some("json"));
/// assert_eq!(params.get("id").unwrap().values(), vec!["1", "2", "3"]);
/// ```
#[must_use]
pub fn parse_query_string(qs: &str) -> ParamMap {
    let mut params = ParamMap::new();
    let Some(body) = qs.trim().strip_prefix('?') else {
        return params;
    };
    let body = body.split('#').next().unwrap_or("");

    for pair in body.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, raw_value) = match pair.split_once('=') {
            Some((key, value)) => (key, value),
            None => (pair, ""),
        };
        let value = urlencoding::decode(raw_value)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| raw_value.to_string());
        params.append(key, value);
    }
    params
}

/// Serialize a parameter multimap into a query-string body.
///
/// Both keys and values are percent-encoded and pairs are joined with `&`.
/// Array values emit one `key=value` pair per element, in order. The result
/// carries no leading `?`; the URL builder decides between `?` and `&`.
#[must_use]
pub fn stringify_query(params: &ParamMap) -> String {
    let mut out = String::new();
    for (key, value) in params.iter() {
        match value {
            ParamValue::Single(v) => push_pair(&mut out, key, v),
            ParamValue::Multi(vs) => {
                for v in vs {
                    push_pair(&mut out, key, v);
                }
            }
        }
    }
    out
}

fn push_pair(out: &mut String, key: &str, value: &str) {
    if !out.is_empty() {
        out.push('&');
    }
    out.push_str(&urlencoding::encode(key));
    out.push('=');
    out.push_str(&urlencoding::encode(value));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_question_mark_yields_empty_map() {
        assert!(parse_query_string("format=json").is_empty());
        assert!(parse_query_string("").is_empty());
    }

    #[test]
    fn leading_whitespace_is_trimmed() {
        let params = parse_query_string("  ?a=1");
        assert_eq!(params.get_str("a"), Some("1"));
    }

    #[test]
    fn flag_parameter_gets_empty_value() {
        let params = parse_query_string("?verbose&level=2");
        assert_eq!(params.get_str("verbose"), Some(""));
        assert_eq!(params.get_str("level"), Some("2"));
    }

    #[test]
    fn fragment_terminates_the_scan() {
        let params = parse_query_string("?a=1#b=2");
        assert_eq!(params.get_str("a"), Some("1"));
        assert!(!params.contains("b"));
    }

    #[test]
    fn values_are_decoded_keys_are_not() {
        let params = parse_query_string("?q%20k=hello%20world");
        assert_eq!(params.get_str("q%20k"), Some("hello world"));
    }

    #[test]
    fn repeated_keys_accumulate_in_order() {
        let params = parse_query_string("?id=1&id=2&id=3");
        assert_eq!(
            params.get("id"),
            Some(&ParamValue::Multi(vec![
                "1".into(),
                "2".into(),
                "3".into()
            ]))
        );
    }

    #[test]
    fn stringify_encodes_both_sides() {
        let mut params = ParamMap::new();
        params.set("q k", "a&b");
        assert_eq!(stringify_query(&params), "q%20k=a%26b");
    }

    #[test]
    fn stringify_repeats_array_keys() {
        let mut params = ParamMap::new();
        params.append("id", "1");
        params.append("id", "2");
        params.set("format", "json");
        assert_eq!(stringify_query(&params), "id=1&id=2&format=json");
    }
}
