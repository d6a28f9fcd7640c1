//! URL splitting: decompose any URL or pattern string into the part before
//! the path, the path itself, and everything after it.

use serde::Serialize;

/// A URL split into three verbatim pieces.
///
/// `pre_path` is everything before the first path-starting `/` (scheme,
/// host, port, or empty). `path` starts at that `/` and runs to the first
/// `?` or `#`. `post_path` is the remainder, kept verbatim.
///
/// Concatenating the three fields always reconstructs the original input.
/// When no path-starting `/` exists the whole input lands in `pre_path`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedUrl {
    pub pre_path: String,
    pub path: String,
    pub post_path: String,
}

/// Split a URL or pattern string into `(pre_path, path, post_path)`.
///
/// A `/` starts the path only when not followed by a second `/` - a `//`
/// pair is a protocol separator (as in `http://`) and is skipped as two
/// characters without resetting the search. Once the path has started, the
/// first `?` or `#` ends it and begins `post_path`. Any string is accepted;
/// there are no error conditions.
///
/// # Example
///
/// ```
/// use janus::parse_url;
///
/// let url = parse_url("http://example.com/todos/42?format=json");
/// assert_eq!(url.pre_path, "http://example.com");
/// assert_eq!(url.path, "/todos/42");
/// assert_eq!(url.post_path, "?format=json");
/// ```
#[must_use]
pub fn parse_url(input: &str) -> ParsedUrl {
    let bytes = input.as_bytes();
    let mut i = 0;
    let mut path_start = None;
    while i < bytes.len() {
        if bytes[i] == b'/' {
            if i + 1 < bytes.len() && bytes[i + 1] == b'/' {
                // protocol separator: skip both slashes, keep searching
                i += 2;
                continue;
            }
            path_start = Some(i);
            break;
        }
        i += 1;
    }

    let Some(start) = path_start else {
        return ParsedUrl {
            pre_path: input.to_string(),
            path: String::new(),
            post_path: String::new(),
        };
    };

    let path_end = input[start..]
        .find(['?', '#'])
        .map(|offset| start + offset)
        .unwrap_or(input.len());

    ParsedUrl {
        pre_path: input[..start].to_string(),
        path: input[start..path_end].to_string(),
        post_path: input[path_end..].to_string(),
    }
}
