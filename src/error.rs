use std::fmt;

/// Errors raised by route registration, URL building, and method
/// normalization.
///
/// Callback errors are deliberately *not* part of this enum: a handler or
/// middleware failure is an opaque [`anyhow::Error`] that the dispatch chain
/// propagates unchanged to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// The path pattern contains a query string.
    ///
    /// Query strings are not expressible in a pattern; `?` is rejected at
    /// construction time and the registration fails.
    UnsupportedPathPattern {
        /// The offending pattern string
        pattern: String,
    },
    /// One or more declared path parameters were missing when building a URL.
    ///
    /// `missing` holds *all* absent names, in declaration order, so a caller
    /// can fix every omission in one pass.
    RequiredPathParametersNotFound {
        /// The pattern the URL was built from
        pattern: String,
        /// Every declared parameter absent from the supplied values
        missing: Vec<String>,
    },
    /// The HTTP method is outside the supported set
    /// (GET, PUT, POST, PATCH, DELETE).
    UnsupportedHttpMethod {
        /// The method string as supplied by the caller
        method: String,
    },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::UnsupportedPathPattern { pattern } => {
                write!(
                    f,
                    "unsupported path pattern '{}': a pattern must not contain a query string",
                    pattern
                )
            }
            RouterError::RequiredPathParametersNotFound { pattern, missing } => {
                write!(
                    f,
                    "cannot build URL from pattern '{}': missing required path parameters: {}",
                    pattern,
                    missing.join(", ")
                )
            }
            RouterError::UnsupportedHttpMethod { method } => {
                write!(
                    f,
                    "unsupported HTTP method '{}': expected one of GET, PUT, POST, PATCH, DELETE",
                    method
                )
            }
        }
    }
}

impl std::error::Error for RouterError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameters_message_lists_every_name_in_order() {
        let err = RouterError::RequiredPathParametersNotFound {
            pattern: "/users/:userId/products/:productId".to_string(),
            missing: vec!["userId".to_string(), "productId".to_string()],
        };
        let msg = err.to_string();
        let user = msg.find("userId").expect("userId missing from message");
        let product = msg.find("productId").expect("productId missing from message");
        assert!(user < product);
    }
}
