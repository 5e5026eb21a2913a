use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(test)]
use mockall::automock;

/// Opaque bearer token proving the current session.
///
/// The client never inspects the token value; it only attaches it to
/// outbound requests. `Debug` redacts the value so it cannot leak through
/// logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn to_header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl From<&str> for BearerToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for BearerToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BearerToken(<redacted>)")
    }
}

/// Client-local persistence for the single credential entry.
///
/// A pure key/value accessor: implementations read, write and delete one
/// token and carry no session policy. Backends are infallible from the
/// caller's point of view; a backend that cannot persist logs the problem
/// and degrades to in-memory behavior.
#[cfg_attr(test, automock)]
pub trait TokenStorage: Send + Sync {
    /// The persisted token, if one exists.
    fn load(&self) -> Option<BearerToken>;

    /// Persist `token`, replacing any previous entry.
    fn store(&self, token: &BearerToken);

    /// Delete the persisted entry, if any.
    fn clear(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_value() {
        let token = BearerToken::new("abc123");
        assert_eq!(token.to_header_value(), "Bearer abc123");
    }

    #[test]
    fn test_debug_redacts_value() {
        let token = BearerToken::new("super-secret");
        let rendered = format!("{:?}", token);
        assert!(!rendered.contains("super-secret"));
    }
}
