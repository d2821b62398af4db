use std::borrow::Borrow;
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// A single authorization label.
///
/// Tokens are opaque: two tokens are equal only when their strings match
/// exactly, including case. The ordering exists so that sets of tokens can be
/// displayed and hashed deterministically; it carries no access semantics.
#[repr(transparent)]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorizationToken(String);

impl AuthorizationToken {
    /// Wrap a label as a token. No normalization is applied.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the token and return the label.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for AuthorizationToken {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for AuthorizationToken {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AuthorizationToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AuthorizationToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for AuthorizationToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<AuthorizationToken> for String {
    fn from(token: AuthorizationToken) -> String {
        token.0
    }
}

impl Display for AuthorizationToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
