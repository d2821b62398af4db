//! The authorization set a principal holds or a request is scoped to.

use std::collections::BTreeSet;
use std::collections::btree_set;
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::AuthorizationToken;

/// Separator between tokens in a requested-authorizations string.
pub const SEPARATOR: char = ',';

/// A deduplicated set of [`AuthorizationToken`]s.
///
/// Two sets are equal when they contain the same tokens, no matter how they
/// were built. Iteration and [`Display`] follow token order so the same set
/// always renders the same way.
///
/// [`Authorizations::EMPTY`] means "no access". It is a real value, distinct
/// from having no authorizations to report at all, which callers express as
/// `Option<Authorizations>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Authorizations(BTreeSet<AuthorizationToken>);

impl Authorizations {
    /// The empty set.
    pub const EMPTY: Authorizations = Authorizations(BTreeSet::new());

    /// Create an empty set.
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Parse a comma separated list of tokens.
    ///
    /// Whitespace around each token is trimmed and empty entries (from
    /// leading, trailing or repeated commas) are skipped. Parsing never fails.
    ///
    /// ```
    /// use dialog_authorizations::Authorizations;
    ///
    /// let parsed = Authorizations::parse(" A, ,C,,A ");
    /// assert_eq!(parsed, Authorizations::from(["A", "C"]));
    /// ```
    pub fn parse(csv: &str) -> Self {
        csv.split(SEPARATOR)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect()
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the empty set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the given token is in the set.
    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    /// Iterate tokens in order.
    pub fn iter(&self) -> btree_set::Iter<'_, AuthorizationToken> {
        self.0.iter()
    }

    /// Whether every token in `self` is also in `other`.
    pub fn is_subset(&self, other: &Authorizations) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Tokens present in both sets.
    pub fn intersection(&self, other: &Authorizations) -> Authorizations {
        Self(self.0.intersection(&other.0).cloned().collect())
    }

    /// Tokens present in `self` but missing from `other`.
    pub fn difference(&self, other: &Authorizations) -> Authorizations {
        Self(self.0.difference(&other.0).cloned().collect())
    }

    /// Add a token, returning whether it was newly inserted.
    pub fn insert(&mut self, token: impl Into<AuthorizationToken>) -> bool {
        self.0.insert(token.into())
    }
}

impl FromStr for Authorizations {
    type Err = Infallible;

    fn from_str(csv: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(csv))
    }
}

impl<T: Into<AuthorizationToken>> FromIterator<T> for Authorizations {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<AuthorizationToken>> Extend<T> for Authorizations {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl<const N: usize> From<[&str; N]> for Authorizations {
    fn from(tokens: [&str; N]) -> Self {
        tokens.into_iter().collect()
    }
}

impl IntoIterator for Authorizations {
    type Item = AuthorizationToken;
    type IntoIter = btree_set::IntoIter<AuthorizationToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Authorizations {
    type Item = &'a AuthorizationToken;
    type IntoIter = btree_set::Iter<'a, AuthorizationToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Renders as the comma separated form accepted by [`Authorizations::parse`].
impl Display for Authorizations {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, token) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            f.write_str(token)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_parses_and_normalizes_csv() {
        assert_eq!(Authorizations::parse("A,C"), Authorizations::from(["A", "C"]));
        assert_eq!(
            Authorizations::parse(",, A ,\tC ,A,"),
            Authorizations::from(["C", "A"])
        );
    }

    #[test]
    fn it_parses_separator_only_input_as_empty() {
        assert_eq!(Authorizations::parse(""), Authorizations::EMPTY);
        assert_eq!(Authorizations::parse(" , ,, "), Authorizations::EMPTY);
    }

    #[test]
    fn it_keeps_inner_whitespace_and_case() {
        let parsed = Authorizations::parse("Top Secret, top secret");
        assert_eq!(parsed.len(), 2);
        assert!(parsed.contains("Top Secret"));
        assert!(parsed.contains("top secret"));
    }

    #[test]
    fn it_compares_by_value() {
        let left: Authorizations = ["D", "A", "C"].into_iter().collect();
        let right = Authorizations::parse("C,D,A");
        assert_eq!(left, right);
    }

    #[test]
    fn it_computes_set_algebra() {
        let held = Authorizations::from(["A", "C", "D"]);
        let requested = Authorizations::from(["A", "C", "D", "X", "Y", "Z"]);

        assert!(!requested.is_subset(&held));
        assert!(Authorizations::EMPTY.is_subset(&held));
        assert_eq!(requested.intersection(&held), held);
        assert_eq!(
            requested.difference(&held),
            Authorizations::from(["X", "Y", "Z"])
        );
    }

    #[test]
    fn it_displays_in_token_order() {
        assert_eq!(Authorizations::parse("D,A,C").to_string(), "A,C,D");
        assert_eq!(Authorizations::EMPTY.to_string(), "");
    }

    #[test]
    fn it_serializes_as_sequence() {
        let set = Authorizations::from(["B", "A"]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["A","B"]"#);

        let parsed: Authorizations = serde_json::from_str(r#"["B","A","B"]"#).unwrap();
        assert_eq!(parsed, set);
    }
}
