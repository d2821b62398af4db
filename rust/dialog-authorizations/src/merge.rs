//! Merging the authorizations of every principal in a proxy chain.
//!
//! A query issued through proxies runs under several authorization sets at
//! once: the acting principal's (already downgraded) set followed by the full
//! held set of each selected proxy. Data is visible only when every set in the
//! collection admits it.

use std::fmt::{Display, Formatter};

use indexmap::IndexSet;
use indexmap::set::{IntoIter, Iter};
use serde::Serialize;
use tracing::debug;

use crate::{Authorizations, Holder};

/// Ordered, value-deduplicated authorization sets for one request.
///
/// The acting principal's set is always first. Further sets keep the order in
/// which they were first inserted; inserting a set equal to one already
/// present is a no-op.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct MergedAuthorizations(IndexSet<Authorizations>);

/// Order is significant: equal collections hold equal sets in the same order.
impl PartialEq for MergedAuthorizations {
    fn eq(&self, other: &Self) -> bool {
        self.0.iter().eq(other.0.iter())
    }
}

impl Eq for MergedAuthorizations {}

impl MergedAuthorizations {
    /// Start a collection led by the acting principal's set.
    pub fn new(acting: Authorizations) -> Self {
        let mut sets = IndexSet::new();
        sets.insert(acting);
        Self(sets)
    }

    fn insert(&mut self, authorizations: Authorizations) -> bool {
        self.0.insert(authorizations)
    }

    /// The acting principal's set.
    pub fn acting(&self) -> &Authorizations {
        // Constructed with the acting set and never shrinks.
        &self.0[0]
    }

    /// Number of distinct sets, including the acting one.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`: there is at least the acting principal's set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether a value-equal set is present.
    pub fn contains(&self, authorizations: &Authorizations) -> bool {
        self.0.contains(authorizations)
    }

    /// Iterate sets in order, acting set first.
    pub fn iter(&self) -> Iter<'_, Authorizations> {
        self.0.iter()
    }

    /// Collect the sets into a vector, acting set first.
    pub fn into_vec(self) -> Vec<Authorizations> {
        self.0.into_iter().collect()
    }
}

impl IntoIterator for MergedAuthorizations {
    type Item = Authorizations;
    type IntoIter = IntoIter<Authorizations>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MergedAuthorizations {
    type Item = &'a Authorizations;
    type IntoIter = Iter<'a, Authorizations>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for MergedAuthorizations {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, authorizations) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "[{authorizations}]")?;
        }
        Ok(())
    }
}

/// Combine the acting principal's resolved authorizations with the held
/// authorizations of the selected chain members.
///
/// `resolved` leads the result verbatim whether or not the acting principal
/// also appears in `chain`. Chain members are visited in order and those for
/// which `include` returns `true` contribute their full held set; proxies are
/// never downgraded. Use `include` to leave the acting principal out when the
/// chain already contains it, comparing identifiers rather than references.
///
/// ```
/// use dialog_authorizations::{Authorizations, Principal, PrincipalId, merge_authorizations};
///
/// let user = Principal::user(PrincipalId::new("userDN", "issuerDN"), Authorizations::from(["A", "C", "D"]));
/// let proxy = Principal::server(PrincipalId::new("proxyDN", "issuerDN"), Authorizations::from(["A", "B"]));
/// let chain = [user.clone(), proxy];
///
/// let merged = merge_authorizations(Authorizations::from(["A"]), &chain, |p| p.id() != user.id());
/// assert_eq!(merged.to_string(), "[A] [A,B]");
/// ```
pub fn merge_authorizations<'a, P, I, F>(
    resolved: Authorizations,
    chain: I,
    mut include: F,
) -> MergedAuthorizations
where
    P: Holder + ?Sized + 'a,
    I: IntoIterator<Item = &'a P>,
    F: FnMut(&P) -> bool,
{
    let mut merged = MergedAuthorizations::new(resolved);
    for principal in chain {
        if include(principal) {
            merged.insert(principal.authorizations().clone());
        }
    }

    debug!(%merged, "Merged proxy chain authorizations");
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Principal, PrincipalId};
    use pretty_assertions::assert_eq;

    fn chain() -> Vec<Principal> {
        vec![
            Principal::user(
                PrincipalId::new("userDN", "issuerDN"),
                Authorizations::from(["A", "C", "D"]),
            ),
            Principal::server(
                PrincipalId::new("entity1UserDN", "entity1IssuerDN"),
                Authorizations::from(["A", "B", "E"]),
            ),
            Principal::server(
                PrincipalId::new("entity2UserDN", "entity2IssuerDN"),
                Authorizations::from(["A", "F", "G"]),
            ),
        ]
    }

    #[test_log::test]
    fn it_leads_with_resolved_set() {
        let chain = chain();
        let user = chain[0].id().clone();
        let merged = merge_authorizations(Authorizations::from(["A", "C"]), &chain, |p| {
            p.id() != &user
        });

        assert_eq!(
            merged.clone().into_vec(),
            vec![
                Authorizations::from(["A", "C"]),
                Authorizations::from(["A", "B", "E"]),
                Authorizations::from(["A", "F", "G"]),
            ]
        );
        assert_eq!(merged.acting(), &Authorizations::from(["A", "C"]));
    }

    #[test_log::test]
    fn it_keeps_only_resolved_set_when_nothing_selected() {
        let chain = chain();
        let resolved = Authorizations::from(["A"]);

        let merged = merge_authorizations(resolved.clone(), &chain, |_| false);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.acting(), &resolved);

        let merged = merge_authorizations(resolved.clone(), &Vec::<Principal>::new(), |_| true);
        assert_eq!(merged.into_vec(), vec![resolved]);
    }

    #[test_log::test]
    fn it_skips_value_equal_sets() {
        let mut chain = chain();
        chain.push(Principal::server(
            PrincipalId::new("entity3UserDN", "entity3IssuerDN"),
            Authorizations::from(["E", "B", "A"]),
        ));

        let merged = merge_authorizations(Authorizations::from(["A", "C", "D"]), &chain, |_| true);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged.to_string(), "[A,C,D] [A,B,E] [A,F,G]");
    }

    #[test_log::test]
    fn it_keeps_empty_resolved_set_first() {
        let chain = chain();
        let merged = merge_authorizations(Authorizations::EMPTY, &chain[1..], |_| true);

        assert!(!merged.is_empty());
        assert_eq!(merged.acting(), &Authorizations::EMPTY);
        assert!(merged.contains(&Authorizations::from(["A", "B", "E"])));
    }

    #[test]
    fn it_compares_order_sensitively() {
        let forward = merge_authorizations(
            Authorizations::EMPTY,
            &[Authorizations::from(["A"]), Authorizations::from(["B"])],
            |_| true,
        );
        let backward = merge_authorizations(
            Authorizations::EMPTY,
            &[Authorizations::from(["B"]), Authorizations::from(["A"])],
            |_| true,
        );
        assert_ne!(forward, backward);
        assert_eq!(forward, forward.clone());
    }

    #[test]
    fn it_serializes_in_order() {
        let merged = merge_authorizations(
            Authorizations::from(["Z"]),
            &[Authorizations::from(["A"])],
            |_| true,
        );
        assert_eq!(
            serde_json::to_string(&merged).unwrap(),
            r#"[["Z"],["A"]]"#
        );
    }
}
