//! A borrowed view over the principals a request passed through.

use std::slice::Iter;

use crate::{
    AuthorizationError, Authorizations, MergedAuthorizations, Principal, PrincipalId, Strictness,
    merge_authorizations, requested_authorizations_with,
};

/// Ordered principals involved in one request: the acting principal first,
/// followed by the services that proxied for it.
#[derive(Debug, Clone, Copy)]
pub struct ProxyChain<'a>(&'a [Principal]);

impl<'a> ProxyChain<'a> {
    /// View a slice of principals as a proxy chain.
    pub fn new(principals: &'a [Principal]) -> Self {
        Self(principals)
    }

    /// The principal the request is made for.
    pub fn acting(&self) -> Option<&'a Principal> {
        self.0.first()
    }

    /// Everyone after the acting principal.
    pub fn proxies(&self) -> &'a [Principal] {
        self.0.get(1..).unwrap_or_default()
    }

    /// Iterate over the chain in order.
    pub fn iter(&self) -> Iter<'a, Principal> {
        self.0.iter()
    }

    /// Number of principals in the chain.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the chain has no principals.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merge `resolved` with the held sets of every chain member that is not
    /// the acting principal.
    pub fn merge(&self, resolved: Authorizations) -> MergedAuthorizations {
        match self.acting() {
            Some(acting) => merge_authorizations(resolved, self.0, excluding(acting.id())),
            None => MergedAuthorizations::new(resolved),
        }
    }

    /// Resolve the acting principal's requested authorizations and merge them
    /// with the rest of the chain.
    pub fn authorizations(
        &self,
        requested: Option<&str>,
        strictness: Strictness,
    ) -> Result<MergedAuthorizations, AuthorizationError> {
        let resolved = requested_authorizations_with(requested, self.acting(), strictness)?;
        Ok(self.merge(resolved))
    }
}

impl<'a> From<&'a [Principal]> for ProxyChain<'a> {
    fn from(principals: &'a [Principal]) -> Self {
        Self::new(principals)
    }
}

impl<'a> IntoIterator for ProxyChain<'a> {
    type Item = &'a Principal;
    type IntoIter = Iter<'a, Principal>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Selects every principal except the one with the given identifier.
pub fn excluding(id: &PrincipalId) -> impl FnMut(&Principal) -> bool + '_ {
    move |principal: &Principal| principal.id() != id
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    fn principals() -> Vec<Principal> {
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

    #[test]
    fn it_splits_acting_principal_from_proxies() {
        let principals = principals();
        let chain = ProxyChain::new(&principals);

        assert_eq!(chain.len(), 3);
        assert_eq!(chain.acting().map(Principal::id), Some(principals[0].id()));
        assert_eq!(chain.proxies(), &principals[1..]);
    }

    #[test]
    fn it_handles_empty_chain() {
        let chain = ProxyChain::new(&[]);

        assert!(chain.is_empty());
        assert!(chain.acting().is_none());
        assert!(chain.proxies().is_empty());
        assert_eq!(chain.merge(Authorizations::EMPTY).len(), 1);
    }

    #[test_log::test]
    fn it_resolves_and_merges_in_one_step() -> TestResult {
        let principals = principals();
        let merged = ProxyChain::new(&principals).authorizations(Some("A,C"), Strictness::Strict)?;

        assert_eq!(merged.to_string(), "[A,C] [A,B,E] [A,F,G]");
        Ok(())
    }

    #[test_log::test]
    fn it_excludes_acting_principal_by_identifier() {
        let principals = principals();
        // An equal but separately constructed identity is still excluded.
        let copy = Principal::user(
            PrincipalId::new("userDN", "issuerDN"),
            Authorizations::from(["Q"]),
        );
        let mut with_copy = principals.clone();
        with_copy.push(copy);

        let merged = ProxyChain::new(&with_copy).merge(Authorizations::from(["A"]));
        assert!(!merged.contains(&Authorizations::from(["Q"])));
        assert!(!merged.contains(&Authorizations::from(["A", "C", "D"])));
        assert_eq!(merged.len(), 3);
    }

    #[test_log::test]
    fn it_propagates_strict_rejection() {
        let principals = principals();
        let error = ProxyChain::new(&principals)
            .authorizations(Some("A,X"), Strictness::Strict)
            .unwrap_err();

        assert_eq!(error.unheld(), &Authorizations::from(["X"]));
    }
}
