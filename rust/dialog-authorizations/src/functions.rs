//! The resolver and merger behind a single trait, so request handlers can be
//! written against an injectable implementation.

use crate::{
    AuthorizationError, Authorizations, Holder, MergedAuthorizations, Settings, Strictness, merge,
    resolver,
};

/// Requested-authorization resolution and proxy-chain merging.
///
/// Every method has a default body built on the free functions of this crate.
/// Implementors usually only override [`AuthorizationFunctions::strictness`],
/// which only affects [`AuthorizationFunctions::requested_authorizations_configured`].
pub trait AuthorizationFunctions {
    /// Strictness used by
    /// [`AuthorizationFunctions::requested_authorizations_configured`].
    fn strictness(&self) -> Strictness {
        Strictness::Strict
    }

    /// Resolve, rejecting tokens the principal does not hold.
    ///
    /// Always strict, whatever [`AuthorizationFunctions::strictness`] returns.
    fn requested_authorizations<P>(
        &self,
        requested: Option<&str>,
        principal: Option<&P>,
    ) -> Result<Authorizations, AuthorizationError>
    where
        P: Holder + ?Sized,
    {
        resolver::requested_authorizations(requested, principal)
    }

    /// Resolve using this implementation's configured strictness.
    fn requested_authorizations_configured<P>(
        &self,
        requested: Option<&str>,
        principal: Option<&P>,
    ) -> Result<Authorizations, AuthorizationError>
    where
        P: Holder + ?Sized,
    {
        resolver::requested_authorizations_with(requested, principal, self.strictness())
    }

    /// Resolve with an explicit strictness.
    fn requested_authorizations_with<P>(
        &self,
        requested: Option<&str>,
        principal: Option<&P>,
        strictness: Strictness,
    ) -> Result<Authorizations, AuthorizationError>
    where
        P: Holder + ?Sized,
    {
        resolver::requested_authorizations_with(requested, principal, strictness)
    }

    /// See [`validate_requested_authorizations`](crate::validate_requested_authorizations).
    fn validate_requested_authorizations<P>(
        &self,
        requested: Option<&str>,
        principal: Option<&P>,
    ) -> Result<(), AuthorizationError>
    where
        P: Holder + ?Sized,
    {
        resolver::validate_requested_authorizations(requested, principal)
    }

    /// See [`merge_authorizations`](crate::merge_authorizations).
    fn merge_authorizations<'a, P, I, F>(
        &self,
        resolved: Authorizations,
        chain: I,
        include: F,
    ) -> MergedAuthorizations
    where
        P: Holder + ?Sized + 'a,
        I: IntoIterator<Item = &'a P>,
        F: FnMut(&P) -> bool,
    {
        merge::merge_authorizations(resolved, chain, include)
    }
}

/// [`AuthorizationFunctions`] configured from [`Settings`].
#[derive(Debug, Clone, Default)]
pub struct DefaultAuthorizationFunctions {
    settings: Settings,
}

impl DefaultAuthorizationFunctions {
    /// Create an instance with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// The settings in use.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl From<Settings> for DefaultAuthorizationFunctions {
    fn from(settings: Settings) -> Self {
        Self::new(settings)
    }
}

impl AuthorizationFunctions for DefaultAuthorizationFunctions {
    fn strictness(&self) -> Strictness {
        self.settings.strictness
    }
}
