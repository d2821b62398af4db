//! Downgrading a principal's held authorizations to the subset a request asks
//! for.
//!
//! A client may pass a comma separated list of tokens to narrow what a query
//! can see. The list is checked against what the principal holds:
//!
//! - no principal resolves to [`Authorizations::EMPTY`]
//! - no list (or an empty one) resolves to everything the principal holds
//! - otherwise the result is the requested tokens, provided the principal
//!   holds them all. What happens to unheld tokens depends on [`Strictness`].

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{AuthorizationError, Authorizations, Holder};

/// How resolution treats requested tokens the principal does not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strictness {
    /// Reject the request with [`AuthorizationError::InvalidRequest`].
    #[default]
    Strict,
    /// Drop unheld tokens and resolve to what remains.
    BestEffort,
}

impl From<bool> for Strictness {
    fn from(strict: bool) -> Self {
        if strict {
            Strictness::Strict
        } else {
            Strictness::BestEffort
        }
    }
}

/// The requested tokens and the subset of them that is not held.
struct Request {
    requested: Authorizations,
    unheld: Authorizations,
}

impl Request {
    /// Returns `None` when nothing was requested, which means no scoping.
    fn scope(requested: Option<&str>, held: &Authorizations) -> Option<Self> {
        let requested = requested.filter(|csv| !csv.is_empty())?;
        let requested = Authorizations::parse(requested);
        let unheld = requested.difference(held);
        Some(Self { requested, unheld })
    }
}

/// Resolve the authorizations usable for a request, rejecting tokens the
/// principal does not hold.
///
/// Same as [`requested_authorizations_with`] using [`Strictness::Strict`].
pub fn requested_authorizations<P>(
    requested: Option<&str>,
    principal: Option<&P>,
) -> Result<Authorizations, AuthorizationError>
where
    P: Holder + ?Sized,
{
    requested_authorizations_with(requested, principal, Strictness::Strict)
}

/// Resolve the authorizations usable for a request.
///
/// The result is always a subset of the principal's held authorizations.
///
/// ```
/// use dialog_authorizations::{
///     Authorizations, Principal, PrincipalId, Strictness, requested_authorizations_with,
/// };
///
/// let user = Principal::user(
///     PrincipalId::new("userDN", "issuerDN"),
///     Authorizations::from(["A", "C", "D"]),
/// );
///
/// let scoped = requested_authorizations_with(Some("A,X"), Some(&user), Strictness::BestEffort);
/// assert_eq!(scoped, Ok(Authorizations::from(["A"])));
///
/// let rejected = requested_authorizations_with(Some("A,X"), Some(&user), Strictness::Strict);
/// assert!(rejected.is_err());
/// ```
pub fn requested_authorizations_with<P>(
    requested: Option<&str>,
    principal: Option<&P>,
    strictness: Strictness,
) -> Result<Authorizations, AuthorizationError>
where
    P: Holder + ?Sized,
{
    let Some(principal) = principal else {
        debug!("No principal, resolving to empty authorizations");
        return Ok(Authorizations::EMPTY);
    };

    let held = principal.authorizations();
    let Some(Request { requested, unheld }) = Request::scope(requested, held) else {
        debug!(
            principal = ?principal.principal_id(),
            "No authorizations requested, using held set"
        );
        return Ok(held.clone());
    };

    if unheld.is_empty() {
        debug!(
            principal = ?principal.principal_id(),
            %requested,
            "Downgraded authorizations"
        );
        return Ok(requested);
    }

    match strictness {
        Strictness::Strict => {
            warn!(
                principal = ?principal.principal_id(),
                %unheld,
                "Rejecting request for unheld authorizations"
            );
            Err(AuthorizationError::InvalidRequest { unheld })
        }
        Strictness::BestEffort => {
            let resolved = requested.intersection(held);
            warn!(
                principal = ?principal.principal_id(),
                dropped = %unheld,
                %resolved,
                "Dropping unheld authorizations from request"
            );
            Ok(resolved)
        }
    }
}

/// Check that every requested token is held by the principal.
///
/// Fails with [`AuthorizationError::Denied`] under the same condition that
/// makes strict resolution fail. Succeeds when there is no principal or
/// nothing was requested.
pub fn validate_requested_authorizations<P>(
    requested: Option<&str>,
    principal: Option<&P>,
) -> Result<(), AuthorizationError>
where
    P: Holder + ?Sized,
{
    let Some(principal) = principal else {
        return Ok(());
    };

    match Request::scope(requested, principal.authorizations()) {
        Some(Request { unheld, .. }) if !unheld.is_empty() => {
            warn!(
                principal = ?principal.principal_id(),
                %unheld,
                "Denying request for unheld authorizations"
            );
            Err(AuthorizationError::Denied {
                principal: principal.principal_id().cloned(),
                unheld,
            })
        }
        _ => Ok(()),
    }
}
