use crate::{Authorizations, PrincipalId};

/// Errors raised when a request asks for authorizations the principal does
/// not hold.
///
/// Both variants describe the same condition. They are kept apart so callers
/// can route a malformed request differently from an access denial: the first
/// is an internal precondition failure, the second is meant to be reported
/// back to the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthorizationError {
    /// Strict resolution was asked for tokens the principal does not hold.
    #[error("Requested authorizations that are not held: missing [{unheld}]")]
    InvalidRequest {
        /// Requested tokens absent from the held set.
        unheld: Authorizations,
    },

    /// Validation found tokens the principal does not hold.
    #[error("Not authorized: requested authorizations that are not held: missing [{unheld}]")]
    Denied {
        /// The principal whose request was rejected, when the holder has an
        /// identity.
        principal: Option<PrincipalId>,
        /// Requested tokens absent from the held set.
        unheld: Authorizations,
    },
}

impl AuthorizationError {
    /// The requested tokens that were not held.
    pub fn unheld(&self) -> &Authorizations {
        match self {
            Self::InvalidRequest { unheld } | Self::Denied { unheld, .. } => unheld,
        }
    }

    /// Whether this is an access denial rather than an invalid request.
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied { .. })
    }
}
