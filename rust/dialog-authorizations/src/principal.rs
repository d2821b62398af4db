//! Principals taking part in a request and the authorizations they hold.
//!
//! Principals are produced by whatever directory authenticated the request;
//! this crate only ever borrows them.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use web_time::{SystemTime, UNIX_EPOCH};

use crate::Authorizations;

/// Anything that holds a set of authorizations.
///
/// The resolver and merger only need to read the held set, so external
/// principal types can take part by implementing this trait.
pub trait Holder {
    /// The full set of authorizations held.
    fn authorizations(&self) -> &Authorizations;

    /// The holder's identity, if it has one.
    fn principal_id(&self) -> Option<&PrincipalId> {
        None
    }
}

impl Holder for Authorizations {
    fn authorizations(&self) -> &Authorizations {
        self
    }
}

/// Stable identity of a principal: a subject and the issuer that vouched for
/// it. Both parts must match exactly for two identifiers to be equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PrincipalId {
    /// Who the principal is.
    pub subject: String,
    /// Who issued the subject's credential.
    pub issuer: String,
}

impl PrincipalId {
    /// Create an identifier from a subject and issuer pair.
    pub fn new(subject: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            issuer: issuer.into(),
        }
    }
}

impl Display for PrincipalId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}<{}>", self.subject, self.issuer)
    }
}

/// Whether a principal is an end user or a service acting for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalKind {
    /// A person issuing requests.
    User,
    /// A server or service proxying requests.
    Server,
}

/// An identity participating in a request.
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    id: PrincipalId,
    kind: PrincipalKind,
    authorizations: Authorizations,
    /// Milliseconds since the UNIX epoch.
    issued_at: u64,
}

impl Principal {
    /// Create a principal issued now.
    pub fn new(id: PrincipalId, kind: PrincipalKind, authorizations: Authorizations) -> Self {
        let issued_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or_default();

        Self {
            id,
            kind,
            authorizations,
            issued_at,
        }
    }

    /// Create an end-user principal issued now.
    pub fn user(id: PrincipalId, authorizations: Authorizations) -> Self {
        Self::new(id, PrincipalKind::User, authorizations)
    }

    /// Create a server principal issued now.
    pub fn server(id: PrincipalId, authorizations: Authorizations) -> Self {
        Self::new(id, PrincipalKind::Server, authorizations)
    }

    /// Replace the issuance timestamp (milliseconds since the UNIX epoch).
    pub fn with_issued_at(mut self, issued_at: u64) -> Self {
        self.issued_at = issued_at;
        self
    }

    /// The principal's identifier.
    pub fn id(&self) -> &PrincipalId {
        &self.id
    }

    /// The principal's kind.
    pub fn kind(&self) -> PrincipalKind {
        self.kind
    }

    /// When the principal was issued, in milliseconds since the UNIX epoch.
    pub fn issued_at(&self) -> u64 {
        self.issued_at
    }
}

impl Holder for Principal {
    fn authorizations(&self) -> &Authorizations {
        &self.authorizations
    }

    fn principal_id(&self) -> Option<&PrincipalId> {
        Some(&self.id)
    }
}
