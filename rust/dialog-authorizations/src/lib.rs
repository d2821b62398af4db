#![warn(missing_docs)]

//! Label-based authorization scoping for queries.
//!
//! Every query runs under one or more [`Authorizations`]: flat sets of
//! opaque label tokens. This crate decides which sets those are.
//!
//! # Downgrading
//!
//! A [`Principal`] holds a set of authorizations granted by some external
//! directory. A client may ask to use only part of that grant by sending a
//! comma separated list of tokens. [`requested_authorizations`] turns the
//! list into the set the query will use, and refuses lists naming tokens the
//! principal does not hold. [`requested_authorizations_with`] can instead drop
//! those tokens ([`Strictness::BestEffort`]), and
//! [`validate_requested_authorizations`] performs the same check but reports
//! failure as an access denial.
//!
//! # Proxy chains
//!
//! When services call on behalf of a user, each of them limits what the user
//! can see. [`merge_authorizations`] combines the user's downgraded set with
//! the full held set of every selected proxy into [`MergedAuthorizations`]:
//! an ordered collection, acting principal first, without value-equal
//! duplicates. Data is meant to be visible only if it satisfies every set.
//!
//! ```
//! use dialog_authorizations::{
//!     Authorizations, Principal, PrincipalId, ProxyChain, Strictness,
//! };
//!
//! let chain = vec![
//!     Principal::user(PrincipalId::new("userDN", "issuerDN"), Authorizations::from(["A", "C", "D"])),
//!     Principal::server(PrincipalId::new("entity1UserDN", "entity1IssuerDN"), Authorizations::from(["A", "B", "E"])),
//!     Principal::server(PrincipalId::new("entity2UserDN", "entity2IssuerDN"), Authorizations::from(["A", "F", "G"])),
//! ];
//!
//! let merged = ProxyChain::new(&chain).authorizations(Some("A,C"), Strictness::Strict)?;
//! assert_eq!(merged.to_string(), "[A,C] [A,B,E] [A,F,G]");
//! # Ok::<(), dialog_authorizations::AuthorizationError>(())
//! ```

mod error;
pub use error::*;

mod token;
pub use token::*;

mod authorizations;
pub use authorizations::*;

mod principal;
pub use principal::*;

mod resolver;
pub use resolver::*;

mod merge;
pub use merge::*;

mod chain;
pub use chain::*;

mod settings;
pub use settings::*;

mod functions;
pub use functions::*;
