use serde::{Deserialize, Serialize};

use crate::Strictness;

/// Configuration for [`DefaultAuthorizationFunctions`].
///
/// Missing fields take their defaults, so an empty document yields strict
/// resolution.
///
/// [`DefaultAuthorizationFunctions`]: crate::DefaultAuthorizationFunctions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Strictness used when a call does not pick one explicitly.
    pub strictness: Strictness,
}
