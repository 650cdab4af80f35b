// principal.rs — Principal: the authenticated caller identity.
//
// A principal is supplied by the surrounding execution environment
// (identity context) and is opaque to the core: we compare principals
// for equality and set membership, nothing else. The core never parses,
// derives, or fabricates one.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque, authenticated identifier for a calling identity.
///
/// `#[serde(transparent)]` makes this serialize as a bare JSON string,
/// so stored records stay readable and the wrapper adds no wire cost.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Wrap an identifier handed to us by the identity context.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Principal {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Principal {
    fn from(id: String) -> Self {
        Self(id)
    }
}
