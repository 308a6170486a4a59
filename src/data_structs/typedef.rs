use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Position on the root sequence (0-based).
pub type PosType = usize;

/// Opaque identifier of a block inside a [`BlockStore`].
///
/// [`BlockStore`]: crate::data_structs::BlockStore
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for BlockId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for BlockId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for BlockId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for BlockId {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
