//! The `Handle` value type

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque, immutable identifier
///
/// `Ord` is byte-wise, the same order the backing store scans keys in.
/// Handles minted by one `HandleGenerator` sort newest-first under it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    pub(crate) fn from_encoded(encoded: String) -> Self {
        Handle(encoded)
    }

    /// The handle text
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the handle, returning its text
    pub fn into_string(self) -> String {
        self.0
    }

    /// Length in bytes (always ASCII, so also in characters)
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a generated or parsed handle
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Handle {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<Handle> for String {
    fn from(handle: Handle) -> Self {
        handle.0
    }
}

/// Flavor of handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleKind {
    /// Smaller entropy budget, for high-volume entities
    Short,
    /// Larger entropy budget, for entities where a collision costs more
    Long,
    /// Counter-based, strictly ordered within one generator, not unique under bursts
    Sequential,
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandleKind::Short => write!(f, "short"),
            HandleKind::Long => write!(f, "long"),
            HandleKind::Sequential => write!(f, "sequential"),
        }
    }
}
