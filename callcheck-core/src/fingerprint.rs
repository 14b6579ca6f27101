//! Content fingerprints of rendered views.
//!
//! Two render passes over identical inputs must produce identical views; the
//! BLAKE3 hash of a view's canonical JSON makes that cheap to check and to
//! print.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewFingerprint(pub String);

impl ViewFingerprint {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(blake3::hash(bytes).to_hex().to_string())
    }

    /// Hash of `view` serialized as JSON (struct fields in declaration order,
    /// maps key-sorted).
    pub fn of<T: Serialize>(view: &T) -> Result<Self, serde_json::Error> {
        let json = serde_json::to_vec(view)?;
        Ok(Self::from_bytes(&json))
    }

    /// First 12 hex chars, for status lines.
    pub fn short(&self) -> &str {
        &self.0[..12.min(self.0.len())]
    }
}

impl fmt::Display for ViewFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
