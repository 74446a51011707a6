//! Strongly-typed identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier a venue assigns to an accepted order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueOrderId(String);

impl VenueOrderId {
    /// Create a new identifier from a string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generate a new unique identifier using UUID v4.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VenueOrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VenueOrderId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for VenueOrderId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(VenueOrderId::generate(), VenueOrderId::generate());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = VenueOrderId::new("venue-42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"venue-42\"");
        assert_eq!(id.to_string(), "venue-42");
    }
}
