//! Symbol value object for instrument identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// Maximum accepted symbol length.
const MAX_SYMBOL_LEN: usize = 32;

/// A trading symbol.
///
/// Examples: "AAPL", "BTC-USD", "ETH/USDT", "BRK.B".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Create a validated Symbol.
    ///
    /// The symbol is trimmed and normalized to uppercase.
    ///
    /// # Errors
    ///
    /// Returns error if the symbol is empty, too long, or contains characters
    /// outside `[A-Z0-9-/._]`.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, DomainError> {
        let normalized = value.as_ref().trim().to_uppercase();

        if normalized.is_empty() {
            return Err(DomainError::invalid("symbol", "Symbol cannot be empty"));
        }

        if normalized.len() > MAX_SYMBOL_LEN {
            return Err(DomainError::invalid(
                "symbol",
                "Symbol exceeds maximum length",
            ));
        }

        if !normalized
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '/' | '.' | '_'))
        {
            return Err(DomainError::invalid(
                "symbol",
                "Symbol contains invalid characters",
            ));
        }

        Ok(Self(normalized))
    }

    /// Get the symbol string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Symbol {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}
