//! Order construction errors.

use thiserror::Error;

use crate::domain::shared::DomainError;

/// Errors raised while building an [`OrderRequest`](super::OrderRequest).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// A field failed value-object validation.
    #[error("invalid order: {0}")]
    InvalidField(#[from] DomainError),

    /// LIMIT order submitted without a price.
    #[error("invalid order: LIMIT order requires a price")]
    MissingLimitPrice,
}
