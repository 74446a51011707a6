//! Venue Port (Driven Port)
//!
//! Interface for sending orders to an execution venue.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::order_execution::{FailureKind, OrderRequest, OrderResult};

/// Venue port error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VenueError {
    /// Connection error.
    #[error("Venue connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// Order rejected by the venue.
    #[error("Order rejected by venue: {reason}")]
    OrderRejected {
        /// Rejection reason.
        reason: String,
    },

    /// Rate limited by the venue.
    #[error("Rate limited by venue")]
    RateLimited,

    /// The call did not finish within the configured timeout.
    #[error("Venue call timed out after {}ms", .after.as_millis())]
    Timeout {
        /// Configured limit.
        after: Duration,
    },

    /// The adapter panicked or its call was otherwise abandoned.
    #[error("Venue call aborted: {message}")]
    Aborted {
        /// Error details.
        message: String,
    },

    /// Unknown error.
    #[error("Venue error: {message}")]
    Unknown {
        /// Error details.
        message: String,
    },
}

impl VenueError {
    /// Failure category reported to the caller.
    ///
    /// A venue-side rejection is an answer, not a transport fault.
    #[must_use]
    pub const fn failure_kind(&self) -> FailureKind {
        match self {
            Self::OrderRejected { .. } => FailureKind::Venue,
            _ => FailureKind::Transport,
        }
    }
}

/// Port for venue interactions.
///
/// `Ok` with `success == false` is an adapter-level failure; the engine
/// treats it like an error for circuit breaker purposes.
#[async_trait]
pub trait VenuePort: Send + Sync {
    /// Send an order and wait for its outcome.
    async fn send(&self, order: &OrderRequest) -> Result<OrderResult, VenueError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn venue_error_display() {
        let err = VenueError::Timeout {
            after: Duration::from_millis(1500),
        };
        assert_eq!(err.to_string(), "Venue call timed out after 1500ms");

        let err = VenueError::ConnectionError {
            message: "reset by peer".to_string(),
        };
        assert!(err.to_string().contains("reset by peer"));
    }

    #[test]
    fn venue_error_failure_kind() {
        let rejected = VenueError::OrderRejected {
            reason: "halted".to_string(),
        };
        assert_eq!(rejected.failure_kind(), FailureKind::Venue);
        assert_eq!(VenueError::RateLimited.failure_kind(), FailureKind::Transport);
        assert_eq!(
            VenueError::Aborted {
                message: "panic".to_string()
            }
            .failure_kind(),
            FailureKind::Transport
        );
    }
}
