// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Trade Guard - Guarded Order Execution
//!
//! Every proposed order passes a circuit breaker, risk validation and a rate
//! limiter before it reaches the venue. Each decision and each venue outcome
//! is written to an append-only audit trail.
//!
//! # Architecture (Clean Architecture + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic (value objects, domain services)
//!   - `order_execution`: Order requests and results
//!   - `risk_management`: Risk limits, daily counters, order validation
//!   - `audit`: Audit entries and the monotonic audit clock
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: Interfaces for external systems (`VenuePort`, `AuditSink`)
//!   - `use_cases`: `ExecutionEngine`
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `audit`: Daily JSON-lines files, in-memory log
//!   - `venue`: Paper venue
//!
//! ## Supporting modules
//!
//! - `resilience`: Circuit breaker and rate limiter
//! - `risk`: Kelly position sizing
//! - `config`: YAML configuration with environment interpolation
//! - `observability`: Prometheus metrics
//! - `telemetry`: Tracing subscriber setup

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Supporting Modules
// =============================================================================

/// Configuration loading and validation.
pub mod config;

/// Prometheus metrics.
pub mod observability;

/// Circuit breaker and rate limiting.
pub mod resilience;

/// Position sizing.
pub mod risk;

/// Tracing subscriber setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::audit::{AuditEntry, AuditEntryKind, Decision};
pub use domain::order_execution::{FailureKind, OrderRequest, OrderResult, OrderSide, OrderType};
pub use domain::risk_management::{OrderValidator, RiskLimits, RiskState, ValidationRejection};
pub use domain::shared::{DomainError, Money, Quantity, Symbol, Timestamp, VenueOrderId};

// Application re-exports
pub use application::ports::{AuditError, AuditSink, VenueError, VenuePort};
pub use application::use_cases::{EngineConfig, EngineError, ExecutionEngine};

// Infrastructure re-exports
pub use infrastructure::audit::{DailyFileAuditLog, InMemoryAuditLog};
pub use infrastructure::venue::PaperVenue;

// Supporting re-exports
pub use resilience::{CircuitBreaker, CircuitBreakerConfig, CircuitBreakerState, RateLimiter};
pub use risk::{PositionSizer, kelly_fraction};
