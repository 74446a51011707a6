//! Execute Order Use Case
//!
//! The guarded execution pipeline for one venue:
//!
//! ```text
//! circuit check → validate → rate limit → audit intent → venue call → bookkeeping
//! ```
//!
//! One async mutex guards the engine's risk state, circuit breaker and audit
//! clock for the whole call, so orders on one engine never interleave. Once an
//! order is dispatched, the venue call and its bookkeeping run on a spawned
//! task that owns the lock; dropping the caller's future cannot skip them.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use rust_decimal::Decimal;
use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time::Instant;

use crate::application::ports::{AuditSink, VenueError, VenuePort};
use crate::domain::audit::{AuditClock, AuditEntry, Decision};
use crate::domain::order_execution::{FailureKind, OrderRequest, OrderResult};
use crate::domain::risk_management::{OrderValidator, RiskLimits, RiskState};
use crate::domain::shared::{DomainError, Money};
use crate::observability;
use crate::resilience::{
    CircuitBreaker, CircuitBreakerConfig, CircuitBreakerMetrics, CircuitBreakerState, RateLimiter,
    RateLimiterError,
};

/// Runtime configuration for one engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Name used in logs and metric labels.
    pub name: String,
    /// Static risk limits.
    pub limits: RiskLimits,
    /// Venue call budget.
    pub rate_limit_per_minute: u32,
    /// Circuit breaker tuning.
    pub circuit_breaker: CircuitBreakerConfig,
    /// Upper bound on a single venue call; `None` waits indefinitely.
    pub venue_timeout: Option<Duration>,
}

impl EngineConfig {
    /// Configuration with default circuit breaker settings and no venue timeout.
    #[must_use]
    pub fn new(name: impl Into<String>, limits: RiskLimits, rate_limit_per_minute: u32) -> Self {
        Self {
            name: name.into(),
            limits,
            rate_limit_per_minute,
            circuit_breaker: CircuitBreakerConfig::default(),
            venue_timeout: None,
        }
    }

    /// Override the circuit breaker settings.
    #[must_use]
    pub const fn with_circuit_breaker(mut self, config: CircuitBreakerConfig) -> Self {
        self.circuit_breaker = config;
        self
    }

    /// Bound each venue call.
    #[must_use]
    pub const fn with_venue_timeout(mut self, timeout: Duration) -> Self {
        self.venue_timeout = Some(timeout);
        self
    }
}

/// Engine construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A limit or breaker setting is out of range.
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(#[from] DomainError),

    /// The rate limit cannot be honored.
    #[error("invalid engine configuration: {0}")]
    RateLimit(#[from] RateLimiterError),
}

/// State serialized by the engine lock.
#[derive(Debug)]
struct EngineCore {
    risk: RiskState,
    breaker: CircuitBreaker,
    clock: AuditClock,
}

/// Everything the dispatch task needs besides the lock.
struct Dispatch<V: ?Sized, A: ?Sized> {
    name: Arc<str>,
    venue: Arc<V>,
    audit: Arc<A>,
    venue_timeout: Option<Duration>,
}

/// Guarded order execution for a single venue.
pub struct ExecutionEngine<V, A>
where
    V: VenuePort + ?Sized + 'static,
    A: AuditSink + ?Sized + 'static,
{
    name: Arc<str>,
    venue: Arc<V>,
    audit: Arc<A>,
    limiter: RateLimiter,
    venue_timeout: Option<Duration>,
    core: Arc<Mutex<EngineCore>>,
}

impl<V, A> ExecutionEngine<V, A>
where
    V: VenuePort + ?Sized + 'static,
    A: AuditSink + ?Sized + 'static,
{
    /// Build an engine over an injected venue and audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if any configured limit is non-positive or the
    /// circuit breaker settings are unusable.
    pub fn new(config: EngineConfig, venue: Arc<V>, audit: Arc<A>) -> Result<Self, EngineError> {
        config.limits.validate()?;
        config.circuit_breaker.validate()?;
        let limiter = RateLimiter::new(config.rate_limit_per_minute)?;

        let name: Arc<str> = Arc::from(config.name.as_str());
        let core = EngineCore {
            risk: RiskState::new(config.limits),
            breaker: CircuitBreaker::new(config.name, config.circuit_breaker),
            clock: AuditClock::new(),
        };

        tracing::info!(
            engine = %name,
            rate_limit_per_minute = limiter.calls_per_minute(),
            max_daily_trades = config.limits.max_daily_trades,
            max_exposure = %config.limits.max_exposure,
            "Execution engine ready"
        );
        observability::record_circuit_state(&name, CircuitBreakerState::Closed);

        Ok(Self {
            name,
            venue,
            audit,
            limiter,
            venue_timeout: config.venue_timeout,
            core: Arc::new(Mutex::new(core)),
        })
    }

    /// Engine name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run one order through the pipeline.
    ///
    /// Always returns an [`OrderResult`]; refusals and venue faults are
    /// failed results, never errors. Dropping the future before dispatch
    /// leaves the engine untouched. Once dispatched, the venue outcome is
    /// recorded exactly once even if the future is dropped.
    pub async fn execute_order(&self, order: &OrderRequest) -> OrderResult {
        let mut core = Arc::clone(&self.core).lock_owned().await;

        if let Err(rejection) = core.breaker.would_permit() {
            return self.refuse(&mut core, order, FailureKind::CircuitOpen, rejection.to_string());
        }

        if let Err(rejection) = OrderValidator::validate(order, &core.risk) {
            return self.refuse(&mut core, order, FailureKind::Validation, rejection.to_string());
        }

        self.limiter.acquire().await;

        // Dispatch is certain from here on; no await until the task is spawned.
        if let Err(rejection) = core.breaker.can_execute() {
            return self.refuse(&mut core, order, FailureKind::CircuitOpen, rejection.to_string());
        }
        observability::record_circuit_state(&self.name, core.breaker.state());

        let entry = AuditEntry::decision(
            core.clock.next(),
            Decision::Send,
            "passed risk checks; dispatching to venue",
            Some(order),
        );
        append_audit(&*self.audit, &self.name, &entry);

        tracing::info!(
            engine = %self.name,
            symbol = %order.symbol(),
            side = %order.side(),
            size = %order.size(),
            order_type = %order.order_type(),
            "Dispatching order"
        );

        let dispatch = Dispatch {
            name: Arc::clone(&self.name),
            venue: Arc::clone(&self.venue),
            audit: Arc::clone(&self.audit),
            venue_timeout: self.venue_timeout,
        };
        let task = tokio::spawn(dispatch.run(core, order.clone()));

        match task.await {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(engine = %self.name, error = %err, "Dispatch task failed");
                OrderResult::failed(FailureKind::Transport, format!("dispatch task failed: {err}"))
            }
        }
    }

    /// Snapshot of the risk counters and limits.
    pub async fn risk_snapshot(&self) -> RiskState {
        self.core.lock().await.risk.clone()
    }

    /// Snapshot of the circuit breaker.
    pub async fn circuit_metrics(&self) -> CircuitBreakerMetrics {
        self.core.lock().await.breaker.metrics()
    }

    /// Zero the daily counters.
    ///
    /// The engine never calls this itself; an external scheduler owns the
    /// day boundary.
    pub async fn reset_daily(&self) {
        let mut core = self.core.lock().await;
        let previous_trades = core.risk.daily_trades();
        let previous_exposure = core.risk.exposure();
        core.risk.reset_daily();

        tracing::info!(
            engine = %self.name,
            previous_trades,
            previous_exposure = %previous_exposure,
            "Daily risk counters reset"
        );
        observability::update_risk_gauges(&self.name, 0, Money::ZERO);
    }

    /// Build a local failure, audit the refusal and count it.
    fn refuse(
        &self,
        core: &mut EngineCore,
        order: &OrderRequest,
        kind: FailureKind,
        reason: String,
    ) -> OrderResult {
        tracing::warn!(
            engine = %self.name,
            symbol = %order.symbol(),
            side = %order.side(),
            size = %order.size(),
            kind = %kind,
            reason = %reason,
            "Order refused"
        );

        let entry = AuditEntry::decision(core.clock.next(), Decision::Reject, &reason, Some(order));
        append_audit(&*self.audit, &self.name, &entry);
        observability::record_order_outcome(&self.name, kind.as_label());

        OrderResult::failed(kind, reason)
    }
}

impl<V, A> Dispatch<V, A>
where
    V: VenuePort + ?Sized,
    A: AuditSink + ?Sized,
{
    /// Call the venue and apply the outcome. Runs exactly once per dispatch.
    async fn run(self, mut core: OwnedMutexGuard<EngineCore>, order: OrderRequest) -> OrderResult {
        let started = Instant::now();
        let outcome = self.call_venue(&order).await;
        observability::record_venue_latency(&self.name, started.elapsed().as_secs_f64());

        let result = match outcome {
            Ok(mut result) if result.success => {
                result.failure = None;
                let notional = result
                    .notional()
                    .unwrap_or_else(|| Money::new(Decimal::MAX));
                core.breaker.record_success();
                core.risk.record_fill(notional);

                tracing::info!(
                    engine = %self.name,
                    symbol = %order.symbol(),
                    order_id = ?result.order_id,
                    filled_size = %result.filled_size,
                    avg_price = %result.avg_price,
                    exposure = %core.risk.exposure(),
                    daily_trades = core.risk.daily_trades(),
                    "Order filled"
                );
                result
            }
            Ok(mut result) => {
                result.failure.get_or_insert(FailureKind::Venue);
                result
                    .error
                    .get_or_insert_with(|| "venue reported the order as not filled".to_string());
                core.breaker.record_failure();

                tracing::warn!(
                    engine = %self.name,
                    symbol = %order.symbol(),
                    error = result.error.as_deref().unwrap_or_default(),
                    "Venue did not fill order"
                );
                result
            }
            Err(err) => {
                core.breaker.record_failure();

                tracing::error!(
                    engine = %self.name,
                    symbol = %order.symbol(),
                    error = %err,
                    "Venue call failed"
                );
                OrderResult::failed(err.failure_kind(), err.to_string())
            }
        };

        let entry = AuditEntry::order(core.clock.next(), &order, &result);
        append_audit(&*self.audit, &self.name, &entry);

        let outcome = result.failure.map_or("filled", |kind| kind.as_label());
        observability::record_order_outcome(&self.name, outcome);
        observability::record_circuit_state(&self.name, core.breaker.state());
        observability::update_risk_gauges(&self.name, core.risk.daily_trades(), core.risk.exposure());

        result
    }

    /// Send with the optional timeout, turning panics into errors.
    async fn call_venue(&self, order: &OrderRequest) -> Result<OrderResult, VenueError> {
        let call = AssertUnwindSafe(self.venue.send(order)).catch_unwind();

        let outcome = match self.venue_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(outcome) => outcome,
                Err(_) => return Err(VenueError::Timeout { after: limit }),
            },
            None => call.await,
        };

        outcome.unwrap_or_else(|panic| {
            Err(VenueError::Aborted {
                message: format!("venue adapter panicked: {}", panic_message(panic.as_ref())),
            })
        })
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// Append, logging instead of failing. A panicking sink is treated as a
/// failed write so the decision already applied still reaches the caller.
fn append_audit<A: AuditSink + ?Sized>(audit: &A, engine: &str, entry: &AuditEntry) {
    match std::panic::catch_unwind(AssertUnwindSafe(|| audit.append(entry))) {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            tracing::error!(
                engine,
                kind = %entry.kind(),
                error = %err,
                "Audit write failed"
            );
        }
        Err(panic) => {
            tracing::error!(
                engine,
                kind = %entry.kind(),
                panic = %panic_message(panic.as_ref()),
                "Audit sink panicked"
            );
        }
    }
}
