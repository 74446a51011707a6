//! Trade Guard Binary
//!
//! Runs the guarded execution pipeline against the paper venue. Reads one
//! JSON order per stdin line and writes one JSON result per stdout line.
//!
//! # Usage
//!
//! ```bash
//! echo '{"symbol":"AAPL","side":"BUY","size":"5","order_type":"LIMIT","price":"187.25"}' \
//!   | cargo run --bin trade-guard
//! ```
//!
//! # Environment Variables
//!
//! - `TRADE_GUARD_CONFIG`: Config file path (default: config.yaml)
//! - `RUST_LOG`: Log filter, overrides `observability.logging.level`

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::{Days, Utc};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::signal;

use trade_guard::config::{self, Config};
use trade_guard::domain::order_execution::{FailureKind, OrderRequest, OrderResult};
use trade_guard::infrastructure::audit::DailyFileAuditLog;
use trade_guard::infrastructure::venue::PaperVenue;
use trade_guard::observability::init_metrics;
use trade_guard::telemetry::init_tracing;
use trade_guard::ExecutionEngine;

/// Concrete engine wired by this binary.
type PaperEngine = ExecutionEngine<PaperVenue, DailyFileAuditLog>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config_path = std::env::var("TRADE_GUARD_CONFIG").ok();
    let config = config::load_config(config_path.as_deref()).context("loading configuration")?;

    init_tracing(&config.observability.logging)?;
    tracing::info!("Starting Trade Guard");

    if config.observability.metrics.enabled {
        init_metrics(&config.observability.metrics.to_metrics_config())?;
    }

    let engine = Arc::new(create_engine(&config)?);
    let reset_task = tokio::spawn(run_daily_reset(Arc::clone(&engine)));

    tokio::select! {
        result = serve_stdin(&engine) => result?,
        () = shutdown_signal() => {}
    }

    reset_task.abort();
    let snapshot = engine.risk_snapshot().await;
    tracing::info!(
        engine = %engine.name(),
        daily_trades = snapshot.daily_trades(),
        exposure = %snapshot.exposure(),
        "Trade Guard stopped"
    );
    Ok(())
}

fn create_engine(config: &Config) -> anyhow::Result<PaperEngine> {
    let engine_config = config.engine_config()?;
    let venue = Arc::new(PaperVenue::new(config.paper_venue.reference_price));
    let audit = Arc::new(
        DailyFileAuditLog::open(&config.audit.directory).context("opening audit directory")?,
    );

    tracing::info!(
        audit_dir = %config.audit.directory.display(),
        reference_price = %venue.reference_price(),
        "Paper venue configured"
    );

    Ok(ExecutionEngine::new(engine_config, venue, audit)?)
}

/// Execute each stdin line as an order until EOF.
async fn serve_stdin(engine: &PaperEngine) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let result = match serde_json::from_str::<OrderRequest>(&line) {
            Ok(order) => engine.execute_order(&order).await,
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable order line");
                OrderResult::failed(FailureKind::Validation, format!("invalid order: {e}"))
            }
        };

        let mut out = serde_json::to_string(&result)?;
        out.push('\n');
        stdout.write_all(out.as_bytes()).await?;
        stdout.flush().await?;
    }

    tracing::info!("Input closed");
    Ok(())
}

/// Reset the daily counters at every UTC midnight.
async fn run_daily_reset(engine: Arc<PaperEngine>) {
    loop {
        tokio::time::sleep(until_next_utc_midnight()).await;
        engine.reset_daily().await;
    }
}

fn until_next_utc_midnight() -> Duration {
    let now = Utc::now();
    now.date_naive()
        .checked_add_days(Days::new(1))
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .and_then(|midnight| (midnight.and_utc() - now).to_std().ok())
        .unwrap_or(Duration::from_secs(60))
}

fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// A handler that cannot be installed never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
