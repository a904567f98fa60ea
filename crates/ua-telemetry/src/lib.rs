//! # UA Telemetry
//!
//! Logging and metrics for the address-space routing core.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` with an `EnvFilter`, pretty or JSON output
//! - **Metrics**: Prometheus counters and histograms for routing outcomes
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ua_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).expect("telemetry");
//!     // Address-space operations now log and count
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` / `UA_SERVICE_NAME` | `ua-address-space` | Service name in logs |
//! | `UA_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `UA_JSON_LOGS` | `false` (`true` in containers) | JSON log output |
//! | `UA_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

#![warn(missing_docs)]

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    record_batch, register_metrics, MetricsHandle, BATCH_SIZE, CONTRIBUTOR_FAILURES,
    METHOD_CALLS, OPERATIONS_TOTAL, REFERENCES_INVERTED, ROUTING_MISSES,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A global subscriber is already installed.
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    /// Metric registration or encoding failed.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// The configuration could not be applied.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that should be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Metrics first: counters are usable even if logging fails
    let metrics = register_metrics()?;

    init_logging(&config)?;

    Ok(TelemetryGuard { metrics, config })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    metrics: MetricsHandle,
    config: TelemetryConfig,
}

impl TelemetryGuard {
    /// Handle for scraping metrics.
    pub fn metrics(&self) -> &MetricsHandle {
        &self.metrics
    }

    /// The configuration telemetry was initialized with.
    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.config.service_name, "Shutting down telemetry...");
    }
}
