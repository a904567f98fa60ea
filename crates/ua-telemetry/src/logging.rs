//! Structured logging.
//!
//! Log lines carry consistent fields so they can be filtered downstream:
//! - `component`: routing component (composite, node_manager, managed, ...)
//! - `node_id`: the node an event concerns, when there is one
//! - `operation`: the service operation (read, write, browse, ...)
//! - additional context fields

use crate::{TelemetryConfig, TelemetryError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global `tracing` subscriber.
///
/// Fails with [`TelemetryError::SubscriberInit`] when a global subscriber is
/// already installed, so calling it twice is harmless.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Config(e.to_string()))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match (config.console_output, config.json_logs) {
        (true, true) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init(),
        (true, false) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .try_init(),
        (false, _) => registry.try_init(),
    };
    result.map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;

    tracing::info!(
        service = %config.service_name,
        log_level = %config.log_level,
        json_logs = config.json_logs,
        "Structured logging initialized"
    );

    Ok(())
}

/// Emit a structured log entry tagged with a component.
///
/// ```rust,ignore
/// log_event!(info, "composite", "Address space registered", contributors = 3);
/// ```
#[macro_export]
macro_rules! log_event {
    ($level:ident, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a node-related event with standard fields.
#[macro_export]
macro_rules! log_node_event {
    ($level:ident, $component:expr, $msg:expr, $node_id:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            node_id = %$node_id,
            $($($field)*,)?
            $msg
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_is_config_error() {
        let config = TelemetryConfig {
            log_level: "ua=notalevel".to_string(),
            ..TelemetryConfig::for_testing()
        };
        assert!(matches!(
            init_logging(&config),
            Err(TelemetryError::Config(_))
        ));
    }

    #[test]
    fn test_macros_expand() {
        let node = "ns=2;i=7";
        crate::log_event!(debug, "test", "plain event");
        crate::log_event!(debug, "test", "event with fields", items = 3);
        crate::log_node_event!(debug, "test", "node event", node, operation = "read");
    }
}
