//! Telemetry configuration from environment variables.

use serde::{Deserialize, Serialize};
use std::env;

/// Logging settings; metrics need none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Value of the `service` field logged at startup.
    pub service_name: String,
    /// `EnvFilter` directive, e.g. `info` or `ua_02_address_space=debug`.
    pub log_level: String,
    /// Install a fmt layer at all.
    pub console_output: bool,
    /// Emit JSON lines instead of human-readable text.
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "ua-address-space".into(),
            log_level: "info".into(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Read `UA_*` variables, keeping the default for anything unset.
    ///
    /// | Variable | Meaning |
    /// |----------|---------|
    /// | `UA_SERVICE_NAME` | service field on every line |
    /// | `UA_LOG_LEVEL` | `EnvFilter` directive, falls back to `RUST_LOG` |
    /// | `UA_CONSOLE_OUTPUT` | `0`/`false`/`off` silences the fmt layer |
    /// | `UA_LOG_FORMAT` | `json` or `text` |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let log_level = env::var("UA_LOG_LEVEL")
            .or_else(|_| env::var("RUST_LOG"))
            .unwrap_or(defaults.log_level);

        Self {
            service_name: env::var("UA_SERVICE_NAME").unwrap_or(defaults.service_name),
            log_level,
            console_output: env::var("UA_CONSOLE_OUTPUT")
                .map(|v| parse_flag(&v, defaults.console_output))
                .unwrap_or(defaults.console_output),
            json_logs: env::var("UA_LOG_FORMAT")
                .map(|format| format.eq_ignore_ascii_case("json"))
                .unwrap_or(defaults.json_logs),
        }
    }

    /// Silent configuration for tests.
    pub fn for_testing() -> Self {
        Self {
            service_name: "ua-address-space-test".into(),
            log_level: "warn".into(),
            console_output: false,
            json_logs: false,
        }
    }
}

fn parse_flag(value: &str, default: bool) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" => true,
        "0" | "false" | "off" => false,
        _ => default,
    }
}
