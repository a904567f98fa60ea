//! Configuration for the Address Space Subsystem

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A per-service limit was set to zero.
    #[error("Limit {0} must be greater than zero")]
    ZeroLimit(&'static str),
}

/// Per-service operation limits.
///
/// A batch larger than its limit is rejected as a whole with
/// `Bad_TooManyOperations`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSpaceConfig {
    /// Maximum items per Read request
    pub max_nodes_per_read: usize,
    /// Maximum items per Write request
    pub max_nodes_per_write: usize,
    /// Maximum items per Call request
    pub max_nodes_per_method_call: usize,
    /// Maximum items per AddNodes/DeleteNodes/AddReferences/DeleteReferences request
    pub max_nodes_per_node_management: usize,
    /// Maximum items per HistoryRead/HistoryUpdate request
    pub max_nodes_per_history: usize,
    /// Maximum items per RegisterNodes/UnregisterNodes request
    pub max_nodes_per_register: usize,
}

impl Default for AddressSpaceConfig {
    fn default() -> Self {
        Self {
            max_nodes_per_read: 10_000,
            max_nodes_per_write: 10_000,
            max_nodes_per_method_call: 1_000,
            max_nodes_per_node_management: 1_000,
            max_nodes_per_history: 1_000,
            max_nodes_per_register: 10_000,
        }
    }
}

impl AddressSpaceConfig {
    /// Small limits for tests.
    pub fn for_testing() -> Self {
        Self {
            max_nodes_per_read: 100,
            max_nodes_per_write: 100,
            max_nodes_per_method_call: 10,
            max_nodes_per_node_management: 10,
            max_nodes_per_history: 10,
            max_nodes_per_register: 100,
        }
    }

    /// Create configuration from environment variables, falling back to
    /// the defaults for unset or unparsable values.
    ///
    /// # Environment Variables
    ///
    /// - `UA_MAX_NODES_PER_READ` (default: 10000)
    /// - `UA_MAX_NODES_PER_WRITE` (default: 10000)
    /// - `UA_MAX_NODES_PER_METHOD_CALL` (default: 1000)
    /// - `UA_MAX_NODES_PER_NODE_MANAGEMENT` (default: 1000)
    /// - `UA_MAX_NODES_PER_HISTORY` (default: 1000)
    /// - `UA_MAX_NODES_PER_REGISTER` (default: 10000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_nodes_per_read: env_limit("UA_MAX_NODES_PER_READ", defaults.max_nodes_per_read),
            max_nodes_per_write: env_limit("UA_MAX_NODES_PER_WRITE", defaults.max_nodes_per_write),
            max_nodes_per_method_call: env_limit(
                "UA_MAX_NODES_PER_METHOD_CALL",
                defaults.max_nodes_per_method_call,
            ),
            max_nodes_per_node_management: env_limit(
                "UA_MAX_NODES_PER_NODE_MANAGEMENT",
                defaults.max_nodes_per_node_management,
            ),
            max_nodes_per_history: env_limit(
                "UA_MAX_NODES_PER_HISTORY",
                defaults.max_nodes_per_history,
            ),
            max_nodes_per_register: env_limit(
                "UA_MAX_NODES_PER_REGISTER",
                defaults.max_nodes_per_register,
            ),
        }
    }

    /// Reject zero limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            ("max_nodes_per_read", self.max_nodes_per_read),
            ("max_nodes_per_write", self.max_nodes_per_write),
            ("max_nodes_per_method_call", self.max_nodes_per_method_call),
            ("max_nodes_per_node_management", self.max_nodes_per_node_management),
            ("max_nodes_per_history", self.max_nodes_per_history),
            ("max_nodes_per_register", self.max_nodes_per_register),
        ];
        match limits.iter().find(|(_, value)| *value == 0) {
            Some((name, _)) => Err(ConfigError::ZeroLimit(*name)),
            None => Ok(()),
        }
    }
}

fn env_limit(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
