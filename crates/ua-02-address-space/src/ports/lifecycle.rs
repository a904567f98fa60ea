//! Startup/shutdown contract for components registered at runtime.

use async_trait::async_trait;
use thiserror::Error;

/// Lifecycle failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// A component failed to start.
    #[error("[{component}] startup failed: {reason}")]
    Startup {
        /// Component name.
        component: String,
        /// Failure detail.
        reason: String,
    },

    /// A component failed to stop cleanly.
    #[error("[{component}] shutdown failed: {reason}")]
    Shutdown {
        /// Component name.
        component: String,
        /// Failure detail.
        reason: String,
    },

    /// `startup` was called on a running component.
    #[error("[{0}] already started")]
    AlreadyStarted(String),

    /// `shutdown` was called on a stopped component.
    #[error("[{0}] not started")]
    NotStarted(String),
}

/// A component with explicit startup and shutdown.
#[async_trait]
pub trait Lifecycle: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Bring the component up.
    async fn startup(&self) -> Result<(), LifecycleError>;

    /// Tear the component down.
    async fn shutdown(&self) -> Result<(), LifecycleError>;
}
