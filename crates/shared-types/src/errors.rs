//! # Error Types
//!
//! Errors shared by the node-management and address-space crates.
//!
//! Batched services never fail as a whole: each per-item error is turned
//! into a status code with [`UaError::status_code`] and placed at the
//! item's index in the result list.

use crate::node_id::NodeId;
use crate::status::StatusCode;
use thiserror::Error;

/// Errors raised by address-space operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UaError {
    /// The node is not present in any contributor.
    #[error("Node not found: {0}")]
    NodeIdUnknown(NodeId),

    /// The method node is missing or not a component of the object.
    #[error("Method invalid: {0}")]
    MethodInvalid(NodeId),

    /// The caller may not perform the operation on the node.
    #[error("Access denied: {0}")]
    AccessDenied(NodeId),

    /// The operation is invalid in the current state.
    #[error("Invalid operation ({status}): {reason}")]
    InvalidOperation {
        /// Status reported for the item.
        status: StatusCode,
        /// Human-readable detail.
        reason: String,
    },

    /// A contributor or handler failed unexpectedly.
    #[error("Internal error: {0}")]
    Internal(String),

    /// A service-level failure with a specific status.
    #[error("Service failure: {0}")]
    Service(StatusCode),
}

impl UaError {
    /// Status code reported for the failed item.
    pub fn status_code(&self) -> StatusCode {
        match self {
            UaError::NodeIdUnknown(_) => StatusCode::BAD_NODE_ID_UNKNOWN,
            UaError::MethodInvalid(_) => StatusCode::BAD_METHOD_INVALID,
            UaError::AccessDenied(_) => StatusCode::BAD_USER_ACCESS_DENIED,
            UaError::InvalidOperation { status, .. } => *status,
            UaError::Internal(_) => StatusCode::BAD_INTERNAL_ERROR,
            UaError::Service(status) => *status,
        }
    }

    /// Shorthand for [`UaError::InvalidOperation`].
    pub fn invalid(status: StatusCode, reason: impl Into<String>) -> Self {
        UaError::InvalidOperation {
            status,
            reason: reason.into(),
        }
    }
}

impl From<StatusCode> for UaError {
    fn from(status: StatusCode) -> Self {
        UaError::Service(status)
    }
}

/// Errors parsing the textual NodeId form (`ns=2;s=Foo`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseNodeIdError {
    /// The text does not follow the `[ns=N;]<t>=<value>` grammar.
    #[error("Malformed NodeId: {0}")]
    Malformed(String),

    /// The namespace index is not a valid u16.
    #[error("Invalid namespace index: {0}")]
    InvalidNamespace(String),
}
