//! # Domain Errors
//!
//! Errors raised by attribute access on a single node.

use shared_types::{AttributeId, NodeClass, NodeId, StatusCode};
use thiserror::Error;

/// Errors from reading or writing a node attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    /// The attribute is not defined for this node class, or not set.
    #[error("Attribute {attribute:?} invalid for {node_class:?} node")]
    AttributeInvalid {
        /// Requested attribute.
        attribute: AttributeId,
        /// Class of the node.
        node_class: NodeClass,
    },

    /// The Value attribute's AccessLevel lacks CurrentRead.
    #[error("Value of {0} is not readable")]
    NotReadable(NodeId),

    /// The attribute is fixed or the AccessLevel lacks CurrentWrite.
    #[error("Attribute {attribute:?} of {node_id} is not writable")]
    NotWritable {
        /// Node written to.
        node_id: NodeId,
        /// Attribute written to.
        attribute: AttributeId,
    },

    /// The written value does not match the node's DataType.
    #[error("Type mismatch: expected {expected}, got {actual:?}")]
    TypeMismatch {
        /// The node's DataType.
        expected: NodeId,
        /// Built-in type of the written value.
        actual: Option<NodeId>,
    },
}

impl NodeError {
    /// Status code reported for the failed item.
    pub fn status_code(&self) -> StatusCode {
        match self {
            NodeError::AttributeInvalid { .. } => StatusCode::BAD_ATTRIBUTE_ID_INVALID,
            NodeError::NotReadable(_) => StatusCode::BAD_NOT_READABLE,
            NodeError::NotWritable { .. } => StatusCode::BAD_NOT_WRITABLE,
            NodeError::TypeMismatch { .. } => StatusCode::BAD_TYPE_MISMATCH,
        }
    }
}
