//! # Service Request Items
//!
//! Already-deserialized per-item request and result shapes for the
//! attribute, view, method, history and node-management service sets
//! (OPC UA Part 4). Batches are plain `Vec`s of these items; results are
//! returned with 1:1 index correspondence.

use crate::attributes::{NodeClass, QualifiedName};
use crate::node_id::{ExpandedNodeId, NodeId};
use crate::status::StatusCode;
use crate::variant::{DataValue, Variant};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which timestamps a Read should return.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimestampsToReturn {
    /// Source timestamp only.
    Source,
    /// Server timestamp only.
    Server,
    /// Both timestamps.
    #[default]
    Both,
    /// No timestamps.
    Neither,
}

/// One item of a Read request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReadValueId {
    /// Node to read.
    pub node_id: NodeId,
    /// Raw attribute id.
    pub attribute_id: u32,
    /// Optional NumericRange (`"3"` or `"1:4"`).
    pub index_range: Option<String>,
    /// Optional data encoding.
    pub data_encoding: Option<QualifiedName>,
}

impl ReadValueId {
    /// Read one attribute with no range or encoding.
    pub fn new(node_id: NodeId, attribute_id: crate::AttributeId) -> Self {
        Self {
            node_id,
            attribute_id: attribute_id as u32,
            index_range: None,
            data_encoding: None,
        }
    }

    /// Read the Value attribute.
    pub fn value(node_id: NodeId) -> Self {
        Self::new(node_id, crate::AttributeId::Value)
    }
}

/// One item of a Write request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WriteValue {
    /// Node to write.
    pub node_id: NodeId,
    /// Raw attribute id.
    pub attribute_id: u32,
    /// Optional NumericRange.
    pub index_range: Option<String>,
    /// Value to write.
    pub value: DataValue,
}

impl WriteValue {
    /// Write one attribute.
    pub fn new(node_id: NodeId, attribute_id: crate::AttributeId, value: DataValue) -> Self {
        Self {
            node_id,
            attribute_id: attribute_id as u32,
            index_range: None,
            value,
        }
    }
}

/// View restriction for browse.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewDescription {
    /// The view node; null for the whole address space.
    pub view_id: NodeId,
    /// Point in time of the view.
    pub timestamp: Option<DateTime<Utc>>,
    /// Version of the view.
    pub view_version: u32,
}

impl ViewDescription {
    /// True when no view restriction applies.
    pub fn is_default(&self) -> bool {
        self.view_id.is_null()
    }
}

/// One item of a Call request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CallMethodRequest {
    /// Object (or ObjectType) the method is called on.
    pub object_id: NodeId,
    /// Method node.
    pub method_id: NodeId,
    /// Input arguments.
    pub input_arguments: Vec<Variant>,
}

/// Result of one Call item.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct CallMethodResult {
    /// Overall status of the call.
    pub status_code: StatusCode,
    /// Per-argument validation results.
    pub input_argument_results: Vec<StatusCode>,
    /// Output arguments.
    pub output_arguments: Vec<Variant>,
}

impl CallMethodResult {
    /// A successful result.
    pub fn good(output_arguments: Vec<Variant>) -> Self {
        Self {
            status_code: StatusCode::GOOD,
            input_argument_results: Vec::new(),
            output_arguments,
        }
    }

    /// A failed result carrying only a status.
    pub fn bad(status_code: StatusCode) -> Self {
        Self {
            status_code,
            ..Default::default()
        }
    }
}

/// History read details shared by all items of one request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum HistoryReadDetails {
    /// Raw or modified values in a time window.
    RawModified {
        /// Window start.
        start_time: Option<DateTime<Utc>>,
        /// Window end.
        end_time: Option<DateTime<Utc>>,
        /// Maximum values per node, 0 for no limit.
        num_values_per_node: u32,
        /// Read modified values instead of raw.
        is_read_modified: bool,
    },
    /// Interpolated values at specific times.
    AtTime {
        /// Requested timestamps.
        req_times: Vec<DateTime<Utc>>,
    },
}

/// One item of a HistoryRead request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryReadValueId {
    /// Node whose history is read.
    pub node_id: NodeId,
    /// Optional NumericRange.
    pub index_range: Option<String>,
    /// Continuation point from a previous call.
    pub continuation_point: Option<Vec<u8>>,
}

/// Result of one HistoryRead item.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoryReadResult {
    /// Status of the item.
    pub status_code: StatusCode,
    /// Continuation point if more data is available.
    pub continuation_point: Option<Vec<u8>>,
    /// Historical values.
    pub history_data: Vec<DataValue>,
}

impl HistoryReadResult {
    /// A failed result carrying only a status.
    pub fn bad(status_code: StatusCode) -> Self {
        Self {
            status_code,
            ..Default::default()
        }
    }
}

/// One item of a HistoryUpdate request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryUpdateDetails {
    /// Node whose history is updated.
    pub node_id: NodeId,
    /// Values to insert/replace.
    pub update_values: Vec<DataValue>,
}

/// Result of one HistoryUpdate item.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoryUpdateResult {
    /// Status of the item.
    pub status_code: StatusCode,
    /// Per-value results.
    pub operation_results: Vec<StatusCode>,
}

impl HistoryUpdateResult {
    /// A failed result carrying only a status.
    pub fn bad(status_code: StatusCode) -> Self {
        Self {
            status_code,
            ..Default::default()
        }
    }
}

/// One item of an AddNodes request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AddNodesItem {
    /// Parent of the new node.
    pub parent_node_id: ExpandedNodeId,
    /// Reference type from parent to new node.
    pub reference_type_id: NodeId,
    /// NodeId requested by the client; null to let the server choose.
    pub requested_new_node_id: ExpandedNodeId,
    /// BrowseName of the new node.
    pub browse_name: QualifiedName,
    /// Class of the new node.
    pub node_class: NodeClass,
    /// Type definition of the new node.
    pub type_definition: ExpandedNodeId,
}

/// Result of one AddNodes item.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AddNodesResult {
    /// Status of the item.
    pub status_code: StatusCode,
    /// NodeId assigned to the new node.
    pub added_node_id: NodeId,
}

impl AddNodesResult {
    /// A failed result carrying only a status.
    pub fn bad(status_code: StatusCode) -> Self {
        Self {
            status_code,
            added_node_id: NodeId::NULL,
        }
    }
}

/// One item of a DeleteNodes request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeleteNodesItem {
    /// Node to delete.
    pub node_id: NodeId,
    /// Also delete references that point away from the node.
    pub delete_target_references: bool,
}

/// One item of an AddReferences request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddReferencesItem {
    /// Source of the new reference.
    pub source_node_id: NodeId,
    /// Reference type.
    pub reference_type_id: NodeId,
    /// Direction relative to the source.
    pub is_forward: bool,
    /// URI of a remote target server, if any.
    pub target_server_uri: Option<String>,
    /// Target of the new reference.
    pub target_node_id: ExpandedNodeId,
    /// Class of the target.
    pub target_node_class: NodeClass,
}

/// One item of a DeleteReferences request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeleteReferencesItem {
    /// Source of the reference.
    pub source_node_id: NodeId,
    /// Reference type.
    pub reference_type_id: NodeId,
    /// Direction relative to the source.
    pub is_forward: bool,
    /// Target of the reference.
    pub target_node_id: ExpandedNodeId,
    /// Also delete the opposite-direction reference on the target.
    pub delete_bidirectional: bool,
}
