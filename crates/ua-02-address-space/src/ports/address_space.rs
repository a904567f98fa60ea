//! # Address Space Port
//!
//! The service façade of one contributor. Batched operations return one
//! result per request item, in request order; a per-item failure is a
//! status inside the list. An `Err` from a batched operation means the
//! contributor could not process the group at all.

use crate::context::OperationContext;
use crate::ports::filter::AddressSpaceFilter;
use async_trait::async_trait;
use shared_types::{
    AddNodesItem, AddNodesResult, AddReferencesItem, CallMethodRequest, CallMethodResult,
    DataItem, DataValue, DeleteNodesItem, DeleteReferencesItem, EventItem, HistoryReadDetails,
    HistoryReadResult, HistoryReadValueId, HistoryUpdateDetails, HistoryUpdateResult,
    MonitoredItem, NodeId, ReadValueId, StatusCode, TimestampsToReturn, UaError,
    ViewDescription, WriteValue,
};
use std::sync::Arc;
use ua_01_node_management::Reference;

/// Service entry points of an address space.
#[async_trait]
pub trait AddressSpace: Send + Sync {
    /// Ownership predicates used to route requests here.
    fn filter(&self) -> &dyn AddressSpaceFilter;

    /// References of an existing node.
    ///
    /// Fails with [`UaError::NodeIdUnknown`] when the node does not exist.
    async fn browse(
        &self,
        context: &OperationContext,
        view: &ViewDescription,
        node_id: &NodeId,
    ) -> Result<Vec<Reference>, UaError>;

    /// References this address space knows for `node_id`.
    ///
    /// Best effort: an unknown node yields an empty list.
    async fn get_references(
        &self,
        context: &OperationContext,
        view: &ViewDescription,
        node_id: &NodeId,
    ) -> Result<Vec<Reference>, UaError>;

    /// Read attributes.
    async fn read(
        &self,
        context: &OperationContext,
        max_age: f64,
        timestamps: TimestampsToReturn,
        items: Vec<ReadValueId>,
    ) -> Result<Vec<DataValue>, UaError>;

    /// Write attributes.
    async fn write(
        &self,
        context: &OperationContext,
        items: Vec<WriteValue>,
    ) -> Result<Vec<StatusCode>, UaError>;

    /// Invoke methods.
    async fn call(
        &self,
        context: &OperationContext,
        items: Vec<CallMethodRequest>,
    ) -> Result<Vec<CallMethodResult>, UaError>;

    /// Read history. Unsupported unless overridden.
    async fn history_read(
        &self,
        _context: &OperationContext,
        _details: &HistoryReadDetails,
        _timestamps: TimestampsToReturn,
        items: Vec<HistoryReadValueId>,
    ) -> Result<Vec<HistoryReadResult>, UaError> {
        Ok(items
            .iter()
            .map(|_| HistoryReadResult::bad(StatusCode::BAD_HISTORY_OPERATION_UNSUPPORTED))
            .collect())
    }

    /// Update history. Unsupported unless overridden.
    async fn history_update(
        &self,
        _context: &OperationContext,
        items: Vec<HistoryUpdateDetails>,
    ) -> Result<Vec<HistoryUpdateResult>, UaError> {
        Ok(items
            .iter()
            .map(|_| HistoryUpdateResult::bad(StatusCode::BAD_HISTORY_OPERATION_UNSUPPORTED))
            .collect())
    }

    /// Register nodes for repeated access. Echoes the ids by default.
    async fn register_nodes(
        &self,
        _context: &OperationContext,
        node_ids: Vec<NodeId>,
    ) -> Result<Vec<NodeId>, UaError> {
        Ok(node_ids)
    }

    /// Release registered nodes.
    async fn unregister_nodes(
        &self,
        _context: &OperationContext,
        node_ids: Vec<NodeId>,
    ) -> Result<Vec<StatusCode>, UaError> {
        Ok(vec![StatusCode::GOOD; node_ids.len()])
    }

    /// Create nodes. Unsupported unless overridden.
    async fn add_nodes(
        &self,
        _context: &OperationContext,
        items: Vec<AddNodesItem>,
    ) -> Result<Vec<AddNodesResult>, UaError> {
        Ok(items
            .iter()
            .map(|_| AddNodesResult::bad(StatusCode::BAD_NOT_SUPPORTED))
            .collect())
    }

    /// Delete nodes. Unsupported unless overridden.
    async fn delete_nodes(
        &self,
        _context: &OperationContext,
        items: Vec<DeleteNodesItem>,
    ) -> Result<Vec<StatusCode>, UaError> {
        Ok(vec![StatusCode::BAD_NOT_SUPPORTED; items.len()])
    }

    /// Add references. Unsupported unless overridden.
    async fn add_references(
        &self,
        _context: &OperationContext,
        items: Vec<AddReferencesItem>,
    ) -> Result<Vec<StatusCode>, UaError> {
        Ok(vec![StatusCode::BAD_NOT_SUPPORTED; items.len()])
    }

    /// Delete references. Unsupported unless overridden.
    async fn delete_references(
        &self,
        _context: &OperationContext,
        items: Vec<DeleteReferencesItem>,
    ) -> Result<Vec<StatusCode>, UaError> {
        Ok(vec![StatusCode::BAD_NOT_SUPPORTED; items.len()])
    }

    /// Data items were created on nodes owned here.
    fn on_data_items_created(&self, _items: &[DataItem]) {}

    /// Data items owned here were modified.
    fn on_data_items_modified(&self, _items: &[DataItem]) {}

    /// Data items owned here were deleted.
    fn on_data_items_deleted(&self, _items: &[DataItem]) {}

    /// Event items were created on notifiers owned here.
    fn on_event_items_created(&self, _items: &[EventItem]) {}

    /// Event items owned here were modified.
    fn on_event_items_modified(&self, _items: &[EventItem]) {}

    /// Event items owned here were deleted.
    fn on_event_items_deleted(&self, _items: &[EventItem]) {}

    /// Items owned here changed monitoring mode.
    fn on_monitoring_mode_changed(&self, _items: &[Arc<dyn MonitoredItem>]) {}
}
