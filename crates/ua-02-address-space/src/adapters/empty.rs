//! # Empty Address Space
//!
//! The fallback contributor of a composite. It claims every NodeId and
//! then has nothing: single-target lookups fail with NodeIdUnknown while
//! best-effort reference lookups succeed empty.

use crate::adapters::simple_filter::SimpleAddressSpaceFilter;
use crate::context::OperationContext;
use crate::ports::{AddressSpace, AddressSpaceFilter};
use async_trait::async_trait;
use shared_types::{
    CallMethodRequest, CallMethodResult, DataValue, HistoryReadDetails, HistoryReadResult,
    HistoryReadValueId, HistoryUpdateDetails, HistoryUpdateResult, NodeId, ReadValueId,
    StatusCode, TimestampsToReturn, UaError, ViewDescription, WriteValue,
};
use tracing::debug;
use ua_01_node_management::Reference;

/// Address space that owns every node and contains none.
#[derive(Debug)]
pub struct EmptyAddressSpace {
    filter: SimpleAddressSpaceFilter,
}

impl EmptyAddressSpace {
    /// Create a sentinel.
    pub fn new() -> Self {
        Self {
            filter: SimpleAddressSpaceFilter::accept_all(),
        }
    }
}

impl Default for EmptyAddressSpace {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AddressSpace for EmptyAddressSpace {
    fn filter(&self) -> &dyn AddressSpaceFilter {
        &self.filter
    }

    async fn browse(
        &self,
        _context: &OperationContext,
        _view: &ViewDescription,
        node_id: &NodeId,
    ) -> Result<Vec<Reference>, UaError> {
        debug!(node_id = %node_id, "[EmptyAddressSpace] browse of unclaimed node");
        Err(UaError::NodeIdUnknown(node_id.clone()))
    }

    async fn get_references(
        &self,
        _context: &OperationContext,
        _view: &ViewDescription,
        _node_id: &NodeId,
    ) -> Result<Vec<Reference>, UaError> {
        Ok(Vec::new())
    }

    async fn read(
        &self,
        _context: &OperationContext,
        _max_age: f64,
        _timestamps: TimestampsToReturn,
        items: Vec<ReadValueId>,
    ) -> Result<Vec<DataValue>, UaError> {
        Ok(items
            .iter()
            .map(|_| DataValue::bad(StatusCode::BAD_NODE_ID_UNKNOWN))
            .collect())
    }

    async fn write(
        &self,
        _context: &OperationContext,
        items: Vec<WriteValue>,
    ) -> Result<Vec<StatusCode>, UaError> {
        Ok(vec![StatusCode::BAD_NODE_ID_UNKNOWN; items.len()])
    }

    async fn call(
        &self,
        _context: &OperationContext,
        items: Vec<CallMethodRequest>,
    ) -> Result<Vec<CallMethodResult>, UaError> {
        Ok(items
            .iter()
            .map(|_| CallMethodResult::bad(StatusCode::BAD_NODE_ID_UNKNOWN))
            .collect())
    }

    async fn history_read(
        &self,
        _context: &OperationContext,
        _details: &HistoryReadDetails,
        _timestamps: TimestampsToReturn,
        items: Vec<HistoryReadValueId>,
    ) -> Result<Vec<HistoryReadResult>, UaError> {
        Ok(items
            .iter()
            .map(|_| HistoryReadResult::bad(StatusCode::BAD_NODE_ID_UNKNOWN))
            .collect())
    }

    async fn history_update(
        &self,
        _context: &OperationContext,
        items: Vec<HistoryUpdateDetails>,
    ) -> Result<Vec<HistoryUpdateResult>, UaError> {
        Ok(items
            .iter()
            .map(|_| HistoryUpdateResult::bad(StatusCode::BAD_NODE_ID_UNKNOWN))
            .collect())
    }

    async fn unregister_nodes(
        &self,
        _context: &OperationContext,
        node_ids: Vec<NodeId>,
    ) -> Result<Vec<StatusCode>, UaError> {
        Ok(vec![StatusCode::BAD_NODE_ID_UNKNOWN; node_ids.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_browse_fails_but_references_succeed() {
        let empty = EmptyAddressSpace::new();
        let context = OperationContext::internal();
        let view = ViewDescription::default();
        let node_id = NodeId::numeric(7, 1);

        assert!(empty.filter().filter_browse(&node_id));
        assert_eq!(
            empty.browse(&context, &view, &node_id).await,
            Err(UaError::NodeIdUnknown(node_id.clone()))
        );
        assert_eq!(empty.get_references(&context, &view, &node_id).await, Ok(vec![]));
    }

    #[tokio::test]
    async fn test_batched_items_unknown() {
        let empty = EmptyAddressSpace::new();
        let context = OperationContext::internal();

        let values = empty
            .read(
                &context,
                0.0,
                TimestampsToReturn::Both,
                vec![ReadValueId::value(NodeId::numeric(1, 1)); 3],
            )
            .await
            .unwrap();
        assert_eq!(values.len(), 3);
        assert!(values.iter().all(|v| v.status == StatusCode::BAD_NODE_ID_UNKNOWN));

        let registered = empty
            .register_nodes(&context, vec![NodeId::numeric(1, 1)])
            .await
            .unwrap();
        assert_eq!(registered, vec![NodeId::numeric(1, 1)]);

        let added = empty.add_nodes(&context, vec![]).await.unwrap();
        assert!(added.is_empty());
    }
}
