//! # Simple Address Space Filter
//!
//! Reduces every ownership question to a NodeId predicate, plus an
//! optional predicate for monitored items.

use crate::ports::AddressSpaceFilter;
use shared_types::{
    AddNodesItem, AddReferencesItem, CallMethodRequest, DataItem, DeleteNodesItem,
    DeleteReferencesItem, EventItem, HistoryReadValueId, HistoryUpdateDetails, MonitoredItem,
    NamespaceTable, NodeId, ReadValueId, WriteValue,
};
use std::sync::Arc;

type NodePredicate = Arc<dyn Fn(&NodeId) -> bool + Send + Sync>;
type ItemPredicate = Arc<dyn Fn(&dyn MonitoredItem) -> bool + Send + Sync>;

/// Filter driven by a NodeId predicate.
///
/// For AddNodes the requested new NodeId decides when it is non-null and
/// local; otherwise the parent does. References are routed by their
/// source node and calls by their object.
#[derive(Clone)]
pub struct SimpleAddressSpaceFilter {
    node_predicate: NodePredicate,
    item_predicate: Option<ItemPredicate>,
    namespaces: Arc<NamespaceTable>,
}

impl SimpleAddressSpaceFilter {
    /// Own every NodeId accepted by `predicate`.
    pub fn new(predicate: impl Fn(&NodeId) -> bool + Send + Sync + 'static) -> Self {
        Self {
            node_predicate: Arc::new(predicate),
            item_predicate: None,
            namespaces: Arc::new(NamespaceTable::new()),
        }
    }

    /// Own every NodeId in namespace `index`.
    pub fn namespace(index: u16) -> Self {
        Self::new(move |node_id| node_id.namespace == index)
    }

    /// Own everything.
    pub fn accept_all() -> Self {
        Self::new(|_| true)
    }

    /// Use a dedicated predicate for monitored items instead of applying
    /// the NodeId predicate to the monitored node.
    pub fn with_item_predicate(
        mut self,
        predicate: impl Fn(&dyn MonitoredItem) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.item_predicate = Some(Arc::new(predicate));
        self
    }

    /// Resolve namespace URIs of expanded NodeIds through `namespaces`.
    pub fn with_namespaces(mut self, namespaces: Arc<NamespaceTable>) -> Self {
        self.namespaces = namespaces;
        self
    }

    fn owns(&self, node_id: &NodeId) -> bool {
        (self.node_predicate)(node_id)
    }

    fn owns_item(&self, item: &dyn MonitoredItem) -> bool {
        match &self.item_predicate {
            Some(predicate) => predicate(item),
            None => self.owns(&item.read_value_id().node_id),
        }
    }

    /// NodeId an AddNodes item is routed by.
    fn add_node_target(&self, item: &AddNodesItem) -> Option<NodeId> {
        if !item.requested_new_node_id.is_null() {
            if let Some(requested) = item.requested_new_node_id.to_local(&self.namespaces) {
                return Some(requested);
            }
        }
        item.parent_node_id.to_local(&self.namespaces)
    }
}

impl std::fmt::Debug for SimpleAddressSpaceFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleAddressSpaceFilter")
            .field("item_predicate", &self.item_predicate.is_some())
            .finish()
    }
}

impl AddressSpaceFilter for SimpleAddressSpaceFilter {
    fn filter_browse(&self, node_id: &NodeId) -> bool {
        self.owns(node_id)
    }

    fn filter_read(&self, item: &ReadValueId) -> bool {
        self.owns(&item.node_id)
    }

    fn filter_write(&self, item: &WriteValue) -> bool {
        self.owns(&item.node_id)
    }

    fn filter_history_read(&self, item: &HistoryReadValueId) -> bool {
        self.owns(&item.node_id)
    }

    fn filter_history_update(&self, item: &HistoryUpdateDetails) -> bool {
        self.owns(&item.node_id)
    }

    fn filter_call(&self, item: &CallMethodRequest) -> bool {
        self.owns(&item.object_id)
    }

    fn filter_register_node(&self, node_id: &NodeId) -> bool {
        self.owns(node_id)
    }

    fn filter_unregister_node(&self, node_id: &NodeId) -> bool {
        self.owns(node_id)
    }

    fn filter_on_create_data_item(&self, item: &DataItem) -> bool {
        self.owns_item(item)
    }

    fn filter_on_modify_data_item(&self, item: &DataItem) -> bool {
        self.owns_item(item)
    }

    fn filter_on_delete_data_item(&self, item: &DataItem) -> bool {
        self.owns_item(item)
    }

    fn filter_on_create_event_item(&self, item: &EventItem) -> bool {
        self.owns_item(item)
    }

    fn filter_on_modify_event_item(&self, item: &EventItem) -> bool {
        self.owns_item(item)
    }

    fn filter_on_delete_event_item(&self, item: &EventItem) -> bool {
        self.owns_item(item)
    }

    fn filter_on_monitoring_mode_changed(&self, item: &dyn MonitoredItem) -> bool {
        self.owns_item(item)
    }

    fn filter_add_node(&self, item: &AddNodesItem) -> bool {
        self.add_node_target(item)
            .map(|node_id| self.owns(&node_id))
            .unwrap_or(false)
    }

    fn filter_delete_node(&self, item: &DeleteNodesItem) -> bool {
        self.owns(&item.node_id)
    }

    fn filter_add_reference(&self, item: &AddReferencesItem) -> bool {
        self.owns(&item.source_node_id)
    }

    fn filter_delete_reference(&self, item: &DeleteReferencesItem) -> bool {
        self.owns(&item.source_node_id)
    }
}
