//! # Address Space Filter Port
//!
//! A filter answers "would this address space own the item if it
//! existed". The composite asks it before routing; it never checks that
//! the node is actually present.

use shared_types::{
    AddNodesItem, AddReferencesItem, CallMethodRequest, DataItem, DeleteNodesItem,
    DeleteReferencesItem, EventItem, HistoryReadValueId, HistoryUpdateDetails, MonitoredItem,
    NodeId, ReadValueId, WriteValue,
};

/// Ownership predicates, one per operation kind.
pub trait AddressSpaceFilter: Send + Sync {
    /// Browse and reference lookups of `node_id`.
    fn filter_browse(&self, node_id: &NodeId) -> bool;

    /// One Read item.
    fn filter_read(&self, item: &ReadValueId) -> bool;

    /// One Write item.
    fn filter_write(&self, item: &WriteValue) -> bool;

    /// One HistoryRead item.
    fn filter_history_read(&self, item: &HistoryReadValueId) -> bool;

    /// One HistoryUpdate item.
    fn filter_history_update(&self, item: &HistoryUpdateDetails) -> bool;

    /// One Call item.
    fn filter_call(&self, item: &CallMethodRequest) -> bool;

    /// One RegisterNodes item.
    fn filter_register_node(&self, node_id: &NodeId) -> bool;

    /// One UnregisterNodes item.
    fn filter_unregister_node(&self, node_id: &NodeId) -> bool;

    /// A data item was created.
    fn filter_on_create_data_item(&self, item: &DataItem) -> bool;

    /// A data item was modified.
    fn filter_on_modify_data_item(&self, item: &DataItem) -> bool;

    /// A data item was deleted.
    fn filter_on_delete_data_item(&self, item: &DataItem) -> bool;

    /// An event item was created.
    fn filter_on_create_event_item(&self, item: &EventItem) -> bool;

    /// An event item was modified.
    fn filter_on_modify_event_item(&self, item: &EventItem) -> bool;

    /// An event item was deleted.
    fn filter_on_delete_event_item(&self, item: &EventItem) -> bool;

    /// A monitored item's mode changed.
    fn filter_on_monitoring_mode_changed(&self, item: &dyn MonitoredItem) -> bool;

    /// One AddNodes item.
    fn filter_add_node(&self, item: &AddNodesItem) -> bool;

    /// One DeleteNodes item.
    fn filter_delete_node(&self, item: &DeleteNodesItem) -> bool;

    /// One AddReferences item.
    fn filter_add_reference(&self, item: &AddReferencesItem) -> bool;

    /// One DeleteReferences item.
    fn filter_delete_reference(&self, item: &DeleteReferencesItem) -> bool;
}
