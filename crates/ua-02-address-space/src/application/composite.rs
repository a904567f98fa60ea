//! # Address Space Composite
//!
//! Routes every request to the contributor that claims it.
//!
//! - Single-target (`browse`): the first contributor whose filter claims
//!   the node, else the composite's own empty sentinel.
//! - Batched: each item goes to the first claiming contributor (sentinel
//!   otherwise); groups run concurrently and results come back in request
//!   order. A contributor failing its whole group yields the error's
//!   status for each of its items.
//! - Fan-out (`get_references`): every contributor, failures ignored,
//!   results de-duplicated in first-seen order.

use crate::adapters::{EmptyAddressSpace, SimpleAddressSpaceFilter};
use crate::algorithms::group_map_collate_lenient;
use crate::context::OperationContext;
use crate::ports::{AddressSpace, AddressSpaceFilter};
use async_trait::async_trait;
use futures::future::join_all;
use parking_lot::RwLock;
use shared_types::{
    AddNodesItem, AddNodesResult, AddReferencesItem, CallMethodRequest, CallMethodResult,
    DataItem, DataValue, DeleteNodesItem, DeleteReferencesItem, EventItem, HistoryReadDetails,
    HistoryReadResult, HistoryReadValueId, HistoryUpdateDetails, HistoryUpdateResult,
    MonitoredItem, NodeId, ReadValueId, StatusCode, TimestampsToReturn, UaError,
    ViewDescription, WriteValue,
};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};
use ua_01_node_management::{dedup_references, Reference};
use ua_telemetry::{log_event, record_batch, CONTRIBUTOR_FAILURES, ROUTING_MISSES};

/// Identity comparison of trait objects, ignoring vtables.
pub(crate) fn same_instance<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

/// Router over registered address spaces.
pub struct AddressSpaceComposite {
    address_spaces: RwLock<Vec<Arc<dyn AddressSpace>>>,
    empty: Arc<EmptyAddressSpace>,
    filter: SimpleAddressSpaceFilter,
}

impl AddressSpaceComposite {
    /// A composite with no contributors.
    pub fn new() -> Self {
        Self {
            address_spaces: RwLock::new(Vec::new()),
            empty: Arc::new(EmptyAddressSpace::new()),
            filter: SimpleAddressSpaceFilter::accept_all(),
        }
    }

    /// Append a contributor. Returns false if it is already registered.
    pub fn register(&self, address_space: Arc<dyn AddressSpace>) -> bool {
        let mut spaces = self.address_spaces.write();
        if spaces.iter().any(|s| same_instance(s, &address_space)) {
            return false;
        }
        spaces.push(address_space);
        info!(contributors = spaces.len(), "[Composite] address space registered");
        true
    }

    /// Remove a contributor. Returns false if it was not registered.
    pub fn unregister(&self, address_space: &Arc<dyn AddressSpace>) -> bool {
        let mut spaces = self.address_spaces.write();
        let before = spaces.len();
        spaces.retain(|s| !same_instance(s, address_space));
        let removed = spaces.len() != before;
        if removed {
            info!(contributors = spaces.len(), "[Composite] address space unregistered");
        }
        removed
    }

    /// Contributors in registration order.
    pub fn address_spaces(&self) -> Vec<Arc<dyn AddressSpace>> {
        self.address_spaces.read().clone()
    }

    /// Number of contributors.
    pub fn len(&self) -> usize {
        self.address_spaces.read().len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.address_spaces.read().is_empty()
    }

    /// Route a batch by per-item ownership and collate the results.
    ///
    /// Ownership is decided before the returned future is polled.
    fn route<T, R, P, MF, Fut, FF>(
        &self,
        operation: &'static str,
        items: Vec<T>,
        claims: P,
        mut dispatch: MF,
        on_failure: FF,
    ) -> impl Future<Output = Vec<R>>
    where
        P: Fn(&dyn AddressSpaceFilter, &T) -> bool,
        MF: FnMut(Arc<dyn AddressSpace>, Vec<T>) -> Fut,
        Fut: Future<Output = Result<Vec<R>, UaError>>,
        FF: Fn(&UaError) -> R,
    {
        record_batch(operation, items.len());
        let spaces = self.address_spaces();
        let owners = spaces.clone();
        let empty: Arc<dyn AddressSpace> = self.empty.clone();

        group_map_collate_lenient(
            items,
            move |item: &T| spaces.iter().position(|s| claims(s.filter(), item)),
            move |owner: Option<usize>, group: Vec<T>| {
                let space = match owner {
                    Some(index) => Arc::clone(&owners[index]),
                    None => {
                        ROUTING_MISSES
                            .with_label_values(&[operation])
                            .inc_by(group.len() as f64);
                        debug!(operation, items = group.len(), "[Composite] unclaimed items");
                        Arc::clone(&empty)
                    }
                };
                dispatch(space, group)
            },
            move |err: &UaError| {
                CONTRIBUTOR_FAILURES.with_label_values(&[operation]).inc();
                log_event!(warn, "composite", "Contributor failed its group", operation, error = %err);
                on_failure(err)
            },
        )
    }

    /// Group monitored items by their first claiming contributor.
    /// Unclaimed items are dropped: the sentinel ignores them.
    fn partition_items<T: Clone>(
        &self,
        items: &[T],
        claims: impl Fn(&dyn AddressSpaceFilter, &T) -> bool,
    ) -> Vec<(Arc<dyn AddressSpace>, Vec<T>)> {
        let spaces = self.address_spaces();
        let mut groups: Vec<(usize, Vec<T>)> = Vec::new();

        for item in items {
            let Some(owner) = spaces.iter().position(|s| claims(s.filter(), item)) else {
                continue;
            };
            match groups.iter_mut().find(|(index, _)| *index == owner) {
                Some((_, group)) => group.push(item.clone()),
                None => groups.push((owner, vec![item.clone()])),
            }
        }

        groups
            .into_iter()
            .map(|(index, group)| (Arc::clone(&spaces[index]), group))
            .collect()
    }
}

impl Default for AddressSpaceComposite {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AddressSpaceComposite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddressSpaceComposite")
            .field("contributors", &self.len())
            .finish()
    }
}

#[async_trait]
impl AddressSpace for AddressSpaceComposite {
    fn filter(&self) -> &dyn AddressSpaceFilter {
        &self.filter
    }

    async fn browse(
        &self,
        context: &OperationContext,
        view: &ViewDescription,
        node_id: &NodeId,
    ) -> Result<Vec<Reference>, UaError> {
        record_batch("browse", 1);
        let spaces = self.address_spaces();
        match spaces.iter().find(|s| s.filter().filter_browse(node_id)) {
            Some(space) => space.browse(context, view, node_id).await,
            None => {
                ROUTING_MISSES.with_label_values(&["browse"]).inc();
                self.empty.browse(context, view, node_id).await
            }
        }
    }

    async fn get_references(
        &self,
        context: &OperationContext,
        view: &ViewDescription,
        node_id: &NodeId,
    ) -> Result<Vec<Reference>, UaError> {
        let spaces = self.address_spaces();
        let results = join_all(
            spaces
                .iter()
                .map(|space| space.get_references(context, view, node_id)),
        )
        .await;

        let mut references = Vec::new();
        for result in results {
            match result {
                Ok(found) => references.extend(found),
                Err(err) => {
                    CONTRIBUTOR_FAILURES
                        .with_label_values(&["get_references"])
                        .inc();
                    warn!(node_id = %node_id, error = %err, "[Composite] reference contributor failed");
                }
            }
        }
        Ok(dedup_references(references))
    }

    async fn read(
        &self,
        context: &OperationContext,
        max_age: f64,
        timestamps: TimestampsToReturn,
        items: Vec<ReadValueId>,
    ) -> Result<Vec<DataValue>, UaError> {
        Ok(self
            .route(
                "read",
                items,
                |filter, item| filter.filter_read(item),
                |space, group| async move { space.read(context, max_age, timestamps, group).await },
                |err| DataValue::bad(err.status_code()),
            )
            .await)
    }

    async fn write(
        &self,
        context: &OperationContext,
        items: Vec<WriteValue>,
    ) -> Result<Vec<StatusCode>, UaError> {
        Ok(self
            .route(
                "write",
                items,
                |filter, item| filter.filter_write(item),
                |space, group| async move { space.write(context, group).await },
                UaError::status_code,
            )
            .await)
    }

    async fn call(
        &self,
        context: &OperationContext,
        items: Vec<CallMethodRequest>,
    ) -> Result<Vec<CallMethodResult>, UaError> {
        Ok(self
            .route(
                "call",
                items,
                |filter, item| filter.filter_call(item),
                |space, group| async move { space.call(context, group).await },
                |err| CallMethodResult::bad(err.status_code()),
            )
            .await)
    }

    async fn history_read(
        &self,
        context: &OperationContext,
        details: &HistoryReadDetails,
        timestamps: TimestampsToReturn,
        items: Vec<HistoryReadValueId>,
    ) -> Result<Vec<HistoryReadResult>, UaError> {
        Ok(self
            .route(
                "history_read",
                items,
                |filter, item| filter.filter_history_read(item),
                |space, group| async move {
                    space.history_read(context, details, timestamps, group).await
                },
                |err| HistoryReadResult::bad(err.status_code()),
            )
            .await)
    }

    async fn history_update(
        &self,
        context: &OperationContext,
        items: Vec<HistoryUpdateDetails>,
    ) -> Result<Vec<HistoryUpdateResult>, UaError> {
        Ok(self
            .route(
                "history_update",
                items,
                |filter, item| filter.filter_history_update(item),
                |space, group| async move { space.history_update(context, group).await },
                |err| HistoryUpdateResult::bad(err.status_code()),
            )
            .await)
    }

    /// A contributor that fails to register its group yields null ids.
    async fn register_nodes(
        &self,
        context: &OperationContext,
        node_ids: Vec<NodeId>,
    ) -> Result<Vec<NodeId>, UaError> {
        Ok(self
            .route(
                "register_nodes",
                node_ids,
                |filter, node_id| filter.filter_register_node(node_id),
                |space, group| async move { space.register_nodes(context, group).await },
                |_| NodeId::NULL,
            )
            .await)
    }

    async fn unregister_nodes(
        &self,
        context: &OperationContext,
        node_ids: Vec<NodeId>,
    ) -> Result<Vec<StatusCode>, UaError> {
        Ok(self
            .route(
                "unregister_nodes",
                node_ids,
                |filter, node_id| filter.filter_unregister_node(node_id),
                |space, group| async move { space.unregister_nodes(context, group).await },
                UaError::status_code,
            )
            .await)
    }

    async fn add_nodes(
        &self,
        context: &OperationContext,
        items: Vec<AddNodesItem>,
    ) -> Result<Vec<AddNodesResult>, UaError> {
        Ok(self
            .route(
                "add_nodes",
                items,
                |filter, item| filter.filter_add_node(item),
                |space, group| async move { space.add_nodes(context, group).await },
                |err| AddNodesResult::bad(err.status_code()),
            )
            .await)
    }

    async fn delete_nodes(
        &self,
        context: &OperationContext,
        items: Vec<DeleteNodesItem>,
    ) -> Result<Vec<StatusCode>, UaError> {
        Ok(self
            .route(
                "delete_nodes",
                items,
                |filter, item| filter.filter_delete_node(item),
                |space, group| async move { space.delete_nodes(context, group).await },
                UaError::status_code,
            )
            .await)
    }

    async fn add_references(
        &self,
        context: &OperationContext,
        items: Vec<AddReferencesItem>,
    ) -> Result<Vec<StatusCode>, UaError> {
        Ok(self
            .route(
                "add_references",
                items,
                |filter, item| filter.filter_add_reference(item),
                |space, group| async move { space.add_references(context, group).await },
                UaError::status_code,
            )
            .await)
    }

    async fn delete_references(
        &self,
        context: &OperationContext,
        items: Vec<DeleteReferencesItem>,
    ) -> Result<Vec<StatusCode>, UaError> {
        Ok(self
            .route(
                "delete_references",
                items,
                |filter, item| filter.filter_delete_reference(item),
                |space, group| async move { space.delete_references(context, group).await },
                UaError::status_code,
            )
            .await)
    }

    fn on_data_items_created(&self, items: &[DataItem]) {
        for (space, group) in self.partition_items(items, |f, i| f.filter_on_create_data_item(i)) {
            space.on_data_items_created(&group);
        }
    }

    fn on_data_items_modified(&self, items: &[DataItem]) {
        for (space, group) in self.partition_items(items, |f, i| f.filter_on_modify_data_item(i)) {
            space.on_data_items_modified(&group);
        }
    }

    fn on_data_items_deleted(&self, items: &[DataItem]) {
        for (space, group) in self.partition_items(items, |f, i| f.filter_on_delete_data_item(i)) {
            space.on_data_items_deleted(&group);
        }
    }

    fn on_event_items_created(&self, items: &[EventItem]) {
        for (space, group) in self.partition_items(items, |f, i| f.filter_on_create_event_item(i)) {
            space.on_event_items_created(&group);
        }
    }

    fn on_event_items_modified(&self, items: &[EventItem]) {
        for (space, group) in self.partition_items(items, |f, i| f.filter_on_modify_event_item(i)) {
            space.on_event_items_modified(&group);
        }
    }

    fn on_event_items_deleted(&self, items: &[EventItem]) {
        for (space, group) in self.partition_items(items, |f, i| f.filter_on_delete_event_item(i)) {
            space.on_event_items_deleted(&group);
        }
    }

    fn on_monitoring_mode_changed(&self, items: &[Arc<dyn MonitoredItem>]) {
        let groups = self.partition_items(items, |f, i: &Arc<dyn MonitoredItem>| {
            f.filter_on_monitoring_mode_changed(i.as_ref())
        });
        for (space, group) in groups {
            space.on_monitoring_mode_changed(&group);
        }
    }
}
