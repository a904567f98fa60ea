//! # Address Space Manager
//!
//! Server-facing entry point. Owns the composite of registered address
//! spaces and a registry of node managers for direct node lookups, and
//! enforces the per-service operation limits before routing a batch.

use crate::application::composite::{same_instance, AddressSpaceComposite};
use crate::config::{AddressSpaceConfig, ConfigError};
use crate::context::OperationContext;
use crate::ports::{AddressSpace, AddressSpaceFilter};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{
    AddNodesItem, AddNodesResult, AddReferencesItem, CallMethodRequest, CallMethodResult,
    DataItem, DataValue, DeleteNodesItem, DeleteReferencesItem, EventItem, ExpandedNodeId,
    HistoryReadDetails, HistoryReadResult, HistoryReadValueId, HistoryUpdateDetails,
    HistoryUpdateResult, MonitoredItem, NamespaceTable, NodeId, ReadValueId, StatusCode,
    TimestampsToReturn, UaError, ViewDescription, WriteValue,
};
use std::sync::Arc;
use tracing::{info, warn};
use ua_01_node_management::{Node, NodeManager, Reference};

/// Registry and router for everything the server exposes.
pub struct AddressSpaceManager {
    composite: AddressSpaceComposite,
    node_managers: RwLock<Vec<Arc<dyn NodeManager>>>,
    namespaces: Arc<NamespaceTable>,
    config: AddressSpaceConfig,
}

impl AddressSpaceManager {
    /// Create a manager with the given limits.
    pub fn new(config: AddressSpaceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_namespaces(config, Arc::new(NamespaceTable::new())))
    }

    /// Create a manager sharing an existing namespace table.
    ///
    /// The limits are taken as given; call [`AddressSpaceConfig::validate`]
    /// first when they come from outside.
    pub fn with_namespaces(config: AddressSpaceConfig, namespaces: Arc<NamespaceTable>) -> Self {
        Self {
            composite: AddressSpaceComposite::new(),
            node_managers: RwLock::new(Vec::new()),
            namespaces,
            config,
        }
    }

    /// The server's namespace table.
    pub fn namespaces(&self) -> &Arc<NamespaceTable> {
        &self.namespaces
    }

    /// Active limits.
    pub fn config(&self) -> &AddressSpaceConfig {
        &self.config
    }

    /// The underlying router.
    pub fn composite(&self) -> &AddressSpaceComposite {
        &self.composite
    }

    /// Route requests to `address_space`. Registering twice is logged and
    /// ignored.
    pub fn register(&self, address_space: Arc<dyn AddressSpace>) {
        if !self.composite.register(address_space) {
            warn!("[AddressSpaceManager] address space already registered");
        }
    }

    /// Stop routing to `address_space`. Unknown instances are logged and
    /// ignored.
    pub fn unregister(&self, address_space: &Arc<dyn AddressSpace>) {
        if !self.composite.unregister(address_space) {
            warn!("[AddressSpaceManager] address space was not registered");
        }
    }

    /// Include `node_manager` in direct node lookups.
    pub fn register_node_manager(&self, node_manager: Arc<dyn NodeManager>) {
        let mut managers = self.node_managers.write();
        if managers.iter().any(|m| same_instance(m, &node_manager)) {
            warn!("[AddressSpaceManager] node manager already registered");
            return;
        }
        managers.push(node_manager);
        info!(node_managers = managers.len(), "[AddressSpaceManager] node manager registered");
    }

    /// Exclude `node_manager` from direct node lookups.
    pub fn unregister_node_manager(&self, node_manager: &Arc<dyn NodeManager>) {
        let mut managers = self.node_managers.write();
        let before = managers.len();
        managers.retain(|m| !same_instance(m, node_manager));
        if managers.len() == before {
            warn!("[AddressSpaceManager] node manager was not registered");
            return;
        }
        info!(node_managers = managers.len(), "[AddressSpaceManager] node manager unregistered");
    }

    fn node_managers(&self) -> Vec<Arc<dyn NodeManager>> {
        self.node_managers.read().clone()
    }

    /// The node from the first registered node manager that has it.
    pub fn get_managed_node(&self, node_id: &NodeId) -> Option<Arc<Node>> {
        self.node_managers()
            .iter()
            .find_map(|manager| manager.get_node(node_id))
    }

    /// [`get_managed_node`](Self::get_managed_node) for an expanded id.
    /// Foreign and remote ids resolve to nothing.
    pub fn get_managed_node_expanded(&self, node_id: &ExpandedNodeId) -> Option<Arc<Node>> {
        node_id
            .to_local(&self.namespaces)
            .and_then(|id| self.get_managed_node(&id))
    }

    /// References of `node_id` from every registered node manager, in
    /// registration order. Duplicates are kept.
    pub fn get_managed_references(&self, node_id: &NodeId) -> Vec<Reference> {
        self.node_managers()
            .iter()
            .flat_map(|manager| manager.get_references(node_id))
            .collect()
    }

    /// [`get_managed_references`](Self::get_managed_references) filtered by
    /// `predicate`.
    pub fn get_managed_references_matching(
        &self,
        node_id: &NodeId,
        predicate: &dyn Fn(&Reference) -> bool,
    ) -> Vec<Reference> {
        self.node_managers()
            .iter()
            .flat_map(|manager| manager.get_references_matching(node_id, predicate))
            .collect()
    }

    fn check_batch(&self, operation: &'static str, len: usize, limit: usize) -> Result<(), UaError> {
        if len == 0 {
            return Err(UaError::Service(StatusCode::BAD_NOTHING_TO_DO));
        }
        if len > limit {
            warn!(operation, items = len, limit, "[AddressSpaceManager] batch over limit");
            return Err(UaError::Service(StatusCode::BAD_TOO_MANY_OPERATIONS));
        }
        Ok(())
    }
}

impl std::fmt::Debug for AddressSpaceManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddressSpaceManager")
            .field("address_spaces", &self.composite.len())
            .field("node_managers", &self.node_managers.read().len())
            .field("config", &self.config)
            .finish()
    }
}

#[async_trait]
impl AddressSpace for AddressSpaceManager {
    fn filter(&self) -> &dyn AddressSpaceFilter {
        self.composite.filter()
    }

    async fn browse(
        &self,
        context: &OperationContext,
        view: &ViewDescription,
        node_id: &NodeId,
    ) -> Result<Vec<Reference>, UaError> {
        self.composite.browse(context, view, node_id).await
    }

    async fn get_references(
        &self,
        context: &OperationContext,
        view: &ViewDescription,
        node_id: &NodeId,
    ) -> Result<Vec<Reference>, UaError> {
        self.composite.get_references(context, view, node_id).await
    }

    async fn read(
        &self,
        context: &OperationContext,
        max_age: f64,
        timestamps: TimestampsToReturn,
        items: Vec<ReadValueId>,
    ) -> Result<Vec<DataValue>, UaError> {
        self.check_batch("read", items.len(), self.config.max_nodes_per_read)?;
        self.composite.read(context, max_age, timestamps, items).await
    }

    async fn write(
        &self,
        context: &OperationContext,
        items: Vec<WriteValue>,
    ) -> Result<Vec<StatusCode>, UaError> {
        self.check_batch("write", items.len(), self.config.max_nodes_per_write)?;
        self.composite.write(context, items).await
    }

    async fn call(
        &self,
        context: &OperationContext,
        items: Vec<CallMethodRequest>,
    ) -> Result<Vec<CallMethodResult>, UaError> {
        self.check_batch("call", items.len(), self.config.max_nodes_per_method_call)?;
        self.composite.call(context, items).await
    }

    async fn history_read(
        &self,
        context: &OperationContext,
        details: &HistoryReadDetails,
        timestamps: TimestampsToReturn,
        items: Vec<HistoryReadValueId>,
    ) -> Result<Vec<HistoryReadResult>, UaError> {
        self.check_batch("history_read", items.len(), self.config.max_nodes_per_history)?;
        self.composite
            .history_read(context, details, timestamps, items)
            .await
    }

    async fn history_update(
        &self,
        context: &OperationContext,
        items: Vec<HistoryUpdateDetails>,
    ) -> Result<Vec<HistoryUpdateResult>, UaError> {
        self.check_batch("history_update", items.len(), self.config.max_nodes_per_history)?;
        self.composite.history_update(context, items).await
    }

    async fn register_nodes(
        &self,
        context: &OperationContext,
        node_ids: Vec<NodeId>,
    ) -> Result<Vec<NodeId>, UaError> {
        self.check_batch("register_nodes", node_ids.len(), self.config.max_nodes_per_register)?;
        self.composite.register_nodes(context, node_ids).await
    }

    async fn unregister_nodes(
        &self,
        context: &OperationContext,
        node_ids: Vec<NodeId>,
    ) -> Result<Vec<StatusCode>, UaError> {
        self.check_batch("unregister_nodes", node_ids.len(), self.config.max_nodes_per_register)?;
        self.composite.unregister_nodes(context, node_ids).await
    }

    async fn add_nodes(
        &self,
        context: &OperationContext,
        items: Vec<AddNodesItem>,
    ) -> Result<Vec<AddNodesResult>, UaError> {
        self.check_batch("add_nodes", items.len(), self.config.max_nodes_per_node_management)?;
        self.composite.add_nodes(context, items).await
    }

    async fn delete_nodes(
        &self,
        context: &OperationContext,
        items: Vec<DeleteNodesItem>,
    ) -> Result<Vec<StatusCode>, UaError> {
        self.check_batch("delete_nodes", items.len(), self.config.max_nodes_per_node_management)?;
        self.composite.delete_nodes(context, items).await
    }

    async fn add_references(
        &self,
        context: &OperationContext,
        items: Vec<AddReferencesItem>,
    ) -> Result<Vec<StatusCode>, UaError> {
        self.check_batch("add_references", items.len(), self.config.max_nodes_per_node_management)?;
        self.composite.add_references(context, items).await
    }

    async fn delete_references(
        &self,
        context: &OperationContext,
        items: Vec<DeleteReferencesItem>,
    ) -> Result<Vec<StatusCode>, UaError> {
        self.check_batch(
            "delete_references",
            items.len(),
            self.config.max_nodes_per_node_management,
        )?;
        self.composite.delete_references(context, items).await
    }

    fn on_data_items_created(&self, items: &[DataItem]) {
        self.composite.on_data_items_created(items);
    }

    fn on_data_items_modified(&self, items: &[DataItem]) {
        self.composite.on_data_items_modified(items);
    }

    fn on_data_items_deleted(&self, items: &[DataItem]) {
        self.composite.on_data_items_deleted(items);
    }

    fn on_event_items_created(&self, items: &[EventItem]) {
        self.composite.on_event_items_created(items);
    }

    fn on_event_items_modified(&self, items: &[EventItem]) {
        self.composite.on_event_items_modified(items);
    }

    fn on_event_items_deleted(&self, items: &[EventItem]) {
        self.composite.on_event_items_deleted(items);
    }

    fn on_monitoring_mode_changed(&self, items: &[Arc<dyn MonitoredItem>]) {
        self.composite.on_monitoring_mode_changed(items);
    }
}
