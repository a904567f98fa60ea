//! # Managed Address Space
//!
//! An [`AddressSpace`] backed by one [`NodeManager`]. Attribute services
//! go straight to the stored nodes; method calls go to handlers bound per
//! method node.
//!
//! ## Per-item checks
//!
//! | Service | Failures |
//! |---------|----------|
//! | Read | NodeIdUnknown, AttributeIdInvalid, NotReadable, DataEncodingInvalid, IndexRange* |
//! | Write | NodeIdUnknown, AttributeIdInvalid, NotWritable, TypeMismatch, IndexRangeInvalid |
//! | Call | NodeIdUnknown, MethodInvalid, NotExecutable, UserAccessDenied, NotImplemented |
//!
//! A failing item never affects the other items of its batch.

use crate::adapters::simple_filter::SimpleAddressSpaceFilter;
use crate::algorithms::NumericRange;
use crate::context::{AccessContext, OperationContext};
use crate::ports::{
    AccessController, AddressSpace, AddressSpaceFilter, AllowAll, MethodInvocationHandler,
};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use futures::future::join_all;
use futures::FutureExt;
use shared_types::{
    AddReferencesItem, AttributeId, CallMethodRequest, CallMethodResult, DataItem, DataValue,
    DeleteNodesItem, DeleteReferencesItem, EventItem, MonitoredItem, NamespaceTable, NodeClass,
    NodeId, ReadValueId, ReferenceTypeIds, StatusCode, TimestampsToReturn, UaError, Variant,
    ViewDescription, WriteValue,
};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, info, warn};
use ua_01_node_management::{NodeManager, Reference};
use ua_telemetry::{log_node_event, METHOD_CALLS};

/// Address space over a single node manager.
pub struct ManagedAddressSpace {
    name: String,
    node_manager: Arc<dyn NodeManager>,
    filter: Box<dyn AddressSpaceFilter>,
    access: Arc<dyn AccessController>,
    methods: DashMap<NodeId, Arc<dyn MethodInvocationHandler>>,
    monitored_items: DashMap<u32, NodeId>,
    namespaces: Arc<NamespaceTable>,
}

impl ManagedAddressSpace {
    /// Serve the nodes of `node_manager`, claiming what `filter` accepts.
    pub fn new(
        name: impl Into<String>,
        node_manager: Arc<dyn NodeManager>,
        filter: impl AddressSpaceFilter + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            node_manager,
            filter: Box::new(filter),
            access: Arc::new(AllowAll),
            methods: DashMap::new(),
            monitored_items: DashMap::new(),
            namespaces: Arc::new(NamespaceTable::new()),
        }
    }

    /// Serve every node of namespace `index`.
    pub fn for_namespace(
        name: impl Into<String>,
        node_manager: Arc<dyn NodeManager>,
        index: u16,
    ) -> Self {
        Self::new(name, node_manager, SimpleAddressSpaceFilter::namespace(index))
    }

    /// Authorize items through `access`.
    pub fn with_access_controller(mut self, access: Arc<dyn AccessController>) -> Self {
        self.access = access;
        self
    }

    /// Resolve expanded NodeIds through `namespaces`.
    pub fn with_namespaces(mut self, namespaces: Arc<NamespaceTable>) -> Self {
        self.namespaces = namespaces;
        self
    }

    /// Name used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The backing node manager.
    pub fn node_manager(&self) -> &Arc<dyn NodeManager> {
        &self.node_manager
    }

    /// Bind `handler` to `method_id`, replacing any previous binding.
    pub fn register_method(
        &self,
        method_id: NodeId,
        handler: impl MethodInvocationHandler + 'static,
    ) {
        info!(
            address_space = %self.name,
            method_id = %method_id,
            "[ManagedAddressSpace] method handler registered"
        );
        self.methods.insert(method_id, Arc::new(handler));
    }

    /// Remove the handler bound to `method_id`.
    pub fn unregister_method(&self, method_id: &NodeId) -> bool {
        self.methods.remove(method_id).is_some()
    }

    /// Number of monitored items currently attached to nodes of this
    /// address space.
    pub fn monitored_item_count(&self) -> usize {
        self.monitored_items.len()
    }

    fn read_value(
        &self,
        access: &AccessContext,
        item: &ReadValueId,
    ) -> Result<(AttributeId, DataValue), StatusCode> {
        let node = self
            .node_manager
            .get_node(&item.node_id)
            .ok_or(StatusCode::BAD_NODE_ID_UNKNOWN)?;
        let attribute =
            AttributeId::from_u32(item.attribute_id).ok_or(StatusCode::BAD_ATTRIBUTE_ID_INVALID)?;

        let has_encoding = item.data_encoding.as_ref().is_some_and(|e| !e.is_null());
        if has_encoding && attribute != AttributeId::Value {
            return Err(StatusCode::BAD_DATA_ENCODING_INVALID);
        }
        if !self.access.check_read(access, &item.node_id, attribute) {
            return Err(StatusCode::BAD_USER_ACCESS_DENIED);
        }

        let mut value = node.read_attribute(attribute).map_err(|e| e.status_code())?;
        if let Some(range) = &item.index_range {
            value.value = NumericRange::parse(range)?.apply(&value.value)?;
        }
        Ok((attribute, value))
    }

    fn write_value(&self, access: &AccessContext, item: WriteValue) -> Result<(), StatusCode> {
        let node = self
            .node_manager
            .get_node(&item.node_id)
            .ok_or(StatusCode::BAD_NODE_ID_UNKNOWN)?;
        let attribute =
            AttributeId::from_u32(item.attribute_id).ok_or(StatusCode::BAD_ATTRIBUTE_ID_INVALID)?;

        // Partial array writes are not supported.
        if item.index_range.is_some() {
            return Err(StatusCode::BAD_INDEX_RANGE_INVALID);
        }
        if !self.access.check_write(access, &item.node_id, attribute) {
            return Err(StatusCode::BAD_USER_ACCESS_DENIED);
        }

        node.write_attribute(attribute, item.value)
            .map_err(|e| e.status_code())
    }

    async fn call_method(
        &self,
        access: &AccessContext,
        item: CallMethodRequest,
    ) -> Result<Vec<Variant>, UaError> {
        if !self.node_manager.contains_node(&item.object_id) {
            return Err(UaError::NodeIdUnknown(item.object_id));
        }
        let method = self
            .node_manager
            .get_node(&item.method_id)
            .filter(|node| node.node_class() == NodeClass::Method)
            .ok_or_else(|| UaError::MethodInvalid(item.method_id.clone()))?;

        let is_component = self
            .node_manager
            .get_references(&item.object_id)
            .iter()
            .any(|r| {
                r.is_forward_of(&ReferenceTypeIds::HAS_COMPONENT)
                    && r.target_node_id.to_local(&self.namespaces).as_ref() == Some(&item.method_id)
            });
        if !is_component {
            return Err(UaError::invalid(
                StatusCode::BAD_METHOD_INVALID,
                format!("{} is not a component of {}", item.method_id, item.object_id),
            ));
        }

        let executable = method
            .read_attribute(AttributeId::Executable)
            .map(|dv| dv.value != Variant::Boolean(false))
            .unwrap_or(true);
        if !executable {
            return Err(UaError::invalid(
                StatusCode::BAD_NOT_EXECUTABLE,
                format!("{} is not executable", item.method_id),
            ));
        }
        if !self.access.check_call(access, &item.object_id, &item.method_id) {
            return Err(UaError::AccessDenied(item.method_id));
        }

        let handler = self
            .methods
            .get(&item.method_id)
            .map(|entry| Arc::clone(entry.value()));
        let Some(handler) = handler else {
            METHOD_CALLS.with_label_values(&["not_implemented"]).inc();
            return Err(UaError::invalid(
                StatusCode::BAD_NOT_IMPLEMENTED,
                format!("no handler bound to {}", item.method_id),
            ));
        };

        let invocation = handler.invoke(access, &item.object_id, item.input_arguments);
        match AssertUnwindSafe(invocation).catch_unwind().await {
            Ok(Ok(outputs)) => {
                METHOD_CALLS.with_label_values(&["good"]).inc();
                Ok(outputs)
            }
            Ok(Err(err)) => {
                METHOD_CALLS.with_label_values(&["bad"]).inc();
                Err(err)
            }
            Err(_) => {
                METHOD_CALLS.with_label_values(&["panicked"]).inc();
                log_node_event!(
                    warn,
                    "managed",
                    "Method handler panicked",
                    item.method_id,
                    address_space = %self.name
                );
                Err(UaError::Internal(format!(
                    "handler for {} panicked",
                    item.method_id
                )))
            }
        }
    }

    /// Find a stored reference matching a request that does not carry the
    /// target's node class.
    fn find_reference(
        &self,
        source: &NodeId,
        reference_type_id: &NodeId,
        is_forward: bool,
        target: &NodeId,
    ) -> Option<Reference> {
        self.node_manager
            .get_references(source)
            .into_iter()
            .find(|r| {
                &r.reference_type_id == reference_type_id
                    && r.is_forward == is_forward
                    && r.target_node_id.to_local(&self.namespaces).as_ref() == Some(target)
            })
    }

    fn remove_any(&self, reference: &Reference) -> bool {
        self.node_manager.remove_reference(reference)
            || self.node_manager.remove_virtual_reference(reference)
    }

    fn add_reference(&self, item: AddReferencesItem) -> StatusCode {
        if !self.node_manager.contains_node(&item.source_node_id) {
            return StatusCode::BAD_SOURCE_NODE_ID_INVALID;
        }
        if item.reference_type_id.is_null() {
            return StatusCode::BAD_REFERENCE_TYPE_ID_INVALID;
        }
        if item.target_node_id.is_null() {
            return StatusCode::BAD_TARGET_NODE_ID_INVALID;
        }

        self.node_manager.add_reference(Reference::new(
            item.source_node_id,
            item.reference_type_id,
            item.target_node_id,
            item.target_node_class,
            item.is_forward,
        ));
        StatusCode::GOOD
    }

    fn delete_reference(&self, item: DeleteReferencesItem) -> StatusCode {
        let Some(target) = item.target_node_id.to_local(&self.namespaces) else {
            return StatusCode::BAD_TARGET_NODE_ID_INVALID;
        };
        let Some(reference) =
            self.find_reference(&item.source_node_id, &item.reference_type_id, item.is_forward, &target)
        else {
            return StatusCode::BAD_NOT_FOUND;
        };
        if !self.remove_any(&reference) {
            return StatusCode::BAD_NOT_FOUND;
        }

        // A sharding manager may already have dropped the inverse.
        if item.delete_bidirectional {
            if let Some(inverse) = self.find_reference(
                &target,
                &item.reference_type_id,
                !item.is_forward,
                &item.source_node_id,
            ) {
                self.remove_any(&inverse);
            }
        }
        StatusCode::GOOD
    }

    fn delete_node(&self, item: DeleteNodesItem) -> StatusCode {
        if !self.node_manager.contains_node(&item.node_id) {
            return StatusCode::BAD_NODE_ID_UNKNOWN;
        }
        if item.delete_target_references {
            for reference in self.node_manager.get_references(&item.node_id) {
                self.remove_any(&reference);
            }
        }
        self.node_manager.remove_node(&item.node_id);
        debug!(node_id = %item.node_id, "[ManagedAddressSpace] node deleted");
        StatusCode::GOOD
    }

    fn track_items<'a>(&self, items: impl IntoIterator<Item = &'a dyn MonitoredItem>) {
        for item in items {
            self.monitored_items
                .insert(item.id(), item.read_value_id().node_id.clone());
        }
    }

    fn untrack_items<'a>(&self, items: impl IntoIterator<Item = &'a dyn MonitoredItem>) {
        for item in items {
            self.monitored_items.remove(&item.id());
        }
    }
}

/// Apply `TimestampsToReturn` to a Value read; other attributes carry no
/// timestamps.
fn stamp(mut value: DataValue, attribute: AttributeId, timestamps: TimestampsToReturn) -> DataValue {
    if attribute != AttributeId::Value {
        value.source_timestamp = None;
        value.server_timestamp = None;
        return value;
    }

    match timestamps {
        TimestampsToReturn::Both => {
            value.server_timestamp = Some(Utc::now());
        }
        TimestampsToReturn::Source => {
            value.server_timestamp = None;
        }
        TimestampsToReturn::Server => {
            value.source_timestamp = None;
            value.server_timestamp = Some(Utc::now());
        }
        TimestampsToReturn::Neither => {
            value.source_timestamp = None;
            value.server_timestamp = None;
        }
    }
    value
}

impl std::fmt::Debug for ManagedAddressSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagedAddressSpace")
            .field("name", &self.name)
            .field("methods", &self.methods.len())
            .field("monitored_items", &self.monitored_items.len())
            .finish()
    }
}

#[async_trait]
impl AddressSpace for ManagedAddressSpace {
    fn filter(&self) -> &dyn AddressSpaceFilter {
        self.filter.as_ref()
    }

    async fn browse(
        &self,
        _context: &OperationContext,
        view: &ViewDescription,
        node_id: &NodeId,
    ) -> Result<Vec<Reference>, UaError> {
        if !view.is_default() {
            let known_view = self
                .node_manager
                .get_node(&view.view_id)
                .is_some_and(|node| node.node_class() == NodeClass::View);
            if !known_view {
                return Err(UaError::Service(StatusCode::BAD_VIEW_ID_UNKNOWN));
            }
        }
        if !self.node_manager.contains_node(node_id) {
            return Err(UaError::NodeIdUnknown(node_id.clone()));
        }
        Ok(self.node_manager.get_references(node_id))
    }

    async fn get_references(
        &self,
        _context: &OperationContext,
        _view: &ViewDescription,
        node_id: &NodeId,
    ) -> Result<Vec<Reference>, UaError> {
        Ok(self.node_manager.get_references(node_id))
    }

    async fn read(
        &self,
        context: &OperationContext,
        _max_age: f64,
        timestamps: TimestampsToReturn,
        items: Vec<ReadValueId>,
    ) -> Result<Vec<DataValue>, UaError> {
        debug!(address_space = %self.name, items = items.len(), "[ManagedAddressSpace] read");
        Ok(items
            .iter()
            .map(|item| match self.read_value(context.access(), item) {
                Ok((attribute, value)) => stamp(value, attribute, timestamps),
                Err(status) => {
                    context
                        .diagnostics()
                        .record(item.node_id.clone(), status, "read failed");
                    DataValue::bad(status)
                }
            })
            .collect())
    }

    async fn write(
        &self,
        context: &OperationContext,
        items: Vec<WriteValue>,
    ) -> Result<Vec<StatusCode>, UaError> {
        debug!(address_space = %self.name, items = items.len(), "[ManagedAddressSpace] write");
        Ok(items
            .into_iter()
            .map(|item| {
                let node_id = item.node_id.clone();
                match self.write_value(context.access(), item) {
                    Ok(()) => StatusCode::GOOD,
                    Err(status) => {
                        context.diagnostics().record(node_id, status, "write failed");
                        status
                    }
                }
            })
            .collect())
    }

    async fn call(
        &self,
        context: &OperationContext,
        items: Vec<CallMethodRequest>,
    ) -> Result<Vec<CallMethodResult>, UaError> {
        let calls = items.into_iter().map(|item| async move {
            let method_id = item.method_id.clone();
            match self.call_method(context.access(), item).await {
                Ok(outputs) => CallMethodResult::good(outputs),
                Err(err) => {
                    context
                        .diagnostics()
                        .record(method_id, err.status_code(), err.to_string());
                    CallMethodResult::bad(err.status_code())
                }
            }
        });
        Ok(join_all(calls).await)
    }

    async fn delete_nodes(
        &self,
        _context: &OperationContext,
        items: Vec<DeleteNodesItem>,
    ) -> Result<Vec<StatusCode>, UaError> {
        Ok(items.into_iter().map(|item| self.delete_node(item)).collect())
    }

    async fn add_references(
        &self,
        _context: &OperationContext,
        items: Vec<AddReferencesItem>,
    ) -> Result<Vec<StatusCode>, UaError> {
        Ok(items.into_iter().map(|item| self.add_reference(item)).collect())
    }

    async fn delete_references(
        &self,
        _context: &OperationContext,
        items: Vec<DeleteReferencesItem>,
    ) -> Result<Vec<StatusCode>, UaError> {
        Ok(items
            .into_iter()
            .map(|item| self.delete_reference(item))
            .collect())
    }

    fn on_data_items_created(&self, items: &[DataItem]) {
        self.track_items(items.iter().map(|i| i as &dyn MonitoredItem));
    }

    fn on_data_items_modified(&self, items: &[DataItem]) {
        self.track_items(items.iter().map(|i| i as &dyn MonitoredItem));
    }

    fn on_data_items_deleted(&self, items: &[DataItem]) {
        self.untrack_items(items.iter().map(|i| i as &dyn MonitoredItem));
    }

    fn on_event_items_created(&self, items: &[EventItem]) {
        self.track_items(items.iter().map(|i| i as &dyn MonitoredItem));
    }

    fn on_event_items_modified(&self, items: &[EventItem]) {
        self.track_items(items.iter().map(|i| i as &dyn MonitoredItem));
    }

    fn on_event_items_deleted(&self, items: &[EventItem]) {
        self.untrack_items(items.iter().map(|i| i as &dyn MonitoredItem));
    }

    fn on_monitoring_mode_changed(&self, items: &[Arc<dyn MonitoredItem>]) {
        for item in items {
            if !self.monitored_items.contains_key(&item.id()) {
                warn!(
                    address_space = %self.name,
                    item_id = item.id(),
                    "[ManagedAddressSpace] mode change for untracked item"
                );
                continue;
            }
            debug!(
                address_space = %self.name,
                item_id = item.id(),
                mode = ?item.monitoring_mode(),
                "[ManagedAddressSpace] monitoring mode changed"
            );
        }
    }
}
