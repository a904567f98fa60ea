//! Shared fixtures: a populated plant namespace and a contributor that
//! fails every batch it is handed.

use async_trait::async_trait;
use shared_types::{
    CallMethodRequest, CallMethodResult, DataTypeIds, DataValue, NodeClass, NodeId, ReadValueId,
    ReferenceTypeIds, StatusCode, TimestampsToReturn, UaError, Variant, ViewDescription,
    WriteValue,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use ua_01_node_management::{Node, NodeManager, Reference};
use ua_02_address_space::{
    AddressSpace, AddressSpaceConfig, AddressSpaceFilter, AddressSpaceManager, ManagedNamespace,
    OperationContext, SimpleAddressSpaceFilter,
};

/// Well-known numeric ids inside a plant namespace.
pub mod ids {
    /// Boiler object.
    pub const BOILER: u32 = 1000;
    /// Temperature variable (Double).
    pub const TEMPERATURE: u32 = 1001;
    /// Setpoint variable (Double).
    pub const SETPOINT: u32 = 1002;
    /// Alarm history variable (Int32 array).
    pub const ALARMS: u32 = 1003;
    /// Reset method.
    pub const RESET: u32 = 1100;
}

/// A manager configured for tests.
pub fn manager() -> Arc<AddressSpaceManager> {
    match AddressSpaceManager::new(AddressSpaceConfig::for_testing()) {
        Ok(manager) => Arc::new(manager),
        Err(err) => panic!("test configuration rejected: {err}"),
    }
}

/// A namespace holding one boiler with three variables and a reset
/// method. Reset adds its inputs and stores the sum in the setpoint.
pub fn plant(manager: &Arc<AddressSpaceManager>, uri: &str) -> ManagedNamespace {
    let namespace = ManagedNamespace::new(Arc::clone(manager), uri);
    let nodes = namespace.node_manager();

    let boiler = namespace.numeric(ids::BOILER);
    nodes.add_node(Arc::new(Node::object(boiler.clone(), "Boiler")));
    nodes.add_node(Arc::new(Node::variable(
        namespace.numeric(ids::TEMPERATURE),
        "Temperature",
        71.5f64,
        DataTypeIds::DOUBLE,
    )));
    nodes.add_node(Arc::new(Node::variable(
        namespace.numeric(ids::SETPOINT),
        "Setpoint",
        70.0f64,
        DataTypeIds::DOUBLE,
    )));
    nodes.add_node(Arc::new(Node::variable(
        namespace.numeric(ids::ALARMS),
        "Alarms",
        Variant::Array(vec![Variant::Int32(3), Variant::Int32(5), Variant::Int32(8)]),
        DataTypeIds::INT32,
    )));
    nodes.add_node(Arc::new(Node::method(namespace.numeric(ids::RESET), "Reset")));

    for (child, class) in [
        (ids::TEMPERATURE, NodeClass::Variable),
        (ids::SETPOINT, NodeClass::Variable),
        (ids::ALARMS, NodeClass::Variable),
        (ids::RESET, NodeClass::Method),
    ] {
        nodes.add_reference(Reference::forward(
            boiler.clone(),
            ReferenceTypeIds::HAS_COMPONENT,
            namespace.numeric(child),
            class,
        ));
        nodes.add_reference(Reference::inverse(
            namespace.numeric(child),
            ReferenceTypeIds::HAS_COMPONENT,
            boiler.clone(),
            NodeClass::Object,
        ));
    }

    let store = Arc::clone(nodes);
    let setpoint = namespace.numeric(ids::SETPOINT);
    namespace.address_space().register_method(
        namespace.numeric(ids::RESET),
        move |inputs: &[Variant]| -> Result<Vec<Variant>, UaError> {
            let mut sum = 0.0;
            for input in inputs {
                match input {
                    Variant::Double(value) => sum += value,
                    _ => return Err(UaError::Service(StatusCode::BAD_TYPE_MISMATCH)),
                }
            }
            if let Some(node) = store.get_node(&setpoint) {
                node.set_value(DataValue::now(sum));
            }
            Ok(vec![Variant::Double(sum)])
        },
    );

    namespace
}

/// A Value read of `node_id`.
pub fn read_value(node_id: NodeId) -> ReadValueId {
    ReadValueId::value(node_id)
}

/// A contributor claiming one namespace that fails every batch.
pub struct Offline {
    filter: SimpleAddressSpaceFilter,
    calls: AtomicUsize,
}

impl Offline {
    /// Claim every node in `namespace`.
    pub fn new(namespace: u16) -> Self {
        Self {
            filter: SimpleAddressSpaceFilter::namespace(namespace),
            calls: AtomicUsize::new(0),
        }
    }

    /// Batches handed to this contributor.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail(&self) -> UaError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        UaError::Internal("contributor offline".into())
    }
}

#[async_trait]
impl AddressSpace for Offline {
    fn filter(&self) -> &dyn AddressSpaceFilter {
        &self.filter
    }

    async fn browse(
        &self,
        _: &OperationContext,
        _: &ViewDescription,
        _: &NodeId,
    ) -> Result<Vec<Reference>, UaError> {
        Err(self.fail())
    }

    async fn get_references(
        &self,
        _: &OperationContext,
        _: &ViewDescription,
        _: &NodeId,
    ) -> Result<Vec<Reference>, UaError> {
        Err(self.fail())
    }

    async fn read(
        &self,
        _: &OperationContext,
        _: f64,
        _: TimestampsToReturn,
        _: Vec<ReadValueId>,
    ) -> Result<Vec<DataValue>, UaError> {
        Err(self.fail())
    }

    async fn write(&self, _: &OperationContext, _: Vec<WriteValue>) -> Result<Vec<StatusCode>, UaError> {
        Err(self.fail())
    }

    async fn call(
        &self,
        _: &OperationContext,
        _: Vec<CallMethodRequest>,
    ) -> Result<Vec<CallMethodResult>, UaError> {
        Err(self.fail())
    }
}
