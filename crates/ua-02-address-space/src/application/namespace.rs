//! # Managed Namespace
//!
//! One namespace URI with its own in-memory node store and managed
//! address space. Startup plugs both into an [`AddressSpaceManager`];
//! shutdown unplugs them.

use crate::adapters::{ManagedAddressSpace, SimpleAddressSpaceFilter};
use crate::application::manager::AddressSpaceManager;
use crate::ports::{AddressSpace, Lifecycle, LifecycleError};
use async_trait::async_trait;
use shared_types::NodeId;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use ua_01_node_management::{InMemoryNodeManager, NodeManager};

/// A namespace served from memory.
#[derive(Debug)]
pub struct ManagedNamespace {
    uri: String,
    index: u16,
    nodes: Arc<InMemoryNodeManager>,
    address_space: Arc<ManagedAddressSpace>,
    manager: Arc<AddressSpaceManager>,
    running: AtomicBool,
}

impl ManagedNamespace {
    /// Register `uri` in the manager's namespace table and prepare an
    /// empty node store for it.
    pub fn new(manager: Arc<AddressSpaceManager>, uri: impl Into<String>) -> Self {
        let uri = uri.into();
        let namespaces = Arc::clone(manager.namespaces());
        let index = namespaces.add_uri(&uri);
        let nodes = Arc::new(InMemoryNodeManager::new());

        let filter = SimpleAddressSpaceFilter::namespace(index).with_namespaces(Arc::clone(&namespaces));
        let address_space = Arc::new(
            ManagedAddressSpace::new(uri.clone(), nodes.clone(), filter).with_namespaces(namespaces),
        );

        Self {
            uri,
            index,
            nodes,
            address_space,
            manager,
            running: AtomicBool::new(false),
        }
    }

    /// Namespace URI.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Namespace index in the server table.
    pub fn index(&self) -> u16 {
        self.index
    }

    /// Numeric NodeId in this namespace.
    pub fn numeric(&self, value: u32) -> NodeId {
        NodeId::numeric(self.index, value)
    }

    /// String NodeId in this namespace.
    pub fn string(&self, value: impl Into<String>) -> NodeId {
        NodeId::string(self.index, value)
    }

    /// Node store of this namespace.
    pub fn node_manager(&self) -> &Arc<InMemoryNodeManager> {
        &self.nodes
    }

    /// Address space serving this namespace.
    pub fn address_space(&self) -> &Arc<ManagedAddressSpace> {
        &self.address_space
    }

    /// True between startup and shutdown.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Lifecycle for ManagedNamespace {
    fn name(&self) -> &str {
        &self.uri
    }

    async fn startup(&self) -> Result<(), LifecycleError> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(LifecycleError::AlreadyStarted(self.uri.clone()));
        }
        self.manager
            .register_node_manager(self.nodes.clone() as Arc<dyn NodeManager>);
        self.manager
            .register(self.address_space.clone() as Arc<dyn AddressSpace>);
        info!(uri = %self.uri, index = self.index, nodes = self.nodes.node_count(), "[Namespace] online");
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), LifecycleError> {
        if !self.running.swap(false, Ordering::SeqCst) {
            return Err(LifecycleError::NotStarted(self.uri.clone()));
        }
        self.manager
            .unregister(&(self.address_space.clone() as Arc<dyn AddressSpace>));
        self.manager
            .unregister_node_manager(&(self.nodes.clone() as Arc<dyn NodeManager>));
        info!(uri = %self.uri, "[Namespace] offline");
        Ok(())
    }
}
