//! Collated Node Manager
//!
//! Shards nodes by namespace index, one [`InMemoryNodeManager`] per
//! namespace, created the first time a node or reference is written to it.
//! Lookups and removals in an unknown namespace find nothing and create nothing.

use super::delegating::DelegatingNodeManager;
use super::memory::InMemoryNodeManager;
use crate::ports::{NodeManager, ShardResolver};
use dashmap::DashMap;
use shared_types::{NamespaceTable, NodeId};
use std::sync::Arc;
use tracing::debug;

/// One in-memory shard per namespace index.
#[derive(Debug, Default)]
pub struct NamespaceShards {
    shards: DashMap<u16, Arc<InMemoryNodeManager>>,
}

impl NamespaceShards {
    /// Create with no shards.
    pub fn new() -> Self {
        Self::default()
    }

    /// The shard for `namespace`, created if absent.
    pub fn shard_for(&self, namespace: u16) -> Arc<InMemoryNodeManager> {
        let shard = self.shards.entry(namespace).or_insert_with(|| {
            debug!(namespace, "Creating namespace shard");
            Arc::new(InMemoryNodeManager::new())
        });
        Arc::clone(shard.value())
    }

    /// The shard for `namespace`, if one has been created.
    pub fn existing(&self, namespace: u16) -> Option<Arc<InMemoryNodeManager>> {
        self.shards.get(&namespace).map(|shard| Arc::clone(shard.value()))
    }

    /// Number of shards created so far.
    pub fn len(&self) -> usize {
        self.shards.len()
    }

    /// True before anything has been written.
    pub fn is_empty(&self) -> bool {
        self.shards.is_empty()
    }
}

impl ShardResolver for NamespaceShards {
    type Key = u16;

    fn shard_key(&self, node_id: &NodeId) -> u16 {
        node_id.namespace
    }

    fn shard(&self, key: &u16) -> Arc<dyn NodeManager> {
        self.shard_for(*key)
    }

    fn existing_shard(&self, key: &u16) -> Option<Arc<dyn NodeManager>> {
        self.existing(*key).map(|shard| shard as Arc<dyn NodeManager>)
    }
}

/// A [`DelegatingNodeManager`] sharded by namespace index.
pub type CollatedNodeManager = DelegatingNodeManager<NamespaceShards>;

impl DelegatingNodeManager<NamespaceShards> {
    /// Create a collated manager with no shards yet.
    pub fn collated(namespaces: Arc<NamespaceTable>) -> Self {
        Self::new(NamespaceShards::new(), namespaces)
    }

    /// The in-memory shard holding namespace `namespace`.
    pub fn shard_for(&self, namespace: u16) -> Arc<InMemoryNodeManager> {
        self.resolver().shard_for(namespace)
    }

    /// Number of namespaces with a shard.
    pub fn shard_count(&self) -> usize {
        self.resolver().len()
    }
}
