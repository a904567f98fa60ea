//! # Shard Resolver Port
//!
//! Sharding is a key function plus a shard lookup by key.

use super::node_manager::NodeManager;
use shared_types::NodeId;
use std::marker::PhantomData;
use std::sync::Arc;

/// Maps NodeIds to the NodeManager that owns them.
pub trait ShardResolver: Send + Sync {
    /// Shard key type.
    type Key: Send + Sync;

    /// Key of the shard that owns `node_id`.
    fn shard_key(&self, node_id: &NodeId) -> Self::Key;

    /// The shard for `key`, created if the resolver creates shards on demand.
    fn shard(&self, key: &Self::Key) -> Arc<dyn NodeManager>;

    /// The shard for `key` if it already exists. Read and removal paths go
    /// through here so that they never create shards.
    fn existing_shard(&self, key: &Self::Key) -> Option<Arc<dyn NodeManager>> {
        Some(self.shard(key))
    }
}

/// A [`ShardResolver`] built from two closures.
pub struct FnShardResolver<K, KF, SF> {
    key_fn: KF,
    shard_fn: SF,
    _key: PhantomData<fn() -> K>,
}

impl<K, KF, SF> FnShardResolver<K, KF, SF>
where
    KF: Fn(&NodeId) -> K + Send + Sync,
    SF: Fn(&K) -> Arc<dyn NodeManager> + Send + Sync,
{
    /// Create a resolver from a key function and a shard lookup.
    pub fn new(key_fn: KF, shard_fn: SF) -> Self {
        Self {
            key_fn,
            shard_fn,
            _key: PhantomData,
        }
    }
}

impl<K, KF, SF> ShardResolver for FnShardResolver<K, KF, SF>
where
    K: Send + Sync,
    KF: Fn(&NodeId) -> K + Send + Sync,
    SF: Fn(&K) -> Arc<dyn NodeManager> + Send + Sync,
{
    type Key = K;

    fn shard_key(&self, node_id: &NodeId) -> K {
        (self.key_fn)(node_id)
    }

    fn shard(&self, key: &K) -> Arc<dyn NodeManager> {
        (self.shard_fn)(key)
    }
}
