//! Delegating Node Manager
//!
//! Forwards every operation to the shard that owns the node, and keeps the
//! inverse side of each reference consistent on the target's shard.

use crate::domain::{Node, Reference};
use crate::ports::{NodeManager, ShardResolver};
use shared_types::{ExpandedNodeId, NamespaceTable, NodeClass, NodeId};
use std::sync::Arc;
use tracing::debug;
use ua_telemetry::REFERENCES_INVERTED;

/// Key-based sharding over any number of [`NodeManager`]s.
///
/// Callers add a reference once, on its source. When the target resolves
/// to a local NodeId, the shard owning the target gains (or loses) the
/// inverse reference. Foreign and remote targets are left alone.
pub struct DelegatingNodeManager<R: ShardResolver> {
    resolver: R,
    namespaces: Arc<NamespaceTable>,
}

impl<R: ShardResolver> DelegatingNodeManager<R> {
    /// Create a delegating manager.
    pub fn new(resolver: R, namespaces: Arc<NamespaceTable>) -> Self {
        Self {
            resolver,
            namespaces,
        }
    }

    /// The shard resolver.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// The namespace table used to resolve reference targets.
    pub fn namespaces(&self) -> &Arc<NamespaceTable> {
        &self.namespaces
    }

    /// The shard that owns `node_id`.
    pub fn shard_of(&self, node_id: &NodeId) -> Arc<dyn NodeManager> {
        let key = self.resolver.shard_key(node_id);
        self.resolver.shard(&key)
    }

    fn existing_shard_of(&self, node_id: &NodeId) -> Option<Arc<dyn NodeManager>> {
        let key = self.resolver.shard_key(node_id);
        self.resolver.existing_shard(&key)
    }

    fn inverse_of(&self, reference: &Reference) -> Option<Reference> {
        let target = reference.target_node_id.to_local(&self.namespaces)?;
        let source_class = self
            .get_node(&reference.source_node_id)
            .map(|node| node.node_class())
            .unwrap_or(NodeClass::Unspecified);
        Some(reference.invert(target, source_class))
    }

    /// Remove the inverse of `reference` as stored on the target's shard.
    ///
    /// Matched on endpoints, type and direction only. The source's class
    /// may have changed, or the source may be gone, since the inverse was
    /// written.
    fn remove_stored_inverse(&self, reference: &Reference) -> bool {
        let Some(target) = reference.target_node_id.to_local(&self.namespaces) else {
            return false;
        };
        let Some(shard) = self.existing_shard_of(&target) else {
            return false;
        };
        let source = ExpandedNodeId::from(&reference.source_node_id);
        shard
            .get_references_matching(&target, &|r: &Reference| {
                r.reference_type_id == reference.reference_type_id
                    && r.is_forward != reference.is_forward
                    && r.target_node_id == source
            })
            .iter()
            .any(|inverse| shard.remove_reference(inverse))
    }
}

impl<R: ShardResolver> NodeManager for DelegatingNodeManager<R> {
    fn add_node(&self, node: Arc<Node>) -> Option<Arc<Node>> {
        self.shard_of(node.node_id()).add_node(node)
    }

    fn contains_node(&self, node_id: &NodeId) -> bool {
        self.existing_shard_of(node_id)
            .is_some_and(|shard| shard.contains_node(node_id))
    }

    fn get_node(&self, node_id: &NodeId) -> Option<Arc<Node>> {
        self.existing_shard_of(node_id)?.get_node(node_id)
    }

    fn remove_node(&self, node_id: &NodeId) -> Option<Arc<Node>> {
        self.existing_shard_of(node_id)?.remove_node(node_id)
    }

    fn add_reference(&self, reference: Reference) {
        if let Some(inverse) = self.inverse_of(&reference) {
            debug!(
                source = %reference.source_node_id,
                target = %inverse.source_node_id,
                "Adding inverse reference on target shard"
            );
            self.shard_of(&inverse.source_node_id).add_reference(inverse);
            REFERENCES_INVERTED.inc();
        }
        self.shard_of(&reference.source_node_id)
            .add_reference(reference);
    }

    fn remove_reference(&self, reference: &Reference) -> bool {
        if self.remove_stored_inverse(reference) {
            debug!(
                source = %reference.source_node_id,
                target = %reference.target_node_id,
                "Removed inverse reference from target shard"
            );
            REFERENCES_INVERTED.inc();
        }
        self.existing_shard_of(&reference.source_node_id)
            .is_some_and(|shard| shard.remove_reference(reference))
    }

    fn add_virtual_reference(&self, reference: Reference) {
        self.shard_of(&reference.source_node_id)
            .add_virtual_reference(reference);
    }

    fn remove_virtual_reference(&self, reference: &Reference) -> bool {
        self.existing_shard_of(&reference.source_node_id)
            .is_some_and(|shard| shard.remove_virtual_reference(reference))
    }

    fn get_references(&self, node_id: &NodeId) -> Vec<Reference> {
        self.existing_shard_of(node_id)
            .map(|shard| shard.get_references(node_id))
            .unwrap_or_default()
    }

    fn get_references_matching(
        &self,
        node_id: &NodeId,
        predicate: &dyn Fn(&Reference) -> bool,
    ) -> Vec<Reference> {
        self.existing_shard_of(node_id)
            .map(|shard| shard.get_references_matching(node_id, predicate))
            .unwrap_or_default()
    }
}
