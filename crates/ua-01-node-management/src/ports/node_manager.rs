//! # Node Manager Port
//!
//! Storage and ownership contract for nodes and their references.

use crate::domain::{Node, Reference};
use shared_types::{ExpandedNodeId, NamespaceTable, NodeId};
use std::sync::Arc;

/// Node and reference storage.
///
/// References are stored on their source node in two layers: concrete
/// references added with [`add_reference`](Self::add_reference) and virtual
/// references added with [`add_virtual_reference`](Self::add_virtual_reference).
/// A virtual reference is hidden wherever an equal concrete one exists.
///
/// Implementations must tolerate concurrent calls from any thread.
/// Insertion order is preserved per source node; nothing is promised
/// across sources.
pub trait NodeManager: Send + Sync {
    /// Insert a node, replacing and returning any node with the same id.
    fn add_node(&self, node: Arc<Node>) -> Option<Arc<Node>>;

    /// Whether a node with this id is stored.
    fn contains_node(&self, node_id: &NodeId) -> bool;

    /// The node with this id.
    fn get_node(&self, node_id: &NodeId) -> Option<Arc<Node>>;

    /// Remove and return the node. References pointing at it are kept.
    fn remove_node(&self, node_id: &NodeId) -> Option<Arc<Node>>;

    /// Append a concrete reference to its source node's list.
    fn add_reference(&self, reference: Reference);

    /// Remove the first concrete reference equal to `reference`.
    fn remove_reference(&self, reference: &Reference) -> bool;

    /// Add several concrete references in order.
    fn add_references(&self, references: Vec<Reference>) {
        for reference in references {
            self.add_reference(reference);
        }
    }

    /// Append a virtual reference to its source node's list.
    fn add_virtual_reference(&self, reference: Reference);

    /// Remove the first virtual reference equal to `reference`.
    fn remove_virtual_reference(&self, reference: &Reference) -> bool;

    /// Concrete references, then virtual references not already concrete.
    fn get_references(&self, node_id: &NodeId) -> Vec<Reference>;

    /// [`get_references`](Self::get_references) filtered by `predicate`.
    fn get_references_matching(
        &self,
        node_id: &NodeId,
        predicate: &dyn Fn(&Reference) -> bool,
    ) -> Vec<Reference> {
        self.get_references(node_id)
            .into_iter()
            .filter(|r| predicate(r))
            .collect()
    }

    /// [`contains_node`](Self::contains_node) for an id that must first
    /// resolve to a local NodeId.
    fn contains_expanded(&self, node_id: &ExpandedNodeId, namespaces: &NamespaceTable) -> bool {
        node_id
            .to_local(namespaces)
            .map(|id| self.contains_node(&id))
            .unwrap_or(false)
    }

    /// [`get_node`](Self::get_node) for an id that must first resolve to a
    /// local NodeId.
    fn get_node_expanded(
        &self,
        node_id: &ExpandedNodeId,
        namespaces: &NamespaceTable,
    ) -> Option<Arc<Node>> {
        node_id
            .to_local(namespaces)
            .and_then(|id| self.get_node(&id))
    }
}
