//! In-Memory Node Manager
//!
//! Nodes live in a `DashMap` so lookups on unrelated ids never contend.
//! Both reference layers sit behind one mutex: mutation and snapshot reads
//! of reference lists serialize manager-wide.

use crate::algorithms::merge_references;
use crate::domain::{Node, Reference};
use crate::ports::NodeManager;
use dashmap::DashMap;
use parking_lot::Mutex;
use shared_types::NodeId;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
struct ReferenceIndex {
    concrete: HashMap<NodeId, Vec<Reference>>,
    virtual_refs: HashMap<NodeId, Vec<Reference>>,
}

fn push(layer: &mut HashMap<NodeId, Vec<Reference>>, reference: Reference) {
    layer
        .entry(reference.source_node_id.clone())
        .or_default()
        .push(reference);
}

fn remove_first(layer: &mut HashMap<NodeId, Vec<Reference>>, reference: &Reference) -> bool {
    let Some(list) = layer.get_mut(&reference.source_node_id) else {
        return false;
    };
    let Some(position) = list.iter().position(|r| r == reference) else {
        return false;
    };
    list.remove(position);
    if list.is_empty() {
        layer.remove(&reference.source_node_id);
    }
    true
}

/// Thread-safe in-memory node and reference store.
#[derive(Debug, Default)]
pub struct InMemoryNodeManager {
    nodes: DashMap<NodeId, Arc<Node>>,
    references: Mutex<ReferenceIndex>,
}

impl InMemoryNodeManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Snapshot of stored node ids, in no particular order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Drop every concrete and virtual reference stored on `source`.
    /// Returns how many were removed.
    pub fn remove_references_from(&self, source: &NodeId) -> usize {
        let mut index = self.references.lock();
        let concrete = index.concrete.remove(source).map_or(0, |l| l.len());
        let virtual_refs = index.virtual_refs.remove(source).map_or(0, |l| l.len());
        debug!(node_id = %source, concrete, virtual_refs, "Cleared references");
        concrete + virtual_refs
    }
}

impl NodeManager for InMemoryNodeManager {
    fn add_node(&self, node: Arc<Node>) -> Option<Arc<Node>> {
        debug!(node_id = %node.node_id(), node_class = ?node.node_class(), "Adding node");
        self.nodes.insert(node.node_id().clone(), node)
    }

    fn contains_node(&self, node_id: &NodeId) -> bool {
        self.nodes.contains_key(node_id)
    }

    fn get_node(&self, node_id: &NodeId) -> Option<Arc<Node>> {
        self.nodes.get(node_id).map(|entry| Arc::clone(entry.value()))
    }

    fn remove_node(&self, node_id: &NodeId) -> Option<Arc<Node>> {
        let removed = self.nodes.remove(node_id).map(|(_, node)| node);
        if removed.is_some() {
            debug!(node_id = %node_id, "Removed node");
        }
        removed
    }

    fn add_reference(&self, reference: Reference) {
        push(&mut self.references.lock().concrete, reference);
    }

    fn remove_reference(&self, reference: &Reference) -> bool {
        remove_first(&mut self.references.lock().concrete, reference)
    }

    fn add_references(&self, references: Vec<Reference>) {
        let mut index = self.references.lock();
        for reference in references {
            push(&mut index.concrete, reference);
        }
    }

    fn add_virtual_reference(&self, reference: Reference) {
        push(&mut self.references.lock().virtual_refs, reference);
    }

    fn remove_virtual_reference(&self, reference: &Reference) -> bool {
        remove_first(&mut self.references.lock().virtual_refs, reference)
    }

    fn get_references(&self, node_id: &NodeId) -> Vec<Reference> {
        let index = self.references.lock();
        let concrete = index.concrete.get(node_id).map_or(&[][..], Vec::as_slice);
        let virtual_refs = index
            .virtual_refs
            .get(node_id)
            .map_or(&[][..], Vec::as_slice);
        merge_references(concrete, virtual_refs)
    }
}
