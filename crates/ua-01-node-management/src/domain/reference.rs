//! # References
//!
//! A reference is a typed, directed edge stored on its source node.
//! Equality is structural over all five fields; it drives de-duplication
//! and removal.

use serde::{Deserialize, Serialize};
use shared_types::{ExpandedNodeId, NodeClass, NodeId};

/// A typed edge from a source node to a (possibly foreign) target.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    /// Node the reference is stored on.
    pub source_node_id: NodeId,
    /// ReferenceType of the edge.
    pub reference_type_id: NodeId,
    /// Target, possibly in another namespace or server.
    pub target_node_id: ExpandedNodeId,
    /// Class of the target, `Unspecified` when unknown.
    pub target_node_class: NodeClass,
    /// Direction relative to the source.
    pub is_forward: bool,
}

impl Reference {
    /// Create a reference.
    pub fn new(
        source_node_id: NodeId,
        reference_type_id: NodeId,
        target_node_id: impl Into<ExpandedNodeId>,
        target_node_class: NodeClass,
        is_forward: bool,
    ) -> Self {
        Self {
            source_node_id,
            reference_type_id,
            target_node_id: target_node_id.into(),
            target_node_class,
            is_forward,
        }
    }

    /// A forward reference.
    pub fn forward(
        source_node_id: NodeId,
        reference_type_id: NodeId,
        target_node_id: impl Into<ExpandedNodeId>,
        target_node_class: NodeClass,
    ) -> Self {
        Self::new(source_node_id, reference_type_id, target_node_id, target_node_class, true)
    }

    /// An inverse reference.
    pub fn inverse(
        source_node_id: NodeId,
        reference_type_id: NodeId,
        target_node_id: impl Into<ExpandedNodeId>,
        target_node_class: NodeClass,
    ) -> Self {
        Self::new(source_node_id, reference_type_id, target_node_id, target_node_class, false)
    }

    /// The logical inverse, stored on `local_target`.
    ///
    /// Same reference type, endpoints swapped, direction flipped; the new
    /// target class is the class of this reference's source.
    pub fn invert(&self, local_target: NodeId, source_node_class: NodeClass) -> Reference {
        Reference {
            source_node_id: local_target,
            reference_type_id: self.reference_type_id.clone(),
            target_node_id: ExpandedNodeId::from(self.source_node_id.clone()),
            target_node_class: source_node_class,
            is_forward: !self.is_forward,
        }
    }

    /// True when this is a forward reference of `reference_type_id`.
    pub fn is_forward_of(&self, reference_type_id: &NodeId) -> bool {
        self.is_forward && &self.reference_type_id == reference_type_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::ReferenceTypeIds;

    #[test]
    fn test_invert_swaps_endpoints() {
        let r = Reference::forward(
            NodeId::numeric(1, 10),
            ReferenceTypeIds::ORGANIZES,
            NodeId::numeric(2, 20),
            NodeClass::Variable,
        );
        let inv = r.invert(NodeId::numeric(2, 20), NodeClass::Object);

        assert_eq!(inv.source_node_id, NodeId::numeric(2, 20));
        assert_eq!(inv.target_node_id, ExpandedNodeId::from(NodeId::numeric(1, 10)));
        assert_eq!(inv.target_node_class, NodeClass::Object);
        assert_eq!(inv.reference_type_id, ReferenceTypeIds::ORGANIZES);
        assert!(!inv.is_forward);
    }

    #[test]
    fn test_structural_equality() {
        let a = Reference::forward(
            NodeId::numeric(1, 1),
            ReferenceTypeIds::HAS_COMPONENT,
            NodeId::numeric(1, 2),
            NodeClass::Method,
        );
        let mut b = a.clone();
        assert_eq!(a, b);
        b.is_forward = false;
        assert_ne!(a, b);
    }
}
