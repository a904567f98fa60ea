//! # Sharded Node Storage
//!
//! A collated node manager spread over several namespaces, served through
//! one address space. References that cross shards must show up from both
//! ends.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use shared_types::{
        AddReferencesItem, DeleteReferencesItem, ExpandedNodeId, NamespaceTable, NodeClass,
        NodeId, ReferenceTypeIds, StatusCode, ViewDescription,
    };
    use std::sync::Arc;
    use ua_01_node_management::{CollatedNodeManager, Node, NodeManager, Reference};
    use ua_02_address_space::{
        AddressSpace, AddressSpaceComposite, ManagedAddressSpace, OperationContext,
        SimpleAddressSpaceFilter,
    };

    struct Sharded {
        namespaces: Arc<NamespaceTable>,
        nodes: Arc<CollatedNodeManager>,
        line: u16,
        cell: u16,
    }

    fn sharded() -> Sharded {
        let namespaces = Arc::new(NamespaceTable::new());
        let line = namespaces.add_uri("urn:factory:line");
        let cell = namespaces.add_uri("urn:factory:cell");
        let nodes = Arc::new(CollatedNodeManager::collated(Arc::clone(&namespaces)));

        for ns in [line, cell] {
            for id in 1..=3 {
                nodes.add_node(Arc::new(Node::object(NodeId::numeric(ns, id), "Station")));
            }
        }
        Sharded {
            namespaces,
            nodes,
            line,
            cell,
        }
    }

    #[test]
    fn test_cross_shard_reference_visible_from_target() {
        let s = sharded();
        let source = NodeId::numeric(s.line, 1);
        let target = NodeId::numeric(s.cell, 2);

        s.nodes.add_reference(Reference::forward(
            source.clone(),
            ReferenceTypeIds::ORGANIZES,
            target.clone(),
            NodeClass::Object,
        ));

        let inverse = s.nodes.shard_for(s.cell).get_references(&target);
        assert_eq!(
            inverse,
            vec![Reference::inverse(
                target.clone(),
                ReferenceTypeIds::ORGANIZES,
                source.clone(),
                NodeClass::Object
            )]
        );
        assert_eq!(s.nodes.shard_count(), 2);
    }

    #[test]
    fn test_uri_qualified_target_resolves_to_shard() {
        let s = sharded();
        let source = NodeId::numeric(s.line, 3);
        let target = ExpandedNodeId::with_namespace_uri(NodeId::numeric(0, 1), "urn:factory:cell");

        s.nodes.add_reference(Reference::forward(
            source.clone(),
            ReferenceTypeIds::HAS_COMPONENT,
            target,
            NodeClass::Object,
        ));

        let on_target = s.nodes.get_references(&NodeId::numeric(s.cell, 1));
        assert_eq!(on_target.len(), 1);
        assert_eq!(on_target[0].target_node_id, ExpandedNodeId::from(source));
        assert!(!on_target[0].is_forward);
    }

    #[test]
    fn test_remote_target_not_inverted() {
        let s = sharded();
        let source = NodeId::numeric(s.line, 1);
        s.nodes.add_reference(Reference::forward(
            source.clone(),
            ReferenceTypeIds::ORGANIZES,
            ExpandedNodeId::remote(NodeId::numeric(1, 5), 3),
            NodeClass::Object,
        ));

        assert_eq!(s.nodes.get_references(&source).len(), 1);
        assert!(s.nodes.get_references(&NodeId::numeric(1, 5)).is_empty());
    }

    #[tokio::test]
    async fn test_reference_services_through_address_space() {
        let s = sharded();
        let space = Arc::new(
            ManagedAddressSpace::new(
                "factory",
                s.nodes.clone(),
                SimpleAddressSpaceFilter::new({
                    let (line, cell) = (s.line, s.cell);
                    move |id: &NodeId| id.namespace == line || id.namespace == cell
                }),
            )
            .with_namespaces(Arc::clone(&s.namespaces)),
        );
        let composite = AddressSpaceComposite::new();
        composite.register(space);
        let context = OperationContext::internal();

        let source = NodeId::numeric(s.line, 2);
        let target = NodeId::numeric(s.cell, 3);
        let added = composite
            .add_references(
                &context,
                vec![AddReferencesItem {
                    source_node_id: source.clone(),
                    reference_type_id: ReferenceTypeIds::ORGANIZES,
                    is_forward: true,
                    target_server_uri: None,
                    target_node_id: target.clone().into(),
                    target_node_class: NodeClass::Object,
                }],
            )
            .await
            .unwrap();
        assert_eq!(added, vec![StatusCode::GOOD]);

        let browsed = composite
            .browse(&context, &ViewDescription::default(), &target)
            .await
            .unwrap();
        assert_eq!(browsed.len(), 1);
        assert_eq!(browsed[0].target_node_id, ExpandedNodeId::from(source.clone()));

        let deleted = composite
            .delete_references(
                &context,
                vec![DeleteReferencesItem {
                    source_node_id: source.clone(),
                    reference_type_id: ReferenceTypeIds::ORGANIZES,
                    is_forward: true,
                    target_node_id: target.clone().into(),
                    delete_bidirectional: true,
                }],
            )
            .await
            .unwrap();
        assert_eq!(deleted, vec![StatusCode::GOOD]);
        assert!(s.nodes.get_references(&source).is_empty());
        assert!(s.nodes.get_references(&target).is_empty());
    }

    proptest! {
        #[test]
        fn prop_every_local_reference_has_its_inverse(
            edges in proptest::collection::vec((0u16..2, 1u32..=3, 0u16..2, 1u32..=3), 1..24)
        ) {
            let s = sharded();
            let ns = [s.line, s.cell];
            let mut added = Vec::new();
            for (source_ns, source_id, target_ns, target_id) in edges {
                let reference = Reference::forward(
                    NodeId::numeric(ns[source_ns as usize], source_id),
                    ReferenceTypeIds::ORGANIZES,
                    NodeId::numeric(ns[target_ns as usize], target_id),
                    NodeClass::Object,
                );
                s.nodes.add_reference(reference.clone());
                added.push(reference);
            }

            for reference in &added {
                let target = reference.target_node_id.to_local(&s.namespaces).unwrap();
                let expected = reference.invert(target.clone(), NodeClass::Object);
                prop_assert!(s
                    .nodes
                    .get_references(&target)
                    .contains(&expected));
            }
        }
    }
}
