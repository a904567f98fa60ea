//! # Composite Routing
//!
//! Batches spanning several contributors, an unreachable contributor and
//! nodes nobody owns. Every batch must come back complete and in order.

#[cfg(test)]
mod tests {
    use super::super::fixtures::{self, ids, Offline};
    use shared_types::{
        AttributeId, CallMethodRequest, DataValue, NodeId, ReferenceTypeIds, StatusCode,
        TimestampsToReturn, Variant, ViewDescription, WriteValue,
    };
    use std::sync::Arc;
    use ua_02_address_space::{AddressSpace, Lifecycle, ManagedNamespace, OperationContext};

    #[tokio::test]
    async fn test_mixed_batch_keeps_request_order() {
        let manager = fixtures::manager();
        let north = fixtures::plant(&manager, "urn:plant:north");
        let south = fixtures::plant(&manager, "urn:plant:south");
        north.startup().await.unwrap();
        south.startup().await.unwrap();

        let items = vec![
            fixtures::read_value(south.numeric(ids::TEMPERATURE)),
            fixtures::read_value(NodeId::numeric(42, 1)),
            fixtures::read_value(north.numeric(ids::SETPOINT)),
            fixtures::read_value(south.numeric(ids::SETPOINT)),
            fixtures::read_value(north.numeric(9999)),
        ];
        let results = manager
            .read(&OperationContext::internal(), 0.0, TimestampsToReturn::Neither, items)
            .await
            .unwrap();

        assert_eq!(results.len(), 5);
        assert_eq!(results[0].value, Variant::Double(71.5));
        assert_eq!(results[1].status, StatusCode::BAD_NODE_ID_UNKNOWN);
        assert_eq!(results[2].value, Variant::Double(70.0));
        assert_eq!(results[3].value, Variant::Double(70.0));
        assert_eq!(results[4].status, StatusCode::BAD_NODE_ID_UNKNOWN);
    }

    #[tokio::test]
    async fn test_offline_contributor_fails_only_its_items() {
        let manager = fixtures::manager();
        let plant = fixtures::plant(&manager, "urn:plant");
        plant.startup().await.unwrap();
        let offline_ns = manager.namespaces().add_uri("urn:offline");
        let offline = Arc::new(Offline::new(offline_ns));
        manager.register(offline.clone());

        let context = OperationContext::internal();
        let writes = vec![
            WriteValue::new(NodeId::numeric(offline_ns, 1), AttributeId::Value, DataValue::new(1.0f64)),
            WriteValue::new(plant.numeric(ids::SETPOINT), AttributeId::Value, DataValue::new(65.0f64)),
            WriteValue::new(NodeId::numeric(offline_ns, 2), AttributeId::Value, DataValue::new(2.0f64)),
        ];
        let statuses = manager.write(&context, writes).await.unwrap();

        assert_eq!(
            statuses,
            vec![
                StatusCode::BAD_INTERNAL_ERROR,
                StatusCode::GOOD,
                StatusCode::BAD_INTERNAL_ERROR
            ]
        );
        // Both offline items travel in one group.
        assert_eq!(offline.calls(), 1);

        let read = manager
            .read(
                &context,
                0.0,
                TimestampsToReturn::Neither,
                vec![fixtures::read_value(plant.numeric(ids::SETPOINT))],
            )
            .await
            .unwrap();
        assert_eq!(read[0].value, Variant::Double(65.0));
    }

    #[tokio::test]
    async fn test_reference_fan_out_survives_failures() {
        let manager = fixtures::manager();
        let plant = fixtures::plant(&manager, "urn:plant");
        plant.startup().await.unwrap();
        manager.register(Arc::new(Offline::new(plant.index())));

        let references = manager
            .get_references(
                &OperationContext::internal(),
                &ViewDescription::default(),
                &plant.numeric(ids::BOILER),
            )
            .await
            .unwrap();

        assert_eq!(references.len(), 4);
        assert!(references
            .iter()
            .all(|r| r.is_forward_of(&ReferenceTypeIds::HAS_COMPONENT)));
    }

    #[tokio::test]
    async fn test_browse_routes_to_first_claimant() {
        let manager = fixtures::manager();
        let plant = fixtures::plant(&manager, "urn:plant");
        plant.startup().await.unwrap();
        // Registered after the plant, so it never sees the plant's nodes.
        let shadow = Arc::new(Offline::new(plant.index()));
        manager.register(shadow.clone());

        let references = manager
            .browse(
                &OperationContext::internal(),
                &ViewDescription::default(),
                &plant.numeric(ids::TEMPERATURE),
            )
            .await
            .unwrap();
        assert_eq!(references.len(), 1);
        assert_eq!(shadow.calls(), 0);

        let unowned = NodeId::numeric(77, 1);
        let missing = manager
            .browse(&OperationContext::internal(), &ViewDescription::default(), &unowned)
            .await;
        assert_eq!(missing.unwrap_err().status_code(), StatusCode::BAD_NODE_ID_UNKNOWN);
    }

    #[tokio::test]
    async fn test_calls_across_namespaces() {
        let manager = fixtures::manager();
        let north = fixtures::plant(&manager, "urn:plant:north");
        let south = fixtures::plant(&manager, "urn:plant:south");
        north.startup().await.unwrap();
        south.startup().await.unwrap();

        let call = |ns: &ManagedNamespace, inputs: Vec<Variant>| CallMethodRequest {
            object_id: ns.numeric(ids::BOILER),
            method_id: ns.numeric(ids::RESET),
            input_arguments: inputs,
        };
        let results = manager
            .call(
                &OperationContext::internal(),
                vec![
                    call(&north, vec![Variant::Double(1.0), Variant::Double(2.0)]),
                    call(&south, vec![Variant::String("hot".into())]),
                    call(&south, vec![Variant::Double(40.0)]),
                ],
            )
            .await
            .unwrap();

        assert_eq!(results[0].status_code, StatusCode::GOOD);
        assert_eq!(results[0].output_arguments, vec![Variant::Double(3.0)]);
        assert_eq!(results[1].status_code, StatusCode::BAD_TYPE_MISMATCH);
        assert_eq!(results[2].output_arguments, vec![Variant::Double(40.0)]);
    }
}
