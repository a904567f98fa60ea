//! # Managed Namespaces
//!
//! Namespaces brought online and offline by the lifecycle manager, then
//! reached through the address space manager.

#[cfg(test)]
mod tests {
    use super::super::fixtures::{self, ids};
    use shared_types::{
        AttributeId, DataItem, DataValue, ExpandedNodeId, NodeId, ReadValueId, StatusCode,
        TimestampsToReturn, Variant, WriteValue,
    };
    use std::sync::Arc;
    use ua_01_node_management::Reference;
    use ua_02_address_space::{
        AddressSpace, Lifecycle, LifecycleError, LifecycleManager, OperationContext,
    };

    #[tokio::test]
    async fn test_lifecycle_brings_namespaces_online_and_offline() {
        let manager = fixtures::manager();
        let north = Arc::new(fixtures::plant(&manager, "urn:plant:north"));
        let south = Arc::new(fixtures::plant(&manager, "urn:plant:south"));
        let lifecycle = LifecycleManager::new();
        lifecycle.register(north.clone());
        lifecycle.register(south.clone());

        lifecycle.start_all().await.unwrap();
        assert_eq!(lifecycle.running(), 2);
        assert_eq!(manager.composite().len(), 2);

        let context = OperationContext::internal();
        let temperature = south.numeric(ids::TEMPERATURE);
        let read = manager
            .read(&context, 0.0, TimestampsToReturn::Neither, vec![fixtures::read_value(temperature.clone())])
            .await
            .unwrap();
        assert_eq!(read[0].value, Variant::Double(71.5));

        lifecycle.stop_all().await.unwrap();
        assert!(!north.is_running());
        assert!(manager.composite().is_empty());
        assert!(manager.get_managed_node(&temperature).is_none());

        let read = manager
            .read(&context, 0.0, TimestampsToReturn::Neither, vec![fixtures::read_value(temperature)])
            .await
            .unwrap();
        assert_eq!(read[0].status, StatusCode::BAD_NODE_ID_UNKNOWN);
    }

    #[tokio::test]
    async fn test_failed_start_rolls_back_started_namespaces() {
        let manager = fixtures::manager();
        let plant = Arc::new(fixtures::plant(&manager, "urn:plant"));
        // Starting the same namespace twice fails the second entry.
        let lifecycle = LifecycleManager::new();
        lifecycle.register(plant.clone());
        lifecycle.register(plant.clone());

        let result = lifecycle.start_all().await;
        assert!(matches!(result, Err(LifecycleError::AlreadyStarted(_))));
        assert!(!plant.is_running());
        assert!(manager.composite().is_empty());
    }

    #[tokio::test]
    async fn test_namespace_qualified_lookup() {
        let manager = fixtures::manager();
        let plant = fixtures::plant(&manager, "urn:plant");
        plant.startup().await.unwrap();

        let by_uri = ExpandedNodeId::with_namespace_uri(NodeId::numeric(0, ids::BOILER), "urn:plant");
        let node = manager.get_managed_node_expanded(&by_uri).unwrap();
        assert_eq!(node.node_id(), &plant.numeric(ids::BOILER));

        let unknown = ExpandedNodeId::with_namespace_uri(NodeId::numeric(0, ids::BOILER), "urn:elsewhere");
        assert!(manager.get_managed_node_expanded(&unknown).is_none());

        let children = manager.get_managed_references_matching(&plant.numeric(ids::BOILER), &|r: &Reference| r.is_forward);
        assert_eq!(children.len(), 4);
    }

    #[tokio::test]
    async fn test_index_range_and_rejected_write_diagnostics() {
        let manager = fixtures::manager();
        let plant = fixtures::plant(&manager, "urn:plant");
        plant.startup().await.unwrap();
        let context = OperationContext::internal();

        let mut ranged = ReadValueId::value(plant.numeric(ids::ALARMS));
        ranged.index_range = Some("1:2".into());
        let read = manager
            .read(&context, 0.0, TimestampsToReturn::Neither, vec![ranged])
            .await
            .unwrap();
        assert_eq!(read[0].value, Variant::Array(vec![Variant::Int32(5), Variant::Int32(8)]));

        let mut ranged_write = WriteValue::new(
            plant.numeric(ids::ALARMS),
            AttributeId::Value,
            DataValue::new(Variant::Array(vec![Variant::Int32(1)])),
        );
        ranged_write.index_range = Some("0".into());
        let statuses = manager.write(&context, vec![ranged_write]).await.unwrap();
        assert_eq!(statuses, vec![StatusCode::BAD_INDEX_RANGE_INVALID]);
        assert!(!context.diagnostics().for_node(&plant.numeric(ids::ALARMS)).is_empty());
    }

    #[tokio::test]
    async fn test_monitored_items_reach_owning_namespace() {
        let manager = fixtures::manager();
        let north = fixtures::plant(&manager, "urn:plant:north");
        let south = fixtures::plant(&manager, "urn:plant:south");
        north.startup().await.unwrap();
        south.startup().await.unwrap();

        let items = vec![
            DataItem::new(1, ReadValueId::value(north.numeric(ids::TEMPERATURE)), 100.0),
            DataItem::new(2, ReadValueId::value(south.numeric(ids::TEMPERATURE)), 100.0),
            DataItem::new(3, ReadValueId::value(south.numeric(ids::SETPOINT)), 250.0),
            DataItem::new(4, ReadValueId::value(NodeId::numeric(60, 1)), 250.0),
        ];
        manager.on_data_items_created(&items);

        assert_eq!(north.address_space().monitored_item_count(), 1);
        assert_eq!(south.address_space().monitored_item_count(), 2);

        manager.on_data_items_deleted(&items[1..2]);
        assert_eq!(south.address_space().monitored_item_count(), 1);
    }

    #[tokio::test]
    async fn test_batch_limits_enforced_before_routing() {
        let manager = fixtures::manager();
        let plant = fixtures::plant(&manager, "urn:plant");
        plant.startup().await.unwrap();
        let context = OperationContext::internal();

        let empty = manager.read(&context, 0.0, TimestampsToReturn::Both, Vec::new()).await;
        assert_eq!(empty.unwrap_err().status_code(), StatusCode::BAD_NOTHING_TO_DO);

        let limit = manager.config().max_nodes_per_read;
        let oversized = (0..=limit)
            .map(|_| fixtures::read_value(plant.numeric(ids::TEMPERATURE)))
            .collect();
        let rejected = manager.read(&context, 0.0, TimestampsToReturn::Both, oversized).await;
        assert_eq!(rejected.unwrap_err().status_code(), StatusCode::BAD_TOO_MANY_OPERATIONS);
    }
}
