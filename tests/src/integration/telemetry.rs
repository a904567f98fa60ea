//! # Telemetry
//!
//! Routing activity must be visible in the Prometheus exposition.

#[cfg(test)]
mod tests {
    use super::super::fixtures::{self, ids};
    use shared_types::{CallMethodRequest, NodeId, TimestampsToReturn, Variant};
    use ua_02_address_space::{AddressSpace, Lifecycle, OperationContext};
    use ua_telemetry::{register_metrics, METHOD_CALLS, ROUTING_MISSES};

    #[tokio::test]
    async fn test_routing_activity_exposed() {
        let metrics = register_metrics().unwrap();
        let manager = fixtures::manager();
        let plant = fixtures::plant(&manager, "urn:plant");
        plant.startup().await.unwrap();

        let misses_before = ROUTING_MISSES.with_label_values(&["read"]).get();
        let good_before = METHOD_CALLS.with_label_values(&["good"]).get();

        let context = OperationContext::internal();
        manager
            .read(
                &context,
                0.0,
                TimestampsToReturn::Neither,
                vec![
                    fixtures::read_value(plant.numeric(ids::TEMPERATURE)),
                    fixtures::read_value(NodeId::numeric(99, 1)),
                ],
            )
            .await
            .unwrap();
        manager
            .call(
                &context,
                vec![CallMethodRequest {
                    object_id: plant.numeric(ids::BOILER),
                    method_id: plant.numeric(ids::RESET),
                    input_arguments: vec![Variant::Double(1.0)],
                }],
            )
            .await
            .unwrap();

        // Other tests share the registry, so only growth is checked.
        assert!(ROUTING_MISSES.with_label_values(&["read"]).get() >= misses_before + 1.0);
        assert!(METHOD_CALLS.with_label_values(&["good"]).get() >= good_before + 1.0);

        let text = metrics.gather_text().unwrap();
        for name in [
            "ua_address_space_operations_total",
            "ua_address_space_routing_misses_total",
            "ua_address_space_batch_size",
            "ua_address_space_method_calls_total",
        ] {
            assert!(text.contains(name), "{name} missing from exposition");
        }
    }
}
