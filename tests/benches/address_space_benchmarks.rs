//! # Address Space Benchmarks
//!
//! | Area | Operation | Expectation |
//! |------|-----------|-------------|
//! | Collation | group_map_collate | linear in batch size |
//! | Composite | read across namespaces | one dispatch per contributor |
//! | Sharding | cross-shard add_reference | constant per reference |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use shared_types::{
    DataTypeIds, NamespaceTable, NodeClass, NodeId, ReadValueId, ReferenceTypeIds,
    TimestampsToReturn, UaError,
};
use std::sync::Arc;
use std::time::Duration;
use ua_01_node_management::{CollatedNodeManager, Node, NodeManager, Reference};
use ua_02_address_space::{
    group_map_collate, AddressSpace, AddressSpaceConfig, AddressSpaceManager, Lifecycle,
    ManagedNamespace, OperationContext,
};

fn runtime() -> tokio::runtime::Runtime {
    match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => panic!("failed to build runtime: {err}"),
    }
}

// ============================================================================
// Collation
// ============================================================================

fn bench_group_map_collate(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("collate");
    group.measurement_time(Duration::from_secs(5));

    for size in [16usize, 256, 4096] {
        let mut rng = rand::thread_rng();
        let items: Vec<u32> = (0..size).map(|_| rng.gen_range(0..1_000)).collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("eight_keys", size), &items, |b, items| {
            b.to_async(&rt).iter(|| async {
                let result: Result<Vec<u32>, UaError> = group_map_collate(
                    items.clone(),
                    |item| item % 8,
                    |_, group| async move { Ok(group) },
                )
                .await;
                black_box(result)
            })
        });
    }
    group.finish();
}

// ============================================================================
// Composite routing
// ============================================================================

fn bench_composite_read(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("composite");

    for namespaces in [1u32, 4, 16] {
        let manager = match AddressSpaceManager::new(AddressSpaceConfig::default()) {
            Ok(manager) => Arc::new(manager),
            Err(err) => panic!("default configuration rejected: {err}"),
        };
        let mut items = Vec::new();
        let mut online = Vec::new();
        for n in 0..namespaces {
            let namespace = ManagedNamespace::new(Arc::clone(&manager), format!("urn:bench:{n}"));
            for id in 0..64 {
                let node_id = namespace.numeric(id);
                namespace.node_manager().add_node(Arc::new(Node::variable(
                    node_id.clone(),
                    "Value",
                    id as f64,
                    DataTypeIds::DOUBLE,
                )));
                items.push(ReadValueId::value(node_id));
            }
            if let Err(err) = rt.block_on(namespace.startup()) {
                panic!("namespace failed to start: {err}");
            }
            online.push(namespace);
        }

        group.throughput(Throughput::Elements(items.len() as u64));
        group.bench_with_input(BenchmarkId::new("read", namespaces), &items, |b, items| {
            let context = OperationContext::internal();
            b.to_async(&rt).iter(|| {
                let manager = Arc::clone(&manager);
                let context = context.clone();
                let items = items.clone();
                async move {
                    black_box(
                        manager
                            .read(&context, 0.0, TimestampsToReturn::Neither, items)
                            .await,
                    )
                }
            })
        });
    }
    group.finish();
}

// ============================================================================
// Sharding
// ============================================================================

fn bench_cross_shard_references(c: &mut Criterion) {
    let mut group = c.benchmark_group("sharding");

    let namespaces = Arc::new(NamespaceTable::new());
    let left = namespaces.add_uri("urn:bench:left");
    let right = namespaces.add_uri("urn:bench:right");
    let nodes = CollatedNodeManager::collated(Arc::clone(&namespaces));
    for id in 0..1_000 {
        nodes.add_node(Arc::new(Node::object(NodeId::numeric(left, id), "Left")));
        nodes.add_node(Arc::new(Node::object(NodeId::numeric(right, id), "Right")));
    }

    group.bench_function("add_remove_inverted", |b| {
        let mut rng = rand::thread_rng();
        b.iter(|| {
            let reference = Reference::forward(
                NodeId::numeric(left, rng.gen_range(0..1_000)),
                ReferenceTypeIds::ORGANIZES,
                NodeId::numeric(right, rng.gen_range(0..1_000)),
                NodeClass::Object,
            );
            nodes.add_reference(reference.clone());
            black_box(nodes.remove_reference(&reference))
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_group_map_collate,
    bench_composite_read,
    bench_cross_shard_references
);
criterion_main!(benches);
