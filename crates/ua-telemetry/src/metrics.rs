//! Prometheus metrics for the address-space routing core.
//!
//! All metrics follow the naming convention: `ua_<component>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: routed operations, routing misses, contributor failures
//! - **Histogram**: batch sizes per operation

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, HistogramOpts, HistogramVec, Opts,
    Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Metrics registry for this workspace
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // ROUTING METRICS
    // =========================================================================

    /// Operations routed through the composite, by operation kind
    pub static ref OPERATIONS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("ua_address_space_operations_total", "Operations routed by the composite"),
        &["operation"]  // read/write/browse/call/...
    ).expect("metric creation failed");

    /// Items no contributor claimed, answered by the empty address space
    pub static ref ROUTING_MISSES: CounterVec = CounterVec::new(
        Opts::new(
            "ua_address_space_routing_misses_total",
            "Items routed to the empty address space"
        ),
        &["operation"]
    ).expect("metric creation failed");

    /// Contributor failures absorbed by fan-out or lenient collation
    pub static ref CONTRIBUTOR_FAILURES: CounterVec = CounterVec::new(
        Opts::new(
            "ua_address_space_contributor_failures_total",
            "Contributor failures converted to per-item status or ignored"
        ),
        &["operation"]
    ).expect("metric creation failed");

    /// Batch size distribution per operation
    pub static ref BATCH_SIZE: HistogramVec = HistogramVec::new(
        HistogramOpts::new("ua_address_space_batch_size", "Items per batched request")
            .buckets(exponential_buckets(1.0, 2.0, 14).unwrap_or_default()),
        &["operation"]
    ).expect("metric creation failed");

    // =========================================================================
    // METHOD METRICS
    // =========================================================================

    /// Method invocations by outcome
    pub static ref METHOD_CALLS: CounterVec = CounterVec::new(
        Opts::new("ua_address_space_method_calls_total", "Method invocations"),
        &["outcome"]  // good/bad/not_implemented/panicked
    ).expect("metric creation failed");

    // =========================================================================
    // NODE MANAGER METRICS
    // =========================================================================

    /// Inverse references maintained by the sharding layer
    pub static ref REFERENCES_INVERTED: Counter = Counter::new(
        "ua_node_manager_references_inverted_total",
        "Inverse references added or removed on target shards"
    ).expect("metric creation failed");
}

/// Handle to the registered metrics.
#[derive(Debug, Clone)]
pub struct MetricsHandle {
    registry: Registry,
}

impl MetricsHandle {
    /// Encode all metrics in the Prometheus text format.
    pub fn gather_text(&self) -> Result<String, TelemetryError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
    }
}

/// Register all metrics with the registry.
///
/// Registering twice is not an error: already-registered collectors are
/// skipped.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Routing
        Box::new(OPERATIONS_TOTAL.clone()),
        Box::new(ROUTING_MISSES.clone()),
        Box::new(CONTRIBUTOR_FAILURES.clone()),
        Box::new(BATCH_SIZE.clone()),
        // Methods
        Box::new(METHOD_CALLS.clone()),
        // Node managers
        Box::new(REFERENCES_INVERTED.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        registry: REGISTRY.clone(),
    })
}

/// Record one routed batch: bumps the operation counter and observes its size.
pub fn record_batch(operation: &str, size: usize) {
    OPERATIONS_TOTAL.with_label_values(&[operation]).inc();
    BATCH_SIZE
        .with_label_values(&[operation])
        .observe(size as f64);
}
