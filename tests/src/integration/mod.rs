//! Integration scenarios.

pub mod fixtures;
pub mod namespaces;
pub mod routing;
pub mod sharding;
pub mod telemetry;
