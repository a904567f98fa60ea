//! # Ports Module
//!
//! - `NodeManager`: node and reference storage contract
//! - `ShardResolver`: maps a NodeId to the NodeManager that owns it

pub mod node_manager;
pub mod shard_resolver;

pub use node_manager::NodeManager;
pub use shard_resolver::{FnShardResolver, ShardResolver};
