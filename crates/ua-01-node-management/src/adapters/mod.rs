//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implementations of the `NodeManager` port:
//! - `InMemoryNodeManager`: concurrent in-memory store
//! - `DelegatingNodeManager`: key-based sharding with reference inversion
//! - `CollatedNodeManager`: one in-memory shard per namespace index

mod collated;
mod delegating;
mod memory;

pub use collated::{CollatedNodeManager, NamespaceShards};
pub use delegating::DelegatingNodeManager;
pub use memory::InMemoryNodeManager;
