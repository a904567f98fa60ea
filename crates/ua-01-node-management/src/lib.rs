//! # UA-01 Node Management
//!
//! Node and reference storage for the address space.
//!
//! **Subsystem ID:** 01
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## Purpose
//!
//! - Store nodes and their references with per-source insertion order
//! - Keep concrete and virtual references in separate layers, with virtual
//!   references hidden behind equal concrete ones
//! - Shard storage by key (namespace index by default) and keep inverse
//!   references consistent across shards
//!
//! ## Module Structure
//!
//! ```text
//! ua-01-node-management/
//! ├── domain/          # Node, Reference, NodeError
//! ├── ports/           # NodeManager, ShardResolver
//! ├── adapters/        # InMemory, Delegating, Collated managers
//! └── algorithms/      # Reference merging and de-duplication
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{CollatedNodeManager, DelegatingNodeManager, InMemoryNodeManager, NamespaceShards};
pub use algorithms::{dedup_references, merge_references};
pub use domain::{Node, NodeError, Reference};
pub use ports::{FnShardResolver, NodeManager, ShardResolver};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
