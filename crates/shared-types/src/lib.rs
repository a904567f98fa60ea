//! # Shared Types Crate
//!
//! OPC UA value types used across the address-space crates.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: identifiers, status codes and service items
//!   are defined once here and consumed everywhere else.
//! - **Already Deserialized**: request items arrive from the transport layer
//!   fully decoded; nothing in this crate knows about wire bytes.
//! - **Value Semantics**: `NodeId`, `ExpandedNodeId` and the request items
//!   compare and hash by value, so they can key maps directly.

pub mod attributes;
pub mod errors;
pub mod ids;
pub mod monitoring;
pub mod namespace;
pub mod node_id;
pub mod services;
pub mod status;
pub mod variant;

pub use attributes::*;
pub use errors::*;
pub use ids::*;
pub use monitoring::*;
pub use namespace::NamespaceTable;
pub use node_id::{ExpandedNodeId, Identifier, NodeId};
pub use services::*;
pub use status::StatusCode;
pub use variant::{DataValue, Variant};
