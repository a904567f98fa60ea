//! # Adapters
//!
//! - `ManagedAddressSpace`: address space over one node manager
//! - `EmptyAddressSpace`: the composite's fallback
//! - `SimpleAddressSpaceFilter`: NodeId-predicate filter

pub mod empty;
pub mod managed;
pub mod simple_filter;

pub use empty::EmptyAddressSpace;
pub use managed::ManagedAddressSpace;
pub use simple_filter::SimpleAddressSpaceFilter;
