//! # Application Layer
//!
//! - `composite`: per-item routing across registered address spaces
//! - `manager`: server entry point with limits and node lookups
//! - `lifecycle`: ordered startup and shutdown
//! - `namespace`: an in-memory namespace wired into a manager

pub mod composite;
pub mod lifecycle;
pub mod manager;
pub mod namespace;

pub use composite::AddressSpaceComposite;
pub use lifecycle::LifecycleManager;
pub use manager::AddressSpaceManager;
pub use namespace::ManagedNamespace;
