//! # Ports
//!
//! - `AddressSpace`: the service façade every contributor implements
//! - `AddressSpaceFilter`: ownership predicates used for routing
//! - `MethodInvocationHandler` / `AccessController`: plug-ins of a managed
//!   address space
//! - `Lifecycle`: startup and shutdown of registered components

pub mod address_space;
pub mod filter;
pub mod lifecycle;
pub mod method;

pub use address_space::AddressSpace;
pub use filter::AddressSpaceFilter;
pub use lifecycle::{Lifecycle, LifecycleError};
pub use method::{AccessController, AllowAll, MethodInvocationHandler};
