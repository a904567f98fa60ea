//! # UA-02 Address Space
//!
//! Service façade and request routing for the server address space.
//!
//! **Subsystem ID:** 02
//! **Architecture:** Hexagonal (Ports/Adapters + Application)
//!
//! ## Purpose
//!
//! - Expose attribute, view, method, history and node-management services
//!   through one [`AddressSpace`] trait
//! - Route each request item to the address space that claims it, with an
//!   empty fallback so every item gets an answer
//! - Keep request order across concurrently processed groups
//! - Enforce per-service operation limits at the entry point
//!
//! ## Module Structure
//!
//! ```text
//! ua-02-address-space/
//! ├── ports/           # AddressSpace, AddressSpaceFilter, method and lifecycle plug-ins
//! ├── adapters/        # ManagedAddressSpace, EmptyAddressSpace, SimpleAddressSpaceFilter
//! ├── application/     # Composite, Manager, LifecycleManager, ManagedNamespace
//! ├── algorithms/      # GroupMapCollate, NumericRange
//! ├── context.rs       # Session, AccessContext, OperationContext
//! └── config.rs        # Operation limits
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let manager = Arc::new(AddressSpaceManager::new(AddressSpaceConfig::from_env())?);
//! let plant = Arc::new(ManagedNamespace::new(manager.clone(), "urn:example:plant"));
//!
//! let lifecycle = LifecycleManager::new();
//! lifecycle.register(plant.clone());
//! lifecycle.start_all().await?;
//!
//! let values = manager
//!     .read(&OperationContext::internal(), 0.0, TimestampsToReturn::Both, items)
//!     .await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod context;
pub mod ports;

// Re-exports
pub use adapters::{EmptyAddressSpace, ManagedAddressSpace, SimpleAddressSpaceFilter};
pub use algorithms::{group_map_collate, group_map_collate_lenient, CollateError, NumericRange};
pub use application::{AddressSpaceComposite, AddressSpaceManager, LifecycleManager, ManagedNamespace};
pub use config::{AddressSpaceConfig, ConfigError};
pub use context::{AccessContext, DiagnosticInfo, DiagnosticsContext, OperationContext, Session};
pub use ports::{
    AccessController, AddressSpace, AddressSpaceFilter, AllowAll, Lifecycle, LifecycleError,
    MethodInvocationHandler,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
