//! # Address Space Test Suite
//!
//! Cross-crate scenarios that no single crate can cover on its own.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── address_space_benchmarks.rs   # collate, composite routing, sharding
//! └── src/integration/
//!     ├── fixtures.rs      # shared namespaces and contributors
//!     ├── routing.rs       # composite coverage and fan-out resilience
//!     ├── sharding.rs      # collated node managers and reference inversion
//!     ├── namespaces.rs    # manager + ManagedNamespace end to end
//!     └── telemetry.rs     # metrics exposition
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ua-tests
//!
//! # By area
//! cargo test -p ua-tests integration::routing
//! cargo test -p ua-tests integration::sharding
//!
//! # Benchmarks
//! cargo bench -p ua-tests
//! ```

#![allow(dead_code)]

pub mod integration;
