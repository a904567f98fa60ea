//! # Domain Module
//!
//! Core domain types for node management: nodes, references and the
//! errors raised when accessing node attributes.

pub mod errors;
pub mod node;
pub mod reference;

pub use errors::*;
pub use node::*;
pub use reference::*;
