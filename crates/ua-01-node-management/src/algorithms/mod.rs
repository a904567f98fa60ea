//! # Algorithms Module
//!
//! Reference-list merging and de-duplication.

pub mod reference_merge;

pub use reference_merge::{dedup_references, merge_references};
