//! # Algorithms
//!
//! - `collate`: scatter/gather of batched requests by owner
//! - `index_range`: NumericRange parsing and slicing

pub mod collate;
pub mod index_range;

pub use collate::{group_map_collate, group_map_collate_lenient, CollateError};
pub use index_range::NumericRange;
