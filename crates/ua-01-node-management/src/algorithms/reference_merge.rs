//! # Reference Merging
//!
//! A source node's visible references are its concrete references followed
//! by the virtual references that are not already concrete. Both lists may
//! contain duplicates; only the first occurrence of each reference counts.
//!
//! Both functions run in O(|input|) expected time using a hash set.

use crate::domain::Reference;
use std::collections::HashSet;

/// Merge concrete and virtual reference lists.
///
/// Result: unique concrete references in first-occurrence order, then the
/// unique virtual references absent from the concrete set, in
/// first-occurrence order.
pub fn merge_references(concrete: &[Reference], virtual_refs: &[Reference]) -> Vec<Reference> {
    let mut seen: HashSet<&Reference> = HashSet::with_capacity(concrete.len() + virtual_refs.len());
    let mut merged = Vec::with_capacity(concrete.len() + virtual_refs.len());

    for reference in concrete.iter().chain(virtual_refs.iter()) {
        if seen.insert(reference) {
            merged.push(reference.clone());
        }
    }

    merged
}

/// Remove structural duplicates, keeping the first occurrence of each.
pub fn dedup_references<I>(references: I) -> Vec<Reference>
where
    I: IntoIterator<Item = Reference>,
{
    let mut seen = HashSet::new();
    references
        .into_iter()
        .filter(|r| seen.insert(r.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shared_types::{NodeClass, NodeId, ReferenceTypeIds};

    fn reference(target: u32) -> Reference {
        Reference::forward(
            NodeId::numeric(1, 1),
            ReferenceTypeIds::ORGANIZES,
            NodeId::numeric(1, target),
            NodeClass::Object,
        )
    }

    #[test]
    fn test_concrete_then_virtual() {
        let merged = merge_references(&[reference(2), reference(3)], &[reference(4)]);
        assert_eq!(merged, vec![reference(2), reference(3), reference(4)]);
    }

    #[test]
    fn test_virtual_suppressed_by_concrete() {
        let merged = merge_references(&[reference(2)], &[reference(2), reference(5)]);
        assert_eq!(merged, vec![reference(2), reference(5)]);
    }

    #[test]
    fn test_duplicates_within_layers() {
        let merged = merge_references(
            &[reference(2), reference(2), reference(3)],
            &[reference(6), reference(6)],
        );
        assert_eq!(merged, vec![reference(2), reference(3), reference(6)]);
    }

    #[test]
    fn test_dedup_keeps_first_seen() {
        let deduped = dedup_references(vec![reference(3), reference(1), reference(3), reference(2)]);
        assert_eq!(deduped, vec![reference(3), reference(1), reference(2)]);
    }

    proptest! {
        #[test]
        fn prop_merge_is_unique_concrete_prefix(
            concrete in proptest::collection::vec(0u32..8, 0..20),
            virtual_refs in proptest::collection::vec(0u32..8, 0..20),
        ) {
            let concrete: Vec<_> = concrete.into_iter().map(reference).collect();
            let virtual_refs: Vec<_> = virtual_refs.into_iter().map(reference).collect();
            let merged = merge_references(&concrete, &virtual_refs);

            let unique_concrete = dedup_references(concrete.clone());
            prop_assert_eq!(&merged[..unique_concrete.len()], &unique_concrete[..]);

            let tail = &merged[unique_concrete.len()..];
            for r in tail {
                prop_assert!(!concrete.contains(r));
                prop_assert!(virtual_refs.contains(r));
            }

            let unique: HashSet<_> = merged.iter().collect();
            prop_assert_eq!(unique.len(), merged.len());
        }
    }
}
