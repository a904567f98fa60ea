//! # Group / Map / Collate
//!
//! Scatter/gather for batched requests:
//!
//! 1. Partition the batch by key, remembering each item's original index.
//! 2. Call the mapper once per distinct key with that key's items, in their
//!    original relative order.
//! 3. Run every group concurrently.
//! 4. Write each group's results back at the original indexes.
//!
//! The output always has the input's length and `output[i]` answers
//! `input[i]`. Grouping happens eagerly when the function is called; the
//! returned future only drives the per-group work.

use futures::future::{join_all, try_join_all};
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use thiserror::Error;

/// Errors produced by the collation itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollateError {
    /// A mapper returned a different number of results than it was given.
    #[error("Group returned {actual} results for {expected} items")]
    LengthMismatch {
        /// Items handed to the mapper.
        expected: usize,
        /// Results the mapper returned.
        actual: usize,
    },

    /// A result slot was never filled.
    #[error("Result {0} missing after collation")]
    MissingResult(usize),
}

impl From<CollateError> for shared_types::UaError {
    fn from(err: CollateError) -> Self {
        shared_types::UaError::Internal(err.to_string())
    }
}

struct Group<K, T> {
    key: K,
    indexes: Vec<usize>,
    items: Vec<T>,
}

fn partition<T, K, KF>(items: Vec<T>, key_of: KF) -> Vec<Group<K, T>>
where
    K: Eq + Hash + Clone,
    KF: Fn(&T) -> K,
{
    let mut groups: Vec<Group<K, T>> = Vec::new();
    let mut positions: HashMap<K, usize> = HashMap::new();

    for (index, item) in items.into_iter().enumerate() {
        let key = key_of(&item);
        let position = *positions.entry(key.clone()).or_insert_with(|| {
            groups.push(Group {
                key,
                indexes: Vec::new(),
                items: Vec::new(),
            });
            groups.len() - 1
        });
        groups[position].indexes.push(index);
        groups[position].items.push(item);
    }

    groups
}

fn assemble<R>(total: usize, groups: Vec<(Vec<usize>, Vec<R>)>) -> Result<Vec<R>, CollateError> {
    let mut slots: Vec<Option<R>> = std::iter::repeat_with(|| None).take(total).collect();
    for (indexes, results) in groups {
        for (index, result) in indexes.into_iter().zip(results) {
            slots[index] = Some(result);
        }
    }
    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| slot.ok_or(CollateError::MissingResult(index)))
        .collect()
}

/// Strict collation: any failing group fails the whole batch.
///
/// A mapper returning the wrong number of results fails with
/// [`CollateError::LengthMismatch`].
pub fn group_map_collate<T, K, R, E, KF, MF, Fut>(
    items: Vec<T>,
    key_of: KF,
    mut mapper: MF,
) -> impl Future<Output = Result<Vec<R>, E>>
where
    K: Eq + Hash + Clone,
    KF: Fn(&T) -> K,
    MF: FnMut(K, Vec<T>) -> Fut,
    Fut: Future<Output = Result<Vec<R>, E>>,
    E: From<CollateError>,
{
    let total = items.len();
    let pending: Vec<_> = partition(items, key_of)
        .into_iter()
        .map(|group| {
            let future = mapper(group.key, group.items);
            let indexes = group.indexes;
            async move {
                let results = future.await?;
                if results.len() != indexes.len() {
                    return Err(E::from(CollateError::LengthMismatch {
                        expected: indexes.len(),
                        actual: results.len(),
                    }));
                }
                Ok((indexes, results))
            }
        })
        .collect();

    async move {
        let groups = try_join_all(pending).await?;
        assemble(total, groups).map_err(E::from)
    }
}

/// Lenient collation: a failing group yields `on_failure(&error)` for each
/// of its items, and the batch still completes.
pub fn group_map_collate_lenient<T, K, R, E, KF, MF, Fut, FF>(
    items: Vec<T>,
    key_of: KF,
    mut mapper: MF,
    on_failure: FF,
) -> impl Future<Output = Vec<R>>
where
    K: Eq + Hash + Clone,
    KF: Fn(&T) -> K,
    MF: FnMut(K, Vec<T>) -> Fut,
    Fut: Future<Output = Result<Vec<R>, E>>,
    E: From<CollateError>,
    FF: Fn(&E) -> R,
{
    let total = items.len();
    let pending: Vec<_> = partition(items, key_of)
        .into_iter()
        .map(|group| {
            let future = mapper(group.key, group.items);
            let indexes = group.indexes;
            async move {
                let outcome = match future.await {
                    Ok(results) if results.len() == indexes.len() => Ok(results),
                    Ok(results) => Err(E::from(CollateError::LengthMismatch {
                        expected: indexes.len(),
                        actual: results.len(),
                    })),
                    Err(err) => Err(err),
                };
                (indexes, outcome)
            }
        })
        .collect();

    async move {
        let groups = join_all(pending)
            .await
            .into_iter()
            .map(|(indexes, outcome)| {
                let results = match outcome {
                    Ok(results) => results,
                    Err(err) => indexes.iter().map(|_| on_failure(&err)).collect(),
                };
                (indexes, results)
            })
            .collect();

        // Every slot is filled: each group yields one result per index.
        assemble(total, groups).unwrap_or_default()
    }
}
