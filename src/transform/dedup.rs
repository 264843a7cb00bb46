//! Deterministic key deduplication

use std::collections::BTreeMap;

/// Deduplicate items by key, retaining the first occurrence.
///
/// The retention choice is a pure function of the input sequence: callers
/// feed records in reader order (sources listed lexicographically, line
/// order preserved), so a given input set always keeps the same rows.
/// Output is sorted by key, which keeps written row order deterministic
/// too.
pub fn dedup_by_key<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> Vec<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut retained: BTreeMap<K, T> = BTreeMap::new();
    for item in items {
        retained.entry(key(&item)).or_insert(item);
    }
    retained.into_values().collect()
}
