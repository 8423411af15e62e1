//! Most-frequent-value selection shared by every statistic that needs a mode.

use std::collections::HashMap;
use std::hash::Hash;

/// Returns the value occurring most often in `values`, with its count.
///
/// When several values share the highest count, the one seen first wins.
/// An empty input yields `None`.
pub fn most_frequent_with_count<K, I>(values: I) -> Option<(K, usize)>
where
    K: Hash + Eq,
    I: IntoIterator<Item = K>,
{
    // value -> (count, first position)
    let mut counts: HashMap<K, (usize, usize)> = HashMap::new();
    for (pos, value) in values.into_iter().enumerate() {
        counts.entry(value).or_insert((0, pos)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(value, (count, _))| (value, count))
}

/// Returns the value occurring most often in `values`.
pub fn most_frequent<K, I>(values: I) -> Option<K>
where
    K: Hash + Eq,
    I: IntoIterator<Item = K>,
{
    most_frequent_with_count(values).map(|(value, _)| value)
}

/// Counts each distinct value, ordered by descending count then first sight.
pub fn frequency_table<K, I>(values: I) -> Vec<(K, usize)>
where
    K: Hash + Eq,
    I: IntoIterator<Item = K>,
{
    let mut counts: HashMap<K, (usize, usize)> = HashMap::new();
    for (pos, value) in values.into_iter().enumerate() {
        counts.entry(value).or_insert((0, pos)).0 += 1;
    }

    let mut table: Vec<_> = counts.into_iter().collect();
    table.sort_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
        count_b.cmp(count_a).then(first_a.cmp(first_b))
    });
    table
        .into_iter()
        .map(|(value, (count, _))| (value, count))
        .collect()
}
