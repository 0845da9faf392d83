//! Ordered group-by primitive.
//!
//! Every insight groups records by a string key and folds a value per key.
//! Groups remember the order in which each key was first seen so the
//! resulting series labels come out in scan order.

use crate::models::Series;
use std::collections::HashMap;

/// An insertion-ordered mapping from key to accumulated value.
#[derive(Debug, Clone)]
pub struct OrderedGroups<V> {
    keys: Vec<String>,
    values: Vec<V>,
    index: HashMap<String, usize>,
}

impl<V> Default for OrderedGroups<V> {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V> OrderedGroups<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Accumulator for `key`, inserting `init()` at the end if the key is new.
    pub fn entry_or_insert_with(&mut self, key: &str, init: impl FnOnce() -> V) -> &mut V {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                let idx = self.keys.len();
                self.keys.push(key.to_string());
                self.values.push(init());
                self.index.insert(key.to_string(), idx);
                idx
            }
        };
        &mut self.values[idx]
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&idx| &self.values[idx])
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Convert into a series, mapping each accumulator to a chart value.
    pub fn into_series(self, value: impl Fn(&V) -> f64) -> Series {
        let values = self.values.iter().map(value).collect();
        Series {
            labels: self.keys,
            values,
        }
    }
}

/// Running sum and occurrence count for one key.
///
/// Sums are `u128`, which holds the total of up to 2^64 `u64` values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SumCount {
    pub sum: u128,
    pub count: u64,
}

impl SumCount {
    /// Mean of the accumulated values. Only called on groups that exist,
    /// so `count` is at least 1.
    pub fn mean(&self) -> f64 {
        self.sum as f64 / self.count as f64
    }
}

/// Group `items` by `key`, folding each into the group's accumulator.
pub fn group_by<T, V, K, F>(items: &[T], key: K, mut fold: F) -> OrderedGroups<V>
where
    V: Default,
    K: Fn(&T) -> &str,
    F: FnMut(&mut V, &T),
{
    let mut groups = OrderedGroups::new();
    for item in items {
        let acc = groups.entry_or_insert_with(key(item), V::default);
        fold(acc, item);
    }
    groups
}

/// Count items per key.
pub fn count_by<T, K>(items: &[T], key: K) -> OrderedGroups<u64>
where
    K: Fn(&T) -> &str,
{
    group_by(items, key, |count: &mut u64, _| *count += 1)
}

/// Sum a numeric field per key.
pub fn sum_by<T, K, N>(items: &[T], key: K, value: N) -> OrderedGroups<u128>
where
    K: Fn(&T) -> &str,
    N: Fn(&T) -> u64,
{
    group_by(items, key, |sum: &mut u128, item| *sum += u128::from(value(item)))
}

/// Track both the sum of a numeric field and the number of items per key.
pub fn sum_and_count_by<T, K, N>(items: &[T], key: K, value: N) -> OrderedGroups<SumCount>
where
    K: Fn(&T) -> &str,
    N: Fn(&T) -> u64,
{
    group_by(items, key, |acc: &mut SumCount, item| {
        acc.sum += u128::from(value(item));
        acc.count += 1;
    })
}

/// Round half away from zero to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
