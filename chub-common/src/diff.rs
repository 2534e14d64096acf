//! One-sided tag diffing
//!
//! Answers "what would change in `a` if `b`'s data were applied to it?".
//! `b` is merged over `a` (b wins, keys only in `a` survive) and the result is
//! compared against `a`. Because the merge only adds or overwrites, a diff
//! never reports removals.

use indexmap::IndexMap;
use std::fmt;
use std::hash::Hash;

/// Shallow merge of `b` over `a`.
///
/// Keys keep `a`'s order, followed by keys that only exist in `b`.
pub fn merge<K, V>(a: &IndexMap<K, V>, b: &IndexMap<K, V>) -> IndexMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    let mut merged = a.clone();
    for (key, value) in b {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Difference between `a` and `a` merged with `b`
pub fn diff<K, V>(a: &IndexMap<K, V>, b: &IndexMap<K, V>) -> TagDiff<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone + PartialEq,
{
    let merged = merge(a, b);

    let entries = merged
        .into_iter()
        .filter_map(|(key, new)| match a.get(&key) {
            None => Some(DiffEntry::Added { key, value: new }),
            Some(old) if *old != new => Some(DiffEntry::Changed {
                key,
                old: old.clone(),
                new,
            }),
            Some(_) => None,
        })
        .collect();

    TagDiff { entries }
}

/// A single difference
#[derive(Debug, Clone, PartialEq)]
pub enum DiffEntry<K, V> {
    /// Key absent from `a`
    Added { key: K, value: V },
    /// Key present in `a` with a different value
    Changed { key: K, old: V, new: V },
}

impl<K, V> DiffEntry<K, V> {
    pub fn key(&self) -> &K {
        match self {
            DiffEntry::Added { key, .. } | DiffEntry::Changed { key, .. } => key,
        }
    }

    /// Value the key would hold after applying the diff
    pub fn new_value(&self) -> &V {
        match self {
            DiffEntry::Added { value, .. } => value,
            DiffEntry::Changed { new, .. } => new,
        }
    }
}

/// Additions and changes needed to bring `b`'s data into `a`
#[derive(Debug, Clone, PartialEq)]
pub struct TagDiff<K, V> {
    entries: Vec<DiffEntry<K, V>>,
}

impl<K, V> TagDiff<K, V> {
    pub fn entries(&self) -> &[DiffEntry<K, V>] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// (key, new value) pairs to write
    pub fn updates(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|e| (e.key(), e.new_value()))
    }

    pub fn added(&self) -> impl Iterator<Item = &DiffEntry<K, V>> {
        self.entries
            .iter()
            .filter(|e| matches!(e, DiffEntry::Added { .. }))
    }

    pub fn changed(&self) -> impl Iterator<Item = &DiffEntry<K, V>> {
        self.entries
            .iter()
            .filter(|e| matches!(e, DiffEntry::Changed { .. }))
    }
}

impl<K, V> TagDiff<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Write every addition and change into `target`
    pub fn apply_to(&self, target: &mut IndexMap<K, V>) {
        for (key, value) in self.updates() {
            target.insert(key.clone(), value.clone());
        }
    }
}

impl<K: fmt::Display, V: fmt::Debug> fmt::Display for TagDiff<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            match entry {
                DiffEntry::Added { key, value } => writeln!(f, "+ {}: {:?}", key, value)?,
                DiffEntry::Changed { key, old, new } => {
                    writeln!(f, "~ {}: {:?} -> {:?}", key, old, new)?
                }
            }
        }
        Ok(())
    }
}
