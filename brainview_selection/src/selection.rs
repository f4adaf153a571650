// Copyright 2025 the Brainview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered set of selected point indices.

use alloc::vec::Vec;

use hashbrown::HashMap;

/// How repeated insertions of the same index are treated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DuplicatePolicy {
    /// Each index is selected at most once; inserting a member is a no-op.
    #[default]
    Set,
    /// Every insertion is recorded and weighs in aggregation; each removal
    /// drops the most recent occurrence.
    Multiset,
}

/// Selected point indices in insertion order.
///
/// Membership is tracked in a hash map so `contains` and duplicate checks do
/// not scan the sequence.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    policy: DuplicatePolicy,
    order: Vec<usize>,
    counts: HashMap<usize, usize>,
}

impl Selection {
    /// An empty selection with the given policy.
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            order: Vec::new(),
            counts: HashMap::new(),
        }
    }

    /// The duplicate policy.
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Append `index`. Returns whether the sequence grew.
    pub fn insert(&mut self, index: usize) -> bool {
        let count = self.counts.entry(index).or_insert(0);
        if *count > 0 && self.policy == DuplicatePolicy::Set {
            return false;
        }
        *count += 1;
        self.order.push(index);
        true
    }

    /// Remove the most recent occurrence of `index`. Returns whether anything
    /// was removed; absent indices are ignored.
    pub fn remove(&mut self, index: usize) -> bool {
        let Some(count) = self.counts.get_mut(&index) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            self.counts.remove(&index);
        }
        if let Some(pos) = self.order.iter().rposition(|&i| i == index) {
            self.order.remove(pos);
        }
        true
    }

    /// Insert every index; returns how many were appended.
    pub fn insert_all(&mut self, indices: impl IntoIterator<Item = usize>) -> usize {
        indices.into_iter().filter(|&i| self.insert(i)).count()
    }

    /// Remove every index; returns how many occurrences were removed.
    pub fn remove_all(&mut self, indices: impl IntoIterator<Item = usize>) -> usize {
        indices.into_iter().filter(|&i| self.remove(i)).count()
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.order.clear();
        self.counts.clear();
    }

    /// Whether `index` is selected at least once.
    pub fn contains(&self, index: usize) -> bool {
        self.counts.contains_key(&index)
    }

    /// How many times `index` occurs.
    pub fn multiplicity(&self, index: usize) -> usize {
        self.counts.get(&index).copied().unwrap_or(0)
    }

    /// Number of entries, counting repeats.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entries in insertion order.
    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }
}
