//! Permutation indexes: one generic two-level nested map, instantiated six
//! times, one per ordering of the (subject, predicate, object) roles.
//!
//! Each index answers one "which two roles are constrained" shape with a
//! direct two-level lookup: `key1 → key2 → bitmap of terminal ids`. The
//! innermost sets are Roaring bitmaps since term ids are dense `u32`s.

use ahash::AHashMap;
use roaring::RoaringBitmap;

use crate::dictionary::TermId;

/// The six orderings of (Subject, Predicate, Object) used as key paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permutation {
    Spo,
    Sop,
    Pso,
    Pos,
    Osp,
    Ops,
}

impl Permutation {
    pub const ALL: [Permutation; 6] = [
        Permutation::Spo,
        Permutation::Sop,
        Permutation::Pso,
        Permutation::Pos,
        Permutation::Osp,
        Permutation::Ops,
    ];

    /// Reorder `(s, p, o)` into this permutation's `(key1, key2, value)`.
    pub fn key_order(self, s: TermId, p: TermId, o: TermId) -> (TermId, TermId, TermId) {
        match self {
            Permutation::Spo => (s, p, o),
            Permutation::Sop => (s, o, p),
            Permutation::Pso => (p, s, o),
            Permutation::Pos => (p, o, s),
            Permutation::Osp => (o, s, p),
            Permutation::Ops => (o, p, s),
        }
    }
}

/// One two-level nested index: `key1 → key2 → {value}`.
#[derive(Debug, Default, Clone)]
pub struct TripleIndex {
    map: AHashMap<TermId, AHashMap<TermId, RoaringBitmap>>,
}

impl TripleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert `(key1, key2) → value`, creating the inner map and bitmap on
    /// first use. Returns `true` iff the terminal set grew.
    pub fn insert(&mut self, key1: TermId, key2: TermId, value: TermId) -> bool {
        self.map
            .entry(key1)
            .or_default()
            .entry(key2)
            .or_default()
            .insert(value.raw())
    }

    pub fn contains(&self, key1: TermId, key2: TermId, value: TermId) -> bool {
        self.map
            .get(&key1)
            .and_then(|inner| inner.get(&key2))
            .is_some_and(|set| set.contains(value.raw()))
    }

    /// Terminal ids under a fully-bound `(key1, key2)` path.
    pub fn terminals(&self, key1: TermId, key2: TermId) -> impl Iterator<Item = TermId> + '_ {
        self.map
            .get(&key1)
            .and_then(|inner| inner.get(&key2))
            .into_iter()
            .flat_map(|set| set.iter().map(TermId::new))
    }

    /// The inner `key2 → {value}` map under `key1`, if present.
    pub fn inner(&self, key1: TermId) -> Option<&AHashMap<TermId, RoaringBitmap>> {
        self.map.get(&key1)
    }

    /// Iterate every `(key1, inner map)` entry.
    pub fn iter(&self) -> impl Iterator<Item = (TermId, &AHashMap<TermId, RoaringBitmap>)> {
        self.map.iter().map(|(&key1, inner)| (key1, inner))
    }

    /// Total number of stored `(key1, key2, value)` entries.
    pub fn len(&self) -> u64 {
        self.map
            .values()
            .flat_map(|inner| inner.values())
            .map(|set| set.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u32) -> TermId {
        TermId::new(raw)
    }

    #[test]
    fn insert_is_set_semantics() {
        let mut index = TripleIndex::new();
        assert!(index.insert(id(0), id(1), id(2)));
        assert!(!index.insert(id(0), id(1), id(2)));
        assert_eq!(index.len(), 1);
        assert!(index.contains(id(0), id(1), id(2)));
        assert!(!index.contains(id(0), id(1), id(3)));
    }

    #[test]
    fn terminals_enumerates_the_innermost_set() {
        let mut index = TripleIndex::new();
        index.insert(id(0), id(1), id(2));
        index.insert(id(0), id(1), id(3));
        index.insert(id(0), id(9), id(4));

        let mut values: Vec<u32> = index.terminals(id(0), id(1)).map(TermId::raw).collect();
        values.sort_unstable();
        assert_eq!(values, vec![2, 3]);
        assert_eq!(index.terminals(id(7), id(1)).count(), 0);
    }

    #[test]
    fn key_order_covers_all_six_permutations() {
        let (s, p, o) = (id(10), id(20), id(30));
        assert_eq!(Permutation::Spo.key_order(s, p, o), (s, p, o));
        assert_eq!(Permutation::Sop.key_order(s, p, o), (s, o, p));
        assert_eq!(Permutation::Pso.key_order(s, p, o), (p, s, o));
        assert_eq!(Permutation::Pos.key_order(s, p, o), (p, o, s));
        assert_eq!(Permutation::Osp.key_order(s, p, o), (o, s, p));
        assert_eq!(Permutation::Ops.key_order(s, p, o), (o, p, s));
    }
}
