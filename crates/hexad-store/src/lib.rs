//! Hexad: an in-memory sextuple-index ("hexastore") triple store.
//!
//! Every fact is a (subject, predicate, object) of constant terms. Terms are
//! compressed to dense `u32` ids through a [`TermDictionary`], and each fact
//! is held redundantly in all six permutation indexes so that any
//! bound/unbound query shape resolves with a direct two-level lookup.
//!
//! ## Module organization
//!
//! - `dictionary`: bidirectional term ⇄ id mapping
//! - `index`: the generic two-level nested index and its six permutations
//! - `matcher`: single-atom pattern matching (eight-branch dispatch)
//! - `join`: star-query evaluation via incremental hash join
//! - `error`: structural-misuse errors (never "empty result" in disguise)
//!
//! ## Concurrency
//!
//! Writes take `&mut self`, so the six-index fan-out is atomic with respect
//! to readers by Rust's aliasing rules; a fact is never observable in some
//! indexes but not others. Term registration alone is internally locked and
//! safe under concurrent callers sharing the dictionary.

mod dictionary;
mod error;
mod index;
mod join;
mod matcher;

pub use dictionary::{TermDictionary, TermId};
pub use error::MatchError;
pub use index::{Permutation, TripleIndex};

use hexad_model::Triple;
use std::collections::HashSet;
use tracing::trace;

/// The sextuple-index triple store.
///
/// Owns its dictionary and all six indexes; accessors hand out immutable
/// views or independent copies only. Facts grow monotonically; there is no
/// deletion.
#[derive(Debug, Default)]
pub struct TripleStore {
    dictionary: TermDictionary,
    indexes: [TripleIndex; 6],
}

impl TripleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fact, registering its terms and fanning out to all six
    /// indexes. Returns `true` iff the fact was not already present;
    /// re-inserting an existing fact is a no-op for store content.
    pub fn add(&mut self, triple: &Triple) -> bool {
        let s = self.dictionary.add_term(&triple.subject);
        let p = self.dictionary.add_term(&triple.predicate);
        let o = self.dictionary.add_term(&triple.object);

        let mut inserted = false;
        for perm in Permutation::ALL {
            let (key1, key2, value) = perm.key_order(s, p, o);
            inserted |= self.indexes[perm as usize].insert(key1, key2, value);
        }

        trace!(triple = %triple, inserted, "added fact");
        inserted
    }

    /// Insert every fact of `triples`, order-independent. Returns the number
    /// of newly inserted facts.
    pub fn add_all<'a, I>(&mut self, triples: I) -> usize
    where
        I: IntoIterator<Item = &'a Triple>,
    {
        triples
            .into_iter()
            .filter(|triple| self.add(triple))
            .count()
    }

    /// Total fact count: the sum of innermost set sizes over the primary
    /// (S→P→O) index.
    pub fn len(&self) -> u64 {
        self.index(Permutation::Spo).len()
    }

    pub fn is_empty(&self) -> bool {
        self.index(Permutation::Spo).is_empty()
    }

    /// Reconstruct every stored fact by walking the primary index and
    /// decoding ids back to surface terms.
    pub fn triples(&self) -> HashSet<Triple> {
        let mut atoms = HashSet::new();
        for (s_id, inner) in self.index(Permutation::Spo).iter() {
            let Some(subject) = self.dictionary.term_of(s_id) else {
                continue;
            };
            for (&p_id, objects) in inner {
                let Some(predicate) = self.dictionary.term_of(p_id) else {
                    continue;
                };
                for o_raw in objects.iter() {
                    let Some(object) = self.dictionary.term_of(TermId::new(o_raw)) else {
                        continue;
                    };
                    atoms.insert(Triple::new(
                        subject.clone(),
                        predicate.clone(),
                        object,
                    ));
                }
            }
        }
        atoms
    }

    /// Read-only view of one permutation index.
    pub fn index(&self, perm: Permutation) -> &TripleIndex {
        &self.indexes[perm as usize]
    }

    /// The store's term dictionary.
    pub fn dictionary(&self) -> &TermDictionary {
        &self.dictionary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_fans_out_to_all_six_indexes() {
        let mut store = TripleStore::new();
        assert!(store.add(&Triple::new("s1", "p1", "o1")));

        let dict = store.dictionary();
        let s = dict.id_of("s1").unwrap();
        let p = dict.id_of("p1").unwrap();
        let o = dict.id_of("o1").unwrap();

        for perm in Permutation::ALL {
            let (key1, key2, value) = perm.key_order(s, p, o);
            assert!(
                store.index(perm).contains(key1, key2, value),
                "fact missing from {perm:?} index"
            );
        }
    }

    #[test]
    fn duplicate_add_is_a_noop_but_registers_terms() {
        let mut store = TripleStore::new();
        assert!(store.add(&Triple::new("s1", "p1", "o1")));
        assert!(!store.add(&Triple::new("s1", "p1", "o1")));

        assert_eq!(store.len(), 1);
        assert_eq!(store.dictionary().len(), 3);
    }
}
