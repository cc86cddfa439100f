//! Term dictionary: bidirectional surface-string ⇄ dense-id mapping.
//!
//! Every term is registered once and assigned the next counter value; all
//! six permutation indexes then work over 4-byte ids instead of strings.
//!
//! Both directions plus the id counter live behind a single `RwLock`, so the
//! check-then-allocate-then-register sequence is one critical section: a
//! lost race can neither allocate two ids for one surface nor leave the two
//! maps out of sync. Readers take the shared lock and never observe a
//! half-updated pair.

use ahash::AHashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Dense term identifier (4 bytes instead of 24+ for String).
///
/// Ids are never reused or renumbered; within one dictionary every id in
/// `[0, len)` is assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct TermId(u32);

impl TermId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Default)]
struct DictionaryInner {
    term_to_id: AHashMap<String, TermId>,
    id_to_term: AHashMap<TermId, String>,
    next_id: u32,
}

/// Bidirectional term ⇄ id dictionary.
///
/// Registration is idempotent and safe under concurrent callers.
#[derive(Debug, Default)]
pub struct TermDictionary {
    inner: RwLock<DictionaryInner>,
}

impl TermDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a term, returning its id.
    ///
    /// Returns the existing id if `surface` is already registered; otherwise
    /// allocates the next counter value and records both directions.
    pub fn add_term(&self, surface: &str) -> TermId {
        let mut inner = self.inner.write();
        if let Some(&id) = inner.term_to_id.get(surface) {
            return id;
        }

        let id = TermId(inner.next_id);
        inner.next_id += 1;
        inner.term_to_id.insert(surface.to_string(), id);
        inner.id_to_term.insert(id, surface.to_string());
        id
    }

    /// Look up an existing id for a term without inserting.
    pub fn id_of(&self, surface: &str) -> Option<TermId> {
        self.inner.read().term_to_id.get(surface).copied()
    }

    /// Look up the surface string for an id.
    pub fn term_of(&self, id: TermId) -> Option<String> {
        self.inner.read().id_to_term.get(&id).cloned()
    }

    /// Number of distinct registered terms.
    pub fn len(&self) -> usize {
        self.inner.read().term_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Independent copy of the term → id mapping.
    pub fn term_to_id_snapshot(&self) -> AHashMap<String, TermId> {
        self.inner.read().term_to_id.clone()
    }

    /// Independent copy of the id → term mapping.
    pub fn id_to_term_snapshot(&self) -> AHashMap<TermId, String> {
        self.inner.read().id_to_term.clone()
    }
}
