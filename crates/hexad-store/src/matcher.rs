//! Single-atom pattern matching.
//!
//! Each of the eight bound/unbound classifications of a (subject, predicate,
//! object) pattern maps to the one permutation index whose first key levels
//! are exactly the bound positions, so every match is a direct two-level
//! lookup (or a one-level lookup, or a full top-level walk) rather than a
//! scan of all facts:
//!
//! | bound      | index | result domain          |
//! |------------|-------|------------------------|
//! | S, P, O    | SPO   | {} (existence only)    |
//! | P, O       | POS   | {S}                    |
//! | S, O       | SOP   | {P}                    |
//! | S, P       | SPO   | {O}                    |
//! | O          | OSP   | {S, P}                 |
//! | P          | PSO   | {S, O}                 |
//! | S          | SPO   | {P, O}                 |
//! | none       | SPO   | {S, P, O} (full walk)  |
//!
//! Any bound position whose term is not in the dictionary short-circuits to
//! an empty result: an unregistered term cannot equal any stored term.

use hexad_model::{Substitution, Term, TriplePattern, Variable};
use tracing::trace;

use crate::error::MatchError;
use crate::index::Permutation;
use crate::TripleStore;

impl TripleStore {
    /// Match a single triple pattern, producing one substitution per stored
    /// fact compatible with its bound positions.
    ///
    /// Result order is unspecified. A fully-bound pattern yields at most one
    /// empty substitution (existence check).
    pub fn match_pattern(
        &self,
        pattern: &TriplePattern,
    ) -> Result<Vec<Substitution>, MatchError> {
        if let Some(variable) = pattern.repeated_variable() {
            return Err(MatchError::RepeatedVariable {
                variable: variable.clone(),
            });
        }

        let results = match (&pattern.subject, &pattern.predicate, &pattern.object) {
            (Term::Constant(s), Term::Constant(p), Term::Constant(o)) => {
                self.match_all_bound(s, p, o)
            }
            (Term::Variable(sv), Term::Constant(p), Term::Constant(o)) => {
                self.match_one_var(Permutation::Pos, p, o, sv)
            }
            (Term::Constant(s), Term::Variable(pv), Term::Constant(o)) => {
                self.match_one_var(Permutation::Sop, s, o, pv)
            }
            (Term::Constant(s), Term::Constant(p), Term::Variable(ov)) => {
                self.match_one_var(Permutation::Spo, s, p, ov)
            }
            (Term::Variable(sv), Term::Variable(pv), Term::Constant(o)) => {
                self.match_two_vars(Permutation::Osp, o, sv, pv)
            }
            (Term::Variable(sv), Term::Constant(p), Term::Variable(ov)) => {
                self.match_two_vars(Permutation::Pso, p, sv, ov)
            }
            (Term::Constant(s), Term::Variable(pv), Term::Variable(ov)) => {
                self.match_two_vars(Permutation::Spo, s, pv, ov)
            }
            (Term::Variable(sv), Term::Variable(pv), Term::Variable(ov)) => {
                self.match_all_vars(sv, pv, ov)
            }
        };

        trace!(pattern = %pattern, results = results.len(), "matched pattern");
        Ok(results)
    }

    /// All three positions bound: existence check against the primary index.
    fn match_all_bound(&self, s: &str, p: &str, o: &str) -> Vec<Substitution> {
        let dict = self.dictionary();
        let (Some(s_id), Some(p_id), Some(o_id)) = (dict.id_of(s), dict.id_of(p), dict.id_of(o))
        else {
            return Vec::new();
        };

        if self.index(Permutation::Spo).contains(s_id, p_id, o_id) {
            vec![Substitution::new()]
        } else {
            Vec::new()
        }
    }

    /// Two positions bound: the terminal set of `perm` under `(key1, key2)`
    /// enumerates the free position.
    fn match_one_var(
        &self,
        perm: Permutation,
        key1: &str,
        key2: &str,
        var: &Variable,
    ) -> Vec<Substitution> {
        let dict = self.dictionary();
        let (Some(key1_id), Some(key2_id)) = (dict.id_of(key1), dict.id_of(key2)) else {
            return Vec::new();
        };

        let mut results = Vec::new();
        for value_id in self.index(perm).terminals(key1_id, key2_id) {
            let Some(value) = dict.term_of(value_id) else {
                continue;
            };
            let mut subst = Substitution::new();
            subst.bind(var.clone(), value);
            results.push(subst);
        }
        results
    }

    /// One position bound: walk `perm`'s inner map under `key1`, binding the
    /// two free positions per `(key2, value)` pair.
    fn match_two_vars(
        &self,
        perm: Permutation,
        key1: &str,
        key2_var: &Variable,
        value_var: &Variable,
    ) -> Vec<Substitution> {
        let dict = self.dictionary();
        let Some(key1_id) = dict.id_of(key1) else {
            return Vec::new();
        };
        let Some(inner) = self.index(perm).inner(key1_id) else {
            return Vec::new();
        };

        let mut results = Vec::new();
        for (&key2_id, values) in inner {
            let Some(key2) = dict.term_of(key2_id) else {
                continue;
            };
            for value_raw in values.iter() {
                let Some(value) = dict.term_of(crate::TermId::new(value_raw)) else {
                    continue;
                };
                let mut subst = Substitution::new();
                subst.bind(key2_var.clone(), key2.clone());
                subst.bind(value_var.clone(), value);
                results.push(subst);
            }
        }
        results
    }

    /// Nothing bound: full walk of the primary index, one substitution with
    /// full (S, P, O) domain per stored fact.
    fn match_all_vars(
        &self,
        s_var: &Variable,
        p_var: &Variable,
        o_var: &Variable,
    ) -> Vec<Substitution> {
        let dict = self.dictionary();
        let mut results = Vec::new();

        for (s_id, inner) in self.index(Permutation::Spo).iter() {
            let Some(subject) = dict.term_of(s_id) else {
                continue;
            };
            for (&p_id, objects) in inner {
                let Some(predicate) = dict.term_of(p_id) else {
                    continue;
                };
                for o_raw in objects.iter() {
                    let Some(object) = dict.term_of(crate::TermId::new(o_raw)) else {
                        continue;
                    };
                    let mut subst = Substitution::new();
                    subst.bind(s_var.clone(), subject.clone());
                    subst.bind(p_var.clone(), predicate.clone());
                    subst.bind(o_var.clone(), object);
                    results.push(subst);
                }
            }
        }
        results
    }
}
