//! Star-query evaluation: an incremental hash join over per-atom matches.
//!
//! The working set of partial substitutions starts from the first atom's
//! matches; each subsequent atom's matches are joined in, keyed on the
//! variables the two sides share. With a shared key the cost is the sum of
//! the per-atom match sizes plus the true join size; with no shared
//! variables the same path degrades to a cross product guarded by
//! agree-on-common-variables merging. Nothing assumes the single-center star
//! shape: chain- and cycle-shaped conjunctions join the same way.

use ahash::{AHashMap, AHashSet};
use hexad_model::{StarQuery, Substitution, Variable};
use tracing::debug;

use crate::error::MatchError;
use crate::TripleStore;

impl TripleStore {
    /// Evaluate a conjunctive query, returning substitutions restricted to
    /// the query's projected variables, deduplicated by projected content.
    ///
    /// An atom with no matches (or a join that survives nothing) yields an
    /// empty result, not an error. Result order is unspecified.
    pub fn match_star(&self, query: &StarQuery) -> Result<Vec<Substitution>, MatchError> {
        let Some((first, rest)) = query.atoms.split_first() else {
            return Err(MatchError::EmptyQuery {
                name: query.name.clone(),
            });
        };

        let mut working = self.match_pattern(first)?;
        for atom in rest {
            // Later atoms are still validated when the working set is
            // already empty, so malformed queries fail loudly either way.
            let matches = self.match_pattern(atom)?;
            working = hash_join(working, matches);
        }

        let mut seen = AHashSet::with_capacity(working.len());
        let mut results = Vec::new();
        for subst in &working {
            let projected = subst.project(&query.projected);
            if seen.insert(projected.clone()) {
                results.push(projected);
            }
        }

        debug!(
            query = %query.name,
            atoms = query.atoms.len(),
            results = results.len(),
            "evaluated star query"
        );
        Ok(results)
    }
}

/// Join two uniform-domain substitution sets on their shared variables.
fn hash_join(left: Vec<Substitution>, right: Vec<Substitution>) -> Vec<Substitution> {
    if left.is_empty() || right.is_empty() {
        return Vec::new();
    }

    let shared = shared_variables(&left[0], &right[0]);

    // Bucket the right side by its bindings on the shared variables. With no
    // shared variables there is a single empty key, i.e. a cross product.
    let mut buckets: AHashMap<Vec<&str>, Vec<&Substitution>> = AHashMap::new();
    for subst in &right {
        if let Some(key) = join_key(subst, &shared) {
            buckets.entry(key).or_default().push(subst);
        }
    }

    let mut joined = Vec::new();
    for partial in &left {
        let Some(key) = join_key(partial, &shared) else {
            continue;
        };
        let Some(candidates) = buckets.get(&key) else {
            continue;
        };
        for candidate in candidates {
            // The key already guarantees agreement on the shared variables;
            // merge still rechecks so non-uniform domains stay correct.
            if let Some(merged) = partial.merge(candidate) {
                joined.push(merged);
            }
        }
    }
    joined
}

/// Variables bound on both sides, in deterministic order.
fn shared_variables(left: &Substitution, right: &Substitution) -> Vec<Variable> {
    left.domain()
        .filter(|var| right.get(var).is_some())
        .cloned()
        .collect()
}

/// A substitution's bindings on `shared`, usable as a hash key.
///
/// `None` when a shared variable is unbound on this side (possible only for
/// non-uniform domains); such a row cannot participate in the join.
fn join_key<'a>(subst: &'a Substitution, shared: &[Variable]) -> Option<Vec<&'a str>> {
    shared.iter().map(|var| subst.get(var)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subst(pairs: &[(&str, &str)]) -> Substitution {
        pairs
            .iter()
            .map(|(var, value)| (Variable::new(*var), value.to_string()))
            .collect()
    }

    #[test]
    fn join_keeps_only_agreeing_combinations() {
        let left = vec![subst(&[("?x", "s1")]), subst(&[("?x", "s2")])];
        let right = vec![subst(&[("?x", "s1"), ("?y", "o1")])];

        let joined = hash_join(left, right);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0], subst(&[("?x", "s1"), ("?y", "o1")]));
    }

    #[test]
    fn join_without_shared_variables_is_a_cross_product() {
        let left = vec![subst(&[("?x", "a")]), subst(&[("?x", "b")])];
        let right = vec![subst(&[("?y", "1")]), subst(&[("?y", "2")])];

        let joined = hash_join(left, right);
        assert_eq!(joined.len(), 4);
    }

    #[test]
    fn join_with_empty_side_is_empty() {
        let left = vec![subst(&[("?x", "a")])];
        assert!(hash_join(left.clone(), Vec::new()).is_empty());
        assert!(hash_join(Vec::new(), left).is_empty());
    }
}
