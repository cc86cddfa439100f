//! Term, pattern, and substitution model for Hexad.
//!
//! This crate defines the logical vocabulary the storage engine consumes:
//!
//! - [`Term`]: a constant or a named variable, decided at construction time
//! - [`Triple`]: a ground (subject, predicate, object) fact
//! - [`TriplePattern`]: a triple where any position may be a variable
//! - [`Substitution`]: a variable → constant binding set
//! - [`StarQuery`]: a named conjunction of patterns with a projected set
//!
//! The engine only needs three capabilities from these types: telling a
//! variable from a constant, rendering a constant to its lookup string, and
//! building substitutions pair by pair. Everything else (parsing, external
//! syntax) lives outside this workspace.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ============================================================================
// Terms
// ============================================================================

/// A query variable, identified by its surface name (e.g. `?x`).
///
/// Two variables are the same binding site iff their names are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variable(String);

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A term in a pattern position: either a ground constant or a variable.
///
/// The constant/variable decision is made once, here, so the matcher can
/// dispatch on an exhaustive enum instead of inspecting types at runtime.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    Constant(String),
    Variable(Variable),
}

impl Term {
    pub fn constant(value: impl Into<String>) -> Self {
        Term::Constant(value.into())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Term::Variable(Variable::new(name))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    /// The canonical lookup string, if this term is a constant.
    pub fn as_constant(&self) -> Option<&str> {
        match self {
            Term::Constant(value) => Some(value),
            Term::Variable(_) => None,
        }
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Term::Constant(_) => None,
            Term::Variable(var) => Some(var),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Constant(value) => f.write_str(value),
            Term::Variable(var) => var.fmt(f),
        }
    }
}

// ============================================================================
// Facts and patterns
// ============================================================================

/// A ground (subject, predicate, object) fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Triple {
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.subject, self.predicate, self.object)
    }
}

/// A triple atom where each position is a constant or a variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriplePattern {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl TriplePattern {
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// All distinct variables appearing in this pattern, in position order.
    pub fn variables(&self) -> Vec<&Variable> {
        let mut vars = Vec::with_capacity(3);
        for term in [&self.subject, &self.predicate, &self.object] {
            if let Some(var) = term.as_variable() {
                if !vars.contains(&var) {
                    vars.push(var);
                }
            }
        }
        vars
    }

    /// The first variable occurring in more than one position, if any.
    pub fn repeated_variable(&self) -> Option<&Variable> {
        let terms = [&self.subject, &self.predicate, &self.object];
        for (i, term) in terms.iter().enumerate() {
            let Some(var) = term.as_variable() else {
                continue;
            };
            if terms[i + 1..].iter().any(|t| t.as_variable() == Some(var)) {
                return Some(var);
            }
        }
        None
    }
}

impl From<&Triple> for TriplePattern {
    fn from(triple: &Triple) -> Self {
        TriplePattern::new(
            Term::constant(&triple.subject),
            Term::constant(&triple.predicate),
            Term::constant(&triple.object),
        )
    }
}

impl fmt::Display for TriplePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.subject, self.predicate, self.object)
    }
}

// ============================================================================
// Substitutions
// ============================================================================

/// A variable → constant binding set.
///
/// Backed by a `BTreeMap` so equality and hashing are content-deterministic,
/// which the star-query deduplication step relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Substitution {
    bindings: BTreeMap<Variable, String>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `var` to `value`. Returns `false` (and leaves the binding
    /// untouched) if `var` is already bound to a different constant.
    pub fn bind(&mut self, var: Variable, value: impl Into<String>) -> bool {
        let value = value.into();
        match self.bindings.get(&var) {
            Some(existing) => *existing == value,
            None => {
                self.bindings.insert(var, value);
                true
            }
        }
    }

    pub fn get(&self, var: &Variable) -> Option<&str> {
        self.bindings.get(var).map(|s| s.as_str())
    }

    pub fn domain(&self) -> impl Iterator<Item = &Variable> {
        self.bindings.keys()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Merge two substitutions into one whose domain is the union of both.
    ///
    /// Returns `None` when the two disagree on any shared variable.
    pub fn merge(&self, other: &Substitution) -> Option<Substitution> {
        let mut merged = self.clone();
        for (var, value) in &other.bindings {
            if !merged.bind(var.clone(), value.clone()) {
                return None;
            }
        }
        Some(merged)
    }

    /// Restrict the domain to `projected`, dropping every other binding.
    pub fn project(&self, projected: &BTreeSet<Variable>) -> Substitution {
        Substitution {
            bindings: self
                .bindings
                .iter()
                .filter(|(var, _)| projected.contains(*var))
                .map(|(var, value)| (var.clone(), value.clone()))
                .collect(),
        }
    }
}

impl FromIterator<(Variable, String)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (Variable, String)>>(iter: I) -> Self {
        Substitution {
            bindings: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (var, value)) in self.bindings.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{var} -> {value}")?;
        }
        write!(f, "}}")
    }
}

// ============================================================================
// Star queries
// ============================================================================

/// A conjunction of triple patterns with a declared output set.
///
/// The name is opaque and used for diagnostics only. Variables outside
/// `projected` are joined over but absent from the results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarQuery {
    pub name: String,
    pub atoms: Vec<TriplePattern>,
    pub projected: BTreeSet<Variable>,
}

impl StarQuery {
    pub fn new(
        name: impl Into<String>,
        atoms: Vec<TriplePattern>,
        projected: impl IntoIterator<Item = Variable>,
    ) -> Self {
        Self {
            name: name.into(),
            atoms,
            projected: projected.into_iter().collect(),
        }
    }
}
