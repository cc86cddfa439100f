//! Error taxonomy for pattern matching and star-query evaluation.
//!
//! Queries over unknown terms are *not* errors (they yield empty results);
//! only structural misuse is reported here, so an empty result can never be
//! confused with an unsupported query shape.

use hexad_model::Variable;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    /// A pattern binds the same variable to two positions of one atom.
    /// Per-position index lookups cannot express that equality constraint.
    #[error("variable {variable} occurs in more than one position of a single atom")]
    RepeatedVariable { variable: Variable },

    /// A star query with no atoms has no principled result set.
    #[error("star query {name:?} has no atoms")]
    EmptyQuery { name: String },
}
