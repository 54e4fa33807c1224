//! Errors raised by entailment operations.

use crate::vocabulary::{Iri, Relation};

fn render_path(path: &[Iri]) -> String {
    path.iter()
        .map(Iri::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The operation needs a capability the term lacks, e.g. sub-class
    /// entailment on a property.
    #[error("term `{term}` can't entail {operation}")]
    NotApplicable {
        term: Iri,
        operation: &'static str,
    },

    /// Following `relation` from the first term of `path` leads back to
    /// `term`.
    #[error("cyclic {relation} hierarchy at `{term}`: {}", render_path(.path))]
    CyclicHierarchy {
        term: Iri,
        relation: Relation,
        path: Vec<Iri>,
    },
}

impl Error {
    pub(crate) fn not_applicable(term: &Iri, operation: &'static str) -> Self {
        Self::NotApplicable {
            term: term.clone(),
            operation,
        }
    }
}
