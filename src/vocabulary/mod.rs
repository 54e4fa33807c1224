//! Vocabulary term model and the external contracts the reasoner consumes.
//!
//! The module keeps term identity and capability classification separate from
//! storage. [`Vocabulary`] and [`Queryable`] describe what the reasoner needs
//! from its host; [`InMemoryVocabulary`] and `oxrdf::Graph` are the bundled
//! implementations.

pub mod entities;
mod graph;
pub mod namespaces;
pub mod repositories;
pub mod value_objects;

pub use entities::{
    Class, InMemoryVocabulary, Property, PropertyKind, Relation, Term, TermKind, UnknownRelation,
    VocabularyError,
};
pub use repositories::{Queryable, Vocabulary};
pub use value_objects::{Iri, IriError, Resource};
