//! RDFS hierarchy entailment for vocabulary models.
//!
//! The crate entails the reflexive-transitive closures of `rdfs:subClassOf`
//! and `rdfs:subPropertyOf`, memoizes them per [`Reasoner`], and checks
//! whether a resource's entailed types satisfy the `rdfs:domain` of a
//! property.
//!
//! ```
//! use rdfs_reasoner::{Class, InMemoryVocabulary, Iri, Reasoner, Term};
//!
//! let animal = Iri::new("https://example.org/Animal").unwrap();
//! let dog = Iri::new("https://example.org/Dog").unwrap();
//!
//! let mut vocabulary = InMemoryVocabulary::new();
//! vocabulary.add_class(Class::new(animal.clone())).unwrap();
//! let mut class = Class::new(dog.clone());
//! class.add_parent(animal.clone());
//! vocabulary.add_class(class).unwrap();
//!
//! let reasoner = Reasoner::new(vocabulary);
//! let closure = reasoner.entail_sub_class_of(&Term::class(dog)).unwrap();
//! assert!(closure.contains(&animal));
//! ```

pub mod config;
mod errors;
pub mod logger;
pub mod reasoner;
pub mod vocabulary;

pub use config::{Config, ConfigError, EntailmentSettings};
pub use errors::Error;
pub use reasoner::{Closure, DomainCheckOptions, EntailmentCache, Reasoner};
pub use vocabulary::{
    Class, InMemoryVocabulary, Iri, IriError, Property, PropertyKind, Queryable, Relation,
    Resource, Term, TermKind, Vocabulary, VocabularyError,
};

pub type Result<T, E = Error> = std::result::Result<T, E>;
