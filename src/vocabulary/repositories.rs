use std::sync::Arc;

use oxrdf::{Graph, NamedNodeRef, TermRef};

use super::entities::{InMemoryVocabulary, Relation, Term};
use super::value_objects::{Iri, Resource};

/// Read-only view over declared vocabulary definitions.
///
/// Implementors must answer consistently for the lifetime of a
/// [`crate::Reasoner`]: entailed closures are cached and never invalidated.
pub trait Vocabulary {
    /// Resolves an identifier to a known term, if the vocabulary declares it.
    fn find_term(&self, iri: &Iri) -> Option<Term>;

    /// Returns the direct targets of `relation` declared on `term`, in
    /// declaration order. Terms the relation does not apply to have none.
    fn declared(&self, term: &Term, relation: Relation) -> Vec<Term>;

    /// Returns the declared domains of a property.
    ///
    /// `None` means the property carries no domain attribute; implementors may
    /// also return an empty list, which callers treat the same way.
    fn domains(&self, property: &Term) -> Option<Vec<Term>>;
}

/// Source of facts about resources, consulted for their asserted types.
pub trait Queryable {
    /// Returns the objects of every `(subject, predicate, ?)` fact, in store
    /// order. Values are returned raw; resolving them is up to the caller.
    fn objects(&self, subject: &Resource, predicate: NamedNodeRef<'_>) -> Vec<oxrdf::Term>;
}

impl Vocabulary for InMemoryVocabulary {
    fn find_term(&self, iri: &Iri) -> Option<Term> {
        self.term(iri)
    }

    fn declared(&self, term: &Term, relation: Relation) -> Vec<Term> {
        let parents = match relation {
            Relation::SubClassOf => self.class(term.iri()).map(|class| class.parents()),
            Relation::SubPropertyOf => self
                .property(term.iri())
                .map(|property| property.parents()),
        };
        parents
            .unwrap_or_default()
            .iter()
            .map(|parent| self.resolve(parent))
            .collect()
    }

    fn domains(&self, property: &Term) -> Option<Vec<Term>> {
        let domains = self.property(property.iri())?.domains()?;
        Some(domains.iter().map(|domain| self.resolve(domain)).collect())
    }
}

impl<V: Vocabulary + ?Sized> Vocabulary for &V {
    fn find_term(&self, iri: &Iri) -> Option<Term> {
        (**self).find_term(iri)
    }

    fn declared(&self, term: &Term, relation: Relation) -> Vec<Term> {
        (**self).declared(term, relation)
    }

    fn domains(&self, property: &Term) -> Option<Vec<Term>> {
        (**self).domains(property)
    }
}

impl<V: Vocabulary + ?Sized> Vocabulary for Arc<V> {
    fn find_term(&self, iri: &Iri) -> Option<Term> {
        (**self).find_term(iri)
    }

    fn declared(&self, term: &Term, relation: Relation) -> Vec<Term> {
        (**self).declared(term, relation)
    }

    fn domains(&self, property: &Term) -> Option<Vec<Term>> {
        (**self).domains(property)
    }
}

impl Queryable for Graph {
    fn objects(&self, subject: &Resource, predicate: NamedNodeRef<'_>) -> Vec<oxrdf::Term> {
        match subject {
            Resource::Named(iri) => self
                .objects_for_subject_predicate(iri.as_named_node(), predicate)
                .map(TermRef::into_owned)
                .collect(),
            Resource::Blank(node) => self
                .objects_for_subject_predicate(node.as_ref(), predicate)
                .map(TermRef::into_owned)
                .collect(),
        }
    }
}

impl<Q: Queryable + ?Sized> Queryable for &Q {
    fn objects(&self, subject: &Resource, predicate: NamedNodeRef<'_>) -> Vec<oxrdf::Term> {
        (**self).objects(subject, predicate)
    }
}
