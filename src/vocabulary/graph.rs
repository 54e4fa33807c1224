//! Loading vocabulary definitions from RDF graphs.
//!
//! Terms are typed from `rdf:type` declarations first. Identifiers that only
//! appear as the subject or object of `rdfs:subClassOf`, `rdfs:subPropertyOf`
//! or `rdfs:domain` get the kind the relation implies.

use std::collections::BTreeMap;

use oxrdf::{
    vocab::{rdf, rdfs},
    Graph, NamedNodeRef, TermRef,
};

use super::{
    entities::{Class, InMemoryVocabulary, Property, PropertyKind, TermKind, VocabularyError},
    namespaces::owl,
    value_objects::Iri,
};

fn named(term: TermRef<'_>) -> Option<Iri> {
    match term {
        TermRef::NamedNode(node) => Some(Iri::from(node)),
        _ => None,
    }
}

fn declared_kind(class: NamedNodeRef<'_>) -> Option<TermKind> {
    if class == rdfs::CLASS || class == owl::CLASS {
        Some(TermKind::Class)
    } else if class == rdf::PROPERTY {
        Some(TermKind::Property(PropertyKind::Rdf))
    } else if class == owl::OBJECT_PROPERTY {
        Some(TermKind::Property(PropertyKind::Object))
    } else if class == owl::DATATYPE_PROPERTY {
        Some(TermKind::Property(PropertyKind::Datatype))
    } else if class == owl::ANNOTATION_PROPERTY {
        Some(TermKind::Property(PropertyKind::Annotation))
    } else {
        None
    }
}

fn implied_kinds(predicate: NamedNodeRef<'_>) -> Option<(TermKind, TermKind)> {
    let property = TermKind::Property(PropertyKind::Rdf);
    if predicate == rdfs::SUB_CLASS_OF {
        Some((TermKind::Class, TermKind::Class))
    } else if predicate == rdfs::SUB_PROPERTY_OF {
        Some((property, property))
    } else if predicate == rdfs::DOMAIN {
        Some((property, TermKind::Class))
    } else {
        None
    }
}

impl InMemoryVocabulary {
    /// Keeps the first label seen for a term.
    fn label(&mut self, iri: &Iri, label: &str) {
        if let Some(class) = self.class_mut(iri) {
            if class.label().is_none() {
                class.set_label(label);
            }
        } else if let Some(property) = self.property_mut(iri) {
            if property.label().is_none() {
                property.set_label(label);
            }
        }
    }

    /// Builds a vocabulary from the RDFS/OWL declarations found in `graph`.
    ///
    /// `rdfs:label` literals become class and property labels. Facts about
    /// terms the graph does not type as classes or properties are ignored, as
    /// are non-IRI subjects and objects.
    pub fn from_graph(graph: &Graph) -> Result<Self, VocabularyError> {
        let mut kinds: BTreeMap<Iri, TermKind> = BTreeMap::new();

        for triple in graph.iter() {
            if triple.predicate != rdf::TYPE {
                continue;
            }
            let (Some(subject), TermRef::NamedNode(class)) =
                (named(triple.subject.into()), triple.object)
            else {
                continue;
            };
            if let Some(kind) = declared_kind(class) {
                kinds.entry(subject).or_insert(kind);
            }
        }

        for triple in graph.iter() {
            let Some((subject_kind, object_kind)) = implied_kinds(triple.predicate) else {
                continue;
            };
            if let Some(subject) = named(triple.subject.into()) {
                kinds.entry(subject).or_insert(subject_kind);
            }
            if let Some(object) = named(triple.object) {
                kinds.entry(object).or_insert(object_kind);
            }
        }

        let mut vocabulary = Self::new();
        for (iri, kind) in kinds {
            match kind {
                TermKind::Class => vocabulary.add_class(Class::new(iri))?,
                TermKind::Property(kind) => vocabulary.add_property(Property::new(iri, kind))?,
                TermKind::Other => vocabulary.add_term(iri)?,
            }
        }

        for triple in graph.iter() {
            if triple.predicate == rdfs::LABEL {
                if let (Some(subject), TermRef::Literal(label)) =
                    (named(triple.subject.into()), triple.object)
                {
                    vocabulary.label(&subject, label.value());
                }
                continue;
            }
            let (Some(subject), Some(object)) = (named(triple.subject.into()), named(triple.object))
            else {
                continue;
            };
            if triple.predicate == rdfs::SUB_CLASS_OF {
                if let Some(class) = vocabulary.class_mut(&subject) {
                    class.add_parent(object);
                }
            } else if triple.predicate == rdfs::SUB_PROPERTY_OF {
                if let Some(property) = vocabulary.property_mut(&subject) {
                    property.add_parent(object);
                }
            } else if triple.predicate == rdfs::DOMAIN {
                if vocabulary.class(&object).is_none() {
                    return Err(VocabularyError::MissingClass {
                        property: subject,
                        class: object,
                    });
                }
                if let Some(property) = vocabulary.property_mut(&subject) {
                    property.add_domain(object);
                }
            }
        }

        tracing::debug!(
            classes = vocabulary.classes().len(),
            properties = vocabulary.properties().len(),
            "vocabulary_loaded_from_graph"
        );
        Ok(vocabulary)
    }
}
