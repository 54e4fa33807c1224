use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use oxrdf::{vocab::rdfs, NamedNodeRef};
use thiserror::Error;

use super::value_objects::Iri;

/// OWL refinement of a property, if any.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// Plain `rdf:Property` without an OWL refinement.
    Rdf,
    /// Links a resource to another resource.
    Object,
    /// Datatype properties capture literal values.
    Datatype,
    /// Annotation properties document terms and take no part in reasoning.
    Annotation,
}

/// Capability tag telling which entailments a term takes part in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TermKind {
    Class,
    Property(PropertyKind),
    /// Known to the vocabulary but neither a class nor a property.
    Other,
}

/// A named class or property of a vocabulary.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Term {
    iri: Iri,
    kind: TermKind,
}

impl Term {
    /// Creates a term with an explicit capability tag.
    #[must_use]
    pub fn new(iri: Iri, kind: TermKind) -> Self {
        Self { iri, kind }
    }

    /// Creates a class term.
    #[must_use]
    pub fn class(iri: Iri) -> Self {
        Self::new(iri, TermKind::Class)
    }

    /// Creates a property term of the given kind.
    #[must_use]
    pub fn property(iri: Iri, kind: PropertyKind) -> Self {
        Self::new(iri, TermKind::Property(kind))
    }

    /// Creates a term that is neither a class nor a property.
    #[must_use]
    pub fn other(iri: Iri) -> Self {
        Self::new(iri, TermKind::Other)
    }

    /// Identifier of the term.
    #[must_use]
    pub fn iri(&self) -> &Iri {
        &self.iri
    }

    /// Capability tag of the term.
    #[must_use]
    pub fn kind(&self) -> TermKind {
        self.kind
    }

    /// Whether the term takes part in sub-class entailment.
    #[must_use]
    pub fn is_class(&self) -> bool {
        matches!(self.kind, TermKind::Class)
    }

    /// Whether the term takes part in sub-property entailment and has domains.
    #[must_use]
    pub fn is_property(&self) -> bool {
        matches!(self.kind, TermKind::Property(_))
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.iri, f)
    }
}

/// Hierarchy relation whose reflexive-transitive closure can be entailed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Relation {
    /// `rdfs:subClassOf`
    SubClassOf,
    /// `rdfs:subPropertyOf`
    SubPropertyOf,
}

impl Relation {
    pub const ALL: [Self; 2] = [Self::SubClassOf, Self::SubPropertyOf];

    /// Short name of the relation, as used in RDFS.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::SubClassOf => "subClassOf",
            Self::SubPropertyOf => "subPropertyOf",
        }
    }

    /// Predicate declaring the relation in RDF data.
    #[must_use]
    pub fn predicate(self) -> NamedNodeRef<'static> {
        match self {
            Self::SubClassOf => rdfs::SUB_CLASS_OF,
            Self::SubPropertyOf => rdfs::SUB_PROPERTY_OF,
        }
    }

    /// Whether terms of `kind` can be related by this relation.
    #[must_use]
    pub fn applies_to(self, kind: TermKind) -> bool {
        match (self, kind) {
            (Self::SubClassOf, TermKind::Class)
            | (Self::SubPropertyOf, TermKind::Property(_)) => true,
            (Self::SubClassOf, TermKind::Property(_) | TermKind::Other)
            | (Self::SubPropertyOf, TermKind::Class | TermKind::Other) => false,
        }
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Relation {
    type Err = UnknownRelation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|relation| relation.name() == s)
            .ok_or_else(|| UnknownRelation(s.to_owned()))
    }
}

/// Returned when parsing a relation name that has no entailment.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("no entailment registered for relation `{0}`")]
pub struct UnknownRelation(pub String);

/// Vocabulary class definition capturing parent relationships and metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Class {
    id: Iri,
    label: Option<String>,
    super_classes: Vec<Iri>,
}

impl Class {
    /// Creates a class without label or parents.
    #[must_use]
    pub fn new(id: Iri) -> Self {
        Self {
            id,
            label: None,
            super_classes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.set_label(label);
        self
    }

    /// Sets the `rdfs:label` of the class, replacing any previous one.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    /// Adds a parent class, keeping declaration order. Returns `false` when
    /// the parent was already declared.
    pub fn add_parent(&mut self, parent: Iri) -> bool {
        if self.super_classes.contains(&parent) {
            return false;
        }
        self.super_classes.push(parent);
        true
    }

    #[must_use]
    pub fn id(&self) -> &Iri {
        &self.id
    }

    /// Human readable `rdfs:label`, if one was declared.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the direct parent classes in declaration order.
    #[must_use]
    pub fn parents(&self) -> &[Iri] {
        &self.super_classes
    }
}

/// Vocabulary property definition with its hierarchy and domain constraints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    id: Iri,
    label: Option<String>,
    kind: PropertyKind,
    super_properties: Vec<Iri>,
    domains: Option<Vec<Iri>>,
}

impl Property {
    /// The property starts without a domain attribute.
    #[must_use]
    pub fn new(id: Iri, kind: PropertyKind) -> Self {
        Self {
            id,
            label: None,
            kind,
            super_properties: Vec::new(),
            domains: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.set_label(label);
        self
    }

    /// Sets the `rdfs:label` of the property.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    /// Replaces the domain attribute. An empty iterator leaves the attribute
    /// present but empty.
    #[must_use]
    pub fn with_domains(mut self, domains: impl IntoIterator<Item = Iri>) -> Self {
        self.domains = Some(Vec::new());
        for domain in domains {
            self.add_domain(domain);
        }
        self
    }

    /// Appends a domain class, creating the attribute when absent.
    pub fn add_domain(&mut self, class: Iri) -> bool {
        let domains = self.domains.get_or_insert_with(Vec::new);
        if domains.contains(&class) {
            return false;
        }
        domains.push(class);
        true
    }

    /// Adds a parent property, keeping declaration order.
    pub fn add_parent(&mut self, parent: Iri) -> bool {
        if self.super_properties.contains(&parent) {
            return false;
        }
        self.super_properties.push(parent);
        true
    }

    #[must_use]
    pub fn id(&self) -> &Iri {
        &self.id
    }

    /// Human readable `rdfs:label`, if one was declared.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// OWL refinement the property was declared with.
    #[must_use]
    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// Returns the direct parent properties in declaration order.
    #[must_use]
    pub fn parents(&self) -> &[Iri] {
        &self.super_properties
    }

    /// Returns the declared domain classes, or `None` when the property has
    /// no domain attribute at all.
    #[must_use]
    pub fn domains(&self) -> Option<&[Iri]> {
        self.domains.as_deref()
    }
}

/// Vocabulary aggregate holding class, property and plain term declarations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InMemoryVocabulary {
    classes: BTreeMap<Iri, Class>,
    properties: BTreeMap<Iri, Property>,
    others: BTreeSet<Iri>,
}

impl InMemoryVocabulary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class, enforcing unique identifiers across all terms.
    pub fn add_class(&mut self, class: Class) -> Result<(), VocabularyError> {
        self.ensure_unused(class.id())?;
        self.classes.insert(class.id().clone(), class);
        Ok(())
    }

    /// Adds a property, validating that its domains are known classes.
    pub fn add_property(&mut self, property: Property) -> Result<(), VocabularyError> {
        self.ensure_unused(property.id())?;
        for class in property.domains().unwrap_or_default() {
            if !self.classes.contains_key(class) {
                return Err(VocabularyError::MissingClass {
                    property: property.id().clone(),
                    class: class.clone(),
                });
            }
        }
        self.properties.insert(property.id().clone(), property);
        Ok(())
    }

    /// Registers a term that is neither a class nor a property, such as a
    /// datatype.
    pub fn add_term(&mut self, iri: Iri) -> Result<(), VocabularyError> {
        self.ensure_unused(&iri)?;
        self.others.insert(iri);
        Ok(())
    }

    fn ensure_unused(&self, iri: &Iri) -> Result<(), VocabularyError> {
        if self.contains(iri) {
            return Err(VocabularyError::DuplicateTerm(iri.clone()));
        }
        Ok(())
    }

    /// Whether any term with the identifier was declared.
    #[must_use]
    pub fn contains(&self, iri: &Iri) -> bool {
        self.classes.contains_key(iri)
            || self.properties.contains_key(iri)
            || self.others.contains(iri)
    }

    /// Class definition declared under `id`.
    #[must_use]
    pub fn class(&self, id: &Iri) -> Option<&Class> {
        self.classes.get(id)
    }

    /// Property definition declared under `id`.
    #[must_use]
    pub fn property(&self, id: &Iri) -> Option<&Property> {
        self.properties.get(id)
    }

    pub(crate) fn class_mut(&mut self, id: &Iri) -> Option<&mut Class> {
        self.classes.get_mut(id)
    }

    pub(crate) fn property_mut(&mut self, id: &Iri) -> Option<&mut Property> {
        self.properties.get_mut(id)
    }

    /// Classes ordered by identifier.
    #[must_use]
    pub fn classes(&self) -> &BTreeMap<Iri, Class> {
        &self.classes
    }

    /// Properties ordered by identifier.
    #[must_use]
    pub fn properties(&self) -> &BTreeMap<Iri, Property> {
        &self.properties
    }

    /// Looks up a declared term by identifier.
    #[must_use]
    pub fn term(&self, iri: &Iri) -> Option<Term> {
        if self.classes.contains_key(iri) {
            Some(Term::class(iri.clone()))
        } else if let Some(property) = self.properties.get(iri) {
            Some(Term::property(iri.clone(), property.kind()))
        } else if self.others.contains(iri) {
            Some(Term::other(iri.clone()))
        } else {
            None
        }
    }

    /// Like [`Self::term`], but undeclared identifiers come back as
    /// [`TermKind::Other`].
    #[must_use]
    pub(crate) fn resolve(&self, iri: &Iri) -> Term {
        self.term(iri).unwrap_or_else(|| Term::other(iri.clone()))
    }
}

/// Errors raised when building an [`InMemoryVocabulary`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum VocabularyError {
    /// Attempted to declare a term with an existing identifier.
    #[error("term `{0}` already exists")]
    DuplicateTerm(Iri),
    /// A property domain referenced a class the vocabulary does not declare.
    #[error("domain `{class}` of property `{property}` is not a declared class")]
    MissingClass { property: Iri, class: Iri },
}
