use oxrdf::vocab::rdf;
use tracing::trace;

use super::{cache::ClosureBuilder, Reasoner};
use crate::{
    vocabulary::{Iri, Queryable, Relation, Resource, Term, Vocabulary},
    Error, Result,
};

/// Optional inputs of [`Reasoner::is_domain_acceptable`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DomainCheckOptions {
    entailed_types: Option<Vec<Term>>,
}

impl DomainCheckOptions {
    /// Supplies the fully entailed types of the resource, so the store is not
    /// queried.
    #[must_use]
    pub fn with_entailed_types(types: impl IntoIterator<Item = Term>) -> Self {
        Self {
            entailed_types: Some(types.into_iter().collect()),
        }
    }

    /// Types supplied by the caller, if any.
    #[must_use]
    pub fn entailed_types(&self) -> Option<&[Term]> {
        self.entailed_types.as_deref()
    }
}

impl<V: Vocabulary> Reasoner<V> {
    /// Checks that `resource` carries every declared domain of `property`.
    ///
    /// This is stricter than RDFS entailment, which would *assert* domain
    /// membership. Here membership must already follow from the resource's
    /// types, so data that contradicts the vocabulary shows up. Domains listed
    /// in [`crate::config::EntailmentSettings::ignored_domains`] (`owl:Thing`
    /// by default) never constrain anything, and a resource without any known
    /// type is accepted.
    ///
    /// # Errors
    ///
    /// [`Error::NotApplicable`] when `property` is not a property.
    /// Entailing the resource's types can fail with
    /// [`Error::CyclicHierarchy`].
    pub fn is_domain_acceptable<Q>(
        &self,
        property: &Term,
        resource: &Resource,
        queryable: &Q,
        options: &DomainCheckOptions,
    ) -> Result<bool>
    where
        Q: Queryable + ?Sized,
    {
        if !property.is_property() {
            return Err(Error::not_applicable(property.iri(), "domain"));
        }

        let Some(domains) = self.vocabulary.domains(property) else {
            return Ok(true);
        };
        let domains: Vec<Term> = domains
            .into_iter()
            .filter(|domain| !self.settings.ignores_domain(domain.iri()))
            .collect();
        if domains.is_empty() {
            return Ok(true);
        }

        let queried;
        let types = match options.entailed_types() {
            Some(types) => types,
            None => {
                queried = self.entailed_types(resource, queryable)?;
                queried.as_slice()
            }
        };
        if types.is_empty() {
            return Ok(true);
        }

        let acceptable = domains
            .iter()
            .all(|domain| types.iter().any(|ty| ty.iri() == domain.iri()));
        trace!(
            property = %property,
            resource = %resource,
            acceptable,
            "domain_checked"
        );
        Ok(acceptable)
    }

    /// Entails the full type set of `resource`: the sub-class closure of every
    /// asserted `rdf:type` the vocabulary knows as a class, deduplicated.
    ///
    /// Literals, blank nodes, unknown IRIs and terms that are not classes are
    /// skipped.
    ///
    /// # Errors
    ///
    /// [`Error::CyclicHierarchy`] when an asserted class has a looping
    /// ancestry and cycle detection is enabled.
    pub fn entailed_types<Q>(&self, resource: &Resource, queryable: &Q) -> Result<Vec<Term>>
    where
        Q: Queryable + ?Sized,
    {
        let mut types: Option<ClosureBuilder> = None;

        for object in queryable.objects(resource, rdf::TYPE) {
            let iri = match object {
                oxrdf::Term::NamedNode(node) => Iri::from(node),
                other => {
                    trace!(resource = %resource, value = %other, "type_value_skipped");
                    continue;
                }
            };
            let Some(class) = self.vocabulary.find_term(&iri).filter(Term::is_class) else {
                trace!(resource = %resource, value = %iri, "type_value_skipped");
                continue;
            };
            let closure = self.entail(&class, Relation::SubClassOf)?;
            match types.as_mut() {
                Some(builder) => builder.extend(closure.iter().cloned()),
                None => {
                    let mut builder = ClosureBuilder::new(closure.origin().clone());
                    builder.extend(closure.iter().cloned());
                    types = Some(builder);
                }
            }
        }

        Ok(types
            .map(|builder| builder.finish().to_vec())
            .unwrap_or_default())
    }
}
