use tracing::{debug, trace, warn};

use super::{
    cache::{Closure, ClosureBuilder, Derived},
    Reasoner,
};
use crate::{
    vocabulary::{Iri, Relation, Term, Vocabulary},
    Error, Result,
};

impl<V: Vocabulary> Reasoner<V> {
    /// Entails every class `term` is a sub-class of, itself included.
    ///
    /// # Errors
    ///
    /// [`Error::NotApplicable`] when `term` is not a class, and
    /// [`Error::CyclicHierarchy`] when its ancestry loops and cycle detection
    /// is enabled.
    pub fn entail_sub_class_of(&self, term: &Term) -> Result<Closure> {
        self.entail(term, Relation::SubClassOf)
    }

    /// Entails every property `term` is a sub-property of, itself included.
    ///
    /// # Errors
    ///
    /// [`Error::NotApplicable`] when `term` is not a property, and
    /// [`Error::CyclicHierarchy`] as for [`Self::entail_sub_class_of`].
    pub fn entail_sub_property_of(&self, term: &Term) -> Result<Closure> {
        self.entail(term, Relation::SubPropertyOf)
    }

    /// Entails the reflexive-transitive closure of `relation` from `term`.
    ///
    /// The closure lists `term` first, then direct targets in declaration
    /// order, then their own ancestors. Results are memoized per relation and
    /// term; later calls return the same shared closure without consulting
    /// the vocabulary.
    ///
    /// Declared targets the relation does not apply to (including identifiers
    /// the vocabulary does not know) are members of the closure but are not
    /// expanded further.
    ///
    /// Derivation recurses once per hierarchy level, and each level also goes
    /// through the cache's initializer frames. On a default 2 MiB thread stack
    /// chains deeper than a few hundred terms overflow; entail very deep
    /// hierarchies on a thread with a larger stack.
    ///
    /// With cycle detection disabled, a closure derived while a looping edge
    /// was skipped is returned but not cached, unless the skipped edge led
    /// back to the term being entailed.
    ///
    /// # Errors
    ///
    /// See [`Self::entail_sub_class_of`].
    pub fn entail(&self, term: &Term, relation: Relation) -> Result<Closure> {
        if !relation.applies_to(term.kind()) {
            return Err(Error::not_applicable(term.iri(), relation.name()));
        }
        let mut path = Vec::new();
        self.closure_of(term, relation, &mut path)
            .map(|derived| derived.closure)
    }

    fn closure_of(
        &self,
        term: &Term,
        relation: Relation,
        path: &mut Vec<Iri>,
    ) -> Result<Derived> {
        if let Some(closure) = self.cache.get(relation, term.iri()) {
            trace!(term = %term, relation = %relation, "entailment_cache_hit");
            return Ok(Derived::complete(closure));
        }

        path.push(term.iri().clone());
        let derived = self
            .cache
            .get_or_derive(relation, term.iri(), || self.derive(term, relation, path));
        path.pop();
        derived
    }

    fn derive(&self, term: &Term, relation: Relation, path: &mut Vec<Iri>) -> Result<Derived> {
        debug!(term = %term, relation = %relation, "entailment_cache_miss");

        let targets = self.vocabulary.declared(term, relation);
        let mut members = ClosureBuilder::new(term.clone());
        members.extend(targets.iter().cloned());
        let mut cut = Vec::new();

        for target in &targets {
            if target.iri() == term.iri() || !relation.applies_to(target.kind()) {
                continue;
            }
            if path.contains(target.iri()) {
                if self.settings.detect_cycles {
                    let mut cycle = path.clone();
                    cycle.push(target.iri().clone());
                    warn!(term = %target, relation = %relation, "entailment_cycle_detected");
                    return Err(Error::CyclicHierarchy {
                        term: target.iri().clone(),
                        relation,
                        path: cycle,
                    });
                }
                warn!(term = %target, relation = %relation, "entailment_cycle_skipped");
                cut.push(target.iri().clone());
                continue;
            }
            let ancestors = self.closure_of(target, relation, path)?;
            members.extend(ancestors.closure.iter().cloned());
            cut.extend(ancestors.cut);
        }

        // Edges skipped back to this term only cut off what it already holds.
        cut.retain(|iri| iri != term.iri());
        Ok(Derived {
            closure: members.finish(),
            cut,
        })
    }
}
