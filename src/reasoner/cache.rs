//! Memoization of entailed closures.
//!
//! Entries are keyed by relation and term. They are never invalidated nor
//! evicted, which only holds because vocabulary definitions are immutable for
//! the lifetime of the owning [`crate::Reasoner`].

use std::{collections::HashSet, fmt, ops::Deref, sync::Arc};

use crate::{
    vocabulary::{Iri, Relation, Term},
    Error, Result,
};

/// Reflexive-transitive closure of a term: the term itself first, then its
/// ancestors without duplicates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Closure(Arc<[Term]>);

impl Closure {
    /// Whether the closure contains a term with the given identifier.
    #[must_use]
    pub fn contains(&self, iri: &Iri) -> bool {
        self.0.iter().any(|term| term.iri() == iri)
    }

    /// The term the closure was entailed for.
    #[must_use]
    pub fn origin(&self) -> &Term {
        &self.0[0]
    }

    /// Identifiers of every member, in closure order.
    pub fn iris(&self) -> impl Iterator<Item = &Iri> {
        self.0.iter().map(Term::iri)
    }

    /// Whether both handles share the same cached allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for Closure {
    type Target = [Term];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Accumulates closure members, keeping the first occurrence of each term.
pub(crate) struct ClosureBuilder {
    members: Vec<Term>,
    seen: HashSet<Iri>,
}

impl ClosureBuilder {
    pub(crate) fn new(origin: Term) -> Self {
        let mut builder = Self {
            members: Vec::new(),
            seen: HashSet::new(),
        };
        builder.push(origin);
        builder
    }

    pub(crate) fn push(&mut self, term: Term) {
        if self.seen.insert(term.iri().clone()) {
            self.members.push(term);
        }
    }

    pub(crate) fn finish(self) -> Closure {
        Closure(self.members.into())
    }
}

impl Extend<Term> for ClosureBuilder {
    fn extend<T: IntoIterator<Item = Term>>(&mut self, iter: T) {
        for term in iter {
            self.push(term);
        }
    }
}

/// Result of deriving one closure.
#[derive(Clone, Debug)]
pub(crate) struct Derived {
    pub(crate) closure: Closure,
    /// Terms still being derived whose incoming edges were skipped to break a
    /// cycle. The closure is incomplete while this is non-empty.
    pub(crate) cut: Vec<Iri>,
}

impl Derived {
    pub(crate) fn complete(closure: Closure) -> Self {
        Self {
            closure,
            cut: Vec::new(),
        }
    }
}

/// Initializer outcomes that must not be stored.
#[derive(Debug)]
enum Uncached {
    Failed(Error),
    Partial(Derived),
}

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
struct CacheKey {
    relation: Relation,
    term: Iri,
}

impl CacheKey {
    fn new(relation: Relation, term: &Iri) -> Self {
        Self {
            relation,
            term: term.clone(),
        }
    }
}

/// Append-only store of entailed closures, one partition per [`Relation`].
///
/// Misses go through [`EntailmentCache::get_or_try_insert_with`], which runs at
/// most one initializer per key at a time. Concurrent callers for the same key
/// wait for it and share its result.
#[derive(Clone)]
pub struct EntailmentCache {
    entries: moka::sync::Cache<CacheKey, Closure>,
}

impl EntailmentCache {
    /// Creates an empty, unbounded cache.
    #[must_use]
    pub fn new() -> Self {
        Self::with_initial_capacity(None)
    }

    /// Creates an unbounded cache, optionally pre-sized.
    #[must_use]
    pub fn with_initial_capacity(initial_capacity: Option<usize>) -> Self {
        let mut builder = moka::sync::Cache::builder();
        if let Some(capacity) = initial_capacity {
            builder = builder.initial_capacity(capacity);
        }
        Self {
            entries: builder.build(),
        }
    }

    /// Returns the cached closure of `term` under `relation`.
    #[must_use]
    pub fn get(&self, relation: Relation, term: &Iri) -> Option<Closure> {
        self.entries.get(&CacheKey::new(relation, term))
    }

    /// Whether a closure of `term` under `relation` is cached.
    #[must_use]
    pub fn contains(&self, relation: Relation, term: &Iri) -> bool {
        self.entries.contains_key(&CacheKey::new(relation, term))
    }

    /// Returns the cached closure, or runs `init` and stores its result.
    ///
    /// Errors are returned to every waiting caller and nothing is stored, so a
    /// later call retries the derivation.
    pub fn get_or_try_insert_with<F>(
        &self,
        relation: Relation,
        term: &Iri,
        init: F,
    ) -> Result<Closure>
    where
        F: FnOnce() -> Result<Closure>,
    {
        self.get_or_derive(relation, term, || init().map(Derived::complete))
            .map(|derived| derived.closure)
    }

    /// Like [`Self::get_or_try_insert_with`], but incomplete derivations are
    /// handed back to the callers without being stored.
    pub(crate) fn get_or_derive<F>(
        &self,
        relation: Relation,
        term: &Iri,
        init: F,
    ) -> Result<Derived>
    where
        F: FnOnce() -> Result<Derived>,
    {
        self.entries
            .try_get_with(CacheKey::new(relation, term), || match init() {
                Ok(derived) if derived.cut.is_empty() => Ok(derived.closure),
                Ok(derived) => Err(Uncached::Partial(derived)),
                Err(err) => Err(Uncached::Failed(err)),
            })
            .map(Derived::complete)
            .or_else(|uncached: Arc<Uncached>| match &*uncached {
                Uncached::Partial(derived) => Ok(derived.clone()),
                Uncached::Failed(err) => Err(err.clone()),
            })
    }

    /// Number of cached closures across both partitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.run_pending_tasks();
        usize::try_from(self.entries.entry_count()).unwrap_or(usize::MAX)
    }

    /// Whether no closure has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of cached closures for one relation.
    #[must_use]
    pub fn partition_len(&self, relation: Relation) -> usize {
        self.entries.run_pending_tasks();
        self.entries
            .iter()
            .filter(|(key, _)| key.relation == relation)
            .count()
    }
}

impl Default for EntailmentCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EntailmentCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntailmentCache")
            .field("entry_count", &self.entries.entry_count())
            .finish()
    }
}
