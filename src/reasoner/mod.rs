//! RDFS entailment over a [`Vocabulary`].
//!
//! A [`Reasoner`] owns its [`EntailmentCache`], so independent vocabularies
//! (and tests) never share memoized closures.

mod cache;
mod closure;
mod domain;

pub use cache::{Closure, EntailmentCache};
pub use domain::DomainCheckOptions;

use crate::{config::EntailmentSettings, vocabulary::Vocabulary};

/// Entailment engine wiring a vocabulary to its closure cache.
#[derive(Debug)]
pub struct Reasoner<V> {
    vocabulary: V,
    cache: EntailmentCache,
    settings: EntailmentSettings,
}

impl<V: Vocabulary> Reasoner<V> {
    /// Creates a reasoner with default settings.
    pub fn new(vocabulary: V) -> Self {
        Self::from_config(vocabulary, &EntailmentSettings::default())
    }

    /// Creates a reasoner tuned by `settings`.
    pub fn from_config(vocabulary: V, settings: &EntailmentSettings) -> Self {
        Self {
            vocabulary,
            cache: EntailmentCache::with_initial_capacity(settings.initial_capacity),
            settings: settings.clone(),
        }
    }

    /// Vocabulary the closures are entailed from.
    pub fn vocabulary(&self) -> &V {
        &self.vocabulary
    }

    /// Returns the closures memoized so far.
    pub fn cache(&self) -> &EntailmentCache {
        &self.cache
    }

    /// Settings the reasoner was created with.
    pub fn settings(&self) -> &EntailmentSettings {
        &self.settings
    }
}
