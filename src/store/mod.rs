//! The bounded, deduplicated, persisted suggestion shortlist.
//!
//! The store is an explicitly constructed object with injected storage and
//! seed dependencies; nothing here is global. Construction rehydrates from
//! storage, every mutation persists the full collection, and the derived
//! views are recomputed on demand rather than cached.

use std::collections::HashSet;

use crate::models::Suggestion;

pub mod seed;
pub mod storage;

pub use seed::seed_suggestions;
pub use storage::{InMemoryStorage, JsonFileStorage, PersistedState, SuggestionStorage, STORE_KEY};

/// Maximum number of saved suggestions
pub const SUGGESTION_CAP: usize = 5;

pub struct SuggestionStore {
    storage: Box<dyn SuggestionStorage>,
    seeds: Vec<Suggestion>,
    suggestions: Vec<Suggestion>,
}

impl SuggestionStore {
    /// Opens a store over the given backend with the default seed set
    pub fn new(storage: Box<dyn SuggestionStorage>) -> Self {
        Self::with_seeds(storage, seed::seed_suggestions())
    }

    /// Opens a store over the given backend, rehydrating from persisted
    /// state. Absent or invalid state falls back to fresh seed clones;
    /// rehydrated items are re-coerced to the full suggestion shape.
    pub fn with_seeds(storage: Box<dyn SuggestionStorage>, seeds: Vec<Suggestion>) -> Self {
        let suggestions = match storage.load() {
            Some(state) if state.movies.iter().all(Suggestion::is_complete) => {
                let mut movies = state.movies;
                for movie in &mut movies {
                    movie.normalize();
                }
                tracing::debug!(count = movies.len(), "Rehydrated suggestions");
                movies
            }
            Some(_) => {
                tracing::warn!("Persisted suggestions have an incompatible shape, reseeding");
                seeds.clone()
            }
            None => seeds.clone(),
        };

        Self {
            storage,
            seeds,
            suggestions,
        }
    }

    /// Adds a fully-formed suggestion.
    ///
    /// An item with the same id is replaced in place, keeping its position
    /// and leaving capacity untouched. A new id past the cap is a silent
    /// no-op; callers disable the action via [`SuggestionStore::at_capacity`].
    pub fn add(&mut self, suggestion: Suggestion) {
        if let Some(existing) = self
            .suggestions
            .iter_mut()
            .find(|item| item.id == suggestion.id)
        {
            *existing = suggestion;
            self.persist();
            return;
        }

        if self.suggestions.len() >= SUGGESTION_CAP {
            tracing::debug!(id = %suggestion.id, "Suggestion cap reached, add ignored");
            return;
        }

        self.suggestions.push(suggestion);
        self.persist();
    }

    /// Removes the suggestion with the given id; absent ids are a no-op
    pub fn remove(&mut self, id: &str) {
        let before = self.suggestions.len();
        self.suggestions.retain(|item| item.id != id);
        if self.suggestions.len() != before {
            self.persist();
        }
    }

    /// Looks up a stored suggestion by id
    pub fn get_by_id(&self, id: &str) -> Option<&Suggestion> {
        self.suggestions.iter().find(|item| item.id == id)
    }

    /// Replaces the entire collection unconditionally.
    ///
    /// Deliberately does NOT enforce the cap or dedupe: this is the bulk
    /// rehydration/testing escape hatch, and callers own the invariants of
    /// what they pass in.
    pub fn set_all(&mut self, suggestions: Vec<Suggestion>) {
        self.suggestions = suggestions;
        self.persist();
    }

    /// Restores the collection to fresh copies of the seed set
    pub fn reset(&mut self) {
        self.suggestions = self.seeds.clone();
        self.persist();
    }

    /// All stored suggestions in insertion order
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    /// Whether a new distinct add would be refused
    pub fn at_capacity(&self) -> bool {
        self.suggestions.len() >= SUGGESTION_CAP
    }

    /// Set of stored ids for membership tests
    pub fn saved_ids(&self) -> HashSet<&str> {
        self.suggestions.iter().map(|item| item.id.as_str()).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.suggestions.iter().any(|item| item.id == id)
    }

    /// The first `min(limit, len)` suggestions in stored order
    pub fn featured(&self, limit: usize) -> &[Suggestion] {
        &self.suggestions[..self.suggestions.len().min(limit)]
    }

    /// How many of `limit` display slots are unfilled
    pub fn empty_slots(&self, limit: usize) -> usize {
        limit.saturating_sub(self.suggestions.len())
    }

    /// Writes the full collection through the storage backend. A failed
    /// write is logged and the in-memory state stands.
    fn persist(&self) {
        let state = PersistedState {
            movies: self.suggestions.clone(),
        };
        if let Err(e) = self.storage.save(&state) {
            tracing::warn!(error = %e, "Failed to persist suggestions");
        }
    }
}
