use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::Suggestion;

/// Namespace key the suggestion collection persists under
pub const STORE_KEY: &str = "movie-x-store";

/// Versionless persisted document: the full collection, nothing else.
///
/// Older incompatible shapes under the same key fail deserialization and are
/// treated as absent by the loaders below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub movies: Vec<Suggestion>,
}

/// Durable local storage for the suggestion collection.
///
/// Writes are synchronous from the caller's point of view. A load never
/// fails: absent, unreadable, or malformed state all come back as `None` so
/// the store can fall back to its seed set.
#[cfg_attr(test, mockall::automock)]
pub trait SuggestionStorage: Send {
    /// Loads the persisted collection, or `None` when nothing usable exists
    fn load(&self) -> Option<PersistedState>;

    /// Writes the full collection
    fn save(&self, state: &PersistedState) -> AppResult<()>;
}

/// JSON-file storage backend
///
/// The collection lives in a single document at `<dir>/movie-x-store.json`.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Creates the backing directory if needed
    pub fn new(dir: impl AsRef<Path>) -> AppResult<Self> {
        std::fs::create_dir_all(dir.as_ref())?;
        Ok(Self {
            path: dir.as_ref().join(format!("{}.json", STORE_KEY)),
        })
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SuggestionStorage for JsonFileStorage {
    fn load(&self) -> Option<PersistedState> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %self.path.display(),
                    "Failed to read persisted suggestions"
                );
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %self.path.display(),
                    "Persisted suggestions are malformed, treating as absent"
                );
                None
            }
        }
    }

    fn save(&self, state: &PersistedState) -> AppResult<()> {
        let json = serde_json::to_string(state)
            .map_err(|e| AppError::Internal(format!("State serialization error: {}", e)))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-memory storage backend for wiring without a disk and for tests.
///
/// Clones share the same underlying slot, so a snapshot taken from one handle
/// observes writes made through another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    state: Arc<Mutex<Option<PersistedState>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current persisted value, if any
    pub fn snapshot(&self) -> Option<PersistedState> {
        self.state.lock().ok().and_then(|guard| guard.clone())
    }
}

impl SuggestionStorage for InMemoryStorage {
    fn load(&self) -> Option<PersistedState> {
        self.snapshot()
    }

    fn save(&self, state: &PersistedState) -> AppResult<()> {
        let mut guard = self
            .state
            .lock()
            .map_err(|e| AppError::Internal(format!("Storage lock poisoned: {}", e)))?;
        *guard = Some(state.clone());
        Ok(())
    }
}
