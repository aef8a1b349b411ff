//! Client-side movie discovery core: a bounded, deduplicated, locally
//! persisted suggestion shortlist plus a debounced catalog search pipeline.
//!
//! The two cooperating pieces are [`store::SuggestionStore`] (capacity-capped
//! at five, order-preserving, persisted on every mutation) and
//! [`search::SearchPipeline`] (debounced query changes, one catalog call per
//! settle, wholesale result replacement). Catalog access goes through the
//! [`catalog::CatalogProvider`] trait; [`catalog::TmdbProvider`] is the HTTP
//! implementation.

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod store;

pub use catalog::{CatalogProvider, TmdbProvider};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{select_trailer, CatalogMovie, MovieDetails, Suggestion, Video};
pub use search::{SearchPipeline, DEFAULT_DEBOUNCE};
pub use store::{SuggestionStore, SUGGESTION_CAP};
