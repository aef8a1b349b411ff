/// Catalog data provider abstraction
///
/// This module provides a pluggable architecture for movie catalog sources.
/// The search pipeline and the detail view both consume the same provider, so
/// ids returned by search are always valid for downstream detail lookups.
use crate::{
    error::AppResult,
    models::{CatalogMovie, MovieDetails, Video},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie catalog providers
///
/// Providers implement keyword search, the default popular listing shown for
/// an empty query, and per-title detail and video lookups.
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Search for movies by keyword
    async fn search_movies(&self, query: &str) -> AppResult<Vec<CatalogMovie>>;

    /// Fetch the popular/trending listing used when no query is set
    async fn popular_movies(&self) -> AppResult<Vec<CatalogMovie>>;

    /// Fetch full details for a single movie
    async fn movie_details(&self, id: u64) -> AppResult<MovieDetails>;

    /// Fetch the video list for a movie, for trailer selection
    async fn movie_videos(&self, id: u64) -> AppResult<Vec<Video>>;
}
