/// TMDB API provider
///
/// Plain HTTPS JSON GET against the TMDB v3 API with the key passed as a
/// query parameter.
///
/// Endpoints:
/// 1. Keyword search: /search/movie
/// 2. Popular listing: /movie/popular (used for the empty query)
/// 3. Details: /movie/{id}
/// 4. Videos: /movie/{id}/videos
use crate::{
    catalog::CatalogProvider,
    error::{AppError, AppResult},
    models::{CatalogMovie, MovieDetails, Video},
};
use reqwest::Client as HttpClient;
use serde::Deserialize;

const VIDEO_LANGUAGE: &str = "en-US";

/// List endpoints wrap their payload in a results envelope
#[derive(Debug, Deserialize)]
struct MovieListResponse {
    results: Vec<CatalogMovie>,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    results: Vec<Video>,
}

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbProvider {
    async fn search_movies(&self, query: &str) -> AppResult<Vec<CatalogMovie>> {
        let url = format!("{}/search/movie", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("query", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let listing: MovieListResponse = response.json().await?;

        tracing::info!(
            query = %query,
            results = listing.results.len(),
            provider = "tmdb",
            "Movie search completed"
        );

        Ok(listing.results)
    }

    async fn popular_movies(&self) -> AppResult<Vec<CatalogMovie>> {
        let url = format!("{}/movie/popular", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let listing: MovieListResponse = response.json().await?;

        tracing::info!(
            results = listing.results.len(),
            provider = "tmdb",
            "Popular listing fetched"
        );

        Ok(listing.results)
    }

    async fn movie_details(&self, id: u64) -> AppResult<MovieDetails> {
        let url = format!("{}/movie/{}", self.api_url, id);
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let details: MovieDetails = response.json().await?;

        tracing::info!(movie_id = id, provider = "tmdb", "Movie details fetched");

        Ok(details)
    }

    async fn movie_videos(&self, id: u64) -> AppResult<Vec<Video>> {
        let url = format!("{}/movie/{}/videos", self.api_url, id);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", VIDEO_LANGUAGE),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let listing: VideoListResponse = response.json().await?;

        tracing::info!(
            movie_id = id,
            videos = listing.results.len(),
            provider = "tmdb",
            "Movie videos fetched"
        );

        Ok(listing.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_list_response_deserialization() {
        let json = r#"{
            "page": 1,
            "results": [
                {
                    "id": 27205,
                    "title": "Inception",
                    "overview": "A thief who steals corporate secrets",
                    "poster_path": "/inception.jpg",
                    "popularity": 83.5,
                    "release_date": "2010-07-16",
                    "genre_ids": [28, 878]
                }
            ],
            "total_pages": 1,
            "total_results": 1
        }"#;

        let listing: MovieListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(listing.results.len(), 1);
        assert_eq!(listing.results[0].id, 27205);
        assert_eq!(listing.results[0].title, "Inception");
    }

    #[test]
    fn test_video_list_response_deserialization() {
        let json = r#"{
            "id": 27205,
            "results": [
                {
                    "key": "8hP9D6kZseM",
                    "name": "Official Trailer",
                    "type": "Trailer",
                    "site": "YouTube"
                }
            ]
        }"#;

        let listing: VideoListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(listing.results.len(), 1);
        assert_eq!(listing.results[0].video_type, "Trailer");
    }
}
