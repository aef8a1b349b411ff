use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use reel_deck::catalog::CatalogProvider;
use reel_deck::error::{AppError, AppResult};
use reel_deck::models::{CatalogMovie, MovieDetails, Video};
use reel_deck::SearchPipeline;

/// Marker recorded when the popular listing is hit instead of keyword search
const POPULAR: &str = "<popular>";

/// Catalog fake that records every call and answers each query with a single
/// movie titled "<query> result", after an optional scripted delay.
struct ScriptedCatalog {
    calls: Mutex<Vec<String>>,
    delays: HashMap<String, Duration>,
    failing: Vec<String>,
}

impl ScriptedCatalog {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            delays: HashMap::new(),
            failing: Vec::new(),
        }
    }

    fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    fn with_failure(mut self, query: &str) -> Self {
        self.failing.push(query.to_string());
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn respond(&self, key: &str) -> AppResult<Vec<CatalogMovie>> {
        self.calls.lock().unwrap().push(key.to_string());
        if let Some(delay) = self.delays.get(key) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.iter().any(|query| query == key) {
            return Err(AppError::ExternalApi(format!(
                "scripted failure for {}",
                key
            )));
        }
        Ok(vec![movie_for(key)])
    }
}

fn movie_for(key: &str) -> CatalogMovie {
    CatalogMovie {
        id: 1,
        title: format!("{} result", key),
        overview: None,
        poster_path: None,
        popularity: 0.0,
        release_date: None,
        genre_ids: None,
    }
}

#[async_trait::async_trait]
impl CatalogProvider for ScriptedCatalog {
    async fn search_movies(&self, query: &str) -> AppResult<Vec<CatalogMovie>> {
        self.respond(query).await
    }

    async fn popular_movies(&self) -> AppResult<Vec<CatalogMovie>> {
        self.respond(POPULAR).await
    }

    async fn movie_details(&self, _id: u64) -> AppResult<MovieDetails> {
        Err(AppError::Internal("not scripted".to_string()))
    }

    async fn movie_videos(&self, _id: u64) -> AppResult<Vec<Video>> {
        Err(AppError::Internal("not scripted".to_string()))
    }
}

const DEBOUNCE: Duration = Duration::from_millis(500);

#[tokio::test(start_paused = true)]
async fn rapid_changes_settle_once() {
    let catalog = Arc::new(ScriptedCatalog::new());
    let pipeline = SearchPipeline::spawn(catalog.clone(), DEBOUNCE);
    let mut results = pipeline.results();

    pipeline.on_query_change("bat");
    pipeline.on_query_change("batman");

    results.changed().await.unwrap();
    assert_eq!(catalog.calls(), vec!["batman"]);
    assert_eq!(results.borrow()[0].title, "batman result");

    // The first change's window was cancelled, not deferred.
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(catalog.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn last_resolver_wins() {
    let catalog = Arc::new(
        ScriptedCatalog::new()
            .with_delay("a", Duration::from_millis(2000))
            .with_delay("b", Duration::from_millis(10)),
    );
    let pipeline = SearchPipeline::spawn(catalog.clone(), DEBOUNCE);
    let mut results = pipeline.results();

    pipeline.on_query_change("a");
    tokio::time::sleep(Duration::from_millis(510)).await;
    assert_eq!(catalog.calls(), vec!["a"]);

    pipeline.on_query_change("b");
    results.changed().await.unwrap();
    assert_eq!(results.borrow_and_update()[0].title, "b result");

    // The slow fetch for "a" is still in flight and lands last, overwriting
    // the fresher "b" results. Pins the known last-write-wins race.
    results.changed().await.unwrap();
    assert_eq!(results.borrow_and_update()[0].title, "a result");
    assert_eq!(catalog.calls(), vec!["a", "b"]);
}

#[tokio::test(start_paused = true)]
async fn empty_query_hits_popular_listing() {
    let catalog = Arc::new(ScriptedCatalog::new());
    let pipeline = SearchPipeline::spawn(catalog.clone(), DEBOUNCE);
    let mut results = pipeline.results();

    pipeline.on_query_change("");
    results.changed().await.unwrap();

    assert_eq!(catalog.calls(), vec![POPULAR]);
    assert_eq!(results.borrow()[0].title, "<popular> result");
}

#[tokio::test(start_paused = true)]
async fn whitespace_query_uses_keyword_search() {
    let catalog = Arc::new(ScriptedCatalog::new());
    let pipeline = SearchPipeline::spawn(catalog.clone(), DEBOUNCE);
    let mut results = pipeline.results();

    // Only the truly empty query maps to the popular listing; whitespace
    // goes to the keyword endpoint unsanitized.
    pipeline.on_query_change("   ");
    results.changed().await.unwrap();

    assert_eq!(catalog.calls(), vec!["   "]);
    assert_eq!(results.borrow()[0].title, "    result");
}

#[tokio::test(start_paused = true)]
async fn failed_fetch_retains_previous_results() {
    let catalog = Arc::new(ScriptedCatalog::new().with_failure("broken"));
    let pipeline = SearchPipeline::spawn(catalog.clone(), DEBOUNCE);
    let mut results = pipeline.results();

    pipeline.on_query_change("good");
    results.changed().await.unwrap();
    assert_eq!(results.borrow_and_update()[0].title, "good result");

    pipeline.on_query_change("broken");
    tokio::time::sleep(Duration::from_millis(600)).await;
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }

    assert_eq!(catalog.calls(), vec!["good", "broken"]);
    assert!(!results.has_changed().unwrap());
    assert_eq!(results.borrow()[0].title, "good result");
}

#[tokio::test(start_paused = true)]
async fn submit_bypasses_debounce_window() {
    let catalog = Arc::new(ScriptedCatalog::new());
    let pipeline = SearchPipeline::spawn(catalog.clone(), DEBOUNCE);
    let mut results = pipeline.results();

    let start = tokio::time::Instant::now();
    pipeline.on_query_change("now");
    pipeline.submit();

    results.changed().await.unwrap();
    assert_eq!(catalog.calls(), vec!["now"]);
    assert!(start.elapsed() < DEBOUNCE);

    // Submit consumed the pending window; nothing fires later.
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(catalog.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn drop_cancels_pending_debounce() {
    let catalog = Arc::new(ScriptedCatalog::new());
    let pipeline = SearchPipeline::spawn(catalog.clone(), DEBOUNCE);
    let results = pipeline.results();

    pipeline.on_query_change("late");
    drop(pipeline);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(catalog.calls().is_empty());
    assert!(results.borrow().is_empty());
}

#[tokio::test(start_paused = true)]
async fn shutdown_discards_pending_window() {
    let catalog = Arc::new(ScriptedCatalog::new());
    let pipeline = SearchPipeline::spawn(catalog.clone(), DEBOUNCE);
    let results = pipeline.results();

    pipeline.on_query_change("late");
    pipeline.shutdown().await;

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(catalog.calls().is_empty());
    assert!(results.borrow().is_empty());
}
