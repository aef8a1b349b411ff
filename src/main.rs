use std::sync::Arc;
use std::time::Duration;

use reel_deck::store::{JsonFileStorage, SuggestionStore, SUGGESTION_CAP};
use reel_deck::{select_trailer, CatalogProvider, Config, SearchPipeline, Suggestion, TmdbProvider};

/// Demo wiring: run one debounced search for the query given on the command
/// line (the popular listing when none is given), print the results with the
/// top title's details and trailer, and show the persisted shortlist.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");

    let provider = Arc::new(TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
    ));
    let pipeline =
        SearchPipeline::spawn(provider.clone(), Duration::from_millis(config.debounce_ms));
    let mut results = pipeline.results();

    pipeline.on_query_change(query.clone());
    tokio::time::timeout(Duration::from_secs(10), results.changed())
        .await
        .map_err(|_| anyhow::anyhow!("Timed out waiting for search results"))??;
    let movies = results.borrow_and_update().clone();

    if query.is_empty() {
        println!("Popular right now:");
    } else {
        println!("Results for \"{}\":", query);
    }
    for movie in movies.iter().take(10) {
        println!(
            "  {:>8}  {} ({})",
            movie.id,
            movie.title,
            match movie.release_year() {
                0 => "year unknown".to_string(),
                year => year.to_string(),
            }
        );
    }

    if let Some(movie) = movies.first() {
        match provider.movie_details(movie.id).await {
            Ok(details) => {
                println!();
                println!("Top pick: {}", details.title);
                if let Some(status) = &details.status {
                    println!("  Status:   {}", status);
                }
                println!("  Rating:   {:.2} / 10", details.vote_average);
                if let Some(duration) = details.runtime_display() {
                    println!("  Duration: {}", duration);
                }
                if !details.genres.is_empty() {
                    let names: Vec<&str> =
                        details.genres.iter().map(|genre| genre.name.as_str()).collect();
                    println!("  Genres:   {}", names.join(", "));
                }
            }
            Err(e) => tracing::warn!(movie_id = movie.id, error = %e, "Detail lookup failed"),
        }

        match provider.movie_videos(movie.id).await {
            Ok(videos) => match select_trailer(&videos) {
                Some(trailer) => {
                    println!("  Trailer:  https://www.youtube.com/watch?v={}", trailer.key)
                }
                None => println!("  Trailer:  none available"),
            },
            Err(e) => tracing::warn!(movie_id = movie.id, error = %e, "Video lookup failed"),
        }
    }

    let storage = JsonFileStorage::new(&config.store_dir)?;
    let mut store = SuggestionStore::new(Box::new(storage));

    // Save the top result, space permitting.
    if let Some(movie) = movies.first() {
        if !store.at_capacity() || store.contains(&movie.id.to_string()) {
            store.add(Suggestion::from_catalog(movie, &config.image_base_url));
        }
    }

    println!();
    println!("Shortlist ({}/{}):", store.len(), SUGGESTION_CAP);
    for suggestion in store.featured(SUGGESTION_CAP) {
        println!("  [{}] {}", suggestion.id, suggestion.title);
    }
    for _ in 0..store.empty_slots(SUGGESTION_CAP) {
        println!("  [empty slot]");
    }

    Ok(())
}
