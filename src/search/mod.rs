//! The debounced search pipeline.
//!
//! Raw query changes go through a single spawned task that owns at most one
//! pending debounce deadline. Each change cancels-and-reschedules the
//! deadline; when it elapses (or a submit bypasses it), exactly one catalog
//! call fires for the settled query. Settled result lists replace the
//! published list wholesale, never merge into it.
//!
//! In-flight fetches are detached and are not sequenced against each other:
//! when two settles overlap, the later-resolving response wins even if it was
//! fired earlier. That last-write-wins race is kept deliberately as the
//! current behavior and is pinned by the integration tests.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use crate::catalog::CatalogProvider;
use crate::models::CatalogMovie;

/// Quiescence delay after the last query change before a search fires
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

enum Command {
    QueryChange(String),
    Submit,
}

/// Handle to a running search pipeline.
///
/// Dropping the handle closes the command channel: the task discards any
/// pending not-yet-fired debounce deadline and exits. An already-in-flight
/// fetch is fire-and-forget and keeps running to completion.
pub struct SearchPipeline {
    commands: mpsc::UnboundedSender<Command>,
    results: watch::Receiver<Vec<CatalogMovie>>,
    task: JoinHandle<()>,
}

impl SearchPipeline {
    /// Spawns the pipeline task over the given provider
    pub fn spawn(provider: Arc<dyn CatalogProvider>, debounce: Duration) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (result_tx, result_rx) = watch::channel(Vec::new());

        let task = tokio::spawn(async move {
            pipeline_task(provider, debounce, command_rx, result_tx).await;
        });

        Self {
            commands: command_tx,
            results: result_rx,
            task,
        }
    }

    /// Updates the pending query and restarts the debounce window
    pub fn on_query_change(&self, text: impl Into<String>) {
        let _ = self.commands.send(Command::QueryChange(text.into()));
    }

    /// Bypasses the debounce window and fires immediately with the current
    /// query, consuming any pending deadline
    pub fn submit(&self) {
        let _ = self.commands.send(Command::Submit);
    }

    /// Watch handle over the most recent settled result list.
    ///
    /// The list starts empty and is replaced wholesale on every successful
    /// settle; failed fetches leave it untouched.
    pub fn results(&self) -> watch::Receiver<Vec<CatalogMovie>> {
        self.results.clone()
    }

    /// Initiates a graceful shutdown of the pipeline.
    ///
    /// Closes the command channel and waits for the task to exit. Any
    /// pending not-yet-fired debounce deadline dies unfired; an
    /// already-in-flight fetch keeps running to completion.
    pub async fn shutdown(self) {
        drop(self.commands);
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "Search pipeline task ended abnormally");
        }
    }
}

async fn pipeline_task(
    provider: Arc<dyn CatalogProvider>,
    debounce: Duration,
    mut commands: mpsc::UnboundedReceiver<Command>,
    results: watch::Sender<Vec<CatalogMovie>>,
) {
    tracing::debug!(debounce_ms = debounce.as_millis() as u64, "Search pipeline started");

    let mut query = String::new();
    let mut deadline: Option<Instant> = None;

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::QueryChange(text)) => {
                    query = text;
                    deadline = Some(Instant::now() + debounce);
                }
                Some(Command::Submit) => {
                    deadline = None;
                    fire_fetch(provider.clone(), query.clone(), results.clone());
                }
                None => {
                    // Handle dropped: any pending deadline dies unfired.
                    tracing::debug!("Search pipeline stopped");
                    break;
                }
            },
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                deadline = None;
                fire_fetch(provider.clone(), query.clone(), results.clone());
            }
        }
    }
}

/// Issues exactly one catalog call for the settled query on a detached task.
///
/// The empty query maps to the popular listing. On success the result list
/// replaces the published one wholesale; on failure the error is logged and
/// the previous list stands.
fn fire_fetch(
    provider: Arc<dyn CatalogProvider>,
    query: String,
    results: watch::Sender<Vec<CatalogMovie>>,
) {
    tokio::spawn(async move {
        let outcome = if query.is_empty() {
            provider.popular_movies().await
        } else {
            provider.search_movies(&query).await
        };

        match outcome {
            Ok(movies) => {
                tracing::info!(query = %query, results = movies.len(), "Search settled");
                results.send_replace(movies);
            }
            Err(e) => {
                tracing::warn!(
                    query = %query,
                    error = %e,
                    "Search fetch failed, keeping previous results"
                );
            }
        }
    });
}
