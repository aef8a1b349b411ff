use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base URL poster and backdrop paths resolve against
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Directory the suggestion shortlist persists under
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Quiescence delay after the last query change before a search fires
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/original".to_string()
}

fn default_store_dir() -> String {
    ".".to_string()
}

fn default_debounce_ms() -> u64 {
    crate::search::DEFAULT_DEBOUNCE.as_millis() as u64
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
