use serde::{Deserialize, Serialize};

/// Poster URL used when the catalog record has no poster of its own
pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/500x750.png?text=No+Poster";

/// Overview text used when the catalog record has none
pub const PLACEHOLDER_OVERVIEW: &str = "No overview available.";

/// Tag applied when no genre classification is available
pub const DEFAULT_TAG: &str = "Suggested";

/// A user-saved catalog entry, as held by the suggestion store and as
/// persisted to local storage.
///
/// Serialized field names stay camelCase so the persisted document is
/// compatible with the `{"movies": [...]}` layout earlier builds wrote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Stable catalog identifier, immutable once stored
    pub id: String,
    pub title: String,
    pub overview: String,
    pub poster: String,
    /// Release year; 0 is the explicit "unknown" sentinel
    #[serde(default)]
    pub release_year: u16,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Suggestion {
    /// Builds a fully-formed suggestion from a raw catalog record.
    ///
    /// This is the single place raw fields are coerced: an empty overview
    /// falls back to the placeholder text, a missing poster to the
    /// placeholder image, an unparseable release date to 0, and an absent
    /// genre classification to the `Suggested` tag.
    pub fn from_catalog(movie: &CatalogMovie, image_base: &str) -> Self {
        let overview = match movie.overview.as_deref() {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => PLACEHOLDER_OVERVIEW.to_string(),
        };

        let poster = movie
            .poster_url(image_base)
            .unwrap_or_else(|| PLACEHOLDER_POSTER.to_string());

        let tags = match movie.genre_ids.as_deref() {
            Some(ids) if !ids.is_empty() => {
                ids.iter().map(|id| format!("Genre {}", id)).collect()
            }
            _ => vec![DEFAULT_TAG.to_string()],
        };

        Self {
            id: movie.id.to_string(),
            title: movie.title.clone(),
            overview,
            poster,
            release_year: movie.release_year(),
            tags,
        }
    }

    /// Re-applies the defaulting rules of [`Suggestion::from_catalog`] to a
    /// rehydrated item, so items written by older builds still satisfy the
    /// full shape.
    pub fn normalize(&mut self) {
        if self.overview.is_empty() {
            self.overview = PLACEHOLDER_OVERVIEW.to_string();
        }
        if self.poster.is_empty() {
            self.poster = PLACEHOLDER_POSTER.to_string();
        }
        if self.tags.is_empty() {
            self.tags = vec![DEFAULT_TAG.to_string()];
        }
    }

    /// A rehydrated item without an id or title cannot be displayed or
    /// deduplicated; such state is treated as an incompatible older shape.
    pub fn is_complete(&self) -> bool {
        !self.id.is_empty() && !self.title.is_empty()
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Raw movie record from the search and popular listing endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogMovie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Option<Vec<u64>>,
}

impl CatalogMovie {
    /// Full poster URL, or `None` when the record carries no poster path.
    /// An empty path counts as absent, like the empty overview does.
    pub fn poster_url(&self, image_base: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| format!("{}{}", image_base, path))
    }

    /// Release year parsed from the leading four characters of the release
    /// date; 0 when the date is absent or unparseable
    pub fn release_year(&self) -> u16 {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(0..4))
            .and_then(|year| year.parse().ok())
            .unwrap_or(0)
    }

    /// Popularity as a display percentage, capped at 100
    pub fn popularity_percent(&self) -> f64 {
        (self.popularity / 1000.0 * 100.0).min(100.0)
    }
}

/// Genre entry from the detail endpoint
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Raw detail record from GET /movie/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Runtime in minutes
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl MovieDetails {
    /// Runtime formatted for display, e.g. "2 hours and 28 minutes"
    pub fn runtime_display(&self) -> Option<String> {
        self.runtime
            .map(|minutes| format!("{} hours and {} minutes", minutes / 60, minutes % 60))
    }
}

/// Video entry from GET /movie/{id}/videos
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Video {
    pub key: String,
    pub name: String,
    #[serde(rename = "type")]
    pub video_type: String,
    pub site: String,
}

impl Video {
    fn is_trailer(&self) -> bool {
        self.name.contains("Trailer")
            || (self.video_type == "Trailer" && self.site.eq_ignore_ascii_case("youtube"))
    }
}

/// Selects the playable trailer from a video list.
///
/// The first video whose name contains "Trailer", or whose type is "Trailer"
/// and site is YouTube, wins; otherwise the first video is the fallback.
/// An empty list yields `None` rather than indexing out of bounds.
pub fn select_trailer(videos: &[Video]) -> Option<&Video> {
    videos
        .iter()
        .find(|video| video.is_trailer())
        .or_else(|| videos.first())
}
