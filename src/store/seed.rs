use crate::models::Suggestion;

/// The two-item seed set a fresh (or unrecoverable) store starts from.
///
/// Every call builds fresh copies, so no two resets ever share tag vectors
/// or any other sub-structure.
pub fn seed_suggestions() -> Vec<Suggestion> {
    vec![
        Suggestion {
            id: "sample-1".to_string(),
            title: "The Sample Awakens".to_string(),
            overview: "A lighthearted space adventure that showcases how to read data from \
                       the movie store without touching any external APIs."
                .to_string(),
            poster: "https://via.placeholder.com/500x750.png?text=Sample+1".to_string(),
            release_year: 2024,
            tags: vec![
                "Adventure".to_string(),
                "Sci-Fi".to_string(),
                "Family".to_string(),
            ],
        },
        Suggestion {
            id: "sample-2".to_string(),
            title: "Codex & The Movie Buffs".to_string(),
            overview: "A crew of developers set out to build the ultimate movie dashboard \
                       using simple state and a sprinkle of style."
                .to_string(),
            poster: "https://via.placeholder.com/500x750.png?text=Sample+2".to_string(),
            release_year: 2023,
            tags: vec!["Comedy".to_string(), "Documentary".to_string()],
        },
    ]
}
