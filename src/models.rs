use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which upload a chapter came from. Only consulted by the tie-break policy as a
/// last resort between otherwise indistinguishable records.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceRef {
    pub chapter_id: String,
    pub group_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NormalizedChapter {
    /// `None` when upstream sent nothing usable; such chapters key as 0.
    pub chapter_number: Option<f64>,
    pub title: Option<String>,
    pub published_at: DateTime<Utc>,
    pub source: SourceRef,
    // Display-only fields
    pub volume: Option<String>,
    pub language: Option<String>,
    pub pages: u32,
}

impl NormalizedChapter {
    pub fn has_title(&self) -> bool {
        self.title.is_some()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub alt_titles: Vec<String>,
    pub cover_art_filename: Option<String>,
    pub cover_art_url: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub content_rating: Option<String>,
}
