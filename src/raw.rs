//! Raw MangaDex response shapes.
//!
//! These mirror the JSON the catalog API returns and are only ever read. Every field
//! except the record id is defaulted, so sparse or partially populated entries still
//! decode and are handled by the normalizer/projector instead of failing the page.

use serde::Deserialize;
use serde_json::{Map, Value};

pub const COVER_ART: &str = "cover_art";
pub const SCANLATION_GROUP: &str = "scanlation_group";

/// Collection envelope shared by `/manga` and `/manga/{id}/feed`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiList<T> {
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub data: Vec<T>,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub total: u32,
}

impl<T> ApiList<T> {
    /// Offset of the page after this one, or `None` once the listing is exhausted.
    pub fn next_offset(&self) -> Option<u32> {
        if self.data.is_empty() {
            return None;
        }
        let next = self.offset.saturating_add(self.data.len() as u32);
        if next >= self.total {
            None
        } else {
            Some(next)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub rel_type: String,
    #[serde(default)]
    pub attributes: Option<Value>,
}

impl Relationship {
    /// String attribute of an expanded relationship, if present and non-blank.
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes
            .as_ref()
            .and_then(|attrs| attrs.get(key))
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }
}

/// First relationship of the given type, in document order.
pub fn find_relationship<'a>(relationships: &'a [Relationship], rel_type: &str) -> Option<&'a Relationship> {
    relationships.iter().find(|r| r.rel_type == rel_type)
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawChapterRecord {
    pub id: String,
    #[serde(default)]
    pub attributes: ChapterAttributes,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterAttributes {
    #[serde(default)]
    pub volume: Option<String>,
    #[serde(default)]
    pub chapter: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub translated_language: Option<String>,
    #[serde(default)]
    pub publish_at: Option<String>,
    #[serde(default)]
    pub pages: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSearchEntry {
    pub id: String,
    #[serde(default)]
    pub attributes: MangaAttributes,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

/// Localized strings keep document order (`serde_json` is built with `preserve_order`),
/// which makes "first available language" deterministic.
pub type LocalizedString = Map<String, Value>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaAttributes {
    #[serde(default)]
    pub title: LocalizedString,
    #[serde(default)]
    pub alt_titles: Vec<LocalizedString>,
    #[serde(default)]
    pub description: LocalizedString,
    #[serde(default)]
    pub content_rating: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub attributes: TagAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagAttributes {
    #[serde(default)]
    pub name: LocalizedString,
}
