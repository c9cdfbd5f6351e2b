use crate::config::CatalogConfig;
use crate::helpers::{collect_alt_titles, pick_localized, pick_title};
use crate::models::SearchResult;
use crate::raw::{find_relationship, RawSearchEntry, COVER_ART};

/// Flattens search/browse entries into [`SearchResult`]s.
///
/// The cover host and target language are injected; nothing here reaches for a
/// hard-coded endpoint.
#[derive(Debug, Clone)]
pub struct Projector {
    cover_base_url: String,
    language: String,
}

impl Projector {
    pub fn new(cover_base_url: impl Into<String>, language: impl Into<String>) -> Self {
        let cover_base_url: String = cover_base_url.into();
        Self {
            cover_base_url: cover_base_url.trim_end_matches('/').to_string(),
            language: language.into(),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(config.cover_base_url.clone(), config.target_language.clone())
    }

    pub fn project(&self, raw: &RawSearchEntry) -> SearchResult {
        let attrs = &raw.attributes;
        let title = pick_title(&attrs.title, &attrs.alt_titles, &self.language);
        let alt_titles = collect_alt_titles(&attrs.title, &attrs.alt_titles, &title);

        // First cover_art relationship only; a URL needs a real file name.
        let cover_art_filename = find_relationship(&raw.relationships, COVER_ART)
            .and_then(|cover| cover.attribute_str("fileName"))
            .map(str::to_string);
        let cover_art_url = cover_art_filename
            .as_deref()
            .map(|file| format!("{}/{}/{}", self.cover_base_url, raw.id, file));

        let tags = attrs
            .tags
            .iter()
            .filter_map(|tag| pick_localized(&tag.attributes.name, &self.language))
            .collect();

        SearchResult {
            id: raw.id.clone(),
            title,
            alt_titles,
            cover_art_filename,
            cover_art_url,
            description: pick_localized(&attrs.description, &self.language),
            tags,
            content_rating: attrs.content_rating.clone(),
        }
    }

    pub fn project_all(&self, raws: &[RawSearchEntry]) -> Vec<SearchResult> {
        raws.iter().map(|raw| self.project(raw)).collect()
    }
}
