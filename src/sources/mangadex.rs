use crate::canonical::Assembler;
use crate::config::CatalogConfig;
use crate::error::FetchError;
use crate::http_client::HttpClient;
use crate::models::{NormalizedChapter, SearchResult};
use crate::projector::Projector;
use crate::raw::{ApiList, RawChapterRecord, RawSearchEntry};
use serde::de::DeserializeOwned;

type Query = Vec<(String, String)>;

fn param(key: &str, value: impl ToString) -> (String, String) {
    (key.to_string(), value.to_string())
}

/// Where the next feed request starts. `None` on an empty page, once
/// `offset + len` reaches `total`, or when the next offset would hit `max_offset`.
pub fn next_feed_offset<T>(page: &ApiList<T>, max_offset: u32) -> Option<u32> {
    page.next_offset().filter(|next| *next < max_offset)
}

/// MangaDex catalog client. Owns transport, pagination and query construction; hands
/// already-fetched records to the projector and the chapter assembler.
pub struct MangaDexCatalog {
    http: HttpClient,
    config: CatalogConfig,
    projector: Projector,
}

impl MangaDexCatalog {
    pub fn new(http: HttpClient, config: CatalogConfig) -> Self {
        let projector = Projector::from_config(&config);
        Self {
            http,
            config,
            projector,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn manga_url(&self) -> String {
        format!("{}/manga", self.config.api_base_url.trim_end_matches('/'))
    }

    pub fn feed_url(&self, manga_id: &str) -> String {
        format!(
            "{}/manga/{}/feed",
            self.config.api_base_url.trim_end_matches('/'),
            manga_id
        )
    }

    pub fn search_query(&self, title: &str) -> Query {
        vec![
            param("title", title),
            param("includes[]", "cover_art"),
            param("limit", self.config.page_limit),
        ]
    }

    pub fn browse_query(&self, offset: u32, limit: u32) -> Query {
        vec![
            param("limit", limit),
            param("offset", offset),
            param("includes[]", "cover_art"),
            param("order[latestUploadedChapter]", "desc"),
        ]
    }

    pub fn feed_query(&self, offset: u32) -> Query {
        vec![
            param("limit", self.config.page_limit),
            param("offset", offset),
            param("translatedLanguage[]", &self.config.target_language),
            param("includes[]", "scanlation_group"),
            param("order[chapter]", "asc"),
        ]
    }

    async fn get_page<T: DeserializeOwned>(&self, url: &str, query: &[(String, String)]) -> Result<ApiList<T>, FetchError> {
        let page: ApiList<T> = self.http.get_json(url, query).await?;
        if !page.result.is_empty() && page.result != "ok" {
            return Err(FetchError::Api {
                result: page.result,
                url: url.to_string(),
            });
        }
        Ok(page)
    }

    /// Raw search entries matching `title` (first page only).
    pub async fn search_raw(&self, title: &str) -> Result<Vec<RawSearchEntry>, FetchError> {
        let url = self.manga_url();
        let page = self.get_page(&url, &self.search_query(title)).await?;
        log::info!("MangaDex search {:?}: {} of {} results", title, page.data.len(), page.total);
        Ok(page.data)
    }

    pub async fn search(&self, title: &str) -> Result<Vec<SearchResult>, FetchError> {
        Ok(self.projector.project_all(&self.search_raw(title).await?))
    }

    /// One browse page, most recently updated first.
    pub async fn browse(&self, offset: u32, limit: u32) -> Result<Vec<SearchResult>, FetchError> {
        let url = self.manga_url();
        let page: ApiList<RawSearchEntry> = self.get_page(&url, &self.browse_query(offset, limit)).await?;
        Ok(self.projector.project_all(&page.data))
    }

    /// Every feed record of a work in the target language, across all pages.
    pub async fn chapter_feed(&self, manga_id: &str) -> Result<Vec<RawChapterRecord>, FetchError> {
        let url = self.feed_url(manga_id);
        let mut out: Vec<RawChapterRecord> = Vec::new();
        let mut offset = 0u32;

        loop {
            let page: ApiList<RawChapterRecord> = self.get_page(&url, &self.feed_query(offset)).await?;
            let next = next_feed_offset(&page, self.config.max_offset);
            log::debug!("MangaDex feed {} offset {}: {} records", manga_id, offset, page.data.len());
            if next.is_none() && page.next_offset().is_some() {
                log::warn!("MangaDex feed for {} truncated at offset {}", manga_id, self.config.max_offset);
            }
            out.extend(page.data);
            match next {
                Some(n) => offset = n,
                None => break,
            }
            self.http.rate_limit_delay().await;
        }

        Ok(out)
    }

    /// Fetch the whole feed, then collapse it to one chapter per number.
    pub async fn canonical_chapters(&self, manga_id: &str) -> Result<Vec<NormalizedChapter>, FetchError> {
        let feed = self.chapter_feed(manga_id).await?;
        let chapters = Assembler::new()
            .with_language(self.config.target_language.clone())
            .assemble(&feed);
        log::info!(
            "MangaDex {}: {} feed records -> {} chapters",
            manga_id,
            feed.len(),
            chapters.len()
        );
        Ok(chapters)
    }
}
