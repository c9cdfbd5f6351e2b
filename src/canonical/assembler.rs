use super::key::{ChapterKey, ExactKey, KeyResolver};
use super::normalizer::normalize;
use super::tie_break::{winner, Verdict};
use crate::models::NormalizedChapter;
use crate::raw::RawChapterRecord;
use std::collections::HashMap;

/// Canonical chapter list for one work: one chapter per key, ascending.
///
/// ```
/// use rust_manga_catalog::canonical::assemble;
///
/// assert!(assemble(&[]).is_empty());
/// ```
pub fn assemble(raws: &[RawChapterRecord]) -> Vec<NormalizedChapter> {
    Assembler::new().assemble(raws)
}

/// Configurable assembler: optional target-language filter and keying policy.
pub struct Assembler<K = ExactKey> {
    language: Option<String>,
    resolver: K,
}

impl Assembler<ExactKey> {
    pub fn new() -> Self {
        Self {
            language: None,
            resolver: ExactKey,
        }
    }
}

impl Default for Assembler<ExactKey> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: KeyResolver> Assembler<K> {
    /// Drop records whose translated language is not `lang` before deduplicating.
    pub fn with_language(mut self, lang: impl Into<String>) -> Self {
        self.language = Some(lang.into());
        self
    }

    pub fn with_resolver<R: KeyResolver>(self, resolver: R) -> Assembler<R> {
        Assembler {
            language: self.language,
            resolver,
        }
    }

    pub fn assemble(&self, raws: &[RawChapterRecord]) -> Vec<NormalizedChapter> {
        let mut survivors: HashMap<ChapterKey, NormalizedChapter> = HashMap::new();
        let mut skipped = 0usize;

        for raw in raws {
            let candidate = normalize(raw);
            if !self.accepts(&candidate) {
                skipped += 1;
                continue;
            }
            let key = self.resolver.key_of(&candidate);
            if winner(survivors.get(&key), &candidate) == Verdict::TakeCandidate {
                survivors.insert(key, candidate);
            }
        }

        log::debug!(
            "assembled {} chapters from {} records ({} filtered by language)",
            survivors.len(),
            raws.len(),
            skipped
        );

        let mut ordered: Vec<(ChapterKey, NormalizedChapter)> = survivors.into_iter().collect();
        ordered.sort_by(|a, b| a.0.cmp(&b.0));
        ordered.into_iter().map(|(_, chapter)| chapter).collect()
    }

    fn accepts(&self, chapter: &NormalizedChapter) -> bool {
        match &self.language {
            Some(lang) => chapter.language.as_deref() == Some(lang.as_str()),
            None => true,
        }
    }
}
