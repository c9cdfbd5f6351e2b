use crate::models::NormalizedChapter;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Dedup key: a finite chapter number. Equality and hashing go through the bit
/// pattern, ordering through `total_cmp`, so the key can live in a map and be sorted.
#[derive(Debug, Clone, Copy)]
pub struct ChapterKey(f64);

impl ChapterKey {
    /// Non-finite input collapses to 0, as does `-0`.
    pub fn new(n: f64) -> Self {
        if !n.is_finite() || n == 0.0 {
            ChapterKey(0.0)
        } else {
            ChapterKey(n)
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for ChapterKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for ChapterKey {}

impl Hash for ChapterKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for ChapterKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ChapterKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Keying policy for the assembler.
pub trait KeyResolver {
    fn key_of(&self, chapter: &NormalizedChapter) -> ChapterKey;
}

/// One entry per exact chapter number; unnumbered chapters key as 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactKey;

impl KeyResolver for ExactKey {
    fn key_of(&self, chapter: &NormalizedChapter) -> ChapterKey {
        ChapterKey::new(chapter.chapter_number.unwrap_or(0.0))
    }
}

/// Merges sub-chapters into their whole chapter (10.5 keys as 10).
#[derive(Debug, Clone, Copy, Default)]
pub struct FloorKey;

impl KeyResolver for FloorKey {
    fn key_of(&self, chapter: &NormalizedChapter) -> ChapterKey {
        ChapterKey::new(chapter.chapter_number.unwrap_or(0.0).floor())
    }
}
