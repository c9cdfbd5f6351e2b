use crate::helpers::{non_blank, parse_chapter_number, parse_timestamp};
use crate::models::{NormalizedChapter, SourceRef};
use crate::raw::{find_relationship, RawChapterRecord, SCANLATION_GROUP};

/// Map a raw feed record into its canonical shape. Total: missing or garbage fields
/// get their defaults instead of an error.
pub fn normalize(raw: &RawChapterRecord) -> NormalizedChapter {
    let attrs = &raw.attributes;
    let group_id = find_relationship(&raw.relationships, SCANLATION_GROUP)
        .map(|rel| rel.id.clone())
        .filter(|id| !id.is_empty());

    NormalizedChapter {
        chapter_number: parse_chapter_number(attrs.chapter.as_deref()),
        title: non_blank(attrs.title.as_deref()),
        published_at: parse_timestamp(attrs.publish_at.as_deref()),
        source: SourceRef {
            chapter_id: raw.id.clone(),
            group_id,
        },
        volume: non_blank(attrs.volume.as_deref()),
        language: non_blank(attrs.translated_language.as_deref()),
        pages: attrs.pages,
    }
}
