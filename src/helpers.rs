//! Parsing and title helpers shared by the normalizer and the projector.
//!
//! - Chapter number and timestamp parsing with their default-on-garbage policy
//! - Localized string selection and alt-title collection
//!
//! # Examples
//!
//! ```
//! use rust_manga_catalog::helpers::parse_chapter_number;
//!
//! assert_eq!(parse_chapter_number(Some("10.5")), Some(10.5));
//! assert_eq!(parse_chapter_number(Some("extra")), None);
//! assert_eq!(parse_chapter_number(None), None);
//! ```

use crate::raw::LocalizedString;
use chrono::{DateTime, Utc};

/// Parse a chapter number string. Only finite numbers count; `-0` becomes `0`.
pub fn parse_chapter_number(raw: Option<&str>) -> Option<f64> {
    let n = raw?.trim().parse::<f64>().ok()?;
    if !n.is_finite() {
        return None;
    }
    Some(if n == 0.0 { 0.0 } else { n })
}

/// Parse an RFC 3339 publish timestamp; anything else is the earliest representable
/// instant so it never wins a recency comparison.
pub fn parse_timestamp(raw: Option<&str>) -> DateTime<Utc> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Trimmed, non-blank text or `None`.
pub fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn localized_value<'a>(map: &'a LocalizedString, lang: &str) -> Option<&'a str> {
    map.get(lang)
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
}

/// Entry for `lang`, otherwise the first non-blank entry in document order.
pub fn pick_localized(map: &LocalizedString, lang: &str) -> Option<String> {
    localized_value(map, lang)
        .or_else(|| {
            map.values()
                .filter_map(|v| v.as_str())
                .find(|s| !s.trim().is_empty())
        })
        .map(|s| s.trim().to_string())
}

/// Work title: target language, then any main title, then alt titles (target language
/// first). Empty when the upstream record carries no title at all.
pub fn pick_title(title: &LocalizedString, alt_titles: &[LocalizedString], lang: &str) -> String {
    if let Some(t) = pick_localized(title, lang) {
        return t;
    }
    alt_titles
        .iter()
        .find_map(|m| localized_value(m, lang))
        .map(|s| s.trim().to_string())
        .or_else(|| alt_titles.iter().find_map(|m| pick_localized(m, lang)))
        .unwrap_or_default()
}

/// Every distinct non-blank title and alt title except `primary`, in document order.
pub fn collect_alt_titles(
    title: &LocalizedString,
    alt_titles: &[LocalizedString],
    primary: &str,
) -> Vec<String> {
    let mut all_titles: Vec<String> = Vec::new();
    let maps = std::iter::once(title).chain(alt_titles.iter());
    for map in maps {
        for title_text in map.values().filter_map(|v| v.as_str()) {
            let title_text = title_text.trim();
            if !title_text.is_empty()
                && title_text != primary
                && !all_titles.iter().any(|t| t == title_text)
            {
                all_titles.push(title_text.to_string());
            }
        }
    }
    all_titles
}
