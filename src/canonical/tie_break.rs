//! Survivor selection between two chapters that share a key.

use crate::models::NormalizedChapter;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    KeepExisting,
    TakeCandidate,
}

/// Decide whether `candidate` replaces `existing`.
///
/// 1. No existing record: the candidate wins.
/// 2. A titled record beats an untitled one.
/// 3. Otherwise the strictly later `published_at` wins.
/// 4. On a full tie the smaller `(chapter_id, group_id)` wins, so the outcome does not
///    depend on feed order.
/// 5. The same upload served twice with different content (an edited title, a page
///    count fix) is settled by comparing that content; only identical records keep the
///    existing one.
pub fn winner(existing: Option<&NormalizedChapter>, candidate: &NormalizedChapter) -> Verdict {
    let Some(existing) = existing else {
        return Verdict::TakeCandidate;
    };
    match rank(candidate, existing) {
        Ordering::Greater => Verdict::TakeCandidate,
        Ordering::Less | Ordering::Equal => Verdict::KeepExisting,
    }
}

/// Total order over same-keyed chapters; `Greater` means `a` is preferred.
pub fn rank(a: &NormalizedChapter, b: &NormalizedChapter) -> Ordering {
    a.has_title()
        .cmp(&b.has_title())
        .then_with(|| a.published_at.cmp(&b.published_at))
        // smaller identity and content are preferred, hence reversed
        .then_with(|| b.source.cmp(&a.source))
        .then_with(|| content(b).cmp(&content(a)))
        .then_with(|| total_cmp_opt(b.chapter_number, a.chapter_number))
}

fn content(c: &NormalizedChapter) -> (&Option<String>, &Option<String>, u32, &Option<String>) {
    (&c.title, &c.volume, c.pages, &c.language)
}

fn total_cmp_opt(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (x, y) => x.is_some().cmp(&y.is_some()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceRef;
    use chrono::{DateTime, TimeZone, Utc};

    fn chapter(id: &str, title: Option<&str>, published_at: DateTime<Utc>) -> NormalizedChapter {
        NormalizedChapter {
            chapter_number: Some(1.0),
            title: title.map(str::to_string),
            published_at,
            source: SourceRef { chapter_id: id.into(), group_id: None },
            volume: None,
            language: None,
            pages: 0,
        }
    }

    fn day(y: i32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn first_record_always_wins() {
        let c = chapter("a", None, DateTime::<Utc>::MIN_UTC);
        assert_eq!(winner(None, &c), Verdict::TakeCandidate);
    }

    #[test]
    fn titled_beats_newer_untitled() {
        let untitled = chapter("a", None, day(2022));
        let titled = chapter("b", Some("Intro"), day(2020));
        assert_eq!(winner(Some(&untitled), &titled), Verdict::TakeCandidate);
        assert_eq!(winner(Some(&titled), &untitled), Verdict::KeepExisting);
    }

    #[test]
    fn later_publish_wins_between_titled() {
        let older = chapter("a", Some("X"), day(2020));
        let newer = chapter("b", Some("Y"), day(2021));
        assert_eq!(winner(Some(&older), &newer), Verdict::TakeCandidate);
        assert_eq!(winner(Some(&newer), &older), Verdict::KeepExisting);
    }

    #[test]
    fn later_publish_wins_between_untitled() {
        let older = chapter("a", None, day(2020));
        let newer = chapter("b", None, day(2021));
        assert_eq!(winner(Some(&older), &newer), Verdict::TakeCandidate);
    }

    #[test]
    fn identical_record_keeps_existing() {
        let a = chapter("a", Some("X"), day(2020));
        assert_eq!(winner(Some(&a), &a.clone()), Verdict::KeepExisting);
    }

    #[test]
    fn reserved_upload_is_settled_by_content() {
        let mut old = chapter("dup", Some("Old name"), day(2021));
        old.pages = 20;
        let mut fixed = chapter("dup", Some("Fixed name"), day(2021));
        fixed.pages = 22;
        // "Fixed name" sorts first, so it survives in either order
        assert_eq!(winner(Some(&old), &fixed), Verdict::TakeCandidate);
        assert_eq!(winner(Some(&fixed), &old), Verdict::KeepExisting);
        assert_eq!(rank(&old, &fixed), Ordering::Less);
    }

    #[test]
    fn chapter_number_breaks_the_last_tie() {
        let mut zero = chapter("dup", None, day(2021));
        zero.chapter_number = Some(0.0);
        let mut unnumbered = zero.clone();
        unnumbered.chapter_number = None;
        assert_eq!(rank(&zero, &unnumbered), Ordering::Less);
        assert_eq!(rank(&zero, &zero.clone()), Ordering::Equal);
    }

    #[test]
    fn full_tie_is_settled_by_identity() {
        let a = chapter("a", Some("X"), day(2020));
        let b = chapter("b", Some("Y"), day(2020));
        assert_eq!(winner(Some(&a), &b), Verdict::KeepExisting);
        assert_eq!(winner(Some(&b), &a), Verdict::TakeCandidate);
    }
}
