/// Search/browse projection tests
/// Entries follow the shape of `/manga?includes[]=cover_art` responses
use rust_manga_catalog::models::SearchResult;
use rust_manga_catalog::projector::Projector;
use rust_manga_catalog::raw::{ApiList, RawSearchEntry};
use serde_json::{json, Value};

const COVERS: &str = "https://uploads.example.org/covers";

fn project(entry: Value) -> SearchResult {
    let raw: RawSearchEntry = serde_json::from_value(entry).expect("fixture should decode");
    Projector::new(COVERS, "en").project(&raw)
}

#[test]
fn full_entry_projects_all_fields() {
    let result = project(json!({
        "id": "m-1",
        "type": "manga",
        "attributes": {
            "title": { "en": "Frieren" },
            "altTitles": [{ "ja": "葬送のフリーレン" }, { "en": "Frieren: Beyond Journey's End" }],
            "description": { "en": "An elf mage.", "ja": "..." },
            "contentRating": "safe",
            "tags": [
                { "id": "t1", "attributes": { "name": { "en": "Fantasy" } } },
                { "id": "t2", "attributes": { "name": { "en": "Adventure" } } }
            ]
        },
        "relationships": [
            { "id": "a-1", "type": "author" },
            { "id": "cv-1", "type": "cover_art", "attributes": { "fileName": "cover.jpg" } }
        ]
    }));
    assert_eq!(result.id, "m-1");
    assert_eq!(result.title, "Frieren");
    assert_eq!(
        result.alt_titles,
        vec!["葬送のフリーレン".to_string(), "Frieren: Beyond Journey's End".to_string()]
    );
    assert_eq!(result.cover_art_filename.as_deref(), Some("cover.jpg"));
    assert_eq!(
        result.cover_art_url.as_deref(),
        Some("https://uploads.example.org/covers/m-1/cover.jpg")
    );
    assert_eq!(result.description.as_deref(), Some("An elf mage."));
    assert_eq!(result.tags, vec!["Fantasy".to_string(), "Adventure".to_string()]);
    assert_eq!(result.content_rating.as_deref(), Some("safe"));
}

#[test]
fn no_cover_relationship_means_no_url() {
    let result = project(json!({
        "id": "m-2",
        "attributes": { "title": { "en": "No Cover" } },
        "relationships": [{ "id": "a-1", "type": "author" }]
    }));
    assert_eq!(result.cover_art_filename, None);
    assert_eq!(result.cover_art_url, None);
}

#[test]
fn unexpanded_cover_means_no_url() {
    // cover_art present but not included, so it has no attributes
    let result = project(json!({
        "id": "m-3",
        "attributes": { "title": { "en": "Bare" } },
        "relationships": [{ "id": "cv-1", "type": "cover_art" }]
    }));
    assert_eq!(result.cover_art_url, None);
}

#[test]
fn cover_without_filename_means_no_url() {
    for attrs in [json!({}), json!({ "fileName": null }), json!({ "fileName": "" }), json!({ "fileName": 7 })] {
        let result = project(json!({
            "id": "m-4",
            "relationships": [{ "id": "cv-1", "type": "cover_art", "attributes": attrs }]
        }));
        assert_eq!(result.cover_art_url, None);
    }
}

#[test]
fn first_cover_relationship_wins() {
    let result = project(json!({
        "id": "m-5",
        "relationships": [
            { "id": "cv-1", "type": "cover_art", "attributes": { "description": "no file" } },
            { "id": "cv-2", "type": "cover_art", "attributes": { "fileName": "second.png" } }
        ]
    }));
    // the first match has no file name, and later matches are not consulted
    assert_eq!(result.cover_art_url, None);
}

#[test]
fn title_falls_back_to_first_available_language() {
    let result = project(json!({
        "id": "m-6",
        "attributes": { "title": { "ja-ro": "Sousou no Frieren", "ja": "葬送のフリーレン" } }
    }));
    assert_eq!(result.title, "Sousou no Frieren");
    assert_eq!(result.alt_titles, vec!["葬送のフリーレン".to_string()]);
}

#[test]
fn entry_without_attributes_still_projects() {
    let result = project(json!({ "id": "m-7" }));
    assert_eq!(result.title, "");
    assert!(result.alt_titles.is_empty());
    assert!(result.tags.is_empty());
    assert_eq!(result.description, None);
}

#[test]
fn browse_page_projects_in_order() {
    let page: ApiList<RawSearchEntry> = serde_json::from_value(json!({
        "result": "ok",
        "response": "collection",
        "data": [
            { "id": "b-1", "attributes": { "title": { "en": "One" } } },
            { "id": "b-2", "attributes": { "title": { "en": "Two" } } }
        ],
        "limit": 10,
        "offset": 0,
        "total": 2
    }))
    .unwrap();
    let results = Projector::new(COVERS, "en").project_all(&page.data);
    let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["One", "Two"]);
    assert_eq!(page.next_offset(), None);
}
