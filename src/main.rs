use log::{error, info};
use rust_manga_catalog::config::Config;
use rust_manga_catalog::sources::mangadex::MangaDexCatalog;
use serde::Serialize;

const USAGE: &str = "usage: rust_manga_catalog <search TITLE | browse [OFFSET] | chapters MANGA_ID>";

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::load();
    info!(
        "Catalog {} (covers {}), language {}",
        config.catalog.api_base_url, config.catalog.cover_base_url, config.catalog.target_language
    );
    let http = config.http.create_http_client()?;
    let catalog = MangaDexCatalog::new(http, config.catalog.clone());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        Some("search") if args.len() > 1 => {
            let title = args[1..].join(" ");
            catalog.search(&title).await.map(|r| print_json(&r))
        }
        Some("browse") => {
            let offset = match args.get(1) {
                Some(s) => s.parse::<u32>()?,
                None => 0,
            };
            let limit = catalog.config().page_limit;
            catalog.browse(offset, limit).await.map(|r| print_json(&r))
        }
        Some("chapters") if args.len() == 2 => {
            catalog.canonical_chapters(&args[1]).await.map(|r| print_json(&r))
        }
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    match result {
        Ok(printed) => printed,
        Err(e) => {
            error!("Catalog request failed: {}", e);
            Err(e.into())
        }
    }
}
