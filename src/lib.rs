// Library interface for rust_manga_catalog
// The canonicalization core and projector are pure; `sources` and `http_client` do the fetching.

pub mod canonical;
pub mod config;
pub mod error;
pub mod helpers;
pub mod http_client;
pub mod models;
pub mod projector;
pub mod raw;
pub mod sources;
