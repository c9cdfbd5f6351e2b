use thiserror::Error;

/// Failures of the fetch layer. The canonicalization core never produces or sees these.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("API reported result {result:?} for {url}")]
    Api { result: String, url: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
