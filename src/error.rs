use thiserror::Error;

/// Retrieval of the page failed; nothing is extracted or scored
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid page address {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported scheme {0:?}, expected http or https")]
    UnsupportedScheme(String),

    #[error("timed out after {secs}s fetching {url}")]
    Timeout { url: String, secs: u64 },

    #[error("{url} answered with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// A sub-analyzer could not compute its score; recovered by the combiner
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("invalid token pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("{metric} is not a finite number")]
    NonFinite { metric: &'static str },
}

/// The narrative collaborator failed; the report is returned without text
#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("no API key configured for the chat narrator")]
    MissingApiKey,

    #[error("narrator request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("narrator endpoint answered {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("narrator returned no text")]
    EmptyResponse,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level failure of an analysis
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error(transparent)]
    Narrator(#[from] NarrativeError),
}
