pub use interfaces::defs::{Candidate, ComposedPost, MediaId, PostReceipt};

/// Default feed: Google News top stories, India edition.
pub const DEFAULT_FEED_URL: &str = "https://news.google.com/rss?hl=en-IN&gl=IN&ceid=IN:en";

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
    pub image_timeout_seconds: u64,
    pub max_image_size_bytes: usize,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Trend-Poster/1.0".to_string(),
            timeout_seconds: 30,
            connect_timeout_seconds: 10,
            image_timeout_seconds: 10,
            max_image_size_bytes: 5 * 1024 * 1024,
            max_redirects: 5,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PosterError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Media upload failed: {0}")]
    Upload(String),

    #[error("Publish failed with HTTP {status}: {body}")]
    Publish { status: u16, body: String },

    #[error("Request signing failed: {0}")]
    Signing(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, PosterError>;
