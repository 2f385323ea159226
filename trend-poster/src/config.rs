//! Runtime configuration: API credentials, composer tunables and the
//! per-run settings gathered from the command line.

use crate::types::{FetchConfig, PosterError, Result, DEFAULT_FEED_URL};
use std::env;
use std::fmt;

pub const ENV_API_KEY: &str = "API_KEY";
pub const ENV_API_SECRET: &str = "API_SECRET";
pub const ENV_ACCESS_TOKEN: &str = "ACCESS_TOKEN";
pub const ENV_ACCESS_SECRET: &str = "ACCESS_SECRET";

/// Platform limit observed for posts on X.
pub const DEFAULT_MAX_POST_LEN: usize = 275;

/// OAuth 1.0a user-context credentials for the posting account.
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub access_secret: String,
}

impl Credentials {
    /// Load credentials from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load credentials through an arbitrary lookup. A variable that is
    /// missing or blank is a configuration error naming that variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| -> Result<String> {
            match lookup(name) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => Err(PosterError::Config(format!(
                    "missing environment variable {}",
                    name
                ))),
            }
        };

        Ok(Self {
            api_key: require(ENV_API_KEY)?,
            api_secret: require(ENV_API_SECRET)?,
            access_token: require(ENV_ACCESS_TOKEN)?,
            access_secret: require(ENV_ACCESS_SECRET)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"***")
            .field("api_secret", &"***")
            .field("access_token", &"***")
            .field("access_secret", &"***")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ComposerConfig {
    pub intros: Vec<String>,
    pub hashtags: Vec<String>,
    pub hashtag_count: usize,
    pub max_len: usize,
    /// Treat a title that is empty after sanitizing as a skip.
    pub skip_blank_titles: bool,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        let intros = [
            "🔥 Breaking Khabar!",
            "📰 Aaj Ki Taaza Update!",
            "📢 Trending News Alert!",
            "⚡ Fact Check This!",
            "🚨 Big Update!",
        ];
        let hashtags = [
            "#Trending",
            "#IndiaNews",
            "#Breaking",
            "#LatestUpdate",
            "#TopStory",
            "#InShorts",
        ];

        Self {
            intros: intros.iter().map(|s| s.to_string()).collect(),
            hashtags: hashtags.iter().map(|s| s.to_string()).collect(),
            hashtag_count: 3,
            max_len: DEFAULT_MAX_POST_LEN,
            skip_blank_titles: false,
        }
    }
}

impl ComposerConfig {
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Check the preconditions the composer relies on.
    pub fn validate(&self) -> Result<()> {
        if self.intros.is_empty() {
            return Err(PosterError::Config("intro list is empty".to_string()));
        }
        if self.hashtag_count == 0 {
            return Err(PosterError::Config("hashtag_count must be at least 1".to_string()));
        }
        if self.hashtags.len() < self.hashtag_count {
            return Err(PosterError::Config(format!(
                "need at least {} hashtags, got {}",
                self.hashtag_count,
                self.hashtags.len()
            )));
        }
        let mut distinct = self.hashtags.clone();
        distinct.sort();
        distinct.dedup();
        if distinct.len() != self.hashtags.len() {
            return Err(PosterError::Config("hashtag list contains duplicates".to_string()));
        }
        if self.max_len == 0 {
            return Err(PosterError::Config("max_len must be greater than zero".to_string()));
        }
        Ok(())
    }
}

/// Everything one invocation needs, assembled at startup.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub feed_url: String,
    pub feed_limit: usize,
    pub attach_images: bool,
    pub fetch: FetchConfig,
    pub composer: ComposerConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            feed_limit: 10,
            attach_images: true,
            fetch: FetchConfig::default(),
            composer: ComposerConfig::default(),
        }
    }
}

impl BotConfig {
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.feed_url)?;
        match parsed.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(PosterError::Config(format!(
                    "unsupported feed URL scheme: {}",
                    scheme
                )));
            }
        }
        if self.feed_limit == 0 {
            return Err(PosterError::Config("feed_limit must be greater than zero".to_string()));
        }
        self.composer.validate()
    }
}
