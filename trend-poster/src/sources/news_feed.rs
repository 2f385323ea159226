use crate::fetcher::Fetcher;
use crate::parser::FeedParser;
use crate::traits::FeedSource;
use crate::types::{Candidate, FetchConfig, Result, DEFAULT_FEED_URL};
use async_trait::async_trait;
use tracing::info;

/// RSS feed of trending headlines, Google News by default.
pub struct NewsFeedSource {
    pub url: String,
    fetcher: Fetcher,
}

impl NewsFeedSource {
    pub fn new(url: String, fetch_config: FetchConfig) -> Result<Self> {
        url::Url::parse(&url)?;
        Ok(Self {
            url,
            fetcher: Fetcher::new(fetch_config)?,
        })
    }

    pub fn google_news(fetch_config: FetchConfig) -> Result<Self> {
        Self::new(DEFAULT_FEED_URL.to_string(), fetch_config)
    }
}

#[async_trait]
impl FeedSource for NewsFeedSource {
    fn source_name(&self) -> String {
        match url::Url::parse(&self.url).ok().and_then(|u| u.domain().map(str::to_string)) {
            Some(domain) => format!("RSS Feed ({})", domain),
            None => "RSS Feed".to_string(),
        }
    }

    async fn fetch_candidates(&self, limit: usize) -> Result<Vec<Candidate>> {
        info!("Pulling RSS feed: {}", self.url);

        let content = self.fetcher.fetch_text(&self.url).await?;
        let mut candidates = FeedParser::parse_candidates(content.as_bytes())?;
        candidates.truncate(limit);

        info!("Pulled {} candidates from {}", candidates.len(), self.url);
        Ok(candidates)
    }
}
