//! Image lookup for posts: a scraped Bing image search plus a bounded
//! downloader. Both are best-effort.

use crate::fetcher::{Fetcher, BROWSER_USER_AGENT};
use crate::traits::{ImageFetch, ImageSearch};
use crate::types::{FetchConfig, Result};
use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;
use url::Url;

const BING_IMAGE_SEARCH_URL: &str = "https://www.bing.com/images/search";

fn media_url_pattern() -> &'static Regex {
    static MURL: OnceLock<Regex> = OnceLock::new();
    MURL.get_or_init(|| {
        Regex::new(r"murl&quot;:&quot;(.*?)&quot;").expect("media URL pattern is valid")
    })
}

/// First full-size image URL embedded in a Bing results page.
pub fn extract_first_image_url(html: &str) -> Option<String> {
    media_url_pattern()
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|s| !s.is_empty())
}

pub struct BingImageSearch {
    fetcher: Fetcher,
}

impl BingImageSearch {
    pub fn new(fetch_config: FetchConfig) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::with_user_agent(fetch_config, BROWSER_USER_AGENT)?,
        })
    }

    pub fn search_url(query: &str) -> Result<Url> {
        let url = Url::parse_with_params(
            BING_IMAGE_SEARCH_URL,
            &[("q", query), ("form", "HDRSC2")],
        )?;
        Ok(url)
    }
}

#[async_trait]
impl ImageSearch for BingImageSearch {
    async fn search(&self, query: &str) -> Result<Option<String>> {
        let url = Self::search_url(query)?;
        let html = self.fetcher.fetch_text(url.as_str()).await?;
        let found = extract_first_image_url(&html);
        debug!("Image search for {:?} found {:?}", query, found);
        Ok(found)
    }
}

pub struct HttpImageFetcher {
    fetcher: Fetcher,
}

impl HttpImageFetcher {
    pub fn new(fetch_config: FetchConfig) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::with_user_agent(fetch_config, BROWSER_USER_AGENT)?,
        })
    }
}

#[async_trait]
impl ImageFetch for HttpImageFetcher {
    async fn fetch_image(&self, url: &str) -> Result<Option<Vec<u8>>> {
        self.fetcher.fetch_bytes(url).await
    }
}
