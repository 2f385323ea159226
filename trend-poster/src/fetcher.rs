use crate::types::{FetchConfig, PosterError, Result};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::debug;

/// Browser-like agent for endpoints that refuse obvious bots.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

/// Thin wrapper over a configured `reqwest::Client`. Every request has a
/// total timeout so a stalled peer cannot hang the run.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Self::build_client(&config, &config.user_agent)?;
        Ok(Self { client, config })
    }

    /// Same settings with a different `User-Agent`.
    pub fn with_user_agent(config: FetchConfig, user_agent: &str) -> Result<Self> {
        let client = Self::build_client(&config, user_agent)?;
        Ok(Self { client, config })
    }

    fn build_client(config: &FetchConfig, user_agent: &str) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| PosterError::General(format!("failed to create HTTP client: {}", e)))
    }

    /// GET `url` and return the body as text. Non-2xx is an error.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        let start = Instant::now();
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PosterError::General(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response.text().await?;
        debug!(
            "Fetched {} ({} bytes in {} ms)",
            url,
            body.len(),
            start.elapsed().as_millis()
        );
        Ok(body)
    }

    /// GET `url` with the image timeout. Only a 200 within the size cap
    /// yields bytes; every other status is `None`.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Option<Vec<u8>>> {
        let response = self
            .client
            .get(url)
            .timeout(Duration::from_secs(self.config.image_timeout_seconds))
            .send()
            .await?;

        if response.status() != reqwest::StatusCode::OK {
            debug!("Image request to {} returned {}", url, response.status());
            return Ok(None);
        }

        let limit = self.config.max_image_size_bytes;
        if let Some(length) = response.content_length() {
            if length as usize > limit {
                debug!("Image at {} too large: {} bytes", url, length);
                return Ok(None);
            }
        }

        let bytes = response.bytes().await?;
        if bytes.len() > limit {
            debug!("Image at {} too large: {} bytes", url, bytes.len());
            return Ok(None);
        }
        Ok(Some(bytes.to_vec()))
    }
}
