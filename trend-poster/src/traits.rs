use crate::types::{Candidate, ComposedPost, MediaId, PostReceipt, Result};
use async_trait::async_trait;

/// A news feed that yields headline candidates.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Human-readable name for logs.
    fn source_name(&self) -> String;

    /// Fetch up to `limit` candidates, in feed order.
    async fn fetch_candidates(&self, limit: usize) -> Result<Vec<Candidate>>;
}

/// Best-effort lookup of an image URL for a free-text query.
#[async_trait]
pub trait ImageSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Option<String>>;
}

#[async_trait]
pub trait ImageFetch: Send + Sync {
    async fn fetch_image(&self, url: &str) -> Result<Option<Vec<u8>>>;
}

#[async_trait]
pub trait MediaUpload: Send + Sync {
    async fn upload(&self, image: Vec<u8>) -> Result<MediaId>;
}

#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, post: &ComposedPost, media: Option<&MediaId>) -> Result<PostReceipt>;
}
