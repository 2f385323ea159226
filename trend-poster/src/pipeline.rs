//! One pass of the bot: pick a trending headline, compose, optionally
//! attach an image, publish.

use crate::composer::{Composition, PostComposer, SkipReason};
use crate::traits::{FeedSource, ImageFetch, ImageSearch, MediaUpload, Publisher};
use crate::types::{ComposedPost, MediaId, PostReceipt, Result};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub const DEFAULT_FEED_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Posted {
        post: ComposedPost,
        receipt: PostReceipt,
        media: Option<MediaId>,
    },
    /// The feed produced nothing to work with.
    NoTopics,
    Skipped(SkipReason),
}

/// Collaborators for the optional image sub-flow.
pub struct ImageAttachment {
    pub search: Arc<dyn ImageSearch>,
    pub fetch: Arc<dyn ImageFetch>,
    pub upload: Arc<dyn MediaUpload>,
}

fn unix_now() -> i64 {
    Utc::now().timestamp()
}

/// Explicit run context: collaborators, dedup state, randomness and clock.
/// Keeping one driver alive across several `run_once` calls keeps its
/// seen-title history.
pub struct PipelineDriver<R = StdRng> {
    feed: Arc<dyn FeedSource>,
    images: Option<ImageAttachment>,
    publisher: Arc<dyn Publisher>,
    composer: PostComposer,
    rng: R,
    clock: fn() -> i64,
    feed_limit: usize,
}

impl<R: Rng> PipelineDriver<R> {
    pub fn new(
        feed: Arc<dyn FeedSource>,
        publisher: Arc<dyn Publisher>,
        composer: PostComposer,
        rng: R,
    ) -> Self {
        Self {
            feed,
            images: None,
            publisher,
            composer,
            rng,
            clock: unix_now,
            feed_limit: DEFAULT_FEED_LIMIT,
        }
    }

    pub fn with_images(mut self, images: ImageAttachment) -> Self {
        self.images = Some(images);
        self
    }

    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_feed_limit(mut self, feed_limit: usize) -> Self {
        self.feed_limit = feed_limit;
        self
    }

    pub fn composer(&self) -> &PostComposer {
        &self.composer
    }

    /// Run the pipeline once. Only a publish failure is an `Err`; an
    /// empty feed or a skipped candidate end the run cleanly.
    pub async fn run_once(&mut self) -> Result<RunOutcome> {
        let candidates = match self.feed.fetch_candidates(self.feed_limit).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("Feed {} failed: {}", self.feed.source_name(), e);
                Vec::new()
            }
        };

        let Some(candidate) = candidates.choose(&mut self.rng) else {
            warn!("No topics returned");
            return Ok(RunOutcome::NoTopics);
        };
        debug!("Picked candidate {:?} out of {}", candidate.title, candidates.len());

        let timestamp = (self.clock)();
        let post = match self.composer.compose(candidate, &mut self.rng, timestamp) {
            Composition::Post(post) => post,
            Composition::Skip(reason) => {
                info!("Skipping empty or duplicate post ({:?})", reason);
                return Ok(RunOutcome::Skipped(reason));
            }
        };

        let media = self.attach_image(&post.title).await;

        match self.publisher.publish(&post, media.as_ref()).await {
            Ok(receipt) => {
                info!("Post {} published successfully", receipt.id);
                info!("Post text: {}", post.text);
                Ok(RunOutcome::Posted {
                    post,
                    receipt,
                    media,
                })
            }
            Err(e) => {
                error!("Publishing failed: {}", e);
                Err(e)
            }
        }
    }

    /// Search, download and upload an image for `query`. Any step failing
    /// degrades to a text-only post.
    async fn attach_image(&self, query: &str) -> Option<MediaId> {
        let images = self.images.as_ref()?;

        let url = match images.search.search(query).await {
            Ok(Some(url)) => url,
            Ok(None) => {
                debug!("No image found for {:?}", query);
                return None;
            }
            Err(e) => {
                warn!("Image search failed: {}", e);
                return None;
            }
        };

        let bytes = match images.fetch.fetch_image(&url).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                warn!("Image download from {} returned nothing", url);
                return None;
            }
            Err(e) => {
                warn!("Image download from {} failed: {}", url, e);
                return None;
            }
        };

        match images.upload.upload(bytes).await {
            Ok(media) => Some(media),
            Err(e) => {
                warn!("Image upload failed: {}", e);
                None
            }
        }
    }
}
