pub mod composer;
pub mod config;
pub mod dedup;
pub mod fetcher;
pub mod logging;
pub mod parser;
pub mod pipeline;
pub mod sanitizer;
pub mod sources;
pub mod traits;
pub mod twitter;
pub mod types;

pub use composer::{Composition, PostComposer, SkipReason};
pub use config::{BotConfig, ComposerConfig, Credentials};
pub use dedup::SeenTitles;
pub use fetcher::Fetcher;
pub use parser::FeedParser;
pub use pipeline::{ImageAttachment, PipelineDriver, RunOutcome};
pub use sanitizer::sanitize;
pub use sources::{BingImageSearch, HttpImageFetcher, NewsFeedSource};
pub use traits::{FeedSource, ImageFetch, ImageSearch, MediaUpload, Publisher};
pub use twitter::{OAuthSigner, TwitterClient};
pub use types::*;
