pub mod images;
pub mod news_feed;

pub use images::{BingImageSearch, HttpImageFetcher};
pub use news_feed::NewsFeedSource;
