use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::info;
use trend_poster::{
    logging, BingImageSearch, BotConfig, ComposerConfig, Credentials, HttpImageFetcher,
    ImageAttachment, NewsFeedSource, PipelineDriver, PostComposer, RunOutcome, TwitterClient,
    DEFAULT_FEED_URL,
};

/// Post one trending headline to X and exit.
#[derive(Debug, Parser)]
#[command(name = "trend-poster", version)]
struct Cli {
    /// Seconds between cycles. Accepted for compatibility; each invocation
    /// runs exactly one cycle.
    #[arg(long, default_value_t = 3600)]
    interval: u64,

    /// RSS feed to pull headlines from.
    #[arg(long, default_value = DEFAULT_FEED_URL)]
    feed_url: String,

    /// Number of feed items to choose from.
    #[arg(long, default_value_t = 10)]
    feed_limit: usize,

    /// Maximum post length in characters.
    #[arg(long, default_value_t = trend_poster::config::DEFAULT_MAX_POST_LEN)]
    max_len: usize,

    /// Post text only, without searching for an image.
    #[arg(long)]
    no_image: bool,

    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    let credentials = Credentials::from_env().context("loading API credentials")?;

    let config = BotConfig {
        feed_url: cli.feed_url,
        feed_limit: cli.feed_limit,
        attach_images: !cli.no_image,
        composer: ComposerConfig::default().with_max_len(cli.max_len),
        ..BotConfig::default()
    };
    config.validate().context("invalid configuration")?;

    info!("Starting trend-poster (single cycle, interval {}s ignored)", cli.interval);

    let feed = Arc::new(NewsFeedSource::new(config.feed_url.clone(), config.fetch.clone())?);
    let twitter = Arc::new(TwitterClient::new(credentials, &config.fetch)?);
    let composer = PostComposer::new(config.composer.clone())?;

    let mut driver = PipelineDriver::new(feed, twitter.clone(), composer, StdRng::from_entropy())
        .with_feed_limit(config.feed_limit);
    if config.attach_images {
        driver = driver.with_images(ImageAttachment {
            search: Arc::new(BingImageSearch::new(config.fetch.clone())?),
            fetch: Arc::new(HttpImageFetcher::new(config.fetch.clone())?),
            upload: twitter,
        });
    }

    match driver.run_once().await? {
        RunOutcome::Posted { receipt, .. } => info!("Done: posted {}", receipt.id),
        RunOutcome::NoTopics => info!("Done: no topics"),
        RunOutcome::Skipped(reason) => info!("Done: skipped ({:?})", reason),
    }
    Ok(())
}
