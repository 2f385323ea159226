//! Turns a feed candidate into a bounded, non-repeating post body.

use crate::config::ComposerConfig;
use crate::dedup::SeenTitles;
use crate::sanitizer::sanitize;
use crate::types::{Candidate, ComposedPost, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

pub const TITLE_MARKER: &str = "👉";
pub const UNIQUENESS_MARKER: &str = "⏳";

/// How many leading title characters a description must repeat to be
/// considered a copy of the headline.
const REDUNDANT_PREFIX_CHARS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Duplicate,
    BlankTitle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Composition {
    Post(ComposedPost),
    Skip(SkipReason),
}

pub struct PostComposer {
    config: ComposerConfig,
    seen: SeenTitles,
}

impl PostComposer {
    pub fn new(config: ComposerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            seen: SeenTitles::new(),
        })
    }

    pub fn seen_titles(&self) -> &SeenTitles {
        &self.seen
    }

    /// Build a post for `candidate`, or report why it was skipped.
    ///
    /// The title is recorded as seen before the text is assembled, so a
    /// later failure downstream still blocks a repost of the same headline.
    pub fn compose<R: Rng + ?Sized>(
        &mut self,
        candidate: &Candidate,
        rng: &mut R,
        timestamp: i64,
    ) -> Composition {
        let title = sanitize(&candidate.title);
        let mut description = sanitize(&candidate.description);

        if is_redundant(&title, &description) {
            description.clear();
        }

        if self.config.skip_blank_titles && title.trim().is_empty() {
            debug!("Skipping candidate with blank title");
            return Composition::Skip(SkipReason::BlankTitle);
        }

        if !self.seen.check_and_record(&title) {
            return Composition::Skip(SkipReason::Duplicate);
        }

        let intro = self
            .config
            .intros
            .choose(rng)
            .map(String::as_str)
            .unwrap_or_default();
        let tags = self
            .config
            .hashtags
            .choose_multiple(rng, self.config.hashtag_count)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");

        let text = format!(
            "{intro}\n\n{TITLE_MARKER} {title}\n\n{description}\n\n{tags}\n\n{UNIQUENESS_MARKER} {timestamp}"
        );

        Composition::Post(ComposedPost {
            text: keep_tail(&text, self.config.max_len),
            title,
        })
    }
}

/// True when `description` opens with the first characters of `title`,
/// ignoring case. An empty title makes every description redundant.
pub fn is_redundant(title: &str, description: &str) -> bool {
    let prefix: String = title
        .to_lowercase()
        .chars()
        .take(REDUNDANT_PREFIX_CHARS)
        .collect();
    description.to_lowercase().starts_with(&prefix)
}

/// Keep the last `max_chars` characters of `text`.
pub fn keep_tail(text: &str, max_chars: usize) -> String {
    let total = text.chars().count();
    if total <= max_chars {
        return text.to_string();
    }
    text.chars().skip(total - max_chars).collect()
}
