use crate::types::{Candidate, PosterError, Result};
use feed_rs::parser;
use tracing::{debug, info};

pub struct FeedParser;

impl FeedParser {
    /// Parse an RSS or Atom document into candidates, in document order.
    ///
    /// Entries missing a title or a description (RSS `<description>`,
    /// Atom `<summary>`) are dropped. feed-rs trims element text, so a
    /// whitespace-only title counts as missing here and never reaches the
    /// composer's blank-title handling.
    pub fn parse_candidates(content: &[u8]) -> Result<Vec<Candidate>> {
        debug!("Parsing feed content ({} bytes)", content.len());

        let feed = parser::parse(content)
            .map_err(|e| PosterError::Parse(format!("Failed to parse feed: {}", e)))?;

        let total = feed.entries.len();
        let candidates: Vec<Candidate> = feed
            .entries
            .into_iter()
            .filter_map(|entry| {
                let title = entry.title.map(|t| t.content).filter(|t| !t.is_empty())?;
                let description = entry
                    .summary
                    .map(|s| s.content)
                    .filter(|d| !d.is_empty())?;
                Some(Candidate { title, description })
            })
            .collect();

        info!(
            "Parsed feed with {} usable entries out of {}",
            candidates.len(),
            total
        );
        Ok(candidates)
    }
}
