use std::collections::HashSet;
use tracing::debug;

/// Titles already posted during this process lifetime.
///
/// Memory only: a restart forgets everything, so cross-run dedup is left
/// to whatever schedules the process.
#[derive(Debug, Default)]
pub struct SeenTitles {
    titles: HashSet<String>,
}

impl SeenTitles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen(&self, title: &str) -> bool {
        self.titles.contains(title)
    }

    pub fn record(&mut self, title: &str) {
        if self.titles.insert(title.to_string()) {
            debug!("Recorded title: {}", title);
        }
    }

    /// Record `title` unless it is already present. Returns `true` when the
    /// title was new. Check and insert happen under the same `&mut` borrow,
    /// so callers sharing this across tasks must wrap it in one lock.
    pub fn check_and_record(&mut self, title: &str) -> bool {
        if self.seen(title) {
            debug!("Duplicate title: {}", title);
            return false;
        }
        self.record(title);
        true
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}
