use serde::{Deserialize, Serialize};
use std::fmt;

/// A headline pulled from a news feed, before any cleanup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub title: String,
    pub description: String,
}

impl Candidate {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Final post body, already bounded to the platform's length limit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedPost {
    pub text: String,
    /// Sanitized title the post was built from.
    pub title: String,
}

impl ComposedPost {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters, which is what platform limits count.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

impl fmt::Display for ComposedPost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Opaque handle returned by a media upload.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaId(pub String);

impl MediaId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostReceipt {
    pub id: String,
    pub text: String,
}

// Object style note:
// These types cross the boundary between the composing core and the
// network collaborators. They carry data only; anything that talks to
// the outside world lives in the application crate behind a trait.
