pub mod defs;

pub use defs::{Candidate, ComposedPost, MediaId, PostReceipt};
