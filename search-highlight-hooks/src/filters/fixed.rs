use tracing::debug;

use crate::Filter;

/// Overrides the highlight tag, whatever the configured one is.
#[derive(Debug, Clone)]
pub struct FixedTag(pub String);

impl Filter<String> for FixedTag {
    fn name(&self) -> &'static str {
        "fixed-tag"
    }

    fn apply(&self, tag: String) -> String {
        debug!("override tag {:?} with {:?}", tag, self.0);
        self.0.clone()
    }
}

/// Overrides the excerpt length in words.
#[derive(Debug, Clone, Copy)]
pub struct FixedLength(pub usize);

impl Filter<usize> for FixedLength {
    fn name(&self) -> &'static str {
        "fixed-length"
    }

    fn apply(&self, _length: usize) -> usize {
        self.0
    }
}

/// Replaces the "read more" suffix of trimmed excerpts.
#[derive(Debug, Clone)]
pub struct MoreText(pub String);

impl Filter<String> for MoreText {
    fn name(&self) -> &'static str {
        "more-text"
    }

    fn apply(&self, _text: String) -> String {
        self.0.clone()
    }
}
