use tracing::instrument;

use crate::Filter;

/// Wraps blank-line separated blocks of content in `<p>` elements,
/// a minimal stand-in for a platform's content rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct Paragraphs;

impl Filter<String> for Paragraphs {
    fn name(&self) -> &'static str {
        "paragraphs"
    }

    #[instrument(skip(content))]
    fn apply(&self, content: String) -> String {
        content
            .replace("\r\n", "\n")
            .split("\n\n")
            .map(str::trim)
            .filter(|block| !block.is_empty())
            .map(|block| format!("<p>{}</p>", block))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
