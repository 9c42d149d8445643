use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::{debug, instrument};

use crate::config::{HighlightConfig, HighlightTag};
use crate::registry::{Registry, EXCERPT_LENGTH};

/// Suffix of a trimmed excerpt unless an excerpt-more filter supplies one.
pub const EXCERPT_MORE: &str = "[…]";

const ESCAPED_CDATA_END: &str = r"\]\]\>";
const CDATA_END: &str = "]]&gt;";

// Comments, declarations, processing instructions, element tags with
// quoted attribute values, and an unclosed tag running to the end of input.
static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?s)<!--.*?-->",
        r"|<![^>]*>",
        r"|<\?.*?\?>",
        r#"|</?([A-Za-z][A-Za-z0-9-]*)(?:\s(?:"[^"]*"|'[^']*'|[^'">])*)?\s*/?>"#,
        r"|<[A-Za-z/!?][^>]*\z",
    ))
    .expect("valid tag regex")
});

/// Which excerpt a rendered item gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExcerptMode {
    /// The platform's excerpt, untouched.
    Default,
    /// An excerpt keeping the highlight tag.
    Highlighted,
}

impl ExcerptMode {
    pub fn select(config: &HighlightConfig, request_has_search_term: bool, is_admin: bool) -> Self {
        if is_admin || !request_has_search_term || !config.excerpt_enabled {
            ExcerptMode::Default
        } else {
            ExcerptMode::Highlighted
        }
    }
}

/// Re-derives result excerpts from content, keeping the highlight tag the
/// platform's excerpt trimming would strip.
pub struct ExcerptRewriter<'a> {
    registry: &'a Registry,
}

impl<'a> ExcerptRewriter<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// `excerpt` is the excerpt the platform supplied for the item, empty
    /// when the item has none.
    pub fn rewrite(
        &self,
        excerpt: &str,
        raw_content: &str,
        config: &HighlightConfig,
        request_has_search_term: bool,
        is_admin: bool,
    ) -> String {
        match ExcerptMode::select(config, request_has_search_term, is_admin) {
            ExcerptMode::Default => excerpt.to_string(),
            ExcerptMode::Highlighted if !excerpt.is_empty() => excerpt.to_string(),
            ExcerptMode::Highlighted => self.trim(raw_content, config),
        }
    }

    /// Builds an excerpt from raw content, honoring the length and more filters.
    #[instrument(skip_all)]
    pub fn trim(&self, raw_content: &str, config: &HighlightConfig) -> String {
        let text = self.registry.content(raw_content.to_string());
        let text = text.replace(ESCAPED_CDATA_END, CDATA_END);
        let text = strip_tags(&text, self.registry.highlight_tag(config));

        let length = self.registry.excerpt_length(EXCERPT_LENGTH);
        let more = self.registry.excerpt_more(text.clone());
        let more = if more != text {
            more
        } else {
            EXCERPT_MORE.to_string()
        };

        let trimmed = {
            let mut words = text.splitn(length.saturating_add(1), ' ').collect::<Vec<_>>();
            if words.len() > length {
                debug!("trim excerpt to {} words", length);
                words.pop();
                words.push(&more);
                Some(words.join(" "))
            } else {
                None
            }
        };
        trimmed.unwrap_or(text)
    }
}

/// Removes every HTML tag, comment, declaration and processing instruction
/// except `allowed` tags, which are kept with their attributes.
pub fn strip_tags(html: &str, allowed: HighlightTag) -> String {
    TAG.replace_all(html, |caps: &Captures| match caps.get(1) {
        Some(name) if name.as_str().eq_ignore_ascii_case(allowed.as_str()) => caps[0].to_string(),
        _ => String::new(),
    })
    .into_owned()
}
