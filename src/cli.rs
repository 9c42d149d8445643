use search_highlight::{Registry, SettingsStore};
use search_highlight_hooks::filters::{FixedLength, FixedTag, MoreText, Paragraphs};

mod excerpt;
mod resolve;
mod settings;

pub use excerpt::Excerpt;
pub use resolve::Resolve;
pub use settings::Settings;

pub trait Command {
    fn run(&self, store: &mut dyn SettingsStore) -> anyhow::Result<()>;
}

/// Hooks requested on the command line.
#[derive(Debug, Default)]
struct Hooks {
    tag: Option<String>,
    length: Option<usize>,
    more: Option<String>,
    paragraphs: bool,
}

impl Hooks {
    fn registry(&self) -> anyhow::Result<Registry> {
        let mut builder = Registry::builder();
        if let Some(ref tag) = self.tag {
            builder = builder.tag(FixedTag(tag.clone()));
        }
        if let Some(length) = self.length {
            builder = builder.excerpt_length(FixedLength(length));
        }
        if let Some(ref more) = self.more {
            builder = builder.excerpt_more(MoreText(more.clone()));
        }
        if self.paragraphs {
            builder = builder.content(Paragraphs);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use search_highlight::{HighlightConfig, HighlightTag};

    use super::*;

    #[test]
    fn tag_option_overrides_configured_tag() {
        let config = HighlightConfig {
            tag: "span".to_string(),
            ..Default::default()
        };
        let registry = Hooks {
            tag: Some("em".to_string()),
            ..Default::default()
        }
        .registry()
        .unwrap();
        assert_eq!(registry.highlight_tag(&config), HighlightTag::Em);

        let registry = Hooks {
            tag: Some("blink".to_string()),
            ..Default::default()
        }
        .registry()
        .unwrap();
        assert_eq!(registry.highlight_tag(&config), HighlightTag::Mark);

        let registry = Hooks::default().registry().unwrap();
        assert_eq!(registry.highlight_tag(&config), HighlightTag::Span);
    }
}
