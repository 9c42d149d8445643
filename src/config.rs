use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Key the highlighting settings are stored under.
pub const SETTINGS_KEY: &str = "highlighting";

/// Class carried by every highlight element.
pub const HIGHLIGHT_CLASS: &str = "ep-highlight";

/// The tags allowed to wrap matched search terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightTag {
    #[default]
    Mark,
    Span,
    Strong,
    Em,
    I,
}

impl HighlightTag {
    pub const ALL: [HighlightTag; 5] = [
        HighlightTag::Mark,
        HighlightTag::Span,
        HighlightTag::Strong,
        HighlightTag::Em,
        HighlightTag::I,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HighlightTag::Mark => "mark",
            HighlightTag::Span => "span",
            HighlightTag::Strong => "strong",
            HighlightTag::Em => "em",
            HighlightTag::I => "i",
        }
    }

    /// Validates a tag at the point of use. Anything off the allow-list
    /// becomes `mark`.
    pub fn resolve(tag: &str) -> Self {
        tag.parse().unwrap_or_else(|_| {
            warn!("highlight tag {:?} is not allowed, falling back to mark", tag);
            HighlightTag::Mark
        })
    }

    pub fn open(&self) -> String {
        format!("<{} class=\"{}\">", self.as_str(), HIGHLIGHT_CLASS)
    }

    pub fn close(&self) -> String {
        format!("</{}>", self.as_str())
    }
}

impl FromStr for HighlightTag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HighlightTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| anyhow!("unknown highlight tag: {}", s))
    }
}

impl fmt::Display for HighlightTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings as persisted in the settings store. Every field may be missing,
/// e.g. before the settings were saved for the first time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_excerpt: Option<String>,
}

impl StoredSettings {
    /// Merges a submitted settings form into the current settings.
    ///
    /// A tag off the allow-list keeps the current tag, the color is taken as
    /// submitted, and the excerpt flag is normalized to `"on"` or `"off"`.
    pub fn updated(
        &self,
        tag: Option<&str>,
        color: Option<&str>,
        excerpt: Option<&str>,
    ) -> StoredSettings {
        let highlight_tag = match tag {
            Some(t) if t.parse::<HighlightTag>().is_ok() => Some(t.to_string()),
            _ => self.highlight_tag.clone(),
        };
        let highlight_color = Some(color.map(str::trim).unwrap_or_default().to_string());
        let highlight_excerpt = Some(if excerpt == Some("on") { "on" } else { "off" }.to_string());
        StoredSettings {
            highlight_tag,
            highlight_color,
            highlight_excerpt,
        }
    }
}

/// The highlighting configuration, loaded once per request and read-only
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightConfig {
    /// Raw configured tag; validate with [`HighlightConfig::highlight_tag`].
    pub tag: String,
    pub color: String,
    pub excerpt_enabled: bool,
}

impl HighlightConfig {
    pub fn highlight_tag(&self) -> HighlightTag {
        HighlightTag::resolve(&self.tag)
    }

    /// CSS custom property carrying the configured color, if any.
    pub fn inline_style(&self) -> Option<String> {
        if self.color.is_empty() {
            return None;
        }
        Some(format!(":root{{--highlight-color: {};}}", self.color))
    }
}

impl From<StoredSettings> for HighlightConfig {
    fn from(settings: StoredSettings) -> Self {
        HighlightConfig {
            tag: settings
                .highlight_tag
                .unwrap_or_else(|| HighlightTag::Mark.as_str().to_string()),
            color: settings.highlight_color.unwrap_or_default(),
            excerpt_enabled: settings.highlight_excerpt.as_deref() == Some("on"),
        }
    }
}

impl From<&HighlightConfig> for StoredSettings {
    fn from(config: &HighlightConfig) -> Self {
        StoredSettings {
            highlight_tag: Some(config.tag.clone()),
            highlight_color: Some(config.color.clone()),
            highlight_excerpt: Some(if config.excerpt_enabled { "on" } else { "off" }.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn allowed_tags_resolve_to_themselves() {
        for tag in HighlightTag::ALL {
            assert_eq!(HighlightTag::resolve(tag.as_str()), tag);
        }
    }

    #[test]
    fn tag_markup() {
        assert_eq!(HighlightTag::Span.open(), "<span class=\"ep-highlight\">");
        assert_eq!(HighlightTag::Span.close(), "</span>");
    }

    #[test]
    fn first_run_defaults() {
        let config = HighlightConfig::from(StoredSettings::default());
        assert_eq!(config.tag, "mark");
        assert_eq!(config.color, "");
        assert!(!config.excerpt_enabled);
        assert_eq!(config.inline_style(), None);
    }

    #[test]
    fn excerpt_only_enabled_by_literal_on() {
        for value in ["ON", "yes", "1", "off", ""] {
            let settings = StoredSettings {
                highlight_excerpt: Some(value.to_string()),
                ..Default::default()
            };
            assert!(!HighlightConfig::from(settings).excerpt_enabled, "{}", value);
        }
        let settings = StoredSettings {
            highlight_excerpt: Some("on".to_string()),
            ..Default::default()
        };
        assert!(HighlightConfig::from(settings).excerpt_enabled);
    }

    #[test]
    fn invalid_stored_tag_is_kept_raw_but_never_used() {
        let config = HighlightConfig::from(StoredSettings {
            highlight_tag: Some("script".to_string()),
            ..Default::default()
        });
        assert_eq!(config.tag, "script");
        assert_eq!(config.highlight_tag(), HighlightTag::Mark);
    }

    #[test]
    fn save_policy() {
        let current = StoredSettings {
            highlight_tag: Some("em".to_string()),
            highlight_color: Some("#000".to_string()),
            highlight_excerpt: Some("on".to_string()),
        };

        let updated = current.updated(Some("blink"), None, Some("yes"));
        assert_eq!(updated.highlight_tag.as_deref(), Some("em"));
        assert_eq!(updated.highlight_color.as_deref(), Some(""));
        assert_eq!(updated.highlight_excerpt.as_deref(), Some("off"));

        let updated = current.updated(Some("strong"), Some(" #f00 "), Some("on"));
        assert_eq!(updated.highlight_tag.as_deref(), Some("strong"));
        assert_eq!(updated.highlight_color.as_deref(), Some("#f00"));
        assert_eq!(updated.highlight_excerpt.as_deref(), Some("on"));
    }

    #[test]
    fn inline_style_carries_color() {
        let config = HighlightConfig {
            color: "#f00".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.inline_style().as_deref(),
            Some(":root{--highlight-color: #f00;}")
        );
    }

    #[test]
    fn settings_json_shape() {
        let settings: StoredSettings = serde_json::from_str(
            r##"{"highlight_tag":"span","highlight_color":"#f00","highlight_excerpt":"on"}"##,
        )
        .unwrap();
        let config = HighlightConfig::from(settings.clone());
        assert_eq!(config.highlight_tag(), HighlightTag::Span);
        assert!(config.excerpt_enabled);
        assert_eq!(StoredSettings::from(&config), settings);

        let partial: StoredSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(partial, StoredSettings::default());
    }

    proptest! {
        #[test]
        fn unknown_tags_fall_back_to_mark(tag in "\\PC*") {
            prop_assume!(!["mark", "span", "strong", "em", "i"].contains(&tag.as_str()));
            prop_assert_eq!(HighlightTag::resolve(&tag), HighlightTag::Mark);
        }
    }
}
