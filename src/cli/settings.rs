use clap::{Args, Subcommand};
use search_highlight::config::SETTINGS_KEY;
use search_highlight::{load_config, SettingsStore};
use tracing::info;

use super::Command;

/// Show or change the highlighting settings
#[derive(Debug, PartialEq, Args)]
pub struct Settings {
    #[clap(subcommand)]
    action: Action,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Action {
    /// Print the stored settings and the effective configuration
    Show,
    /// Save new settings; omitted options keep their stored value
    Set {
        /// Highlight tag, one of mark, span, strong, em, i
        #[clap(long)]
        tag: Option<String>,

        /// CSS color of highlighted terms
        #[clap(long)]
        color: Option<String>,

        /// Keep the highlight tag in excerpts: on or off
        #[clap(long)]
        excerpt: Option<String>,
    },
}

impl Command for Settings {
    fn run(&self, store: &mut dyn SettingsStore) -> anyhow::Result<()> {
        match &self.action {
            Action::Show => {
                let stored = store.get(SETTINGS_KEY)?.unwrap_or_default();
                println!("{}", serde_json::to_string_pretty(&stored)?);
                let config = load_config(store);
                println!("tag: {}", config.highlight_tag());
                println!("excerpt: {}", if config.excerpt_enabled { "on" } else { "off" });
                if let Some(style) = config.inline_style() {
                    println!("style: {}", style);
                }
            }
            Action::Set {
                tag,
                color,
                excerpt,
            } => {
                let current = store.get(SETTINGS_KEY)?.unwrap_or_default();
                let updated = current.updated(
                    tag.as_deref(),
                    color.as_deref().or(current.highlight_color.as_deref()),
                    excerpt.as_deref().or(current.highlight_excerpt.as_deref()),
                );
                store.set(SETTINGS_KEY, updated)?;
                info!("highlighting settings saved");
            }
        }
        Ok(())
    }
}
