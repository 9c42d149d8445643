use std::fs::{metadata, read_to_string};

use clap::Args;
use colored::Colorize;
use glob::glob;
use search_highlight::highlight::preview;
use search_highlight::{load_config, ExcerptRewriter, SettingsStore};
use tracing::warn;

use super::{Command, Hooks};

/// Print the search result excerpt of content files
#[derive(Debug, PartialEq, Args)]
pub struct Excerpt {
    /// The search term of the request
    #[clap(short, long, default_value = "")]
    search: String,

    /// Render as an admin-screen request
    #[clap(long)]
    admin: bool,

    /// Excerpt length in words
    #[clap(short, long)]
    length: Option<usize>,

    /// Suffix of trimmed excerpts
    #[clap(short, long)]
    more: Option<String>,

    /// Override the configured highlight tag kept in excerpts
    #[clap(long)]
    tag: Option<String>,

    /// Wrap blank-line separated blocks in paragraphs before trimming
    #[clap(long)]
    autop: bool,

    /// Color highlighted terms instead of printing the markup
    #[clap(short, long)]
    preview: bool,

    /// Content files, supports [glob](https://github.com/rust-lang-nursery/glob)
    #[clap(default_value = "*")]
    paths: String,
}

impl Command for Excerpt {
    fn run(&self, store: &mut dyn SettingsStore) -> anyhow::Result<()> {
        let config = load_config(store);
        let registry = Hooks {
            tag: self.tag.clone(),
            length: self.length,
            more: self.more.clone(),
            paragraphs: self.autop,
            ..Default::default()
        }
        .registry()?;
        let rewriter = ExcerptRewriter::new(&registry);
        let tag = registry.highlight_tag(&config);

        for path in glob(&self.paths)?.filter_map(|p| p.ok()) {
            if !metadata(&path).map(|m| m.is_file()).unwrap_or(false) {
                continue;
            }
            let content = match read_to_string(&path) {
                Ok(content) => content,
                Err(err) => {
                    warn!("skip {:?}: {}", path, err);
                    continue;
                }
            };
            let excerpt =
                rewriter.rewrite("", &content, &config, !self.search.is_empty(), self.admin);
            println!("{}", path.to_string_lossy().purple());
            if self.preview {
                println!("{}", preview(&excerpt, tag, &config.color));
            } else {
                println!("{}", excerpt);
            }
            println!();
        }
        Ok(())
    }
}
