use std::fs::read_to_string;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use search_highlight::{
    load_config, HighlightFieldResolver, MatchClause, QueryContext, SettingsStore,
};
use serde_json::Value;

use super::{Command, Hooks};

/// Add highlight fields to a search query document
#[derive(Debug, PartialEq, Args)]
pub struct Resolve {
    /// The search term of the request
    #[clap(short, long, default_value = "")]
    search: String,

    /// Fields to highlight, defaults to the fields of the query's multi_match clauses
    #[clap(short, long = "field")]
    fields: Vec<String>,

    /// Resolve as an admin-screen request
    #[clap(long)]
    admin: bool,

    /// Override the configured highlight tag
    #[clap(long)]
    tag: Option<String>,

    /// Query document in JSON, an empty document if omitted
    query: Option<PathBuf>,
}

impl Command for Resolve {
    fn run(&self, store: &mut dyn SettingsStore) -> anyhow::Result<()> {
        let mut doc = match self.query {
            Some(ref path) => serde_json::from_str(
                &read_to_string(path).with_context(|| format!("fail to read {:?}", path))?,
            )
            .with_context(|| format!("invalid query document {:?}", path))?,
            None => Value::Object(Default::default()),
        };

        let config = load_config(store);
        let registry = Hooks {
            tag: self.tag.clone(),
            ..Default::default()
        }
        .registry()?;

        let ctx = QueryContext {
            search_term: self.search.clone(),
            explicit_fields: self.fields.clone(),
            fallback_clauses: MatchClause::from_query(&doc),
            admin: self.admin,
        };
        HighlightFieldResolver::new(&registry)
            .resolve(&ctx, &config)
            .apply(&mut doc);
        println!("{}", serde_json::to_string_pretty(&doc)?);
        Ok(())
    }
}
