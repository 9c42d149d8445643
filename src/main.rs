use std::path::PathBuf;

use clap::{Parser, Subcommand};
use search_highlight::FileStore;
use tracing_subscriber::EnvFilter;

use self::cli::{Command, Excerpt, Resolve, Settings};

mod cli;

/// Search term highlighting for search queries and result excerpts
#[derive(Debug, Parser)]
#[clap(version)]
struct Opts {
    /// Settings file, defaults to one under the user's data directory
    #[clap(long, global = true)]
    store: Option<PathBuf>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Settings(Settings),
    Resolve(Resolve),
    Excerpt(Excerpt),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("fail to init tracing subscriber: {}", err))?;

    let opts = Opts::parse();
    let mut store = match opts.store {
        Some(path) => FileStore::new(path),
        None => FileStore::open_default()?,
    };

    match &opts.command {
        Commands::Settings(cmd) => cmd.run(&mut store),
        Commands::Resolve(cmd) => cmd.run(&mut store),
        Commands::Excerpt(cmd) => cmd.run(&mut store),
    }
}
