//! Nook CLI - search the book catalog and manage your reading library

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::Context;
use nook_core::NookConfig;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parse a 1-based result position
fn parse_position(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if n < 1 {
        Err("position must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

#[derive(Parser)]
#[command(name = "nook")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding the library (overrides NOOK_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the book catalog
    Search {
        /// Free-text query
        query: String,

        /// Maximum number of results
        #[arg(short = 'n', long, default_value = "10")]
        max_results: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show recent searches
    Recent {
        /// Forget all recent searches
        #[arg(long)]
        clear: bool,
    },

    /// Search the catalog and add one of the results to the library
    Add {
        /// Free-text query
        query: String,

        /// Which search result to add (1 = first)
        #[arg(short, long, default_value = "1", value_parser = parse_position)]
        position: usize,
    },

    /// Remove a book from the library
    Remove {
        /// Book id
        id: String,
    },

    /// List the books in the library, newest first
    List {
        /// Only books in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one library book
    Show {
        /// Book id
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set reading progress in percent (clamped to 0-100)
    Progress {
        /// Book id
        id: String,

        /// Percent read
        #[arg(allow_hyphen_values = true)]
        percent: i64,
    },

    /// Mark a book as read
    Read {
        /// Book id
        id: String,
    },

    /// Replace the notes on a book
    Note {
        /// Book id
        id: String,

        /// Note text
        text: String,
    },

    /// Show library statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove every book from the library
    Clear {
        /// Required to actually clear
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "nook_cli=debug,nook_core=debug"
    } else {
        "nook_cli=info,nook_core=warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = NookConfig::from_env();
    if let Some(data_dir) = cli.data_dir {
        config = config.with_data_dir(data_dir);
    }
    let ctx = Context::new(config)?;

    match cli.command {
        Commands::Search {
            query,
            max_results,
            json,
        } => commands::search(&ctx, &query, max_results, json).await,

        Commands::Recent { clear } => commands::recent(&ctx, clear),

        Commands::Add { query, position } => commands::add(&ctx, &query, position).await,

        Commands::Remove { id } => commands::remove(&ctx, &id),

        Commands::List { category, json } => commands::list(&ctx, category.as_deref(), json),

        Commands::Show { id, json } => commands::show(&ctx, &id, json),

        Commands::Progress { id, percent } => commands::progress(&ctx, &id, percent),

        Commands::Read { id } => commands::mark_read(&ctx, &id),

        Commands::Note { id, text } => commands::note(&ctx, &id, &text),

        Commands::Stats { json } => commands::stats(&ctx, json),

        Commands::Clear { yes } => commands::clear(&ctx, yes),
    }
}
