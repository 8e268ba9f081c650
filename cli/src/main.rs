use anyhow::Result;
use clap::{Parser, Subcommand};
use docsearch::{
    add_documents, find_top_documents, load_documents, match_documents, parse_status,
    resolve_config,
};
use docsearch_core::{DocumentStatus, SearchServer};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "docsearch")]
#[command(about = "Rank and match short documents with a TF-IDF index", long_about = None)]
struct Cli {
    /// Input path: JSON/JSONL file or a directory of them
    #[arg(long)]
    input: PathBuf,
    /// Space-separated stop words
    #[arg(long, default_value = "")]
    stop_words: String,
    /// JSON file with ranking parameters
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximum number of results per query (overrides the config file)
    #[arg(long)]
    max_results: Option<usize>,
    /// Relevance tolerance below which rating decides the order
    #[arg(long)]
    epsilon: Option<f64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the documents and report the ones that were rejected
    Ingest,
    /// Print the top documents for a query
    Search {
        query: String,
        /// Only return documents with this status
        #[arg(long, value_parser = parse_status)]
        status: Option<DocumentStatus>,
    },
    /// Print which query terms each document matches
    Match { query: String },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    let config = resolve_config(cli.config.as_deref(), cli.max_results, cli.epsilon)?;
    let mut server = SearchServer::new(&cli.stop_words)?.with_config(config);
    let docs = load_documents(&cli.input)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let added = add_documents(&mut out, &mut server, &docs)?;
    tracing::info!(added, rejected = docs.len() - added, "ingestion complete");

    match cli.command {
        Commands::Ingest => writeln!(out, "Indexed {added} of {} documents", docs.len())?,
        Commands::Search { query, status } => {
            find_top_documents(&mut out, &server, &query, status)?
        }
        Commands::Match { query } => match_documents(&mut out, &server, &query)?,
    }
    Ok(())
}
