//! # Tagscope CLI (`tagscope`)
//!
//! Query the hashtag analytics service from the command line and print the
//! typed result as JSON.
//!
//! ## Usage
//!
//! ```bash
//! tagscope tag miami
//! tagscope graph miami --async
//! tagscope maps -80.487 25.750 -79.827 25.854 --zoom 12
//! tagscope --config ./config/tagscope.toml tag miami
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`
//! (default `warn`), e.g. `RUST_LOG=tagscope=debug`.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use tagscope::client::{AsyncClient, Client};
use tagscope::config::{self, Config};
use tagscope::models::QueryResult;
use tagscope::query::{BoundingBox, Query};

/// Tagscope — hashtag statistics, relationship graphs and map clusters.
#[derive(Parser)]
#[command(name = "tagscope", version, about)]
struct Cli {
    /// Path to configuration file (TOML). Production defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Run the call through the async transport instead of the blocking one.
    #[arg(long = "async", global = true)]
    use_async: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Statistics and related hashtags for one hashtag.
    Tag {
        /// Hashtag without the leading `#`.
        hashtag: String,
    },

    /// Relationship graph around one hashtag.
    Graph {
        /// Hashtag without the leading `#`.
        hashtag: String,
    },

    /// Hashtags clustered inside a bounding box.
    Maps {
        /// Top left x-coordinate.
        #[arg(allow_negative_numbers = true)]
        x1: f64,
        /// Top left y-coordinate.
        #[arg(allow_negative_numbers = true)]
        y1: f64,
        /// Bottom right x-coordinate.
        #[arg(allow_negative_numbers = true)]
        x2: f64,
        /// Bottom right y-coordinate.
        #[arg(allow_negative_numbers = true)]
        y2: f64,
        /// Zoom factor, 2 to 16 (checked by upstream, not locally).
        #[arg(long, default_value_t = 12)]
        zoom: i32,
    },
}

impl Commands {
    fn query(&self) -> Query {
        match self {
            Commands::Tag { hashtag } => Query::Tag(hashtag.clone()),
            Commands::Graph { hashtag } => Query::Graph(hashtag.clone()),
            Commands::Maps {
                x1,
                y1,
                x2,
                y2,
                zoom,
            } => Query::Maps {
                bbox: BoundingBox::new(*x1, *y1, *x2, *y2),
                zoom: *zoom,
            },
        }
    }
}

fn run_blocking(cfg: &Config, query: &Query) -> Result<QueryResult> {
    let client = Client::new(cfg)?;
    Ok(client.execute(query)?)
}

async fn run_async(cfg: &Config, query: &Query) -> Result<QueryResult> {
    let client = AsyncClient::new(cfg)?;
    Ok(client.execute(query).await?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => Config::minimal(),
    };

    let query = cli.command.query();
    let result = if cli.use_async {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?
            .block_on(run_async(&cfg, &query))?
    } else {
        run_blocking(&cfg, &query)?
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
