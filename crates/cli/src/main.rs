mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use seamart_core::ClientConfig;
use seamart_core::config::clamp_page_size;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "seamart", version)]
#[command(about = "Browse the seamart marketplace feed and manage your basket", long_about = None)]
struct Cli {
    /// Backend base URL (overrides SEAMART_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Directory holding the local database (overrides SEAMART_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Items per page (overrides SEAMART_PAGE_SIZE)
    #[arg(long, global = true)]
    page_size: Option<u32>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the feed, optionally filtered, following N pages
    Feed {
        /// Comma list of content types: product, shop, user
        #[arg(short, long)]
        filter: Option<String>,
        #[arg(short, long, default_value = "1")]
        pages: u32,
    },
    /// Show search results in place of the feed
    Search { query: String },
    /// Fetch a single item by id
    Item { id: String },
    /// Inspect or change the local basket
    Basket {
        #[command(subcommand)]
        action: BasketAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum BasketAction {
    List,
    /// Fetch an item and add it (merges with an existing entry)
    Add {
        id: String,
        #[arg(short, long, default_value = "1")]
        quantity: u32,
    },
    /// Set an entry's quantity; 0 removes it
    Set { id: String, quantity: u32 },
    Remove { id: String },
    Clear,
}

fn resolve_config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(url) = &cli.api_url {
        config.api_url = url.trim_end_matches('/').to_owned();
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(size) = cli.page_size {
        config.page_size = clamp_page_size(size);
    }
    config
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli);
    tracing::debug!(api_url = %config.api_url, page_size = config.page_size, "Resolved configuration");

    match cli.command {
        Commands::Feed { filter, pages } => commands::feed::run_feed(&config, filter, pages).await,
        Commands::Search { query } => commands::feed::run_search(&config, &query).await,
        Commands::Item { id } => commands::feed::run_item(&config, &id).await,
        Commands::Basket { action } => commands::basket::run_basket(&config, action).await,
    }
}
