use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sitesearch::api::create_router;
use sitesearch::config::{CONFIG, Config};
use sitesearch::query_engine::QueryEngine;

#[derive(Parser, Debug)]
#[command(name = "sitesearch", about = "Full-text search over a static site")]
struct Cli {
    /// Port to listen on (overrides SERVER_PORT)
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Document root (overrides SITES_DIR)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Curated links JSON file (overrides LINKS_FILE)
    #[arg(long, global = true)]
    links: Option<PathBuf>,

    /// Cached site list (overrides SITES_FILE)
    #[arg(long, global = true)]
    sites: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the search endpoint and the static site (default)
    Serve,
    /// Run a single query and print the results as JSON
    Search { term: String },
}

impl Cli {
    fn apply(&self, mut config: Config) -> Config {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(root) = &self.root {
            config.sites_dir = root.clone();
        }
        if let Some(links) = &self.links {
            config.links_file = links.clone();
        }
        if let Some(sites) = &self.sites {
            config.sites_file = sites.clone();
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.apply(CONFIG.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_target(true)
        // stdout is reserved for `search` output
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    // Bridge log crate -> tracing (so log::info! etc. work)
    tracing_log::LogTracer::init()?;

    for key in &config.invalid_vars {
        log::warn!("Ignoring invalid value for {key}, using default");
    }

    // no catalog, no service
    let query_engine = Arc::new(
        QueryEngine::from_config(&config).context("Failed to load searchable domains")?,
    );

    log::info!(
        "Loaded {} catalog entries, document root {}",
        query_engine.catalog().len(),
        query_engine.scanner().root().display()
    );

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(query_engine, &config).await,
        Command::Search { term } => {
            let results = query_engine.query(&term)?;
            println!("{}", serde_json::to_string_pretty(&results)?);
            Ok(())
        }
    }
}

async fn serve(query_engine: Arc<QueryEngine>, config: &Config) -> anyhow::Result<()> {
    let app = create_router(query_engine, &config.links_file);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;

    tracing::info!("Starting HTTP server on http://localhost:{}", config.port);
    axum::serve(listener, app).await?;
    Ok(())
}
