//! Mindful journal in the browser.
//!
//! Serves the single-page UI and its REST API. The journal is stored under
//! the data directory, the same layout the `mindful` CLI uses.
//!
//! # Usage
//!
//! ```bash
//! GEMINI_API_KEY=... cargo run -p mindful-web
//! GEMINI_API_KEY=... cargo run -p mindful-web -- --port 8080
//! GEMINI_API_KEY=... cargo run -p mindful-web -- --data-dir ~/journal --model gemini-2.0-flash
//! ```
//!
//! Then open the printed URL in a browser.
//!
//! **REST** (`POST /api/reflection`):
//! ```json
//! {"reflection": "Shipped the release and called my sister."}
//! ```
//!
//! **REST** (`POST /api/goal`):
//! ```json
//! {"goal": "Run a 10k", "timeframe": "medium-term"}
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use mindful::prelude::*;
use mindful_web::{SharedHtml, WebConfig, spawn_web};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Mindful journal web server.
#[derive(Parser)]
#[command(about = "Reflection and goal journal with a browser-based UI")]
struct Args {
    /// Port for the web UI server.
    #[arg(long, default_value_t = 3001)]
    port: u16,

    /// Directory holding the stored journal.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Model to use for completions.
    #[arg(long)]
    model: Option<String>,

    /// Base URL of the model collection.
    #[arg(long)]
    endpoint: Option<String>,

    /// Log requests and storage activity.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();
    init_tracing(args.verbose);

    // 1. Resolve configuration: environment first, flags on top.
    let mut config = JournalConfig::from_env();
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    if let Some(model) = args.model {
        config.model = model;
    }
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }

    // 2. Create the API client.
    let api_key = config.require_api_key().map_err(|e| e.to_string())?;
    let client = GeminiClient::new(api_key, &config.generate_url())
        .map_err(|e| format!("failed to create API client: {e}"))?;

    // 3. Load the stored journal, rendering into a slot the handlers share.
    let rendered = SharedHtml::default();
    let store = EntryStore::load(
        Box::new(FileStorage::new(&config.data_dir)),
        Box::new(rendered.clone()),
    )
    .map_err(|e| e.to_string())?;
    tracing::info!(
        "Loaded {} entries from {}",
        store.len(),
        config.data_dir.display()
    );
    let journal = Arc::new(Journal::new(Box::new(client), store));

    // 4. Spawn the web server.
    let web_config = WebConfig {
        bind_addr: ([127, 0, 0, 1], args.port).into(),
    };
    let addr = spawn_web(journal, rendered, web_config)
        .await
        .map_err(|e| format!("failed to bind port {}: {e}", args.port))?;
    println!("Journal: http://{addr}");

    // 5. Serve until interrupted.
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("failed to listen for Ctrl-C: {e}"))?;
    println!("\nShutting down.");
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "mindful=debug,mindful_web=debug"
    } else {
        "mindful=info,mindful_web=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
