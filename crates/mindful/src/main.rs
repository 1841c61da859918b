//! Reflection and goal journal on the command line.
//!
//! Reads the API key from the `GEMINI_API_KEY` environment variable. Entries
//! are stored under the data directory (`MINDFUL_DATA_DIR`, default
//! `mindful-data`), and `journal.html` next to them is rewritten after every
//! save.
//!
//! # Examples
//!
//! ```sh
//! # Get a warm reply to today's reflection
//! mindful reflect "Finally fixed the flaky test and went for a walk."
//!
//! # Plan a goal for this month
//! mindful goal "Read two books" --timeframe medium-term
//!
//! # Show the journal, newest first
//! mindful list
//!
//! # Write the journal as a standalone HTML page
//! mindful render --out journal.html
//! ```

use std::path::PathBuf;
use std::process;

use chrono::Local;
use clap::{Parser, Subcommand};
use mindful::GeminiClient;
use mindful::config::JournalConfig;
use mindful::journal::render::format_date;
use mindful::journal::{Entry, EntryStore, EntryView, FileStorage, HtmlFileView, NoView};
use mindful::prompt::Timeframe;
use mindful::ui::{ActionError, ActionOutcome, Journal};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Reflection and goal journal backed by the Gemini API.
#[derive(Parser)]
#[command(name = "mindful")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory holding the stored journal
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Model to use for completions
    #[arg(long, global = true)]
    model: Option<String>,

    /// Base URL of the model collection
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Log requests and storage activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Get a short, warm reply to a daily reflection
    Reflect {
        /// What happened today
        text: String,
    },
    /// Get a 4-5 step action plan for a goal
    Goal {
        /// The goal to plan for
        text: String,

        /// How far out the goal is
        #[arg(long, value_enum, default_value_t = Timeframe::ShortTerm)]
        timeframe: Timeframe,
    },
    /// Print the journal, newest first
    List,
    /// Write the journal as a standalone HTML page
    Render {
        /// Output path (default: <data-dir>/journal.html)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = JournalConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }

    match cli.command {
        Command::Reflect { text } => {
            let journal = open_journal(&config);
            report(journal.reflect(&text).await, || journal.reflection_panel().output);
        }
        Command::Goal { text, timeframe } => {
            let journal = open_journal(&config);
            report(journal.plan_goal(&text, timeframe.code()).await, || {
                journal.goal_panel().output
            });
        }
        Command::List => {
            let store = load_store(&config, Box::new(NoView));
            print_entries(store.entries());
        }
        Command::Render { out } => {
            let store = load_store(&config, Box::new(NoView));
            let path = out.unwrap_or_else(|| config.page_path());
            if let Err(e) = HtmlFileView::new(&path).write(&store.markup()) {
                eprintln!("Error: {e}");
                process::exit(1);
            }
            println!("Wrote {} entries to {}", store.len(), path.display());
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "mindful=debug" } else { "mindful=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_store(config: &JournalConfig, view: Box<dyn EntryView>) -> EntryStore {
    match EntryStore::load(Box::new(FileStorage::new(&config.data_dir)), view) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn open_journal(config: &JournalConfig) -> Journal {
    let api_key = match config.require_api_key() {
        Ok(key) => key,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    let client = match GeminiClient::new(api_key, &config.generate_url()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: failed to create API client: {e}");
            process::exit(1);
        }
    };
    let store = load_store(config, Box::new(HtmlFileView::new(config.page_path())));
    Journal::new(Box::new(client), store)
}

/// Print the action result. `output` reads the panel's output region.
fn report(result: Result<ActionOutcome, ActionError>, output: impl FnOnce() -> Option<String>) {
    match result {
        Ok(ActionOutcome::Saved(entry)) => println!("{}", entry.insights),
        Ok(ActionOutcome::Failed) => {
            eprintln!("{}", output().unwrap_or_default());
            process::exit(1);
        }
        Err(ActionError::EmptyInput(alert)) => {
            eprintln!("{alert}");
            process::exit(2);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn print_entries(entries: &[Entry]) {
    if entries.is_empty() {
        println!("No entries yet");
        return;
    }
    for entry in entries {
        let heading = match entry.timeframe {
            Some(tf) => format!("{} ({})", entry.kind.label(), tf.phrase()),
            None => entry.kind.label().to_string(),
        };
        println!("── {heading} · {} ──", format_date(&entry.date, &Local));
        println!("{}\n", entry.content);
        println!("{}\n", entry.insights);
    }
}
