//! Browser-based single-page UI for the mindful journal.
//!
//! `mindful-web` serves one HTML page plus a small REST API over a shared
//! [`Journal`]. The page posts reflections and goals, shows the formatted
//! reply in the matching output region and swaps in the re-rendered entry
//! list from the response.
//!
//! # Quick start
//!
//! ```ignore
//! use mindful::prelude::*;
//! use mindful_web::{SharedHtml, WebConfig, spawn_web};
//! use std::sync::Arc;
//!
//! let rendered = SharedHtml::default();
//! let store = EntryStore::load(
//!     Box::new(FileStorage::new("mindful-data")),
//!     Box::new(rendered.clone()),
//! )?;
//! let client = GeminiClient::with_default_model(api_key)?;
//! let journal = Arc::new(Journal::new(Box::new(client), store));
//!
//! let addr = spawn_web(journal, rendered, WebConfig::default()).await?;
//! println!("Journal: http://{addr}");
//! ```
//!
//! # Architecture
//!
//! ```text
//! browser ──POST /api/reflection, /api/goal──▶ Journal ──save──▶ EntryStore
//!    ▲                                                             │ render_all
//!    └──────── entries_html ◀── SharedHtml ◀──── EntryView::show ──┘
//! ```

mod api;
mod server;
pub mod view;

pub use view::SharedHtml;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use mindful::ui::Journal;

/// Configuration for the web server.
pub struct WebConfig {
    /// Address to bind to. Default: `127.0.0.1:3001`.
    pub bind_addr: SocketAddr,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
        }
    }
}

/// Spawn the web server on a Tokio task and return the bound address.
///
/// `rendered` must be the same [`SharedHtml`] the journal's store renders
/// into, so responses carry the current entry list.
///
/// The server runs until the Tokio runtime shuts down.
pub async fn spawn_web(
    journal: Arc<Journal>,
    rendered: SharedHtml,
    config: WebConfig,
) -> io::Result<SocketAddr> {
    let router = server::build_router(journal, rendered);
    server::start_server(router, config.bind_addr).await
}
