//! Display adapters for the rendered entry list.

use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::render::{Node, render_page};

/// Receives the full entry-list markup after every change.
///
/// Implementations replace whatever they showed before; there is no
/// incremental update.
pub trait EntryView: Send {
    fn show(&mut self, markup: &Node);
}

/// Discards every render. Used by read-only commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoView;

impl EntryView for NoView {
    fn show(&mut self, _markup: &Node) {}
}

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("failed to create {}: {source}", .dir.display())]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Rewrites a standalone HTML page on disk on every render.
#[derive(Debug, Clone)]
pub struct HtmlFileView {
    path: PathBuf,
}

impl HtmlFileView {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the page once, creating the parent directory if needed.
    pub fn write(&self, markup: &Node) -> Result<(), PageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| PageError::CreateDir {
                dir: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&self.path, render_page(markup)).map_err(|source| PageError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl EntryView for HtmlFileView {
    fn show(&mut self, markup: &Node) {
        if let Err(e) = self.write(markup) {
            warn!("Journal page not updated: {e}");
        }
    }
}
