//! In-memory entry view shared between the store and the HTTP handlers.

use std::sync::{Arc, Mutex};

use mindful::journal::{EntryView, Node};

/// Holds the most recently rendered entry list as an HTML string.
///
/// Clones share the same slot: hand one clone to the
/// [`EntryStore`](mindful::journal::EntryStore) and keep another for reading.
#[derive(Clone, Default)]
pub struct SharedHtml(Arc<Mutex<String>>);

impl SharedHtml {
    /// The last rendered list. Empty until the store first renders.
    pub fn get(&self) -> String {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl EntryView for SharedHtml {
    fn show(&mut self, markup: &Node) {
        *self.0.lock().unwrap_or_else(|e| e.into_inner()) = markup.to_html();
    }
}
