use tracing::{debug, info, warn};

use super::entry::Entry;
use super::render::{Node, render_entries};
use super::storage::{ENTRIES_KEY, Storage, StorageError};
use super::view::EntryView;

/// The ordered, write-through journal.
///
/// Holds the entries newest-first. After every successful [`save`](Self::save)
/// the stored JSON array equals the in-memory collection and the view has
/// been handed a freshly rendered tree.
pub struct EntryStore {
    entries: Vec<Entry>,
    storage: Box<dyn Storage>,
    view: Box<dyn EntryView>,
}

impl EntryStore {
    /// Load the collection from storage and render it once.
    ///
    /// A missing key starts an empty journal. A value that does not parse as
    /// an entry array also starts empty (with a warning); the stored value is
    /// left as-is until the next save replaces it.
    pub fn load(storage: Box<dyn Storage>, view: Box<dyn EntryView>) -> Result<Self, StorageError> {
        let entries = match storage.get(ENTRIES_KEY)? {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<Entry>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Stored journal is unreadable, starting empty: {e}");
                    Vec::new()
                }
            },
        };
        debug!("Loaded {} journal entries", entries.len());

        let mut store = Self {
            entries,
            storage,
            view,
        };
        store.render_all();
        Ok(store)
    }

    /// Prepend `entry`, persist the whole collection, then re-render.
    ///
    /// On a write failure the entry is dropped from memory again so the
    /// collection keeps matching what is stored.
    pub fn save(&mut self, entry: Entry) -> Result<(), StorageError> {
        self.entries.insert(0, entry);
        if let Err(e) = self.persist() {
            self.entries.remove(0);
            return Err(e);
        }
        info!(
            "Saved {} entry ({} total)",
            self.entries[0].kind.label(),
            self.entries.len()
        );
        self.render_all();
        Ok(())
    }

    /// Rebuild the full markup tree and hand it to the view.
    pub fn render_all(&mut self) {
        let markup = render_entries(&self.entries);
        self.view.show(&markup);
    }

    /// The current markup tree, without touching the view.
    pub fn markup(&self) -> Node {
        render_entries(&self.entries)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.entries)?;
        self.storage.set(ENTRIES_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::storage::MemoryStorage;
    use crate::journal::view::NoView;
    use chrono::{TimeZone, Utc};
    use std::sync::{Arc, Mutex};

    /// Records every rendered page as HTML.
    #[derive(Clone, Default)]
    struct RecordingView(Arc<Mutex<Vec<String>>>);

    impl EntryView for RecordingView {
        fn show(&mut self, markup: &Node) {
            self.0.lock().unwrap().push(markup.to_html());
        }
    }

    struct FailingStorage;

    impl Storage for FailingStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_string(),
                source: std::io::Error::other("disk full"),
            })
        }
    }

    fn entry(content: &str, minute: u32) -> Entry {
        Entry::reflection(
            content,
            format!("insight for {content}"),
            Utc.with_ymd_and_hms(2024, 3, 9, 8, minute, 0).unwrap(),
        )
    }

    fn stored(store: &EntryStore) -> Vec<Entry> {
        let raw = store.storage().get(ENTRIES_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn load_without_key_is_empty_and_renders() {
        let view = RecordingView::default();
        let store = EntryStore::load(Box::new(MemoryStorage::new()), Box::new(view.clone())).unwrap();
        assert!(store.is_empty());
        assert_eq!(*view.0.lock().unwrap(), vec!["<p>No entries yet</p>".to_string()]);
    }

    #[test]
    fn load_unparsable_value_falls_back_to_empty() {
        let storage = MemoryStorage::new().with_value(ENTRIES_KEY, "{not json");
        let store = EntryStore::load(Box::new(storage), Box::new(NoView)).unwrap();
        assert!(store.is_empty());
        // Left untouched until the next save.
        assert_eq!(
            store.storage().get(ENTRIES_KEY).unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn save_prepends_and_writes_through() {
        let mut store = EntryStore::load(Box::new(MemoryStorage::new()), Box::new(NoView)).unwrap();
        let e1 = entry("one", 1);
        store.save(e1.clone()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(stored(&store)[0], e1);

        let e2 = entry("two", 2);
        store.save(e2.clone()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.entries(), &[e2.clone(), e1.clone()]);
        assert_eq!(stored(&store), vec![e2, e1]);
    }

    #[test]
    fn save_renders_newest_first() {
        let view = RecordingView::default();
        let mut store = EntryStore::load(Box::new(MemoryStorage::new()), Box::new(view.clone())).unwrap();
        store.save(entry("older", 1)).unwrap();
        store.save(entry("newer", 2)).unwrap();

        let renders = view.0.lock().unwrap();
        assert_eq!(renders.len(), 3);
        let last = renders.last().unwrap();
        assert!(last.find("newer").unwrap() < last.find("older").unwrap());
    }

    #[test]
    fn loads_previously_saved_entries() {
        let mut first = EntryStore::load(Box::new(MemoryStorage::new()), Box::new(NoView)).unwrap();
        first.save(entry("kept", 1)).unwrap();
        let raw = first.storage().get(ENTRIES_KEY).unwrap().unwrap();

        let storage = MemoryStorage::new().with_value(ENTRIES_KEY, raw);
        let second = EntryStore::load(Box::new(storage), Box::new(NoView)).unwrap();
        assert_eq!(second.entries(), first.entries());
    }

    #[test]
    fn failed_write_leaves_collection_unchanged() {
        let view = RecordingView::default();
        let mut store = EntryStore::load(Box::new(FailingStorage), Box::new(view.clone())).unwrap();
        let err = store.save(entry("lost", 1)).unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
        assert!(store.is_empty());
        // Only the initial render happened.
        assert_eq!(view.0.lock().unwrap().len(), 1);
    }
}
