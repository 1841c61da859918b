//! The persisted journal: entries, storage backends, the store, rendering.
//!
//! # Architecture
//!
//! ```text
//! Journal::reflect / plan_goal ──save──▶ EntryStore ──set──▶ dyn Storage (one JSON key)
//!                                            │
//!                                            └──render_all──▶ render_entries() ──Node──▶ dyn EntryView
//! ```
//!
//! [`EntryStore`] owns the collection. Every save rewrites the whole stored
//! array and rebuilds the whole markup tree; nothing is diffed.

pub mod entry;
pub mod render;
pub mod storage;
pub mod store;
pub mod view;

pub use entry::{Entry, EntryKind};
pub use render::{Node, render_entries, render_page};
pub use storage::{ENTRIES_KEY, FileStorage, MemoryStorage, Storage, StorageError};
pub use store::EntryStore;
pub use view::{EntryView, HtmlFileView, NoView, PageError};
