//! Convenience re-exports for common `mindful` types.
//!
//! ```ignore
//! use mindful::prelude::*;
//! ```

// ── Core types ──────────────────────────────────────────────────────
pub use crate::{GeminiClient, GenerateError, GenerateFuture, TextGenerator};

// ── Configuration ───────────────────────────────────────────────────
pub use crate::config::{ConfigError, JournalConfig};

// ── Prompting and formatting ────────────────────────────────────────
pub use crate::format::format_response;
pub use crate::prompt::{Timeframe, goal_prompt, reflection_prompt};

// ── Journal ─────────────────────────────────────────────────────────
pub use crate::journal::{
    Entry, EntryKind, EntryStore, EntryView, FileStorage, HtmlFileView, MemoryStorage, Node,
    NoView, Storage, StorageError, render_entries, render_page,
};

// ── UI state and actions ────────────────────────────────────────────
pub use crate::ui::{
    ActionError, ActionOutcome, Control, GOAL_APOLOGY, Journal, Panel, REFLECTION_APOLOGY,
};
