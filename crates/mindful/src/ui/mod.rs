//! Panel and control state for the two journal actions.
//!
//! Each action area (reflection, goal) is a [`Panel`]: a trigger [`Control`]
//! plus an output region. Frontends read panels to draw buttons and output;
//! the handlers in [`actions`] write them.
//!
//! # Architecture
//!
//! ```text
//! frontend ──input──▶ Journal::reflect / plan_goal ──▶ handle_* (actions)
//!                            │                              │
//!                            ▼                              ▼
//!                 Mutex<Panel> (control, output)    Mutex<EntryStore>
//! ```
//!
//! The two panels are locked independently, so a reflection and a goal can
//! be in flight at the same time. No lock is held across the network call.

pub mod actions;

pub use actions::{
    ActionError, ActionOutcome, GOAL_ALERT, GOAL_APOLOGY, REFLECTION_ALERT, REFLECTION_APOLOGY,
    handle_goal, handle_reflection,
};

use std::sync::{Mutex, MutexGuard};

use crate::TextGenerator;
use crate::journal::{EntryStore, Node};

/// Lock a mutex, recovering the data from a poisoned lock.
pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

// ── Control ───────────────────────────────────────────────────────────

/// A trigger button: disabled with a busy label while its request runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Control {
    idle_label: &'static str,
    busy_label: &'static str,
    busy: bool,
}

impl Control {
    pub fn new(idle_label: &'static str, busy_label: &'static str) -> Self {
        Self {
            idle_label,
            busy_label,
            busy: false,
        }
    }

    pub fn label(&self) -> &'static str {
        if self.busy {
            self.busy_label
        } else {
            self.idle_label
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.busy
    }

    pub fn idle_label(&self) -> &'static str {
        self.idle_label
    }

    pub fn busy_label(&self) -> &'static str {
        self.busy_label
    }
}

// ── Panel ─────────────────────────────────────────────────────────────

/// One action area: its trigger control and its output region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Panel {
    pub control: Control,
    /// Output markup; `None` while the region is still hidden.
    pub output: Option<String>,
}

impl Panel {
    pub fn reflection() -> Self {
        Self::new(Control::new("Get Insights", "Analyzing..."))
    }

    pub fn goal() -> Self {
        Self::new(Control::new("Create Action Plan", "Planning..."))
    }

    fn new(control: Control) -> Self {
        Self {
            control,
            output: None,
        }
    }

    pub fn is_output_visible(&self) -> bool {
        self.output.is_some()
    }
}

/// Marks a panel busy for as long as it lives.
///
/// Dropping the guard re-enables the control and restores its idle label on
/// every exit path, including an early return, a panic, or the enclosing
/// future being dropped mid-request.
pub(crate) struct BusyGuard<'a> {
    panel: &'a Mutex<Panel>,
}

impl<'a> BusyGuard<'a> {
    /// `None` if the panel is already busy.
    pub(crate) fn acquire(panel: &'a Mutex<Panel>) -> Option<Self> {
        let mut p = lock(panel);
        if p.control.busy {
            return None;
        }
        p.control.busy = true;
        Some(Self { panel })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        lock(self.panel).control.busy = false;
    }
}

// ── Journal ───────────────────────────────────────────────────────────

/// Everything a frontend needs, constructed once at startup.
pub struct Journal {
    generator: Box<dyn TextGenerator>,
    store: Mutex<EntryStore>,
    reflection: Mutex<Panel>,
    goal: Mutex<Panel>,
}

impl Journal {
    pub fn new(generator: Box<dyn TextGenerator>, store: EntryStore) -> Self {
        Self {
            generator,
            store: Mutex::new(store),
            reflection: Mutex::new(Panel::reflection()),
            goal: Mutex::new(Panel::goal()),
        }
    }

    /// Run the reflection action with the given input text.
    pub async fn reflect(&self, input: &str) -> Result<ActionOutcome, ActionError> {
        handle_reflection(self.generator.as_ref(), &self.store, &self.reflection, input).await
    }

    /// Run the goal action with the given input text and timeframe code.
    pub async fn plan_goal(
        &self,
        input: &str,
        timeframe_code: &str,
    ) -> Result<ActionOutcome, ActionError> {
        handle_goal(
            self.generator.as_ref(),
            &self.store,
            &self.goal,
            input,
            timeframe_code,
        )
        .await
    }

    pub fn reflection_panel(&self) -> Panel {
        lock(&self.reflection).clone()
    }

    pub fn goal_panel(&self) -> Panel {
        lock(&self.goal).clone()
    }

    /// Snapshot of the entries, newest first.
    pub fn entries(&self) -> Vec<crate::journal::Entry> {
        lock(&self.store).entries().to_vec()
    }

    pub fn entries_markup(&self) -> Node {
        lock(&self.store).markup()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_labels() {
        let r = Panel::reflection();
        assert_eq!(r.control.label(), "Get Insights");
        assert_eq!(r.control.busy_label(), "Analyzing...");
        assert!(!r.is_output_visible());

        let g = Panel::goal();
        assert_eq!(g.control.label(), "Create Action Plan");
        assert_eq!(g.control.busy_label(), "Planning...");
    }

    #[test]
    fn busy_guard_toggles_control() {
        let panel = Mutex::new(Panel::reflection());
        {
            let _guard = BusyGuard::acquire(&panel).unwrap();
            let p = lock(&panel);
            assert!(p.control.is_disabled());
            assert_eq!(p.control.label(), "Analyzing...");
        }
        let p = lock(&panel);
        assert!(!p.control.is_disabled());
        assert_eq!(p.control.label(), "Get Insights");
    }

    #[test]
    fn busy_guard_is_exclusive() {
        let panel = Mutex::new(Panel::goal());
        let first = BusyGuard::acquire(&panel);
        assert!(first.is_some());
        assert!(BusyGuard::acquire(&panel).is_none());
        drop(first);
        assert!(BusyGuard::acquire(&panel).is_some());
    }

    #[test]
    fn busy_guard_restores_after_panic() {
        let panel = Mutex::new(Panel::reflection());
        let result = std::panic::catch_unwind(|| {
            let _guard = BusyGuard::acquire(&panel).unwrap();
            panic!("boom");
        });
        assert!(result.is_err());
        assert!(!lock(&panel).control.is_disabled());
    }
}
