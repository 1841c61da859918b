//! The reflection and goal action handlers.
//!
//! Both run the same pipeline: validate input, mark the panel busy, build a
//! prompt, await the generator, then either show the formatted reply and
//! save an [`Entry`] or show a fixed apology. Failed calls never touch the
//! store.

use std::sync::Mutex;

use chrono::Utc;
use tracing::{debug, error};

use super::{BusyGuard, Panel, lock};
use crate::TextGenerator;
use crate::format::format_response;
use crate::journal::{Entry, EntryStore, StorageError};
use crate::prompt::{Timeframe, goal_prompt, reflection_prompt};

pub const REFLECTION_ALERT: &str = "Please enter your reflection before analyzing.";
pub const GOAL_ALERT: &str = "Please describe your goal before creating a plan.";

pub const REFLECTION_APOLOGY: &str =
    "Sorry, I couldn't analyze your reflection. Please try again later.";
pub const GOAL_APOLOGY: &str = "Sorry, I couldn't create a plan. Please try again later.";

/// Result of an action that got as far as the network call.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionOutcome {
    /// The reply was shown and this entry was saved.
    Saved(Entry),
    /// The call failed; the panel shows the apology and nothing was saved.
    Failed,
}

/// An action that was rejected or could not be recorded.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// Blank input. Carries the alert text for the user.
    #[error("{0}")]
    EmptyInput(&'static str),
    /// The panel already has a request in flight.
    #[error("a request is already in progress")]
    Busy,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Ask for a warm reply to a daily reflection.
pub async fn handle_reflection(
    generator: &dyn TextGenerator,
    store: &Mutex<EntryStore>,
    panel: &Mutex<Panel>,
    input: &str,
) -> Result<ActionOutcome, ActionError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(ActionError::EmptyInput(REFLECTION_ALERT));
    }
    let prompt = reflection_prompt(text);
    run(
        generator,
        store,
        panel,
        &prompt,
        REFLECTION_APOLOGY,
        |insights| Entry::reflection(text, insights, Utc::now()),
    )
    .await
}

/// Ask for an action plan for a goal within a timeframe.
///
/// An unrecognized `timeframe_code` still runs; the prompt simply carries no
/// timeframe phrase and the entry no timeframe.
pub async fn handle_goal(
    generator: &dyn TextGenerator,
    store: &Mutex<EntryStore>,
    panel: &Mutex<Panel>,
    input: &str,
    timeframe_code: &str,
) -> Result<ActionOutcome, ActionError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(ActionError::EmptyInput(GOAL_ALERT));
    }
    let prompt = goal_prompt(text, timeframe_code);
    let timeframe = Timeframe::parse(timeframe_code);
    run(generator, store, panel, &prompt, GOAL_APOLOGY, |insights| {
        Entry::goal(text, insights, timeframe, Utc::now())
    })
    .await
}

async fn run<F>(
    generator: &dyn TextGenerator,
    store: &Mutex<EntryStore>,
    panel: &Mutex<Panel>,
    prompt: &str,
    apology: &'static str,
    make_entry: F,
) -> Result<ActionOutcome, ActionError>
where
    F: FnOnce(String) -> Entry,
{
    let _busy = BusyGuard::acquire(panel).ok_or(ActionError::Busy)?;
    debug!("Prompt: {prompt}");

    match generator.generate(prompt).await {
        Ok(insights) => {
            lock(panel).output = Some(format_response(&insights));
            let entry = make_entry(insights);
            lock(store).save(entry.clone())?;
            Ok(ActionOutcome::Saved(entry))
        }
        Err(e) => {
            error!("Generation failed: {e}");
            lock(panel).output = Some(apology.to_string());
            Ok(ActionOutcome::Failed)
        }
    }
}
