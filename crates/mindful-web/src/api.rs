//! REST API endpoint handlers.
//!
//! The page calls these instead of the generation API directly: the two
//! POST endpoints run a journal action and answer with everything the page
//! needs to redraw (output region markup plus the re-rendered entry list).

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use mindful::format::format_response;
use mindful::ui::{ActionError, ActionOutcome, GOAL_APOLOGY, Journal, Panel, REFLECTION_APOLOGY};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error};

use crate::view::SharedHtml;

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Shared application state passed to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub journal: Arc<Journal>,
    pub rendered: SharedHtml,
}

/// GET /: The single-page UI.
pub async fn get_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /api/entries: Rendered entry list plus the raw entries, newest first.
pub async fn get_entries(State(app): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "html": app.rendered.get(),
        "entries": app.journal.entries(),
    }))
}

/// Serialized view of one action panel.
#[derive(Serialize)]
pub struct PanelSnapshot {
    pub label: &'static str,
    pub idle_label: &'static str,
    pub busy_label: &'static str,
    pub disabled: bool,
    pub output: Option<String>,
}

impl From<Panel> for PanelSnapshot {
    fn from(panel: Panel) -> Self {
        Self {
            label: panel.control.label(),
            idle_label: panel.control.idle_label(),
            busy_label: panel.control.busy_label(),
            disabled: panel.control.is_disabled(),
            output: panel.output,
        }
    }
}

/// GET /api/panels: Control labels, busy flags and output of both panels.
pub async fn get_panels(State(app): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "reflection": PanelSnapshot::from(app.journal.reflection_panel()),
        "goal": PanelSnapshot::from(app.journal.goal_panel()),
    }))
}

/// Request body for POST /api/reflection.
#[derive(Deserialize)]
pub struct ReflectionRequest {
    #[serde(default)]
    pub reflection: String,
}

/// POST /api/reflection: Get insights on a daily reflection.
pub async fn post_reflection(
    State(app): State<AppState>,
    Json(body): Json<ReflectionRequest>,
) -> Response {
    debug!("Reflection request ({} bytes)", body.reflection.len());
    let result = app.journal.reflect(&body.reflection).await;
    action_response(result, REFLECTION_APOLOGY, &app.rendered)
}

/// Request body for POST /api/goal.
#[derive(Deserialize)]
pub struct GoalRequest {
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub timeframe: String,
}

/// POST /api/goal: Get an action plan for a goal.
pub async fn post_goal(State(app): State<AppState>, Json(body): Json<GoalRequest>) -> Response {
    debug!(
        "Goal request ({} bytes, timeframe {:?})",
        body.goal.len(),
        body.timeframe
    );
    let result = app.journal.plan_goal(&body.goal, &body.timeframe).await;
    action_response(result, GOAL_APOLOGY, &app.rendered)
}

/// Map an action result to a status code and JSON body.
///
/// - 200 `{status, output, entries_html}` when the call ran (saved or failed)
/// - 400 `{error}` with the alert text on empty input
/// - 409 `{error}` while the same panel is busy
/// - 500 `{error}` when the entry could not be stored
fn action_response(
    result: Result<ActionOutcome, ActionError>,
    apology: &str,
    rendered: &SharedHtml,
) -> Response {
    let (status, output) = match result {
        Ok(ActionOutcome::Saved(entry)) => ("saved", format_response(&entry.insights)),
        Ok(ActionOutcome::Failed) => ("failed", apology.to_string()),
        Err(e) => {
            let code = match e {
                ActionError::EmptyInput(_) => StatusCode::BAD_REQUEST,
                ActionError::Busy => StatusCode::CONFLICT,
                ActionError::Storage(_) => {
                    error!("Failed to store entry: {e}");
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            return (code, Json(json!({ "error": e.to_string() }))).into_response();
        }
    };
    Json(json!({
        "status": status,
        "output": output,
        "entries_html": rendered.get(),
    }))
    .into_response()
}
