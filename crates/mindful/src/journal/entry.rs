use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::prompt::Timeframe;

/// Which action produced an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Reflection,
    Goal,
}

impl EntryKind {
    /// Heading shown on the entry card.
    pub fn label(self) -> &'static str {
        match self {
            Self::Reflection => "Reflection",
            Self::Goal => "Goal",
        }
    }
}

/// One journal record. Never mutated after creation.
///
/// The JSON shape matches what the browser version kept in local storage:
/// `{"type", "content", "insights", "timeframe"?, "date"}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// The trimmed user text.
    pub content: String,
    /// Raw generated text, before formatting.
    pub insights: String,
    /// Goals only.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_timeframe"
    )]
    pub timeframe: Option<Timeframe>,
    pub date: DateTime<Utc>,
}

impl Entry {
    pub fn reflection(
        content: impl Into<String>,
        insights: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            kind: EntryKind::Reflection,
            content: content.into(),
            insights: insights.into(),
            timeframe: None,
            date,
        }
    }

    pub fn goal(
        content: impl Into<String>,
        insights: impl Into<String>,
        timeframe: Option<Timeframe>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            kind: EntryKind::Goal,
            content: content.into(),
            insights: insights.into(),
            timeframe,
            date,
        }
    }
}

/// Unknown, empty or `null` timeframe codes load as `None` instead of
/// failing the whole collection. The raw string is not kept, so the next
/// save writes the entry without `timeframe`.
fn lenient_timeframe<'de, D>(deserializer: D) -> Result<Option<Timeframe>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Timeframe::parse))
}
