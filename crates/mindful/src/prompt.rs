//! Prompt builders for the two journal actions.
//!
//! Both builders interpolate the user's text verbatim inside double quotes.
//! Nothing is escaped: a quote in the input ends up inside the instruction
//! exactly as typed.

use serde::{Deserialize, Serialize};

/// Coarse duration bucket attached to a goal.
///
/// Serialized with the same codes the timeframe selector uses
/// (`short-term`, `medium-term`, `long-term`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Timeframe {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Self::ShortTerm, Self::MediumTerm, Self::LongTerm];

    /// Parse a selector code. Unknown codes yield `None`.
    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::ShortTerm => "short-term",
            Self::MediumTerm => "medium-term",
            Self::LongTerm => "long-term",
        }
    }

    /// Human phrase inserted into the goal prompt.
    pub fn phrase(self) -> &'static str {
        match self {
            Self::ShortTerm => "this week",
            Self::MediumTerm => "this month",
            Self::LongTerm => "this year",
        }
    }

    /// Option label shown in the selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::ShortTerm => "Short-term (this week)",
            Self::MediumTerm => "Medium-term (this month)",
            Self::LongTerm => "Long-term (this year)",
        }
    }
}

/// Map a selector code to its prompt phrase; unrecognized codes map to `""`.
pub fn timeframe_phrase(code: &str) -> &'static str {
    Timeframe::parse(code).map_or("", Timeframe::phrase)
}

/// Prompt asking for a short, warm reply to a daily reflection.
pub fn reflection_prompt(reflection: &str) -> String {
    format!(
        "Respond to this daily reflection in a warm, conversational tone (3-4 sentences): \"{reflection}\""
    )
}

/// Prompt asking for a 4-5 step action plan for a goal.
///
/// With an unrecognized timeframe code the phrase is empty and the prompt
/// keeps the doubled space (`for this  goal`).
pub fn goal_prompt(goal: &str, timeframe_code: &str) -> String {
    let phrase = timeframe_phrase(timeframe_code);
    format!("Create a simple action plan (4-5 steps) for this {phrase} goal: \"{goal}\"")
}
