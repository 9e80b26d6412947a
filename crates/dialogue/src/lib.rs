//! # Advisor Dialogue
//!
//! The slot-filling side of the advisor: a closed set of laptop preference
//! slots, a strongly-typed preference state with merge semantics, two
//! interchangeable preference extractors (rule-based and service-backed), a
//! turn-bounded dialogue policy deciding when to keep asking and when to
//! stop, question generation for the next missing slot, and deterministic
//! rendering of collected preferences into a retrieval query.

mod error;
mod extract;
mod policy;
mod preferences;
mod query;
mod questions;
mod slots;

pub use error::{DialogueError, Result};
pub use extract::{PreferenceExtractor, RuleBasedExtractor, ServiceBackedExtractor};
pub use policy::{
    AskOrder, DialoguePolicy, PolicyState, TurnOutcome, MAX_QUESTIONS, MAX_TURNS,
    MIN_FILLED_FOR_SUFFICIENCY,
};
pub use preferences::PreferenceState;
pub use query::render_query;
pub use questions::{QuestionGenerator, ServiceQuestions, TemplateQuestions, FALLBACK_QUESTION};
pub use slots::Slot;
