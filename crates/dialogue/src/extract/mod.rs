use crate::error::Result;
use crate::preferences::PreferenceState;
use async_trait::async_trait;

mod rules;
mod service;

pub use rules::RuleBasedExtractor;
pub use service::ServiceBackedExtractor;

/// Maps one user utterance plus the prior preference state to an updated
/// state. The two implementations are interchangeable: local keyword
/// heuristics, or delegation to the hosted text-generation service.
///
/// Implementations must uphold the merge policy: a slot already filled in
/// `prior` may only be replaced by a non-empty value, never erased.
#[async_trait]
pub trait PreferenceExtractor: Send + Sync {
    async fn extract(&self, utterance: &str, prior: &PreferenceState) -> Result<PreferenceState>;
}
