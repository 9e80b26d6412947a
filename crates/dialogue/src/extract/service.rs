use crate::error::Result;
use crate::extract::PreferenceExtractor;
use crate::preferences::PreferenceState;
use advisor_llm::ChatClient;
use async_trait::async_trait;
use serde_json::Value;

const SYSTEM_PROMPT: &str =
    "You are a knowledgeable assistant extracting laptop specifications from user input.";

/// Extractor delegating to the hosted text-generation service.
///
/// The service sees the preferences collected so far plus the latest
/// utterance and is asked for a flat JSON object. Replies are parsed
/// defensively: code fences are stripped, the outermost braces located,
/// unknown keys dropped. A reply that cannot be parsed leaves the prior
/// state unchanged (logged, never fatal). Transport errors propagate to the
/// caller, which keeps the prior state as well.
pub struct ServiceBackedExtractor {
    client: ChatClient,
}

impl ServiceBackedExtractor {
    #[must_use]
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PreferenceExtractor for ServiceBackedExtractor {
    async fn extract(&self, utterance: &str, prior: &PreferenceState) -> Result<PreferenceState> {
        let prompt = build_prompt(utterance, prior)?;
        let reply = self.client.complete(SYSTEM_PROMPT, &prompt).await?;
        Ok(merge_reply(&reply, prior))
    }
}

fn build_prompt(utterance: &str, prior: &PreferenceState) -> Result<String> {
    let known = serde_json::to_string(prior)?;
    Ok(format!(
        "User has provided the following laptop specifications so far: {known}.\n\
         The latest input is: \"{utterance}\".\n\
         Please extract specifications such as brand, budget, RAM, processor, storage, \
         graphics card, and purpose from the latest input.\n\
         Recognize inputs like \"gaming laptop\" or \"for gaming\" as the purpose being \"gaming\".\n\
         Merge the extracted specifications with the existing specs and return a single flat \
         JSON object with all keys lowercased.\n\
         Do not include any extra text or explanations."
    ))
}

/// Fold a service reply into the prior state; on any parse failure the
/// prior state is returned unchanged.
fn merge_reply(reply: &str, prior: &PreferenceState) -> PreferenceState {
    match parse_object(reply) {
        Some(entries) => {
            let mut state = prior.clone();
            state.ingest_raw(entries);
            state
        }
        None => {
            log::warn!("Could not parse extraction reply; keeping previous preferences");
            log::debug!("Unparseable extraction reply: {reply}");
            prior.clone()
        }
    }
}

/// Pull a flat string/number map out of free text: tolerate markdown code
/// fences and prose around the object, take the outermost `{...}` span,
/// ignore nested or non-scalar values.
fn parse_object(reply: &str) -> Option<Vec<(String, String)>> {
    let open = reply.find('{')?;
    let close = reply.rfind('}')?;
    if close < open {
        return None;
    }
    let object: serde_json::Map<String, Value> = serde_json::from_str(&reply[open..=close]).ok()?;

    let entries = object
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(text) => Some((key, text)),
            Value::Number(number) => Some((key, number.to_string())),
            _ => None,
        })
        .collect();
    Some(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::Slot;
    use pretty_assertions::assert_eq;

    fn prior() -> PreferenceState {
        let mut state = PreferenceState::new();
        state.set(Slot::Brand, "Dell");
        state
    }

    #[test]
    fn plain_json_reply_merges() {
        let state = merge_reply(r#"{"ram": "32GB", "purpose": "gaming"}"#, &prior());
        assert_eq!(state.get(Slot::Brand), Some("Dell"));
        assert_eq!(state.get(Slot::Ram), Some("32GB"));
        assert_eq!(state.get(Slot::Purpose), Some("gaming"));
    }

    #[test]
    fn fenced_reply_is_tolerated() {
        let reply = "Sure! Here you go:\n```json\n{\"budget\": \"$1500\"}\n```";
        let state = merge_reply(reply, &prior());
        assert_eq!(state.get(Slot::Price), Some("$1500"));
    }

    #[test]
    fn numeric_values_are_stringified() {
        let state = merge_reply(r#"{"ram": 16, "screen_size": 15.6}"#, &prior());
        assert_eq!(state.get(Slot::Ram), Some("16"));
        assert_eq!(state.get(Slot::ScreenSize), Some("15.6"));
    }

    #[test]
    fn garbage_reply_keeps_prior_state() {
        let before = prior();
        let state = merge_reply("I couldn't find any specifications, sorry!", &before);
        assert_eq!(state, before);
    }

    #[test]
    fn null_and_nested_values_are_ignored() {
        let state = merge_reply(
            r#"{"ram": null, "brand": "Asus", "extras": {"color": "red"}}"#,
            &prior(),
        );
        assert_eq!(state.get(Slot::Brand), Some("Asus"));
        assert!(!state.is_filled(Slot::Ram));
    }

    #[test]
    fn prompt_carries_prior_state_and_utterance() {
        let prompt = build_prompt("something for gaming", &prior()).unwrap();
        assert!(prompt.contains("\"brand\":\"Dell\""));
        assert!(prompt.contains("something for gaming"));
    }
}
