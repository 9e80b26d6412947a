use crate::slots::Slot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Collected user preferences, one value per filled slot.
///
/// Values are always non-empty: the merge policy is that a non-empty
/// incoming value replaces the old one, while absent or empty incoming
/// values never erase something already known. Conversation-local; created
/// at session start and discarded at session end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceState {
    values: BTreeMap<Slot, String>,
}

impl PreferenceState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.values.get(&slot).map(String::as_str)
    }

    #[must_use]
    pub fn is_filled(&self, slot: Slot) -> bool {
        self.values.contains_key(&slot)
    }

    /// Store a value; blank input is ignored so a present value is never
    /// reverted to empty.
    pub fn set(&mut self, slot: Slot, value: impl Into<String>) {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return;
        }
        self.values.insert(slot, trimmed.to_string());
    }

    /// Merge another state into this one under the non-empty-overwrite
    /// policy. Merging a state with itself is a no-op.
    pub fn merge(&mut self, other: &PreferenceState) {
        for (slot, value) in &other.values {
            self.set(*slot, value.clone());
        }
    }

    /// Merge loosely-keyed pairs, as returned by the text-generation
    /// service. Keys are case-normalized and matched through
    /// [`Slot::parse`]; unknown keys are dropped with a debug log.
    pub fn ingest_raw<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in entries {
            match Slot::parse(key.as_ref()) {
                Some(slot) => self.set(slot, value.as_ref()),
                None => log::debug!("Ignoring unknown preference key '{}'", key.as_ref()),
            }
        }
    }

    /// Number of filled slots.
    #[must_use]
    pub fn filled(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Filled slots in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &str)> {
        Slot::ALL
            .into_iter()
            .filter_map(|slot| self.get(slot).map(|value| (slot, value)))
    }

    /// Numbered list for the transcript:
    ///
    /// ```text
    /// 1. Brand: Dell
    /// 2. Ram: 16GB
    /// ```
    #[must_use]
    pub fn summary(&self) -> String {
        self.iter()
            .enumerate()
            .map(|(i, (slot, value))| format!("{}. {}: {}", i + 1, slot.label(), value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// One-line form used in the reasoning sentence: `brand: Dell, ram: 16GB`.
    #[must_use]
    pub fn inline_summary(&self) -> String {
        self.iter()
            .map(|(slot, value)| format!("{}: {}", slot.key().replace('_', " "), value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn merge_with_self_is_idempotent() {
        let mut state = PreferenceState::new();
        state.set(Slot::Brand, "Dell");
        state.set(Slot::Ram, "16GB");

        let copy = state.clone();
        state.merge(&copy);
        assert_eq!(state, copy);
    }

    #[test]
    fn non_empty_value_overwrites() {
        let mut state = PreferenceState::new();
        state.set(Slot::Brand, "Dell");
        state.set(Slot::Brand, "Asus");
        assert_eq!(state.get(Slot::Brand), Some("Asus"));
    }

    #[test]
    fn empty_value_never_erases() {
        let mut state = PreferenceState::new();
        state.set(Slot::Brand, "Dell");
        state.set(Slot::Brand, "   ");
        assert_eq!(state.get(Slot::Brand), Some("Dell"));
    }

    #[test]
    fn ingest_raw_normalizes_and_drops_unknown_keys() {
        let mut state = PreferenceState::new();
        state.ingest_raw([
            ("Budget", "$1500"),
            ("GRAPHICS CARD", "Nvidia"),
            ("shoe_size", "42"),
        ]);
        assert_eq!(state.get(Slot::Price), Some("$1500"));
        assert_eq!(state.get(Slot::GpuBrand), Some("Nvidia"));
        assert_eq!(state.filled(), 2);
    }

    #[test]
    fn summary_numbers_filled_slots_in_canonical_order() {
        let mut state = PreferenceState::new();
        state.set(Slot::Purpose, "Gaming");
        state.set(Slot::Brand, "Dell");
        assert_eq!(state.summary(), "1. Brand: Dell\n2. Purpose: Gaming");
    }

    #[test]
    fn serializes_as_flat_map() {
        let mut state = PreferenceState::new();
        state.set(Slot::Brand, "Dell");
        state.set(Slot::GpuBrand, "Nvidia");
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["brand"], "Dell");
        assert_eq!(json["gpu_brand"], "Nvidia");
    }
}
