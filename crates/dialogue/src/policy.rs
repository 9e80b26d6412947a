use crate::preferences::PreferenceState;
use crate::slots::Slot;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;

/// Turn budget for one conversation.
pub const MAX_TURNS: usize = 3;
/// Proactive questions budget; free input may still arrive after the last
/// question.
pub const MAX_QUESTIONS: usize = 2;
/// Filled slots (not topics asked about) that count as "enough to
/// recommend".
pub const MIN_FILLED_FOR_SUFFICIENCY: usize = 5;

/// Where the policy stands. Both terminal states lead to retrieval; the
/// distinction only affects the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyState {
    Collecting,
    Sufficient,
    Exhausted,
}

/// How the next slot to ask about is chosen among the missing ones. The
/// choice is declared configuration, not incidental behavior: `Canonical`
/// walks the fixed slot order, `Random` samples uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AskOrder {
    #[default]
    Canonical,
    Random,
}

/// What the conversation loop should do after a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Ask one generated question about this slot.
    Ask(Slot),
    /// Question budget spent but turns remain; keep accepting free input.
    Listen,
    /// Terminal; proceed to retrieval.
    Done(PolicyState),
}

/// Turn-bounded slot-filling state machine.
///
/// The caller merges extraction output into the `PreferenceState` first and
/// then reports the turn here. The policy tracks turn and question budgets
/// plus the set of slots already asked, and is guaranteed to reach a
/// terminal state within [`MAX_TURNS`] turns no matter what the extractor
/// produced.
#[derive(Debug)]
pub struct DialoguePolicy {
    state: PolicyState,
    order: AskOrder,
    turns: usize,
    questions_asked: usize,
    asked: BTreeSet<Slot>,
}

impl DialoguePolicy {
    #[must_use]
    pub fn new(order: AskOrder) -> Self {
        Self {
            state: PolicyState::Collecting,
            order,
            turns: 0,
            questions_asked: 0,
            asked: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> PolicyState {
        self.state
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self.state, PolicyState::Collecting)
    }

    /// Slots neither filled nor already asked, in canonical order.
    #[must_use]
    pub fn missing(&self, preferences: &PreferenceState) -> Vec<Slot> {
        Slot::ALL
            .into_iter()
            .filter(|slot| !preferences.is_filled(*slot) && !self.asked.contains(slot))
            .collect()
    }

    /// Account for one completed turn of user input and decide what happens
    /// next.
    pub fn record_turn(&mut self, preferences: &PreferenceState) -> TurnOutcome {
        debug_assert!(!self.is_terminal(), "turn recorded after terminal state");
        self.turns += 1;

        let missing = self.missing(preferences);
        if missing.is_empty() || preferences.filled() >= MIN_FILLED_FOR_SUFFICIENCY {
            self.state = PolicyState::Sufficient;
            log::debug!(
                "Dialogue sufficient after {} turns ({} slots filled)",
                self.turns,
                preferences.filled()
            );
            return TurnOutcome::Done(self.state);
        }

        if self.turns >= MAX_TURNS {
            self.state = PolicyState::Exhausted;
            log::debug!(
                "Turn budget exhausted with {} slots filled",
                preferences.filled()
            );
            return TurnOutcome::Done(self.state);
        }

        if self.questions_asked < MAX_QUESTIONS {
            let slot = match self.order {
                AskOrder::Canonical => missing[0],
                AskOrder::Random => *missing
                    .choose(&mut rand::thread_rng())
                    .unwrap_or(&missing[0]),
            };
            self.asked.insert(slot);
            self.questions_asked += 1;
            return TurnOutcome::Ask(slot);
        }

        TurnOutcome::Listen
    }
}

impl Default for DialoguePolicy {
    fn default() -> Self {
        Self::new(AskOrder::Canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled(slots: &[(Slot, &str)]) -> PreferenceState {
        let mut state = PreferenceState::new();
        for (slot, value) in slots {
            state.set(*slot, *value);
        }
        state
    }

    #[test]
    fn asks_next_canonical_slot_without_repeating() {
        let mut policy = DialoguePolicy::default();
        let prefs = filled(&[(Slot::Brand, "Dell")]);

        // One filled slot, plenty of turns left: still collecting, and the
        // next question targets ram, not brand again.
        assert_eq!(policy.record_turn(&prefs), TurnOutcome::Ask(Slot::Ram));
        assert_eq!(policy.state(), PolicyState::Collecting);

        assert_eq!(policy.record_turn(&prefs), TurnOutcome::Ask(Slot::Processor));
    }

    #[test]
    fn five_filled_slots_are_sufficient() {
        let mut policy = DialoguePolicy::default();
        let prefs = filled(&[
            (Slot::Brand, "Dell"),
            (Slot::Ram, "16GB"),
            (Slot::Price, "$1500"),
            (Slot::Os, "Windows"),
            (Slot::Purpose, "Gaming"),
        ]);

        assert_eq!(
            policy.record_turn(&prefs),
            TurnOutcome::Done(PolicyState::Sufficient)
        );
        assert!(policy.is_terminal());
    }

    #[test]
    fn terminates_within_turn_budget_on_empty_extraction() {
        let mut policy = DialoguePolicy::default();
        let prefs = PreferenceState::new();

        assert!(matches!(policy.record_turn(&prefs), TurnOutcome::Ask(_)));
        assert!(matches!(policy.record_turn(&prefs), TurnOutcome::Ask(_)));
        assert_eq!(
            policy.record_turn(&prefs),
            TurnOutcome::Done(PolicyState::Exhausted)
        );
    }

    #[test]
    fn stops_asking_after_question_budget() {
        let mut policy = DialoguePolicy::default();
        let prefs = PreferenceState::new();

        let mut questions = 0;
        for _ in 0..MAX_TURNS {
            match policy.record_turn(&prefs) {
                TurnOutcome::Ask(_) => questions += 1,
                TurnOutcome::Listen | TurnOutcome::Done(_) => {}
            }
        }
        assert_eq!(questions, MAX_QUESTIONS);
        assert!(policy.is_terminal());
    }

    #[test]
    fn random_order_picks_a_missing_slot() {
        let mut policy = DialoguePolicy::new(AskOrder::Random);
        let prefs = filled(&[(Slot::Brand, "Dell"), (Slot::Ram, "16GB")]);

        match policy.record_turn(&prefs) {
            TurnOutcome::Ask(slot) => {
                assert!(slot != Slot::Brand && slot != Slot::Ram);
            }
            other => panic!("expected a question, got {other:?}"),
        }
    }

    #[test]
    fn asked_slots_leave_the_missing_set() {
        let mut policy = DialoguePolicy::default();
        let prefs = PreferenceState::new();

        assert_eq!(policy.record_turn(&prefs), TurnOutcome::Ask(Slot::Brand));
        let missing = policy.missing(&prefs);
        assert!(!missing.contains(&Slot::Brand));
        assert_eq!(missing.len(), Slot::ALL.len() - 1);
    }

    #[test]
    fn all_slots_covered_is_sufficient_even_below_minimum() {
        // Every slot either filled or asked: nothing left to ask about.
        let mut policy = DialoguePolicy::default();
        let mut prefs = PreferenceState::new();
        for slot in Slot::ALL {
            prefs.set(slot, "x");
        }
        assert_eq!(
            policy.record_turn(&prefs),
            TurnOutcome::Done(PolicyState::Sufficient)
        );
    }
}
