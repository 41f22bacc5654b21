//! Card lifecycle state machine for a single presentation.
//!
//! ```text
//! Hidden --know-------> Verifying --mark_correct/mark_incorrect--> Reviewed (emits)
//! Hidden --dont_know--> Missed    --advance--------------------> (emits wrong)
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::types::StudySessionResult;

/// Card presentation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardState {
    /// Only the front face is shown.
    Hidden,
    /// Learner claimed to know it; back face shown, waiting for a self-grade.
    Verifying,
    /// Learner admitted not knowing it; back face shown, waiting to advance.
    Missed,
    /// Self-graded.
    Reviewed,
}

impl CardState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Verifying => "verifying",
            Self::Missed => "missed",
            Self::Reviewed => "reviewed",
        }
    }

    /// Whether the back face is visible in this state.
    pub fn reveals_answer(&self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

impl fmt::Display for CardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Learner input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardAction {
    Know,
    DontKnow,
    MarkCorrect,
    MarkIncorrect,
    Advance,
}

impl CardAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Know => "know",
            Self::DontKnow => "dont_know",
            Self::MarkCorrect => "mark_correct",
            Self::MarkIncorrect => "mark_incorrect",
            Self::Advance => "advance",
        }
    }
}

impl fmt::Display for CardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One phrase's trip through the lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    phrase_id: String,
    state: CardState,
    elapsed_seconds: u64,
    finished: bool,
}

impl Presentation {
    /// Start a presentation in the `Hidden` state.
    pub fn new(phrase_id: impl Into<String>) -> Self {
        Self {
            phrase_id: phrase_id.into(),
            state: CardState::Hidden,
            elapsed_seconds: 0,
            finished: false,
        }
    }

    pub fn phrase_id(&self) -> &str {
        &self.phrase_id
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    /// Study time accumulated across all actions so far.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// True once the single result has been emitted.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Apply a learner action, returning the result on a terminal transition.
    ///
    /// Rejected actions leave the presentation untouched.
    pub fn apply(&mut self, action: CardAction) -> Result<Option<StudySessionResult>> {
        if self.finished {
            return Err(CoreError::PresentationFinished {
                phrase_id: self.phrase_id.clone(),
            });
        }

        let (next, outcome) = match (self.state, action) {
            (CardState::Hidden, CardAction::Know) => (CardState::Verifying, None),
            (CardState::Hidden, CardAction::DontKnow) => (CardState::Missed, None),
            (CardState::Verifying, CardAction::MarkCorrect) => (CardState::Reviewed, Some(true)),
            (CardState::Verifying, CardAction::MarkIncorrect) => {
                (CardState::Reviewed, Some(false))
            }
            (CardState::Missed, CardAction::Advance) => (CardState::Missed, Some(false)),
            (state, action) => return Err(CoreError::InvalidTransition { state, action }),
        };

        self.state = next;
        Ok(outcome.map(|correct| {
            self.finished = true;
            StudySessionResult::new(self.phrase_id.clone(), correct)
        }))
    }

    /// Like [`apply`](Self::apply), also adding `elapsed_seconds` of study time.
    pub fn apply_timed(
        &mut self,
        action: CardAction,
        elapsed_seconds: u64,
    ) -> Result<Option<StudySessionResult>> {
        let result = self.apply(action)?;
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(elapsed_seconds);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn know_then_mark_correct() {
        let mut card = Presentation::new("a");
        assert_eq!(card.apply(CardAction::Know).unwrap(), None);
        assert_eq!(card.state(), CardState::Verifying);

        let result = card.apply(CardAction::MarkCorrect).unwrap();
        assert_eq!(result, Some(StudySessionResult::new("a", true)));
        assert_eq!(card.state(), CardState::Reviewed);
        assert!(card.is_finished());
    }

    #[test]
    fn know_then_mark_incorrect() {
        let mut card = Presentation::new("a");
        card.apply(CardAction::Know).unwrap();
        let result = card.apply(CardAction::MarkIncorrect).unwrap();
        assert_eq!(result, Some(StudySessionResult::new("a", false)));
    }

    #[test]
    fn missed_advances_as_wrong() {
        let mut card = Presentation::new("a");
        assert_eq!(card.apply(CardAction::DontKnow).unwrap(), None);
        assert_eq!(card.state(), CardState::Missed);
        assert!(card.state().reveals_answer());

        let result = card.apply(CardAction::Advance).unwrap();
        assert_eq!(result, Some(StudySessionResult::new("a", false)));
    }

    #[test]
    fn missed_card_cannot_be_graded() {
        let mut card = Presentation::new("a");
        card.apply(CardAction::DontKnow).unwrap();

        let err = card.apply(CardAction::MarkCorrect).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidTransition {
                state: CardState::Missed,
                action: CardAction::MarkCorrect,
            }
        );
        assert_eq!(card.state(), CardState::Missed);
        assert!(!card.is_finished());
    }

    #[test]
    fn hidden_card_cannot_be_graded_or_advanced() {
        let mut card = Presentation::new("a");
        assert!(card.apply(CardAction::MarkCorrect).is_err());
        assert!(card.apply(CardAction::Advance).is_err());
        assert_eq!(card.state(), CardState::Hidden);
    }

    #[test]
    fn terminal_emits_only_once() {
        let mut card = Presentation::new("a");
        card.apply(CardAction::DontKnow).unwrap();
        card.apply(CardAction::Advance).unwrap();

        let err = card.apply(CardAction::Advance).unwrap_err();
        assert!(matches!(err, CoreError::PresentationFinished { .. }));

        let mut card = Presentation::new("b");
        card.apply(CardAction::Know).unwrap();
        card.apply(CardAction::MarkCorrect).unwrap();
        assert!(card.apply(CardAction::MarkIncorrect).is_err());
    }

    #[test]
    fn elapsed_time_accumulates_on_accepted_actions() {
        let mut card = Presentation::new("a");
        card.apply_timed(CardAction::Know, 4).unwrap();
        assert!(card.apply_timed(CardAction::Advance, 100).is_err());
        card.apply_timed(CardAction::MarkCorrect, 3).unwrap();
        assert_eq!(card.elapsed_seconds(), 7);
    }
}
