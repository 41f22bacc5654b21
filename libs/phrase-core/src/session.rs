//! A study session over one deck: draws cards and commits their outcomes.

use crate::card::{CardAction, CardState, Presentation};
use crate::clock::Clock;
use crate::error::{CoreError, Result};
use crate::library::{Applied, Library};
use crate::queue::{self, Draw, ReorderPolicy};
use crate::types::StudySessionResult;

/// Outcome of a terminal action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completed {
    pub result: StudySessionResult,
    pub elapsed_seconds: u64,
    pub applied: Applied,
}

/// State after a learner action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub phrase_id: String,
    pub state: CardState,
    /// Set when the action ended the presentation.
    pub completed: Option<Completed>,
}

/// Single active study session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudySession {
    deck_id: String,
    active: Option<Presentation>,
}

impl StudySession {
    /// Begin studying `deck_id`, reseeding its queue if exhausted.
    pub fn start(library: &mut Library, deck_id: &str) -> Result<Self> {
        library.start_session(deck_id)?;
        Ok(Self {
            deck_id: deck_id.to_string(),
            active: None,
        })
    }

    pub fn deck_id(&self) -> &str {
        &self.deck_id
    }

    /// Card currently being presented.
    pub fn active(&self) -> Option<&Presentation> {
        self.active.as_ref()
    }

    /// Present the queue head, or keep presenting the active card.
    pub fn draw<'a>(&mut self, library: &'a Library) -> Result<Draw<'a>> {
        let deck = library
            .deck(&self.deck_id)
            .ok_or_else(|| CoreError::DeckNotFound(self.deck_id.clone()))?;

        let active_id = self.active.as_ref().map(|p| p.phrase_id().to_string());
        if let Some(id) = active_id {
            match deck.phrase(&id) {
                Some(phrase) => return Ok(Draw::Card(phrase)),
                // Phrase vanished under us (deck replaced); present the new head.
                None => self.active = None,
            }
        }

        let draw = queue::draw(deck)?;
        if let Draw::Card(phrase) = draw {
            self.active = Some(Presentation::new(phrase.id.clone()));
        }
        Ok(draw)
    }

    /// Drive the active card. A terminal action commits its outcome to `library`.
    ///
    /// On error neither the card nor the library changes.
    pub fn act(
        &mut self,
        library: &mut Library,
        action: CardAction,
        elapsed_seconds: u64,
        policy: &dyn ReorderPolicy,
        clock: &dyn Clock,
    ) -> Result<Step> {
        let mut next = self.active.clone().ok_or(CoreError::NoActiveCard)?;
        let emitted = next.apply_timed(action, elapsed_seconds)?;
        let phrase_id = next.phrase_id().to_string();
        let state = next.state();

        let Some(result) = emitted else {
            self.active = Some(next);
            return Ok(Step {
                phrase_id,
                state,
                completed: None,
            });
        };

        let elapsed_seconds = next.elapsed_seconds();
        let applied = library.apply_result(&self.deck_id, &result, elapsed_seconds, policy, clock)?;
        self.active = None;

        Ok(Step {
            phrase_id,
            state,
            completed: Some(Completed {
                result,
                elapsed_seconds,
                applied,
            }),
        })
    }

    /// Drop the active card without recording anything.
    pub fn abandon(&mut self) -> Option<Presentation> {
        self.active.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::queue::{Placement, StreakPolicy};
    use crate::types::{Deck, Phrase};
    use chrono::{TimeZone, Utc};

    fn setup() -> (Library, FixedClock) {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 2, 0, 0).unwrap());
        let mut library = Library::new(clock.today());
        library
            .add_deck(Deck::with_phrases(
                "d1",
                "Greetings",
                vec![Phrase::new("a", "你好", "hello"), Phrase::new("b", "谢谢", "thanks")],
            ))
            .unwrap();
        (library, clock)
    }

    fn policy() -> StreakPolicy {
        StreakPolicy {
            reinsertion_distance: 1,
            mastery_threshold: 1,
        }
    }

    fn drawn_id(draw: Draw<'_>) -> String {
        match draw {
            Draw::Card(phrase) => phrase.id.clone(),
            Draw::Exhausted => panic!("expected a card"),
        }
    }

    #[test]
    fn full_pass_through_deck() {
        let (mut library, clock) = setup();
        let mut session = StudySession::start(&mut library, "d1").unwrap();

        assert_eq!(drawn_id(session.draw(&library).unwrap()), "a");
        let step = session
            .act(&mut library, CardAction::DontKnow, 3, &policy(), &clock)
            .unwrap();
        assert_eq!(step.state, CardState::Missed);
        assert!(step.completed.is_none());

        let step = session
            .act(&mut library, CardAction::Advance, 2, &policy(), &clock)
            .unwrap();
        let completed = step.completed.unwrap();
        assert_eq!(completed.result, StudySessionResult::new("a", false));
        assert_eq!(completed.elapsed_seconds, 5);
        assert!(matches!(
            completed.applied,
            Applied::Recorded { placement: Placement::Requeued { position: 1 }, .. }
        ));
        assert!(session.active().is_none());
        assert_eq!(library.deck("d1").unwrap().queue, vec!["b", "a"]);

        for expected in ["b", "a"] {
            assert_eq!(drawn_id(session.draw(&library).unwrap()), expected);
            session
                .act(&mut library, CardAction::Know, 1, &policy(), &clock)
                .unwrap();
            session
                .act(&mut library, CardAction::MarkCorrect, 1, &policy(), &clock)
                .unwrap();
        }

        assert_eq!(session.draw(&library).unwrap(), Draw::Exhausted);
        assert_eq!(library.stats().daily.review_count, 3);
        assert_eq!(library.stats().daily.study_time_seconds, 9);
        assert_eq!(library.stats().daily.reviewed_phrase_ids, vec!["a", "b"]);
    }

    #[test]
    fn redraw_keeps_active_card() {
        let (mut library, clock) = setup();
        let mut session = StudySession::start(&mut library, "d1").unwrap();
        session.draw(&library).unwrap();
        session
            .act(&mut library, CardAction::Know, 1, &policy(), &clock)
            .unwrap();

        assert_eq!(drawn_id(session.draw(&library).unwrap()), "a");
        assert_eq!(session.active().unwrap().state(), CardState::Verifying);
    }

    #[test]
    fn abandoned_card_records_nothing() {
        let (mut library, clock) = setup();
        let before = library.clone();
        let mut session = StudySession::start(&mut library, "d1").unwrap();
        session.draw(&library).unwrap();
        session
            .act(&mut library, CardAction::Know, 4, &policy(), &clock)
            .unwrap();

        let dropped = session.abandon().unwrap();
        assert_eq!(dropped.phrase_id(), "a");
        assert_eq!(library, before);

        let err = session
            .act(&mut library, CardAction::MarkCorrect, 1, &policy(), &clock)
            .unwrap_err();
        assert_eq!(err, CoreError::NoActiveCard);

        // The next draw starts the same phrase over from Hidden.
        assert_eq!(drawn_id(session.draw(&library).unwrap()), "a");
        assert_eq!(session.active().unwrap().state(), CardState::Hidden);
    }

    #[test]
    fn rejected_action_keeps_card() {
        let (mut library, clock) = setup();
        let mut session = StudySession::start(&mut library, "d1").unwrap();
        session.draw(&library).unwrap();
        session
            .act(&mut library, CardAction::DontKnow, 1, &policy(), &clock)
            .unwrap();

        let err = session
            .act(&mut library, CardAction::MarkCorrect, 1, &policy(), &clock)
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition { .. }));
        assert_eq!(session.active().unwrap().state(), CardState::Missed);
        assert_eq!(library.stats().total_review_count, 0);
    }

    #[test]
    fn exhausted_deck_reseeds_on_start() {
        let (mut library, clock) = setup();
        let mut session = StudySession::start(&mut library, "d1").unwrap();
        for _ in 0..2 {
            session.draw(&library).unwrap();
            session
                .act(&mut library, CardAction::Know, 1, &policy(), &clock)
                .unwrap();
            session
                .act(&mut library, CardAction::MarkCorrect, 1, &policy(), &clock)
                .unwrap();
        }
        assert_eq!(session.draw(&library).unwrap(), Draw::Exhausted);

        let mut session = StudySession::start(&mut library, "d1").unwrap();
        assert_eq!(drawn_id(session.draw(&library).unwrap()), "a");
    }

    #[test]
    fn missing_deck() {
        let (mut library, _) = setup();
        assert_eq!(
            StudySession::start(&mut library, "zzz").unwrap_err(),
            CoreError::DeckNotFound("zzz".to_string())
        );
    }
}
