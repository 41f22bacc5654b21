//! Error types for phrase-core.

use chrono::NaiveDate;
use thiserror::Error;

use crate::card::{CardAction, CardState};

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invariant violation: {0}")]
    InvariantViolation(#[from] Violation),

    #[error("cannot {action} a card that is {state}")]
    InvalidTransition { state: CardState, action: CardAction },

    #[error("presentation of phrase {phrase_id} has already finished")]
    PresentationFinished { phrase_id: String },

    #[error("no card is being presented")]
    NoActiveCard,

    #[error("deck not found: {0}")]
    DeckNotFound(String),

    #[error("deck already exists: {0}")]
    DuplicateDeck(String),

    #[error("phrase {phrase_id} not found in deck {deck_id}")]
    PhraseNotFound { deck_id: String, phrase_id: String },
}

/// Stored state that breaks a data model invariant. Indicates upstream corruption.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("phrase {phrase_id} has both streaks positive ({correct} correct, {wrong} wrong)")]
    ConflictingStreaks {
        phrase_id: String,
        correct: u32,
        wrong: u32,
    },

    #[error("phrase {phrase_id} has a streak of {streak} but only {total_reviews} reviews")]
    StreakExceedsReviews {
        phrase_id: String,
        streak: u32,
        total_reviews: u32,
    },

    #[error("queue of deck {deck_id} references unknown phrase {phrase_id}")]
    UnknownQueueEntry { deck_id: String, phrase_id: String },

    #[error("queue of deck {deck_id} lists phrase {phrase_id} more than once")]
    DuplicateQueueEntry { deck_id: String, phrase_id: String },

    #[error("deck {deck_id} contains phrase {phrase_id} more than once")]
    DuplicatePhrase { deck_id: String, phrase_id: String },

    #[error("daily stats for {date} count {review_count} reviews but {correct_count} correct and {wrong_count} wrong")]
    InconsistentDailyStats {
        date: NaiveDate,
        review_count: u32,
        correct_count: u32,
        wrong_count: u32,
    },

    #[error("daily stats for {date} list phrase {phrase_id} more than once")]
    DuplicateReviewedPhrase { date: NaiveDate, phrase_id: String },
}
