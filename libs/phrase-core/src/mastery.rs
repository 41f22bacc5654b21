//! Phrase mastery tracking.
//!
//! A phrase carries two mutually exclusive streaks. Every answer extends one
//! and resets the other.

use chrono::{DateTime, Utc};

use crate::error::Violation;
use crate::types::Phrase;

/// Record one answer against `phrase`.
pub fn update(phrase: &Phrase, correct: bool, now: DateTime<Utc>) -> Phrase {
    let mut next = phrase.clone();
    if correct {
        next.consecutive_correct = phrase.consecutive_correct.saturating_add(1);
        next.consecutive_wrong = 0;
    } else {
        next.consecutive_wrong = phrase.consecutive_wrong.saturating_add(1);
        next.consecutive_correct = 0;
    }
    next.total_reviews = phrase.total_reviews.saturating_add(1);
    next.last_reviewed_at = Some(now);
    next
}

/// Check the streak invariants of a stored phrase.
pub fn validate(phrase: &Phrase) -> Result<(), Violation> {
    if phrase.consecutive_correct > 0 && phrase.consecutive_wrong > 0 {
        return Err(Violation::ConflictingStreaks {
            phrase_id: phrase.id.clone(),
            correct: phrase.consecutive_correct,
            wrong: phrase.consecutive_wrong,
        });
    }

    let streak = phrase.consecutive_correct.max(phrase.consecutive_wrong);
    if streak > phrase.total_reviews {
        return Err(Violation::StreakExceedsReviews {
            phrase_id: phrase.id.clone(),
            streak,
            total_reviews: phrase.total_reviews,
        });
    }

    Ok(())
}
