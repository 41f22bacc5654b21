//! Deck review queue: reordering policies and queue bookkeeping.

pub mod streak;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::Violation;
use crate::types::{Deck, EffectiveSettings, Phrase};

pub use streak::StreakPolicy;

/// Where an answered phrase ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    /// Missed; reinserted at `position` (0 is the front).
    Requeued { position: usize },
    /// Answered correctly; moved to the back.
    Appended,
    /// Reached the mastery threshold; removed from the queue.
    Retired,
}

/// A reorder request that did not match the queue front.
///
/// Usually a stale reference from the caller rather than corrupted storage,
/// so it is reported instead of raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoOpReorder {
    pub phrase_id: String,
    /// Id currently at the front, if any.
    pub front: Option<String>,
    /// Whether the id appears somewhere else in the queue.
    pub queued_elsewhere: bool,
}

/// Result of a reorder.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reorder {
    Moved { queue: Vec<String>, placement: Placement },
    NoOp(NoOpReorder),
}

/// Trait for queue reordering policies.
pub trait ReorderPolicy: Send + Sync {
    /// Policy identifier.
    fn name(&self) -> &'static str;

    /// Compute the queue after answering the phrase at its front.
    ///
    /// `streak` is the phrase's correct streak after the answer was recorded.
    fn reorder(&self, queue: &[String], phrase_id: &str, correct: bool, streak: u32) -> Reorder;
}

/// Build the policy configured by `settings`.
pub fn policy_for(settings: &EffectiveSettings) -> Box<dyn ReorderPolicy> {
    Box::new(StreakPolicy::from(settings))
}

/// Report for a phrase id that is not at the queue front.
pub(crate) fn not_at_front(queue: &[String], phrase_id: &str) -> NoOpReorder {
    NoOpReorder {
        phrase_id: phrase_id.to_string(),
        front: queue.first().cloned(),
        queued_elsewhere: queue.iter().any(|id| id == phrase_id),
    }
}

/// Queue in canonical phrase order.
pub fn seed(deck: &Deck) -> Vec<String> {
    deck.phrases.iter().map(|p| p.id.clone()).collect()
}

/// Reseed the queue if it is exhausted. Returns whether it was reseeded.
pub fn start(deck: &mut Deck) -> bool {
    if !deck.queue.is_empty() {
        return false;
    }
    deck.queue = seed(deck);
    !deck.queue.is_empty()
}

/// Next card to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Draw<'a> {
    Card(&'a Phrase),
    /// The queue is empty: the session is complete.
    Exhausted,
}

/// Look at the queue head.
pub fn draw(deck: &Deck) -> Result<Draw<'_>, Violation> {
    let Some(head) = deck.queue.first() else {
        return Ok(Draw::Exhausted);
    };
    deck.phrase(head)
        .map(Draw::Card)
        .ok_or_else(|| Violation::UnknownQueueEntry {
            deck_id: deck.id.clone(),
            phrase_id: head.clone(),
        })
}

/// Check phrase uniqueness and that the queue only references known phrases once.
pub fn validate(deck: &Deck) -> Result<(), Violation> {
    let mut phrase_ids = HashSet::new();
    for phrase in &deck.phrases {
        if !phrase_ids.insert(phrase.id.as_str()) {
            return Err(Violation::DuplicatePhrase {
                deck_id: deck.id.clone(),
                phrase_id: phrase.id.clone(),
            });
        }
    }

    let mut queued = HashSet::new();
    for id in &deck.queue {
        if !phrase_ids.contains(id.as_str()) {
            return Err(Violation::UnknownQueueEntry {
                deck_id: deck.id.clone(),
                phrase_id: id.clone(),
            });
        }
        if !queued.insert(id.as_str()) {
            return Err(Violation::DuplicateQueueEntry {
                deck_id: deck.id.clone(),
                phrase_id: id.clone(),
            });
        }
    }

    Ok(())
}
