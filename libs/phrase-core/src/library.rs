//! All decks plus global stats, and the transaction that applies an outcome.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::{CoreError, Result, Violation};
use crate::mastery;
use crate::queue::{self, Draw, NoOpReorder, Placement, Reorder, ReorderPolicy};
use crate::report::{self, DailyReport};
use crate::stats;
use crate::types::{BackupData, DailyStats, Deck, GlobalStats, Phrase, StudySessionResult, BACKUP_VERSION};

/// What happened to a submitted outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Applied {
    /// Phrase, queue and stats were all updated.
    Recorded {
        phrase: Phrase,
        placement: Placement,
        /// Queue length after the reorder. 0 means the session is complete.
        remaining: usize,
    },
    /// The phrase was not at the queue front. Nothing changed.
    Skipped(NoOpReorder),
}

/// In-memory state: every deck and the global stats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    decks: Vec<Deck>,
    stats: GlobalStats,
}

impl Library {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            decks: Vec::new(),
            stats: GlobalStats::new(today),
        }
    }

    /// Load a full snapshot. Any corrupt deck rejects the whole snapshot.
    pub fn from_backup(backup: BackupData) -> Result<Self> {
        let mut stats = backup.stats;
        stats.daily = stats::upgrade_legacy_daily(stats.daily);
        stats::validate_daily(&stats.daily)?;

        let mut library = Self {
            decks: Vec::with_capacity(backup.decks.len()),
            stats,
        };
        for deck in backup.decks {
            library.add_deck(deck)?;
        }
        Ok(library)
    }

    /// Full snapshot taken at `now`.
    pub fn to_backup(&self, now: DateTime<Utc>) -> BackupData {
        BackupData {
            version: BACKUP_VERSION,
            timestamp: now,
            decks: self.decks.clone(),
            stats: self.stats.clone(),
        }
    }

    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    pub fn deck(&self, id: &str) -> Option<&Deck> {
        self.decks.iter().find(|d| d.id == id)
    }

    pub fn stats(&self) -> &GlobalStats {
        &self.stats
    }

    /// Daily stats as they read on `today`, without storing a rollover.
    pub fn daily(&self, today: NaiveDate) -> DailyStats {
        stats::current_daily(&self.stats.daily, today)
    }

    pub fn report(&self, today: NaiveDate) -> DailyReport {
        report::build(&self.daily(today), &self.decks)
    }

    pub fn total_phrases(&self) -> u64 {
        stats::total_phrases(&self.decks)
    }

    /// Add a validated deck.
    pub fn add_deck(&mut self, deck: Deck) -> Result<()> {
        if self.deck(&deck.id).is_some() {
            return Err(CoreError::DuplicateDeck(deck.id));
        }
        validate_deck(&deck)?;
        self.decks.push(deck);
        self.stats.total_phrases_count = self.total_phrases();
        Ok(())
    }

    pub fn remove_deck(&mut self, id: &str) -> Option<Deck> {
        let index = self.decks.iter().position(|d| d.id == id)?;
        let deck = self.decks.remove(index);
        self.stats.total_phrases_count = self.total_phrases();
        Some(deck)
    }

    pub fn rename_deck(&mut self, deck_id: &str, name: impl Into<String>) -> Result<&Deck> {
        let deck = self.deck_mut(deck_id)?;
        deck.name = name.into();
        Ok(&*deck)
    }

    /// Add a phrase to a deck and queue it at the back.
    pub fn add_phrase(&mut self, deck_id: &str, phrase: Phrase) -> Result<&Phrase> {
        let index = self.deck_index(deck_id)?;
        mastery::validate(&phrase)?;

        let mut deck = self.decks[index].clone();
        deck.queue.push(phrase.id.clone());
        deck.phrases.push(phrase);
        queue::validate(&deck)?;

        let last = deck.phrases.len() - 1;
        self.decks[index] = deck;
        self.stats.total_phrases_count = self.total_phrases();
        Ok(&self.decks[index].phrases[last])
    }

    /// Replace a phrase's faces and note. Streaks and queue position are kept.
    pub fn update_phrase(
        &mut self,
        deck_id: &str,
        phrase_id: &str,
        chinese: impl Into<String>,
        english: impl Into<String>,
        note: Option<String>,
    ) -> Result<&Phrase> {
        let deck = self.deck_mut(deck_id)?;
        let phrase = deck
            .phrase_mut(phrase_id)
            .ok_or_else(|| phrase_not_found(deck_id, phrase_id))?;
        phrase.chinese = chinese.into();
        phrase.english = english.into();
        phrase.note = note;
        Ok(&*phrase)
    }

    /// Remove a phrase from a deck and from its queue.
    ///
    /// The phrase id stays in today's reviewed list; the report skips it.
    pub fn remove_phrase(&mut self, deck_id: &str, phrase_id: &str) -> Result<Phrase> {
        let deck = self.deck_mut(deck_id)?;
        let position = deck
            .phrases
            .iter()
            .position(|p| p.id == phrase_id)
            .ok_or_else(|| phrase_not_found(deck_id, phrase_id))?;
        let phrase = deck.phrases.remove(position);
        deck.queue.retain(|id| id != phrase_id);
        self.stats.total_phrases_count = self.total_phrases();
        Ok(phrase)
    }

    /// Prepare a deck for study, reseeding its queue if exhausted.
    pub fn start_session(&mut self, deck_id: &str) -> Result<bool> {
        let deck = self.deck_mut(deck_id)?;
        Ok(queue::start(deck))
    }

    /// Peek at the head of a deck's queue.
    pub fn draw(&self, deck_id: &str) -> Result<Draw<'_>> {
        let deck = self
            .deck(deck_id)
            .ok_or_else(|| CoreError::DeckNotFound(deck_id.to_string()))?;
        Ok(queue::draw(deck)?)
    }

    /// Apply one outcome to the phrase, the deck queue and the stats.
    ///
    /// Either every part is committed or none is.
    pub fn apply_result(
        &mut self,
        deck_id: &str,
        result: &StudySessionResult,
        elapsed_seconds: u64,
        policy: &dyn ReorderPolicy,
        clock: &dyn Clock,
    ) -> Result<Applied> {
        let index = self.deck_index(deck_id)?;
        let deck = &self.decks[index];
        queue::validate(deck)?;

        let updated = match deck.phrase(&result.phrase_id) {
            Some(phrase) => {
                mastery::validate(phrase)?;
                Some(mastery::update(phrase, result.correct, clock.now()))
            }
            None => None,
        };
        let streak = updated.as_ref().map_or(0, |p| p.consecutive_correct);

        let (next_queue, placement) =
            match policy.reorder(&deck.queue, &result.phrase_id, result.correct, streak) {
                Reorder::Moved { queue, placement } => (queue, placement),
                Reorder::NoOp(report) => return Ok(Applied::Skipped(report)),
            };
        let Some(phrase) = updated else {
            return Err(Violation::UnknownQueueEntry {
                deck_id: deck.id.clone(),
                phrase_id: result.phrase_id.clone(),
            }
            .into());
        };

        let deck_stats = stats::record_deck(deck.stats.as_ref(), elapsed_seconds);
        let global = stats::record(
            &self.stats,
            result,
            elapsed_seconds,
            clock.today(),
            self.total_phrases(),
        );

        let deck = &mut self.decks[index];
        if let Some(slot) = deck.phrase_mut(&phrase.id) {
            *slot = phrase.clone();
        }
        deck.queue = next_queue;
        deck.stats = Some(deck_stats);
        let remaining = deck.queue.len();
        self.stats = global;

        Ok(Applied::Recorded {
            phrase,
            placement,
            remaining,
        })
    }

    fn deck_index(&self, id: &str) -> Result<usize> {
        self.decks
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| CoreError::DeckNotFound(id.to_string()))
    }

    fn deck_mut(&mut self, id: &str) -> Result<&mut Deck> {
        let index = self.deck_index(id)?;
        Ok(&mut self.decks[index])
    }
}

fn phrase_not_found(deck_id: &str, phrase_id: &str) -> CoreError {
    CoreError::PhraseNotFound {
        deck_id: deck_id.to_string(),
        phrase_id: phrase_id.to_string(),
    }
}

fn validate_deck(deck: &Deck) -> Result<()> {
    queue::validate(deck)?;
    for phrase in &deck.phrases {
        mastery::validate(phrase)?;
    }
    Ok(())
}
