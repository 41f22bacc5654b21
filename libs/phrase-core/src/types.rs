//! Core types for the phrase drilling engine.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Current `BackupData` format version.
pub const BACKUP_VERSION: u32 = 1;

/// One drillable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phrase {
    pub id: String,
    pub chinese: String,
    pub english: String,
    #[serde(default)]
    pub consecutive_correct: u32,
    #[serde(default)]
    pub consecutive_wrong: u32,
    #[serde(default)]
    pub total_reviews: u32,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_reviewed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Phrase {
    /// Create an unreviewed phrase.
    pub fn new(id: impl Into<String>, chinese: impl Into<String>, english: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            chinese: chinese.into(),
            english: english.into(),
            consecutive_correct: 0,
            consecutive_wrong: 0,
            total_reviews: 0,
            last_reviewed_at: None,
            note: None,
        }
    }

    /// Presentation-facing mastery label derived from the streaks.
    pub fn mastery(&self) -> MasteryLabel {
        if self.consecutive_wrong > 0 {
            MasteryLabel::NeedsReinforcement
        } else if self.consecutive_correct > 0 {
            MasteryLabel::Mastered
        } else {
            MasteryLabel::New
        }
    }
}

/// Derived label shown next to a phrase in reports. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasteryLabel {
    New,
    Mastered,
    NeedsReinforcement,
}

/// Cumulative per-deck counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckStats {
    pub total_study_time_seconds: u64,
    pub total_review_count: u64,
}

/// Named collection of phrases plus an independent study order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phrases: Vec<Phrase>,
    /// Phrase ids in study order.
    #[serde(default)]
    pub queue: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<DeckStats>,
}

impl Deck {
    /// Create an empty deck.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phrases: Vec::new(),
            queue: Vec::new(),
            stats: Some(DeckStats::default()),
        }
    }

    /// Create a deck from phrases, seeding the queue in phrase order.
    pub fn with_phrases(id: impl Into<String>, name: impl Into<String>, phrases: Vec<Phrase>) -> Self {
        let mut deck = Self::new(id, name);
        deck.queue = phrases.iter().map(|p| p.id.clone()).collect();
        deck.phrases = phrases;
        deck
    }

    pub fn phrase(&self, id: &str) -> Option<&Phrase> {
        self.phrases.iter().find(|p| p.id == id)
    }

    pub fn phrase_mut(&mut self, id: &str) -> Option<&mut Phrase> {
        self.phrases.iter_mut().find(|p| p.id == id)
    }

    /// Number of phrases currently labelled with `label`.
    pub fn count_by_mastery(&self, label: MasteryLabel) -> usize {
        self.phrases.iter().filter(|p| p.mastery() == label).count()
    }
}

/// Aggregate for one calendar day in the reporting timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub date: NaiveDate,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub correct_count: u32,
    #[serde(default)]
    pub wrong_count: u32,
    /// Distinct phrases touched today, in first-review order.
    #[serde(default)]
    pub reviewed_phrase_ids: Vec<String>,
    #[serde(default)]
    pub study_time_seconds: u64,
}

impl DailyStats {
    /// Fresh, zeroed stats for `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            review_count: 0,
            correct_count: 0,
            wrong_count: 0,
            reviewed_phrase_ids: Vec::new(),
            study_time_seconds: 0,
        }
    }
}

/// Lifetime counters plus the current day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    #[serde(default)]
    pub total_review_count: u64,
    /// Snapshot of the phrase count across all decks.
    #[serde(default)]
    pub total_phrases_count: u64,
    #[serde(default)]
    pub total_study_time_seconds: u64,
    pub daily: DailyStats,
}

impl GlobalStats {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            total_review_count: 0,
            total_phrases_count: 0,
            total_study_time_seconds: 0,
            daily: DailyStats::new(today),
        }
    }
}

/// Full serializable snapshot of the application state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupData {
    pub version: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub decks: Vec<Deck>,
    pub stats: GlobalStats,
}

/// Outcome of one card presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySessionResult {
    pub phrase_id: String,
    pub correct: bool,
}

impl StudySessionResult {
    pub fn new(phrase_id: impl Into<String>, correct: bool) -> Self {
        Self {
            phrase_id: phrase_id.into(),
            correct,
        }
    }
}

/// Global scheduler settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// How many remaining items a missed phrase is placed behind.
    pub reinsertion_distance: usize,
    /// Correct streak at which a phrase is retired from the queue. 0 disables retirement.
    pub mastery_threshold: u32,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            reinsertion_distance: 3,
            mastery_threshold: 5,
        }
    }
}

/// Per-deck settings (all fields optional for overrides).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSettings {
    pub deck_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reinsertion_distance: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mastery_threshold: Option<u32>,
}

impl DeckSettings {
    /// Create new deck settings with only the deck id set.
    pub fn new(deck_id: String) -> Self {
        Self {
            deck_id,
            reinsertion_distance: None,
            mastery_threshold: None,
        }
    }
}

/// Effective settings (global merged with deck overrides).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveSettings {
    pub reinsertion_distance: usize,
    pub mastery_threshold: u32,
}

impl EffectiveSettings {
    /// Merge global settings with optional deck settings.
    pub fn merge(global: &GlobalSettings, deck: Option<&DeckSettings>) -> Self {
        match deck {
            Some(d) => Self {
                reinsertion_distance: d.reinsertion_distance.unwrap_or(global.reinsertion_distance),
                mastery_threshold: d.mastery_threshold.unwrap_or(global.mastery_threshold),
            },
            None => Self {
                reinsertion_distance: global.reinsertion_distance,
                mastery_threshold: global.mastery_threshold,
            },
        }
    }
}
