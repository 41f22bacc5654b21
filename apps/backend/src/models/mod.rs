//! API request and response types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// Re-export shared types from phrase-core
pub use phrase_core::{
    Applied, BackupData, CardAction, CardState, DailyReport, DailyStats, Deck, DeckSettings,
    DeckStats, EffectiveSettings, GlobalSettings, GlobalStats, MasteryLabel, Phrase, StudySessionResult,
};

// Deck types
#[derive(Debug, Serialize, Deserialize)]
pub struct NewPhrase {
    pub chinese: String,
    pub english: String,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateDeckRequest {
    pub name: String,
    #[serde(default)]
    pub phrases: Vec<NewPhrase>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateDeckRequest {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeckSummary {
    pub id: String,
    pub name: String,
    pub phrase_count: usize,
    pub queue_length: usize,
    pub mastered_count: usize,
    pub needs_reinforcement_count: usize,
    pub stats: Option<DeckStats>,
}

impl DeckSummary {
    pub fn from_deck(deck: &Deck) -> Self {
        Self {
            id: deck.id.clone(),
            name: deck.name.clone(),
            phrase_count: deck.phrases.len(),
            queue_length: deck.queue.len(),
            mastered_count: deck.count_by_mastery(MasteryLabel::Mastered),
            needs_reinforcement_count: deck.count_by_mastery(MasteryLabel::NeedsReinforcement),
            stats: deck.stats,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeckListResponse {
    pub decks: Vec<DeckSummary>,
}

// Study types
#[derive(Debug, Serialize, Deserialize)]
pub struct StartSessionResponse {
    pub deck_id: String,
    /// Whether the queue was exhausted and has been refilled.
    pub reseeded: bool,
    pub queue_length: usize,
}

/// A card as the learner sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardView {
    pub phrase_id: String,
    pub state: CardState,
    pub chinese: String,
    /// Only present once the back face is revealed.
    pub english: Option<String>,
    pub note: Option<String>,
}

impl CardView {
    pub fn new(phrase: &Phrase, state: CardState) -> Self {
        let revealed = state.reveals_answer();
        Self {
            phrase_id: phrase.id.clone(),
            state,
            chinese: phrase.chinese.clone(),
            english: revealed.then(|| phrase.english.clone()),
            note: if revealed { phrase.note.clone() } else { None },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DrawResponse {
    pub deck_id: String,
    /// True when the queue is exhausted.
    pub complete: bool,
    pub card: Option<CardView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActionRequest {
    pub action: CardAction,
    #[serde(default)]
    pub elapsed_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActionResponse {
    pub card: CardView,
    pub result: Option<StudySessionResult>,
    pub applied: Option<Applied>,
    /// True once the deck queue has run out.
    pub session_complete: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AbandonResponse {
    pub abandoned: Option<String>,
}

// Settings types
#[derive(Debug, Serialize, Deserialize)]
pub struct AllSettingsResponse {
    pub global: GlobalSettings,
    pub decks: HashMap<String, DeckSettings>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateGlobalSettingsRequest {
    pub reinsertion_distance: Option<usize>,
    pub mastery_threshold: Option<u32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateDeckSettingsRequest {
    pub reinsertion_distance: Option<usize>,
    pub mastery_threshold: Option<u32>,
}

// Backup types
#[derive(Debug, Serialize, Deserialize)]
pub struct RestoreResponse {
    pub decks: usize,
    pub phrases: u64,
}
