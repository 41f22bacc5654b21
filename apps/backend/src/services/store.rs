//! In-memory study store: the library, scheduler settings and the active session.

use std::collections::HashMap;

use phrase_core::queue::{self, Draw, ReorderPolicy};
use phrase_core::{
    Applied, BackupData, CardAction, Clock, Deck, DeckSettings, EffectiveSettings, GlobalSettings,
    GlobalStats, Library, Phrase, StudySession,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::{
    ActionResponse, CardView, CreateDeckRequest, DrawResponse, NewPhrase, StartSessionResponse,
    UpdateDeckRequest, UpdateDeckSettingsRequest, UpdateGlobalSettingsRequest,
};

/// Everything one learner's study state consists of.
#[derive(Debug)]
pub struct Store {
    library: Library,
    session: Option<StudySession>,
    settings: GlobalSettings,
    deck_settings: HashMap<String, DeckSettings>,
}

impl Store {
    pub fn new(library: Library, settings: GlobalSettings) -> Self {
        Self {
            library,
            session: None,
            settings,
            deck_settings: HashMap::new(),
        }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn session(&self) -> Option<&StudySession> {
        self.session.as_ref()
    }

    // === Decks ===

    pub fn create_deck(&mut self, request: CreateDeckRequest) -> Result<Deck> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ApiError::BadRequest("deck name is required".to_string()));
        }

        let phrases = request
            .phrases
            .into_iter()
            .map(|new| new_phrase(Uuid::new_v4().to_string(), new))
            .collect::<Result<Vec<_>>>()?;

        let deck = Deck::with_phrases(Uuid::new_v4().to_string(), name, phrases);
        self.library.add_deck(deck.clone())?;
        tracing::info!(deck_id = %deck.id, phrases = deck.phrases.len(), "created deck");
        Ok(deck)
    }

    pub fn delete_deck(&mut self, deck_id: &str) -> Result<()> {
        self.library
            .remove_deck(deck_id)
            .ok_or_else(|| ApiError::NotFound(format!("deck {deck_id}")))?;
        self.deck_settings.remove(deck_id);
        if self.session.as_ref().is_some_and(|s| s.deck_id() == deck_id) {
            self.session = None;
        }
        tracing::info!(deck_id, "deleted deck");
        Ok(())
    }

    pub fn rename_deck(&mut self, deck_id: &str, request: UpdateDeckRequest) -> Result<Deck> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ApiError::BadRequest("deck name is required".to_string()));
        }
        Ok(self.library.rename_deck(deck_id, name)?.clone())
    }

    // === Phrases ===

    pub fn add_phrase(&mut self, deck_id: &str, request: NewPhrase) -> Result<Phrase> {
        let phrase = new_phrase(Uuid::new_v4().to_string(), request)?;
        let phrase = self.library.add_phrase(deck_id, phrase)?.clone();
        tracing::info!(deck_id, phrase_id = %phrase.id, "added phrase");
        Ok(phrase)
    }

    pub fn update_phrase(&mut self, deck_id: &str, phrase_id: &str, request: NewPhrase) -> Result<Phrase> {
        let edited = new_phrase(phrase_id.to_string(), request)?;
        let phrase = self
            .library
            .update_phrase(deck_id, phrase_id, edited.chinese, edited.english, edited.note)?;
        Ok(phrase.clone())
    }

    /// Delete a phrase. A presentation of it in the running session is dropped.
    pub fn remove_phrase(&mut self, deck_id: &str, phrase_id: &str) -> Result<Phrase> {
        let phrase = self.library.remove_phrase(deck_id, phrase_id)?;
        if let Some(session) = self.session.as_mut().filter(|s| s.deck_id() == deck_id) {
            if session.active().is_some_and(|p| p.phrase_id() == phrase_id) {
                session.abandon();
            }
        }
        tracing::info!(deck_id, phrase_id, "removed phrase");
        Ok(phrase)
    }

    // === Study ===

    pub fn start_session(&mut self, deck_id: &str) -> Result<StartSessionResponse> {
        let had_queue = self
            .library
            .deck(deck_id)
            .is_some_and(|d| !d.queue.is_empty());
        let session = StudySession::start(&mut self.library, deck_id)?;
        let queue_length = self.library.deck(deck_id).map_or(0, |d| d.queue.len());
        self.session = Some(session);

        tracing::info!(deck_id, queue_length, "study session started");
        Ok(StartSessionResponse {
            deck_id: deck_id.to_string(),
            reseeded: !had_queue && queue_length > 0,
            queue_length,
        })
    }

    pub fn draw(&mut self) -> Result<DrawResponse> {
        let session = self.session.as_mut().ok_or_else(no_session)?;
        let deck_id = session.deck_id().to_string();

        let card = match session.draw(&self.library)? {
            Draw::Card(phrase) => {
                let state = session
                    .active()
                    .map(|p| p.state())
                    .unwrap_or(phrase_core::CardState::Hidden);
                Some(CardView::new(phrase, state))
            }
            Draw::Exhausted => None,
        };

        Ok(DrawResponse {
            deck_id,
            complete: card.is_none(),
            card,
        })
    }

    pub fn act(&mut self, action: CardAction, elapsed_seconds: u64, clock: &dyn Clock) -> Result<ActionResponse> {
        let session = self.session.as_mut().ok_or_else(no_session)?;
        let settings = EffectiveSettings::merge(&self.settings, self.deck_settings.get(session.deck_id()));
        let policy: Box<dyn ReorderPolicy> = queue::policy_for(&settings);

        let step = session.act(&mut self.library, action, elapsed_seconds, policy.as_ref(), clock)?;
        let deck_id = session.deck_id().to_string();

        let phrase = self
            .library
            .deck(&deck_id)
            .and_then(|d| d.phrase(&step.phrase_id))
            .ok_or_else(|| ApiError::Internal(format!("phrase {} vanished", step.phrase_id)))?;
        let card = CardView::new(phrase, step.state);

        let Some(completed) = step.completed else {
            return Ok(ActionResponse {
                card,
                result: None,
                applied: None,
                session_complete: false,
            });
        };

        let session_complete = match &completed.applied {
            Applied::Recorded { remaining, .. } => {
                tracing::debug!(
                    deck_id = %deck_id,
                    phrase_id = %completed.result.phrase_id,
                    correct = completed.result.correct,
                    elapsed_seconds = completed.elapsed_seconds,
                    remaining,
                    policy = policy.name(),
                    "recorded answer"
                );
                *remaining == 0
            }
            Applied::Skipped(report) => {
                tracing::warn!(
                    deck_id = %deck_id,
                    phrase_id = %report.phrase_id,
                    front = ?report.front,
                    "answer skipped: phrase is not at the queue front"
                );
                false
            }
        };

        Ok(ActionResponse {
            card,
            result: Some(completed.result),
            applied: Some(completed.applied),
            session_complete,
        })
    }

    /// Drop the active card without recording it. Returns its phrase id.
    pub fn abandon(&mut self) -> Result<Option<String>> {
        let session = self.session.as_mut().ok_or_else(no_session)?;
        Ok(session.abandon().map(|p| p.phrase_id().to_string()))
    }

    // === Stats ===

    /// Global stats with the daily part as of `clock`'s today.
    pub fn stats(&self, clock: &dyn Clock) -> GlobalStats {
        let mut stats = self.library.stats().clone();
        stats.daily = self.library.daily(clock.today());
        stats
    }

    // === Settings ===

    pub fn global_settings(&self) -> &GlobalSettings {
        &self.settings
    }

    pub fn deck_settings(&self) -> &HashMap<String, DeckSettings> {
        &self.deck_settings
    }

    pub fn update_global_settings(&mut self, request: UpdateGlobalSettingsRequest) -> GlobalSettings {
        if let Some(distance) = request.reinsertion_distance {
            self.settings.reinsertion_distance = distance;
        }
        if let Some(threshold) = request.mastery_threshold {
            self.settings.mastery_threshold = threshold;
        }
        self.settings.clone()
    }

    /// Replace a deck's overrides. `None` fields clear the override.
    pub fn update_deck_settings(
        &mut self,
        deck_id: &str,
        request: UpdateDeckSettingsRequest,
    ) -> Result<DeckSettings> {
        if self.library.deck(deck_id).is_none() {
            return Err(ApiError::NotFound(format!("deck {deck_id}")));
        }
        let settings = DeckSettings {
            reinsertion_distance: request.reinsertion_distance,
            mastery_threshold: request.mastery_threshold,
            ..DeckSettings::new(deck_id.to_string())
        };
        self.deck_settings.insert(deck_id.to_string(), settings.clone());
        Ok(settings)
    }

    pub fn delete_deck_settings(&mut self, deck_id: &str) -> bool {
        self.deck_settings.remove(deck_id).is_some()
    }

    pub fn effective_settings(&self, deck_id: &str) -> EffectiveSettings {
        EffectiveSettings::merge(&self.settings, self.deck_settings.get(deck_id))
    }

    // === Backup ===

    pub fn backup(&self, clock: &dyn Clock) -> BackupData {
        self.library.to_backup(clock.now())
    }

    /// Replace everything with `backup`. A corrupt snapshot leaves the store untouched.
    pub fn restore(&mut self, backup: BackupData) -> Result<&Library> {
        let library = Library::from_backup(backup).map_err(|e| {
            tracing::warn!(error = %e, "rejected backup");
            e
        })?;
        self.library = library;
        self.session = None;
        let library = &self.library;
        self.deck_settings
            .retain(|deck_id, _| library.deck(deck_id).is_some());
        tracing::info!(
            decks = self.library.decks().len(),
            phrases = self.library.total_phrases(),
            "restored backup"
        );
        Ok(&self.library)
    }
}

/// Build a phrase from request faces. Both faces are required; a blank note is dropped.
fn new_phrase(id: String, request: NewPhrase) -> Result<Phrase> {
    let chinese = request.chinese.trim();
    let english = request.english.trim();
    if chinese.is_empty() || english.is_empty() {
        return Err(ApiError::BadRequest(
            "a phrase needs both a chinese and an english face".to_string(),
        ));
    }
    let mut phrase = Phrase::new(id, chinese, english);
    phrase.note = request.note.filter(|n| !n.trim().is_empty());
    Ok(phrase)
}

fn no_session() -> ApiError {
    ApiError::Conflict("no study session; start one first".to_string())
}
