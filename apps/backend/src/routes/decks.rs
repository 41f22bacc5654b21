//! Deck endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/decks
pub async fn list(State(state): State<AppState>) -> Result<Json<DeckListResponse>> {
    let store = state.store()?;
    let decks = store
        .library()
        .decks()
        .iter()
        .map(DeckSummary::from_deck)
        .collect();
    Ok(Json(DeckListResponse { decks }))
}

/// POST /api/decks
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateDeckRequest>,
) -> Result<(StatusCode, Json<Deck>)> {
    let deck = state.store()?.create_deck(request)?;
    Ok((StatusCode::CREATED, Json(deck)))
}

/// GET /api/decks/:id
pub async fn get(State(state): State<AppState>, Path(deck_id): Path<String>) -> Result<Json<Deck>> {
    let store = state.store()?;
    let deck = store
        .library()
        .deck(&deck_id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("deck {deck_id}")))?;
    Ok(Json(deck))
}

/// PUT /api/decks/:id
pub async fn rename(
    State(state): State<AppState>,
    Path(deck_id): Path<String>,
    Json(request): Json<UpdateDeckRequest>,
) -> Result<Json<Deck>> {
    let deck = state.store()?.rename_deck(&deck_id, request)?;
    Ok(Json(deck))
}

/// DELETE /api/decks/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(deck_id): Path<String>,
) -> Result<StatusCode> {
    state.store()?.delete_deck(&deck_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/decks/:id/session
pub async fn start_session(
    State(state): State<AppState>,
    Path(deck_id): Path<String>,
) -> Result<Json<StartSessionResponse>> {
    let response = state.store()?.start_session(&deck_id)?;
    Ok(Json(response))
}

/// POST /api/decks/:id/phrases
///
/// The new phrase joins the back of the deck's queue.
pub async fn add_phrase(
    State(state): State<AppState>,
    Path(deck_id): Path<String>,
    Json(request): Json<NewPhrase>,
) -> Result<(StatusCode, Json<Phrase>)> {
    let phrase = state.store()?.add_phrase(&deck_id, request)?;
    Ok((StatusCode::CREATED, Json(phrase)))
}

/// PUT /api/decks/:id/phrases/:phrase_id
pub async fn update_phrase(
    State(state): State<AppState>,
    Path((deck_id, phrase_id)): Path<(String, String)>,
    Json(request): Json<NewPhrase>,
) -> Result<Json<Phrase>> {
    let phrase = state.store()?.update_phrase(&deck_id, &phrase_id, request)?;
    Ok(Json(phrase))
}

/// DELETE /api/decks/:id/phrases/:phrase_id
pub async fn remove_phrase(
    State(state): State<AppState>,
    Path((deck_id, phrase_id)): Path<(String, String)>,
) -> Result<StatusCode> {
    state.store()?.remove_phrase(&deck_id, &phrase_id)?;
    Ok(StatusCode::NO_CONTENT)
}
