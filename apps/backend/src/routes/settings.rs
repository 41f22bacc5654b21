//! Settings endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/settings
pub async fn get_all(State(state): State<AppState>) -> Result<Json<AllSettingsResponse>> {
    let store = state.store()?;
    Ok(Json(AllSettingsResponse {
        global: store.global_settings().clone(),
        decks: store.deck_settings().clone(),
    }))
}

/// PUT /api/settings/global
pub async fn update_global(
    State(state): State<AppState>,
    Json(request): Json<UpdateGlobalSettingsRequest>,
) -> Result<Json<GlobalSettings>> {
    let settings = state.store()?.update_global_settings(request);
    tracing::info!(
        reinsertion_distance = settings.reinsertion_distance,
        mastery_threshold = settings.mastery_threshold,
        "updated global settings"
    );
    Ok(Json(settings))
}

/// PUT /api/settings/deck/:id
pub async fn update_deck(
    State(state): State<AppState>,
    Path(deck_id): Path<String>,
    Json(request): Json<UpdateDeckSettingsRequest>,
) -> Result<Json<DeckSettings>> {
    let settings = state.store()?.update_deck_settings(&deck_id, request)?;
    Ok(Json(settings))
}

/// DELETE /api/settings/deck/:id
pub async fn delete_deck(
    State(state): State<AppState>,
    Path(deck_id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let deleted = state.store()?.delete_deck_settings(&deck_id);
    Ok(Json(serde_json::json!({ "deleted": deleted })))
}

/// GET /api/settings/deck/:id/effective
pub async fn effective(
    State(state): State<AppState>,
    Path(deck_id): Path<String>,
) -> Result<Json<EffectiveSettings>> {
    let store = state.store()?;
    if store.library().deck(&deck_id).is_none() {
        return Err(ApiError::NotFound(format!("deck {deck_id}")));
    }
    Ok(Json(store.effective_settings(&deck_id)))
}
