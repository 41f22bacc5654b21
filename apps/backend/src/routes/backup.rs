//! Backup export and restore

use axum::{extract::State, Json};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /api/backup
pub async fn export(State(state): State<AppState>) -> Result<Json<BackupData>> {
    let backup = state.store()?.backup(state.clock.as_ref());
    Ok(Json(backup))
}

/// PUT /api/backup
///
/// Replaces every deck and the global stats. Ends any running session.
pub async fn restore(
    State(state): State<AppState>,
    Json(backup): Json<BackupData>,
) -> Result<Json<RestoreResponse>> {
    let mut store = state.store()?;
    let library = store.restore(backup)?;
    Ok(Json(RestoreResponse {
        decks: library.decks().len(),
        phrases: library.total_phrases(),
    }))
}
