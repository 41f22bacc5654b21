//! Study session endpoints

use axum::{extract::State, Json};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /api/study/card
///
/// Presents the head of the queue, or the card already in progress.
pub async fn draw(State(state): State<AppState>) -> Result<Json<DrawResponse>> {
    let response = state.store()?.draw()?;
    Ok(Json(response))
}

/// POST /api/study/action
pub async fn action(
    State(state): State<AppState>,
    Json(request): Json<ActionRequest>,
) -> Result<Json<ActionResponse>> {
    let response = state
        .store()?
        .act(request.action, request.elapsed_seconds, state.clock.as_ref())?;
    Ok(Json(response))
}

/// POST /api/study/abandon
pub async fn abandon(State(state): State<AppState>) -> Result<Json<AbandonResponse>> {
    let abandoned = state.store()?.abandon()?;
    Ok(Json(AbandonResponse { abandoned }))
}
