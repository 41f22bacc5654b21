//! Statistics endpoints

use axum::{extract::State, Json};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /api/stats
pub async fn global(State(state): State<AppState>) -> Result<Json<GlobalStats>> {
    let stats = state.store()?.stats(state.clock.as_ref());
    Ok(Json(stats))
}

/// GET /api/stats/report
pub async fn report(State(state): State<AppState>) -> Result<Json<DailyReport>> {
    let report = state.store()?.library().report(state.clock.today());
    Ok(Json(report))
}
