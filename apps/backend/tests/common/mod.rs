//! Common test utilities and fixtures for integration tests.
//!
//! Every context owns a fresh in-memory store and a fixed clock, so the
//! tests need no external services.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use phrase_core::{Clock, FixedClock, GlobalSettings, Library};
use phrase_drill_backend::services::Store;
use phrase_drill_backend::{build_router, AppState};

/// Test context: the router plus a handle on its clock.
pub struct TestContext {
    pub clock: Arc<FixedClock>,
    app: Router,
}

impl TestContext {
    /// 2024-01-01 10:00 in the reporting timezone.
    pub fn start_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 2, 0, 0).unwrap()
    }

    pub fn new() -> Self {
        Self::with_settings(GlobalSettings::default())
    }

    pub fn with_settings(settings: GlobalSettings) -> Self {
        let clock = Arc::new(FixedClock::new(Self::start_time()));
        let store = Store::new(Library::new(clock.today()), settings);
        let state = AppState::new(store, clock.clone());
        Self {
            clock,
            app: build_router(state),
        }
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.app.clone()).unwrap()
    }

    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }
}

/// Create a deck through the API and return its JSON.
pub async fn create_deck(server: &TestServer, name: &str, phrases: &[(&str, &str)]) -> Value {
    let response = server
        .post("/api/decks")
        .json(&fixtures::create_deck_request(name, phrases))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}

/// Ids of a created deck's phrases, in deck order.
pub fn phrase_ids(deck: &Value) -> Vec<String> {
    deck["phrases"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect()
}

/// Draw the current card and return its JSON.
pub async fn draw(server: &TestServer) -> Value {
    let response = server.get("/api/study/card").await;
    response.assert_status_ok();
    response.json()
}

/// Send one action for the active card.
pub async fn act(server: &TestServer, action: &str, elapsed_seconds: u64) -> Value {
    let response = server
        .post("/api/study/action")
        .json(&fixtures::action_request(action, elapsed_seconds))
        .await;
    response.assert_status_ok();
    response.json()
}

/// Answer the current card correctly (know, then confirm).
pub async fn answer_correct(server: &TestServer, elapsed_seconds: u64) -> Value {
    act(server, "know", 0).await;
    act(server, "mark_correct", elapsed_seconds).await
}

/// Answer the current card wrongly (don't know, then advance).
pub async fn answer_wrong(server: &TestServer, elapsed_seconds: u64) -> Value {
    act(server, "dont_know", 0).await;
    act(server, "advance", elapsed_seconds).await
}
