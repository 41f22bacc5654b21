//! Daily and lifetime study statistics.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::Violation;
use crate::types::{DailyStats, Deck, DeckStats, GlobalStats, StudySessionResult};

/// Daily stats as of `today`: unchanged on the same day, fresh on a new day.
pub fn current_daily(daily: &DailyStats, today: NaiveDate) -> DailyStats {
    if daily.date == today {
        daily.clone()
    } else {
        DailyStats::new(today)
    }
}

/// Fold one outcome into the stats.
///
/// `elapsed_seconds` is measured by the caller. `total_phrases` is the current
/// phrase count across all decks and replaces the stored snapshot.
pub fn record(
    stats: &GlobalStats,
    result: &StudySessionResult,
    elapsed_seconds: u64,
    today: NaiveDate,
    total_phrases: u64,
) -> GlobalStats {
    let mut daily = current_daily(&stats.daily, today);
    daily.review_count = daily.review_count.saturating_add(1);
    if result.correct {
        daily.correct_count = daily.correct_count.saturating_add(1);
    } else {
        daily.wrong_count = daily.wrong_count.saturating_add(1);
    }
    if !daily.reviewed_phrase_ids.contains(&result.phrase_id) {
        daily.reviewed_phrase_ids.push(result.phrase_id.clone());
    }
    daily.study_time_seconds = daily.study_time_seconds.saturating_add(elapsed_seconds);

    GlobalStats {
        total_review_count: stats.total_review_count.saturating_add(1),
        total_phrases_count: total_phrases,
        total_study_time_seconds: stats.total_study_time_seconds.saturating_add(elapsed_seconds),
        daily,
    }
}

/// Apply the same increments to a deck's counters. Missing counters start at zero.
pub fn record_deck(stats: Option<&DeckStats>, elapsed_seconds: u64) -> DeckStats {
    let current = stats.copied().unwrap_or_default();
    DeckStats {
        total_study_time_seconds: current.total_study_time_seconds.saturating_add(elapsed_seconds),
        total_review_count: current.total_review_count.saturating_add(1),
    }
}

/// Fill in the counters of a day stored before correct and wrong answers were
/// tracked separately. Such a day has reviews but neither counter, and all of
/// its reviews are counted as wrong.
pub fn upgrade_legacy_daily(mut daily: DailyStats) -> DailyStats {
    if daily.review_count > 0 && daily.correct_count == 0 && daily.wrong_count == 0 {
        daily.wrong_count = daily.review_count;
    }
    daily
}

/// Check that the counters add up and reviewed ids are distinct.
pub fn validate_daily(daily: &DailyStats) -> Result<(), Violation> {
    if u64::from(daily.correct_count) + u64::from(daily.wrong_count) != u64::from(daily.review_count) {
        return Err(Violation::InconsistentDailyStats {
            date: daily.date,
            review_count: daily.review_count,
            correct_count: daily.correct_count,
            wrong_count: daily.wrong_count,
        });
    }
    let mut seen = HashSet::new();
    for id in &daily.reviewed_phrase_ids {
        if !seen.insert(id.as_str()) {
            return Err(Violation::DuplicateReviewedPhrase {
                date: daily.date,
                phrase_id: id.clone(),
            });
        }
    }
    Ok(())
}

/// Phrase count across all decks.
pub fn total_phrases(decks: &[Deck]) -> u64 {
    decks.iter().map(|d| d.phrases.len() as u64).sum()
}
