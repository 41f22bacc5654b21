//! Daily study report.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{DailyStats, Deck, MasteryLabel};

/// Read-only summary of one day of study.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub review_count: u32,
    pub correct_count: u32,
    pub wrong_count: u32,
    /// Percentage of correct answers, 0-100.
    pub accuracy: u32,
    pub study_time_seconds: u64,
    /// Study time formatted for display, e.g. "1小时5分".
    pub study_time: String,
    pub reviewed_count: usize,
    pub decks: Vec<DeckGroup>,
}

/// Phrases reviewed today from one deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckGroup {
    pub deck_id: String,
    pub deck_name: String,
    pub phrases: Vec<ReviewedPhrase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewedPhrase {
    pub phrase_id: String,
    pub chinese: String,
    pub english: String,
    pub mastery: MasteryLabel,
    pub consecutive_correct: u32,
    pub consecutive_wrong: u32,
}

/// Rounded percentage of correct answers; 0 when nothing was reviewed.
pub fn accuracy(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(correct) / f64::from(total) * 100.0).round() as u32
}

/// Format seconds as `S秒` under a minute, `H小时M分` from an hour, else `M分`.
pub fn format_study_time(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{}秒", seconds);
    }
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    if hours > 0 {
        format!("{}小时{}分", hours, minutes)
    } else {
        format!("{}分", minutes)
    }
}

/// Build the report for `daily`, resolving reviewed ids against `decks`.
///
/// Ids that no longer belong to any deck are skipped.
pub fn build(daily: &DailyStats, decks: &[Deck]) -> DailyReport {
    let mut groups: Vec<DeckGroup> = Vec::new();

    for id in &daily.reviewed_phrase_ids {
        let Some((deck, phrase)) = decks
            .iter()
            .find_map(|d| d.phrase(id).map(|p| (d, p)))
        else {
            continue;
        };

        let entry = ReviewedPhrase {
            phrase_id: phrase.id.clone(),
            chinese: phrase.chinese.clone(),
            english: phrase.english.clone(),
            mastery: phrase.mastery(),
            consecutive_correct: phrase.consecutive_correct,
            consecutive_wrong: phrase.consecutive_wrong,
        };

        match groups.iter_mut().find(|g| g.deck_id == deck.id) {
            Some(group) => group.phrases.push(entry),
            None => groups.push(DeckGroup {
                deck_id: deck.id.clone(),
                deck_name: deck.name.clone(),
                phrases: vec![entry],
            }),
        }
    }

    DailyReport {
        date: daily.date,
        review_count: daily.review_count,
        correct_count: daily.correct_count,
        wrong_count: daily.wrong_count,
        accuracy: accuracy(daily.correct_count, daily.review_count),
        study_time_seconds: daily.study_time_seconds,
        study_time: format_study_time(daily.study_time_seconds),
        reviewed_count: groups.iter().map(|g| g.phrases.len()).sum(),
        decks: groups,
    }
}
