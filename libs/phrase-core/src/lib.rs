//! Review scheduler and study-session engine for phrase drilling.
//!
//! Provides:
//! - Phrase mastery tracking (correct / wrong streaks)
//! - Queue reordering after each answer (missed phrases resurface, mastered ones retire)
//! - The card lifecycle state machine (hidden → verifying/missed → result)
//! - Daily and lifetime stats aggregation in the UTC+8 reporting day
//! - Daily report building and the library/session transaction layer
//!
//! The crate performs no I/O. Time is injected through [`clock::Clock`].

pub mod card;
pub mod clock;
pub mod error;
pub mod library;
pub mod mastery;
pub mod queue;
pub mod report;
pub mod session;
pub mod stats;
pub mod types;

pub use card::{CardAction, CardState, Presentation};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CoreError, Result, Violation};
pub use library::{Applied, Library};
pub use queue::{Draw, NoOpReorder, Placement, Reorder, ReorderPolicy, StreakPolicy};
pub use report::DailyReport;
pub use session::{Completed, Step, StudySession};
pub use types::{
    BackupData, DailyStats, Deck, DeckSettings, DeckStats, EffectiveSettings, GlobalSettings,
    GlobalStats, MasteryLabel, Phrase, StudySessionResult,
};
