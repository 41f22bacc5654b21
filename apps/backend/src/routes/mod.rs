pub mod backup;
pub mod decks;
pub mod settings;
pub mod stats;
pub mod study;
