//! Tally Board - A two-team browser scoreboard
//!
//! Core modules:
//! - `board`: Scoreboard state and derived display (leader text, win probability)
//! - `persistence`: Save/load of the whole board under one storage key
//! - `present`: Pure projection of the board onto widget fields
//! - `effects`: Celebration cues handed to the page's animation libraries
//! - `settings`: Widget preferences
//! - `scoreboard`: The entry points the page glue calls

pub mod board;
pub mod effects;
pub mod persistence;
pub mod present;
pub mod scoreboard;
pub mod settings;

pub use board::{ScoreboardState, Team, TeamRecord, Verdict};
pub use persistence::{MemoryStorage, ScoreboardStore, StorageBackend, StoreError};
pub use scoreboard::Scoreboard;
pub use settings::{ConfettiLevel, Settings};

/// Widget configuration constants
pub mod consts {
    /// Storage key holding the serialized board
    pub const STORAGE_KEY: &str = "scoreboardData";
    /// Storage key holding widget preferences
    pub const SETTINGS_KEY: &str = "scoreboardSettings";

    /// Names a fresh or reset board starts with (also the bar-label fallback)
    pub const DEFAULT_NAME_ONE: &str = "Team A";
    pub const DEFAULT_NAME_TWO: &str = "Team B";

    /// Fallbacks used in the leader line when a name is blank
    pub const LEADER_FALLBACK_ONE: &str = "Team One";
    pub const LEADER_FALLBACK_TWO: &str = "Team Two";

    /// Win probability meter
    pub const PROBABILITY_NEUTRAL: f64 = 50.0;
    /// Maximum swing away from neutral before clamping
    pub const PROBABILITY_SWING: f64 = 40.0;
    pub const PROBABILITY_MIN: f64 = 10.0;
    pub const PROBABILITY_MAX: f64 = 90.0;
    /// Smallest normalizer so early small totals don't swing the meter wildly
    pub const MIN_NORMALIZER: u64 = 10;
}

/// Returns the trimmed name, or `fallback` when it is blank
#[inline]
pub fn name_or<'a>(raw: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = raw.trim();
    if trimmed.is_empty() { fallback } else { trimmed }
}
