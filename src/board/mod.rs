//! Scoreboard model
//!
//! Pure and synchronous. No storage, DOM or animation dependencies:
//! - `state`: the authoritative team records and the four mutations
//! - `display`: leader text and win probability derived from the state

pub mod display;
pub mod state;

pub use display::{
    Leader, ProbabilityReading, TIE_MESSAGE, leader_message, leader_message_for, win_probability,
};
pub use state::{ScoreboardState, Team, TeamRecord, Verdict};
