//! Derived display values
//!
//! Side-effect-free functions of the two scores and names.

use super::state::{ScoreboardState, Team};
use crate::consts::*;
use crate::name_or;

/// Line shown when neither side is ahead
pub const TIE_MESSAGE: &str = "🤝 Scores are tied!";

/// Who is ahead, and by how much
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leader {
    Ahead { team: Team, margin: u32 },
    Level,
}

impl Leader {
    pub fn between(score_one: u32, score_two: u32) -> Self {
        if score_one > score_two {
            Leader::Ahead {
                team: Team::One,
                margin: score_one - score_two,
            }
        } else if score_two > score_one {
            Leader::Ahead {
                team: Team::Two,
                margin: score_two - score_one,
            }
        } else {
            Leader::Level
        }
    }

    pub fn team(&self) -> Option<Team> {
        match self {
            Leader::Ahead { team, .. } => Some(*team),
            Leader::Level => None,
        }
    }
}

/// Win probability meter reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilityReading {
    /// Team one's chance in percent, always within [10, 90]
    pub percent: f64,
    /// Side the meter favors; drives the bar's fill direction
    pub leader: Option<Team>,
}

impl ProbabilityReading {
    pub fn of(state: &ScoreboardState) -> Self {
        let (one, two) = (state.score(Team::One), state.score(Team::Two));
        Self {
            percent: win_probability(one, two),
            leader: Leader::between(one, two).team(),
        }
    }

    /// Percentage for the given side
    pub fn percent_for(&self, team: Team) -> f64 {
        match team {
            Team::One => self.percent,
            Team::Two => 100.0 - self.percent,
        }
    }
}

/// Bounded heuristic chance (in percent) that team one wins.
///
/// Never reaches certainty: the result is clamped to [10, 90] and the score
/// difference is normalized by `max(10, total)`.
pub fn win_probability(score_one: u32, score_two: u32) -> f64 {
    let total = u64::from(score_one) + u64::from(score_two);
    if total == 0 {
        return PROBABILITY_NEUTRAL;
    }
    let diff = f64::from(score_one) - f64::from(score_two);
    let max_diff = total.max(MIN_NORMALIZER) as f64;
    let probability = PROBABILITY_NEUTRAL + (diff / max_diff) * PROBABILITY_SWING;
    probability.clamp(PROBABILITY_MIN, PROBABILITY_MAX)
}

/// Leader/tie line. Blank names fall back to "Team One"/"Team Two".
pub fn leader_message(score_one: u32, score_two: u32, name_one: &str, name_two: &str) -> String {
    match Leader::between(score_one, score_two) {
        Leader::Ahead { team, margin } => {
            let raw = match team {
                Team::One => name_one,
                Team::Two => name_two,
            };
            let name = name_or(raw, team.leader_fallback());
            format!("🔥 {} lead by {} point(s)", name, margin)
        }
        Leader::Level => TIE_MESSAGE.to_string(),
    }
}

/// Leader line for a whole board
pub fn leader_message_for(state: &ScoreboardState) -> String {
    leader_message(
        state.score(Team::One),
        state.score(Team::Two),
        state.name(Team::One),
        state.name(Team::Two),
    )
}
