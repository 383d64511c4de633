//! Scoreboard state and its mutations
//!
//! This is the single source of truth for the widget. The page never reads
//! scores back from rendered text; it only projects this state.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::name_or;

/// One of the two competing sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    One,
    Two,
}

impl Team {
    pub const BOTH: [Team; 2] = [Team::One, Team::Two];

    /// Identifier used in element ids and `data-team` attributes
    pub fn as_str(&self) -> &'static str {
        match self {
            Team::One => "one",
            Team::Two => "two",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "one" | "1" => Some(Team::One),
            "two" | "2" => Some(Team::Two),
            _ => None,
        }
    }

    pub fn other(&self) -> Team {
        match self {
            Team::One => Team::Two,
            Team::Two => Team::One,
        }
    }

    /// Name a fresh board starts with; also the bar-label fallback
    pub fn default_name(&self) -> &'static str {
        match self {
            Team::One => DEFAULT_NAME_ONE,
            Team::Two => DEFAULT_NAME_TWO,
        }
    }

    /// Fallback used by the leader line
    pub fn leader_fallback(&self) -> &'static str {
        match self {
            Team::One => LEADER_FALLBACK_ONE,
            Team::Two => LEADER_FALLBACK_TWO,
        }
    }
}

/// A single team's record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    /// Name exactly as entered (never overwritten with a fallback)
    pub name: String,
    pub score: u32,
    /// Trophy shown
    pub is_winner: bool,
}

impl TeamRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
            is_winner: false,
        }
    }
}

/// Result of a winner check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Scores equal, nobody crowned
    Tie,
    Winner(Team),
}

/// The whole board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreboardState {
    pub team_one: TeamRecord,
    pub team_two: TeamRecord,
}

impl Default for ScoreboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreboardState {
    /// Fresh board: zero scores, default names, no winner
    pub fn new() -> Self {
        Self {
            team_one: TeamRecord::new(Team::One.default_name()),
            team_two: TeamRecord::new(Team::Two.default_name()),
        }
    }

    pub fn team(&self, team: Team) -> &TeamRecord {
        match team {
            Team::One => &self.team_one,
            Team::Two => &self.team_two,
        }
    }

    fn team_mut(&mut self, team: Team) -> &mut TeamRecord {
        match team {
            Team::One => &mut self.team_one,
            Team::Two => &mut self.team_two,
        }
    }

    pub fn score(&self, team: Team) -> u32 {
        self.team(team).score
    }

    /// Raw stored name
    pub fn name(&self, team: Team) -> &str {
        &self.team(team).name
    }

    /// Name shown on the bar labels ("Team A"/"Team B" when blank)
    pub fn display_name(&self, team: Team) -> &str {
        name_or(&self.team(team).name, team.default_name())
    }

    /// Team holding the trophy, if any
    pub fn winner(&self) -> Option<Team> {
        Team::BOTH.into_iter().find(|t| self.team(*t).is_winner)
    }

    /// Add `delta` to a team's score, clamping at zero.
    ///
    /// Any score change voids an earlier winner declaration. Returns the new score.
    pub fn adjust_score(&mut self, team: Team, delta: i64) -> u32 {
        let current = i64::from(self.score(team));
        let next = current.saturating_add(delta).clamp(0, i64::from(u32::MAX)) as u32;
        self.team_mut(team).score = next;
        self.clear_winners();
        next
    }

    /// Store a committed name edit verbatim
    pub fn set_name(&mut self, team: Team, raw_name: impl Into<String>) {
        self.team_mut(team).name = raw_name.into();
    }

    /// Crown the higher-scoring team. Equal scores leave the flags alone.
    pub fn declare_winner(&mut self) -> Verdict {
        let (one, two) = (self.team_one.score, self.team_two.score);
        if one == two {
            return Verdict::Tie;
        }
        let winner = if one > two { Team::One } else { Team::Two };
        self.team_mut(winner).is_winner = true;
        self.team_mut(winner.other()).is_winner = false;
        Verdict::Winner(winner)
    }

    /// Back to a fresh board
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn clear_winners(&mut self) {
        self.team_one.is_winner = false;
        self.team_two.is_winner = false;
    }
}
