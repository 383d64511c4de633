//! On-disk shape of the board
//!
//! A flat JSON object:
//! `{"scoreOne":0,"scoreTwo":0,"nameOne":"Team A","nameTwo":"Team B","winnerOne":false,"winnerTwo":false}`.
//! No version field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::board::{ScoreboardState, Team, TeamRecord};

/// Serialized snapshot of a `ScoreboardState`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedRecord {
    pub score_one: u32,
    pub score_two: u32,
    pub name_one: String,
    pub name_two: String,
    pub winner_one: bool,
    pub winner_two: bool,
}

impl From<&ScoreboardState> for PersistedRecord {
    fn from(state: &ScoreboardState) -> Self {
        Self {
            score_one: state.team_one.score,
            score_two: state.team_two.score,
            name_one: state.team_one.name.clone(),
            name_two: state.team_two.name.clone(),
            winner_one: state.team_one.is_winner,
            winner_two: state.team_two.is_winner,
        }
    }
}

impl From<PersistedRecord> for ScoreboardState {
    fn from(record: PersistedRecord) -> Self {
        // Only one trophy may be shown; a record claiming two has neither
        let both = record.winner_one && record.winner_two;
        if both {
            log::warn!("Stored record marks both teams as winner, clearing both");
        }
        Self {
            team_one: TeamRecord {
                name: record.name_one,
                score: record.score_one,
                is_winner: record.winner_one && !both,
            },
            team_two: TeamRecord {
                name: record.name_two,
                score: record.score_two,
                is_winner: record.winner_two && !both,
            },
        }
    }
}

impl PersistedRecord {
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode stored text, repairing fields of the wrong type.
    ///
    /// Returns `None` when the text is not a JSON object at all.
    pub fn decode(text: &str) -> Option<Self> {
        let value: Value = match serde_json::from_str(text) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("Discarding unreadable scoreboard record: {}", e);
                return None;
            }
        };
        let Value::Object(fields) = value else {
            log::warn!("Discarding scoreboard record that is not an object");
            return None;
        };

        Some(Self {
            score_one: score_field(&fields, "scoreOne"),
            score_two: score_field(&fields, "scoreTwo"),
            name_one: name_field(&fields, "nameOne", Team::One),
            name_two: name_field(&fields, "nameTwo", Team::Two),
            winner_one: flag_field(&fields, "winnerOne"),
            winner_two: flag_field(&fields, "winnerTwo"),
        })
    }
}

/// Scores accept numbers and numeric strings; anything else reads as 0
fn score_field(fields: &Map<String, Value>, key: &str) -> u32 {
    let parsed = match fields.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|v| v.min(i64::MAX as u64) as i64))
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match parsed {
        Some(v) => v.clamp(0, i64::from(u32::MAX)) as u32,
        None => {
            log::warn!("Stored {} is not a number, using 0", key);
            0
        }
    }
}

fn name_field(fields: &Map<String, Value>, key: &str, team: Team) -> String {
    match fields.get(key) {
        Some(Value::String(s)) => s.clone(),
        _ => {
            log::warn!("Stored {} is missing, using default name", key);
            team.default_name().to_string()
        }
    }
}

fn flag_field(fields: &Map<String, Value>, key: &str) -> bool {
    matches!(fields.get(key), Some(Value::Bool(true)))
}
