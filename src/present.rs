//! Projection of the board onto the widget
//!
//! `ScoreboardView` is everything the page shows, computed from state alone.
//! The DOM layer writes it out and never reads scores back from the page.

use crate::board::{ProbabilityReading, ScoreboardState, Team, Verdict, leader_message_for};

/// Banner shown when a winner check finds equal scores
pub const TIE_BANNER: &str = "⚖️ It's a tie! No winner yet.";

/// Fill direction of the probability bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarDirection {
    Ltr,
    Rtl,
}

impl BarDirection {
    /// CSS `direction` value
    pub fn as_css(&self) -> &'static str {
        match self {
            BarDirection::Ltr => "ltr",
            BarDirection::Rtl => "rtl",
        }
    }
}

/// Bar coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarTint {
    TeamOne,
    TeamTwo,
    Neutral,
}

impl BarTint {
    /// CSS `background` value
    pub fn gradient(&self) -> &'static str {
        match self {
            BarTint::TeamOne => "linear-gradient(90deg, #685596, #8a7db8)",
            BarTint::TeamTwo => "linear-gradient(90deg, #ffa366, #633f1c)",
            BarTint::Neutral => "linear-gradient(90deg, #888, #aaa)",
        }
    }
}

/// Win probability bar geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilityBar {
    /// Fill width in percent of the bar
    pub width: f64,
    pub direction: BarDirection,
    pub tint: BarTint,
}

impl ProbabilityBar {
    /// Team two's lead fills from the right so the bar always grows from the leader
    pub fn from_reading(reading: &ProbabilityReading) -> Self {
        match reading.leader {
            Some(Team::Two) => Self {
                width: reading.percent_for(Team::Two),
                direction: BarDirection::Rtl,
                tint: BarTint::TeamTwo,
            },
            Some(Team::One) => Self {
                width: reading.percent,
                direction: BarDirection::Ltr,
                tint: BarTint::TeamOne,
            },
            None => Self {
                width: reading.percent,
                direction: BarDirection::Ltr,
                tint: BarTint::Neutral,
            },
        }
    }

    /// CSS `width` value
    pub fn width_css(&self) -> String {
        format!("{:.2}%", self.width)
    }
}

/// Inline style for the probability meter container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeterStyle {
    pub display: &'static str,
    pub opacity: &'static str,
}

/// Selector for one of a team's +/- buttons
pub fn score_button_selector(team: Team, plus: bool) -> String {
    let kind = if plus { "plus" } else { "minus" };
    format!(".btn.{}[data-team=\"{}\"]", kind, team.as_str())
}

/// One team's card
#[derive(Debug, Clone, PartialEq)]
pub struct TeamView {
    pub score: String,
    /// Raw name for the editable field
    pub name: String,
    /// Label under the probability bar
    pub bar_label: String,
    pub trophy_visible: bool,
}

/// Everything the widget displays
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreboardView {
    pub team_one: TeamView,
    pub team_two: TeamView,
    /// Leader/tie line, or the verdict banner right after a winner check
    pub difference: String,
    /// Meter is hidden while a winner is shown
    pub meter_visible: bool,
    pub bar: ProbabilityBar,
}

impl ScoreboardView {
    pub fn project(state: &ScoreboardState, banner: Option<&str>) -> Self {
        let team_view = |team: Team| TeamView {
            score: state.score(team).to_string(),
            name: state.name(team).to_string(),
            bar_label: state.display_name(team).to_string(),
            trophy_visible: state.team(team).is_winner,
        };

        Self {
            team_one: team_view(Team::One),
            team_two: team_view(Team::Two),
            difference: banner
                .map(str::to_string)
                .unwrap_or_else(|| leader_message_for(state)),
            meter_visible: state.winner().is_none(),
            bar: ProbabilityBar::from_reading(&ProbabilityReading::of(state)),
        }
    }

    /// Meter style to write, or `None` while a fade owns the meter.
    ///
    /// A fade always ends in the style for the latest `meter_visible`, and
    /// every later render writes that style directly.
    pub fn meter_style(&self, fade_pending: bool) -> Option<MeterStyle> {
        if fade_pending {
            return None;
        }
        Some(if self.meter_visible {
            MeterStyle {
                display: "block",
                opacity: "1",
            }
        } else {
            MeterStyle {
                display: "none",
                opacity: "0",
            }
        })
    }

    pub fn team(&self, team: Team) -> &TeamView {
        match team {
            Team::One => &self.team_one,
            Team::Two => &self.team_two,
        }
    }
}

/// Text for the difference line after a winner check
pub fn verdict_banner(state: &ScoreboardState, verdict: Verdict) -> String {
    match verdict {
        Verdict::Tie => TIE_BANNER.to_string(),
        Verdict::Winner(team) => {
            let name = crate::name_or(state.name(team), team.leader_fallback());
            format!("🏆 {} WINS! 🏆", name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TIE_MESSAGE;

    #[test]
    fn test_fresh_board_view() {
        let view = ScoreboardView::project(&ScoreboardState::new(), None);
        assert_eq!(view.team_one.score, "0");
        assert_eq!(view.team_two.bar_label, "Team B");
        assert_eq!(view.difference, TIE_MESSAGE);
        assert!(view.meter_visible);
        assert_eq!(view.bar.width, 50.0);
        assert_eq!(view.bar.direction, BarDirection::Ltr);
        assert_eq!(view.bar.tint, BarTint::Neutral);
        assert!(!view.team_one.trophy_visible);
    }

    #[test]
    fn test_team_two_lead_fills_from_right() {
        let mut state = ScoreboardState::new();
        state.adjust_score(Team::One, 3);
        state.adjust_score(Team::Two, 7);
        let view = ScoreboardView::project(&state, None);
        assert_eq!(view.bar.direction, BarDirection::Rtl);
        assert_eq!(view.bar.tint, BarTint::TeamTwo);
        assert!((view.bar.width - 66.0).abs() < 1e-9);
        assert_eq!(view.difference, "🔥 Team B lead by 4 point(s)");
    }

    #[test]
    fn test_team_one_lead_fills_from_left() {
        let mut state = ScoreboardState::new();
        state.adjust_score(Team::One, 7);
        state.adjust_score(Team::Two, 3);
        let bar = ScoreboardView::project(&state, None).bar;
        assert_eq!(bar.direction, BarDirection::Ltr);
        assert_eq!(bar.tint, BarTint::TeamOne);
        assert!((bar.width - 66.0).abs() < 1e-9);
    }

    #[test]
    fn test_winner_hides_meter_and_shows_trophy() {
        let mut state = ScoreboardState::new();
        state.set_name(Team::Two, " Hawks ");
        state.adjust_score(Team::Two, 2);
        let verdict = state.declare_winner();
        let banner = verdict_banner(&state, verdict);
        let view = ScoreboardView::project(&state, Some(&banner));
        assert_eq!(view.difference, "🏆 Hawks WINS! 🏆");
        assert!(!view.meter_visible);
        assert!(view.team_two.trophy_visible);
        assert!(!view.team_one.trophy_visible);
    }

    #[test]
    fn test_blank_names_in_view() {
        let mut state = ScoreboardState::new();
        state.set_name(Team::One, "   ");
        state.adjust_score(Team::One, 1);
        let view = ScoreboardView::project(&state, None);
        assert_eq!(view.team_one.name, "   ");
        assert_eq!(view.team_one.bar_label, "Team A");
        assert_eq!(view.difference, "🔥 Team One lead by 1 point(s)");
        assert_eq!(verdict_banner(&state, Verdict::Winner(Team::One)), "🏆 Team One WINS! 🏆");
    }

    #[test]
    fn test_width_css_is_rounded() {
        let mut state = ScoreboardState::new();
        state.adjust_score(Team::One, 7);
        state.adjust_score(Team::Two, 5);
        // 50 + (2 / 12) * 40 = 56.666...
        let view = ScoreboardView::project(&state, None);
        assert_eq!(view.bar.width_css(), "56.67%");

        let fresh = ScoreboardView::project(&ScoreboardState::new(), None);
        assert_eq!(fresh.bar.width_css(), "50.00%");
    }

    #[test]
    fn test_meter_style_follows_view_once_settled() {
        let mut state = ScoreboardState::new();
        state.adjust_score(Team::One, 1);
        state.declare_winner();
        let hidden = ScoreboardView::project(&state, None);
        assert_eq!(hidden.meter_style(true), None);
        assert_eq!(
            hidden.meter_style(false),
            Some(MeterStyle {
                display: "none",
                opacity: "0",
            })
        );

        // A score change right after the win must leave the meter shown
        state.adjust_score(Team::Two, 1);
        let shown = ScoreboardView::project(&state, None);
        assert!(shown.meter_visible);
        assert_eq!(
            shown.meter_style(false),
            Some(MeterStyle {
                display: "block",
                opacity: "1",
            })
        );
    }

    #[test]
    fn test_score_button_selector() {
        assert_eq!(
            score_button_selector(Team::One, true),
            r#".btn.plus[data-team="one"]"#
        );
        assert_eq!(
            score_button_selector(Team::Two, false),
            r#".btn.minus[data-team="two"]"#
        );
    }

    #[test]
    fn test_tie_banner() {
        let state = ScoreboardState::new();
        assert_eq!(verdict_banner(&state, Verdict::Tie), TIE_BANNER);
    }
}
