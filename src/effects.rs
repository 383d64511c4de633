//! Celebration and feedback cues
//!
//! The board never waits on animation. After a mutation is applied and saved,
//! the scoreboard hands a cue to an `EffectsPlayer`, which is free to play it
//! (the web build drives GSAP and canvas-confetti) or drop it.

use crate::board::Team;
use crate::settings::Settings;

const PALETTE_FULL: &[&str] = &["#BB86FC", "#FF80AB", "#03DAC5", "#FFD54F", "#FFFFFF"];
const PALETTE_COOL: &[&str] = &["#BB86FC", "#FF80AB", "#03DAC5"];
const PALETTE_WARM: &[&str] = &["#FFD54F", "#FFFFFF", "#FF80AB"];
const PALETTE_FINALE: &[&str] = &[
    "#BB86FC", "#FF80AB", "#03DAC5", "#FFD54F", "#FFFFFF", "#FF6B6B",
];

/// Timeline constants (seconds)
pub mod timing {
    /// Winner card grows while the loser dims
    pub const EMPHASIS: f32 = 0.6;
    /// Number of repeating volleys
    pub const VOLLEYS: usize = 5;
    pub const VOLLEY_INTERVAL: f32 = 0.4;
    /// Offsets of the 2nd and 3rd burst inside a volley
    pub const VOLLEY_SECOND: f32 = 0.15;
    pub const VOLLEY_THIRD: f32 = 0.3;
    /// Gap between the last volley and the finale
    pub const FINALE_GAP: f32 = 0.3;
    /// Hold before cards settle back
    pub const SETTLE_HOLD: f32 = 2.0;
    pub const SETTLE: f32 = 0.7;
}

/// Where a burst starts, in viewport fractions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BurstOrigin {
    /// Center of the winning team's card, shifted down by `dy`
    WinnerCard { dy: f32 },
    /// Fixed viewport point
    Screen { x: f32, y: f32 },
}

/// One canvas-confetti call
#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiBurst {
    /// Offset from the start of the celebration
    pub at: f32,
    pub particle_count: u32,
    /// Degrees, 90 = straight up
    pub angle: f32,
    pub spread: f32,
    pub start_velocity: f32,
    pub gravity: f32,
    pub origin: BurstOrigin,
    pub colors: &'static [&'static str],
}

/// Full winner choreography, as data
#[derive(Debug, Clone, PartialEq)]
pub struct CelebrationPlan {
    pub winner: Team,
    pub emphasis: f32,
    pub bursts: Vec<ConfettiBurst>,
    /// When the cards start easing back to normal
    pub settle_at: f32,
    pub settle: f32,
}

impl CelebrationPlan {
    /// Time at which the last step finishes
    pub fn duration(&self) -> f32 {
        self.settle_at + self.settle
    }
}

/// Build the winner celebration, or `None` if celebrations are off
pub fn celebration_plan(winner: Team, settings: &Settings) -> Option<CelebrationPlan> {
    if !settings.effective_celebrations() {
        return None;
    }
    let scale = settings.confetti.particle_scale();
    let count = |n: u32| ((n as f32 * scale).round() as u32).max(1);
    let team_one = winner == Team::One;

    let mut bursts = Vec::with_capacity(timing::VOLLEYS * 3 + 1);
    for i in 0..timing::VOLLEYS {
        let start = i as f32 * timing::VOLLEY_INTERVAL;
        bursts.push(ConfettiBurst {
            at: start,
            particle_count: count(120),
            angle: 90.0,
            spread: 120.0,
            start_velocity: 40.0,
            gravity: 0.7,
            origin: BurstOrigin::WinnerCard { dy: 0.0 },
            colors: PALETTE_FULL,
        });
        bursts.push(ConfettiBurst {
            at: start + timing::VOLLEY_SECOND,
            particle_count: count(80),
            angle: if team_one { 45.0 } else { 135.0 },
            spread: 100.0,
            start_velocity: 30.0,
            gravity: 1.0,
            origin: BurstOrigin::WinnerCard { dy: 0.1 },
            colors: PALETTE_COOL,
        });
        bursts.push(ConfettiBurst {
            at: start + timing::VOLLEY_THIRD,
            particle_count: count(60),
            angle: 90.0,
            spread: 60.0,
            start_velocity: 25.0,
            gravity: 0.9,
            origin: BurstOrigin::Screen {
                x: if team_one { 0.15 } else { 0.85 },
                y: 0.6,
            },
            colors: PALETTE_WARM,
        });
    }

    // Volley calls take no time, so the timeline so far ends at whichever is later
    let last_volley = (timing::VOLLEYS - 1) as f32 * timing::VOLLEY_INTERVAL;
    let finale_at = timing::EMPHASIS.max(last_volley) + timing::FINALE_GAP;
    bursts.push(ConfettiBurst {
        at: finale_at,
        particle_count: count(200),
        angle: 90.0,
        spread: 140.0,
        start_velocity: 50.0,
        gravity: 0.5,
        origin: BurstOrigin::Screen {
            x: if team_one { 0.25 } else { 0.75 },
            y: 0.2,
        },
        colors: PALETTE_FINALE,
    });

    Some(CelebrationPlan {
        winner,
        emphasis: timing::EMPHASIS,
        bursts,
        settle_at: finale_at + timing::SETTLE_HOLD,
        settle: timing::SETTLE,
    })
}

/// Feedback requested after a state change
#[derive(Debug, Clone, PartialEq)]
pub enum EffectCue {
    /// +/- button squeeze (`plus` picks which of the team's two buttons)
    ButtonPressed { team: Team, plus: bool },
    /// Score pop
    ScoreChanged { team: Team },
    /// Name field became editable
    NameEditStarted { team: Team },
    /// Winner check found equal scores
    TieBanner,
    /// Meter fades out on a win, back in on the next change
    MeterVisibility { visible: bool },
    Celebrate(CelebrationPlan),
    /// Reset button squeeze
    ResetPressed,
}

/// Plays cues. Implementations must not touch board state.
pub trait EffectsPlayer {
    fn play(&mut self, cue: EffectCue);
}

/// Drops every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEffects;

impl EffectsPlayer for NullEffects {
    fn play(&mut self, _cue: EffectCue) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ConfettiLevel;

    #[test]
    fn test_plan_shape() {
        let plan = celebration_plan(Team::One, &Settings::default()).unwrap();
        assert_eq!(plan.bursts.len(), 16);
        assert_eq!(plan.bursts[0].particle_count, 120);
        assert_eq!(plan.bursts[1].angle, 45.0);

        let finale = plan.bursts.last().unwrap();
        assert_eq!(finale.particle_count, 200);
        assert!((finale.at - 1.9).abs() < 1e-5);
        assert!((plan.settle_at - 3.9).abs() < 1e-5);
        assert!((plan.duration() - 4.6).abs() < 1e-5);
    }

    #[test]
    fn test_plan_mirrors_for_team_two() {
        let plan = celebration_plan(Team::Two, &Settings::default()).unwrap();
        assert_eq!(plan.bursts[1].angle, 135.0);
        assert_eq!(plan.bursts[2].origin, BurstOrigin::Screen { x: 0.85, y: 0.6 });
        assert_eq!(
            plan.bursts.last().unwrap().origin,
            BurstOrigin::Screen { x: 0.75, y: 0.2 }
        );
    }

    #[test]
    fn test_bursts_are_ordered_within_volley() {
        let plan = celebration_plan(Team::One, &Settings::default()).unwrap();
        for volley in plan.bursts[..15].chunks(3) {
            assert!(volley[0].at < volley[1].at && volley[1].at < volley[2].at);
        }
    }

    #[test]
    fn test_confetti_level_scales_counts() {
        let settings = Settings {
            confetti: ConfettiLevel::Low,
            ..Settings::default()
        };
        let plan = celebration_plan(Team::One, &settings).unwrap();
        assert_eq!(plan.bursts[0].particle_count, 48);
    }

    #[test]
    fn test_no_plan_with_reduced_motion() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert!(celebration_plan(Team::One, &settings).is_none());

        let settings = Settings {
            celebrations: false,
            ..Settings::default()
        };
        assert!(celebration_plan(Team::Two, &settings).is_none());
    }
}
