//! The scoreboard the page talks to
//!
//! Owns the board state, its store and an effects player. Every entry point
//! mutates state synchronously, saves, then fires cues. Storage failures are
//! logged and otherwise ignored: the in-memory board stays authoritative.

use crate::board::{ScoreboardState, Team, Verdict};
use crate::effects::{EffectCue, EffectsPlayer, celebration_plan};
use crate::persistence::{ScoreboardStore, StorageBackend};
use crate::present::{ScoreboardView, verdict_banner};
use crate::settings::{ConfettiLevel, Settings};

pub struct Scoreboard<S: StorageBackend, E: EffectsPlayer> {
    state: ScoreboardState,
    store: ScoreboardStore<S>,
    settings: Settings,
    effects: E,
    /// Verdict text shown until the next change
    banner: Option<String>,
}

impl<S: StorageBackend, E: EffectsPlayer> Scoreboard<S, E> {
    /// Restore the saved board (or start fresh) on top of `backend`
    pub fn boot(backend: S, effects: E) -> Self {
        let settings = Settings::load(&backend);
        let store = ScoreboardStore::new(backend);
        let state = match store.load() {
            Ok(Some(state)) => state,
            Ok(None) => ScoreboardState::new(),
            Err(e) => {
                log::warn!("Could not read saved scoreboard: {}", e);
                ScoreboardState::new()
            }
        };

        Self {
            state,
            store,
            settings,
            effects,
            banner: None,
        }
    }

    pub fn state(&self) -> &ScoreboardState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &ScoreboardStore<S> {
        &self.store
    }

    pub fn effects(&self) -> &E {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut E {
        &mut self.effects
    }

    /// Current projection for the page
    pub fn view(&self) -> ScoreboardView {
        ScoreboardView::project(&self.state, self.banner.as_deref())
    }

    /// +/- button. Returns the new score.
    pub fn adjust_score(&mut self, team: Team, delta: i64) -> u32 {
        let had_winner = self.state.winner().is_some();
        let score = self.state.adjust_score(team, delta);
        self.banner = None;
        self.persist();

        if had_winner {
            self.effects.play(EffectCue::MeterVisibility { visible: true });
        }
        if self.settings.effective_pulses() {
            self.effects.play(EffectCue::ButtonPressed {
                team,
                plus: delta > 0,
            });
            self.effects.play(EffectCue::ScoreChanged { team });
        }
        score
    }

    /// Edit button pressed; the name is not touched until committed
    pub fn begin_name_edit(&mut self, team: Team) {
        if self.settings.effective_pulses() {
            self.effects.play(EffectCue::NameEditStarted { team });
        }
    }

    /// Name field committed (blur or Enter)
    pub fn set_name(&mut self, team: Team, raw_name: impl Into<String>) {
        self.state.set_name(team, raw_name);
        self.banner = None;
        self.persist();
    }

    /// "Check winner" button
    pub fn declare_winner(&mut self) -> Verdict {
        let verdict = self.state.declare_winner();
        self.banner = Some(verdict_banner(&self.state, verdict));

        match verdict {
            Verdict::Tie => {
                log::info!("Winner check: scores are tied");
                if self.settings.effective_pulses() {
                    self.effects.play(EffectCue::TieBanner);
                }
            }
            Verdict::Winner(team) => {
                log::info!("Winner declared: team {}", team.as_str());
                self.persist();
                self.effects.play(EffectCue::MeterVisibility { visible: false });
                if let Some(plan) = celebration_plan(team, &self.settings) {
                    self.effects.play(EffectCue::Celebrate(plan));
                }
            }
        }
        verdict
    }

    /// Reset button: fresh board, saved record removed
    pub fn reset(&mut self) {
        let had_winner = self.state.winner().is_some();
        self.state.reset();
        self.banner = None;
        if let Err(e) = self.store.clear() {
            log::warn!("Could not clear saved scoreboard: {}", e);
        }

        if had_winner {
            self.effects.play(EffectCue::MeterVisibility { visible: true });
        }
        if self.settings.effective_pulses() {
            self.effects.play(EffectCue::ResetPressed);
        }
    }

    /// Replace preferences and store them
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
        if let Err(e) = self.settings.save(self.store.backend_mut()) {
            log::warn!("Could not save settings: {}", e);
        }
    }

    /// Reduced-motion toggle on the page
    pub fn set_reduced_motion(&mut self, on: bool) {
        let settings = Settings {
            reduced_motion: on,
            ..self.settings.clone()
        };
        self.set_settings(settings);
    }

    /// Confetti density picker on the page
    pub fn set_confetti(&mut self, level: ConfettiLevel) {
        let settings = Settings {
            confetti: level,
            ..self.settings.clone()
        };
        self.set_settings(settings);
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.state) {
            log::warn!("Scoreboard not saved, keeping in-memory state: {}", e);
        }
    }
}
