//! Fixed-timestep game driver
//!
//! Owns the simulation and its collaborators. The front end feeds it frame
//! times and input; the session runs whole `SIM_DT` ticks, forwards each
//! tick's events to audio, and records the score once a run ends.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::audio::{AudioManager, SoundEffect};
use crate::consts::*;
use crate::highscores::Leaderboards;
use crate::settings::Settings;
use crate::sim::state::{GamePhase, GameState};
use crate::sim::tick::{TickInput, tick};
use crate::sim::view::{Frame, snapshot};
use crate::tuning::DifficultyConfig;

pub struct Session {
    pub state: GameState,
    pub audio: AudioManager,
    pub leaderboards: Leaderboards,
    /// Where leaderboards are saved after a run, if anywhere
    pub scores_path: Option<PathBuf>,
    pub player_name: String,
    /// Rank of the last recorded run, if it made the board
    pub last_rank: Option<usize>,
    accumulator: f32,
    input: TickInput,
    /// Score already recorded for the current terminal phase
    recorded: bool,
}

impl Session {
    pub fn new(seed: u64, difficulty: DifficultyConfig, audio: AudioManager) -> Self {
        Self {
            state: GameState::new(seed, difficulty),
            audio,
            leaderboards: Leaderboards::default(),
            scores_path: None,
            player_name: String::new(),
            last_rank: None,
            accumulator: 0.0,
            input: TickInput::default(),
            recorded: false,
        }
    }

    /// New run configured from the player's settings
    pub fn with_settings(seed: u64, settings: &Settings, mut audio: AudioManager) -> Self {
        audio.apply_settings(settings);
        let mut session = Self::new(seed, DifficultyConfig::for_difficulty(settings.difficulty), audio);
        session.state.particles_enabled = settings.particles;
        session
    }

    /// Latest input. Held keys are replaced; one-shot requests stay set
    /// until a tick consumes them.
    pub fn set_input(&mut self, input: TickInput) {
        self.input = TickInput {
            left: input.left,
            right: input.right,
            jump: input.jump,
            pause: self.input.pause || input.pause,
            advance: self.input.advance || input.advance,
            restart: self.input.restart || input.restart,
        };
    }

    /// Run simulation ticks for one rendered frame. Returns the number run.
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.clone();
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.pause = false;
            self.input.advance = false;
            self.input.restart = false;

            self.audio.handle_events(&self.state.events);
            self.check_run_end();
        }
        // Drop time the substep cap could not catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Share of a tick left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / SIM_DT
    }

    pub fn frame(&self) -> Frame {
        snapshot(&self.state)
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    fn check_run_end(&mut self) {
        if !self.state.phase.is_terminal() {
            self.recorded = false;
            return;
        }
        if self.recorded {
            return;
        }
        self.recorded = true;

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self.last_rank = self.leaderboards.record(
            self.state.difficulty.difficulty,
            &self.player_name,
            self.state.player.score,
            self.state.level,
            timestamp,
        );
        if self.last_rank.is_none() {
            return;
        }
        self.audio.play(SoundEffect::HighScore);
        if let Some(path) = &self.scores_path {
            if let Err(e) = self.leaderboards.save(path) {
                log::warn!("Failed to save high scores: {e}");
            }
        }
    }
}
