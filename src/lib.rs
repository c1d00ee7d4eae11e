//! SkyRunner - a vertical-scrolling platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, enemies, lava, level generation)
//! - `tuning`: Difficulty presets and per-level counts
//! - `session`: Fixed-timestep driver owning the audio and leaderboard collaborators
//! - `highscores` / `settings` / `persistence`: JSON-backed player data
//! - `audio` / `assets`: Narrow interfaces to the playback and content backends

pub mod assets;
pub mod audio;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, PersistError, SimError};
pub use highscores::{HighScores, Leaderboards};
pub use session::Session;
pub use settings::Settings;
pub use tuning::{Difficulty, DifficultyConfig, LevelConfig};

/// Game configuration constants
///
/// Everything is expressed in per-second units: velocities in px/s,
/// accelerations in px/s², smoothing as exponential rates in 1/s.
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;
    /// Longest frame delta the session will feed into the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Arena dimensions (y grows downward; climbing means decreasing y)
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Player sprite size
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Collision box as a fraction of the sprite
    pub const PLAYER_HITBOX_WIDTH_RATIO: f32 = 0.7;
    pub const PLAYER_HITBOX_HEIGHT_RATIO: f32 = 0.8;
    /// Collision box is shifted down this much so feet line up with the sprite
    pub const PLAYER_HITBOX_OFFSET_Y: f32 = 5.0;
    /// Maximum downward speed
    pub const TERMINAL_VELOCITY: f32 = 1200.0;
    /// Horizontal speed multiplier while the speed power-up runs
    pub const SPEED_BOOST: f32 = 1.5;
    /// Ground deceleration toward zero when no direction is held
    pub const GROUND_DECEL_RATE: f32 = 9.751;
    /// Extra horizontal drag while airborne
    pub const AIR_DRAG_RATE: f32 = 3.078;

    /// Landing tolerance below a platform top (px)
    pub const LANDING_TOLERANCE: f32 = 25.0;
    /// Horizontal band for side contacts (px)
    pub const LATERAL_CONTACT_BAND: f32 = 20.0;
    /// Side contacts only count while the feet are less than this far below
    /// a platform top (px)
    pub const LATERAL_FOOT_CLEARANCE: f32 = 10.0;

    /// Platform defaults
    pub const PLATFORM_WIDTH: f32 = 120.0;
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    pub const PLATFORM_VERTICAL_SPACING: f32 = 80.0;
    pub const SPAWN_PLATFORM_WIDTH: f32 = 180.0;
    pub const CASTLE_PLATFORM_WIDTH: f32 = 280.0;

    /// Invulnerability after a regular hit (s)
    pub const HIT_INVULNERABILITY: f32 = 1.0;
    /// Invulnerability after losing a life (s)
    pub const RESPAWN_INVULNERABILITY: f32 = 2.0;
    /// Falling this far below the visible area costs a life
    pub const FALL_DEATH_MARGIN: f32 = 200.0;

    /// Base power-up duration (s)
    pub const POWERUP_DURATION: f32 = 8.0;
    pub const POWERUP_SIZE: f32 = 25.0;

    /// Scoring
    pub const POINTS_PLATFORM: u64 = 10;
    pub const POINTS_POWERUP: u64 = 50;
    pub const POINTS_LEVEL_COMPLETE: u64 = 500;
    pub const POINTS_PER_LIFE: u64 = 1000;
    pub const POINTS_PER_SPARE_SECOND: f32 = 50.0;
    /// Seconds under which a level clear earns a time bonus
    pub const PAR_TIME: f32 = 90.0;
    /// Combo resets when no scoring event happens for this long (s)
    pub const COMBO_DECAY_TIME: f32 = 3.0;

    /// Camera keeps the player this far below the top of the view
    pub const CAMERA_OFFSET_Y: f32 = 300.0;
    pub const CAMERA_SMOOTHING_RATE: f32 = 9.751;

    /// Number of levels; clearing the last one is victory
    pub const MAX_LEVEL: u32 = 3;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Frame-rate independent exponential approach of `current` toward `target`
#[inline]
pub fn damp(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    lerp(current, target, 1.0 - (-rate * dt).exp())
}

/// Sinusoid used for bobbing and hovering motion
#[inline]
pub fn sine_wave(time: f32, amplitude: f32, frequency: f32) -> f32 {
    amplitude * (time * frequency).sin()
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damp_matches_per_frame_lerp_at_60hz() {
        // 0.15 per frame at 60 Hz
        let v = damp(10.0, 0.0, consts::GROUND_DECEL_RATE, consts::SIM_DT);
        assert!((v - 8.5).abs() < 0.01, "got {v}");
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(370.0), 10.0);
        assert_eq!(wrap_degrees(-10.0), 350.0);
        assert_eq!(wrap_degrees(0.0), 0.0);
    }
}
