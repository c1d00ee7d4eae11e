//! Power-ups
//!
//! A power-up floats in place until touched, plays a short collection
//! animation, then reports `collected` and is dropped from the world.

use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use crate::consts::*;
use crate::error::SimError;
use crate::sine_wave;

/// Collection animation length (6 frames at 15 fps)
pub const COLLECT_DURATION: f32 = 0.4;
/// Bobbing amplitude (px) and angular speed (rad/s)
const FLOAT_AMPLITUDE: f32 = 12.0;
const FLOAT_SPEED: f32 = 1.5;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpKind {
    /// Absorbs the next hit
    Shield,
    /// Faster running
    Speed,
    /// Player grows (cosmetic scale, larger hitbox)
    Zoom,
    /// Doubles the combo multiplier
    Combo,
    /// Enemies and lava advance at half speed
    TimeSlow,
    /// Pulls nearby power-ups toward the player
    Magnet,
    /// One extra mid-air jump
    DoubleJump,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 7] = [
        PowerUpKind::Shield,
        PowerUpKind::Speed,
        PowerUpKind::Zoom,
        PowerUpKind::Combo,
        PowerUpKind::TimeSlow,
        PowerUpKind::Magnet,
        PowerUpKind::DoubleJump,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "shield",
            PowerUpKind::Speed => "speed",
            PowerUpKind::Zoom => "zoom",
            PowerUpKind::Combo => "combo",
            PowerUpKind::TimeSlow => "time_slow",
            PowerUpKind::Magnet => "magnet",
            PowerUpKind::DoubleJump => "double_jump",
        }
    }

    /// Effect duration before the difficulty multiplier (s)
    pub fn base_duration(&self) -> f32 {
        match self {
            PowerUpKind::Shield => POWERUP_DURATION * 2.0,
            PowerUpKind::Speed => POWERUP_DURATION * 1.5,
            PowerUpKind::Zoom => POWERUP_DURATION * 1.8,
            _ => POWERUP_DURATION,
        }
    }
}

impl FromStr for PowerUpKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PowerUpKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SimError::unknown("power-up", s))
    }
}

/// Lifecycle of a power-up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PowerUpState {
    Available,
    Collecting { elapsed: f32 },
    Collected,
}

/// A power-up entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    /// Rest position the bobbing is centred on
    pub anchor: Vec2,
    pub state: PowerUpState,
    float_time: f32,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            anchor: pos,
            state: PowerUpState::Available,
            float_time: 0.0,
        }
    }

    pub fn hitbox(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(POWERUP_SIZE * 2.0))
    }

    /// Only available power-ups may be collision-tested
    pub fn is_available(&self) -> bool {
        self.state == PowerUpState::Available
    }

    pub fn is_collected(&self) -> bool {
        self.state == PowerUpState::Collected
    }

    /// Start the collection animation. Succeeds once.
    pub fn collect(&mut self) -> bool {
        if !self.is_available() {
            return false;
        }
        self.state = PowerUpState::Collecting { elapsed: 0.0 };
        true
    }

    /// Progress of the collection animation in [0, 1]
    pub fn collect_progress(&self) -> f32 {
        match self.state {
            PowerUpState::Available => 0.0,
            PowerUpState::Collecting { elapsed } => (elapsed / COLLECT_DURATION).min(1.0),
            PowerUpState::Collected => 1.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        match &mut self.state {
            PowerUpState::Available => {
                self.float_time += dt * FLOAT_SPEED;
                self.pos = self.anchor + Vec2::new(0.0, sine_wave(self.float_time, FLOAT_AMPLITUDE, 1.0));
            }
            PowerUpState::Collecting { elapsed } => {
                *elapsed += dt;
                if *elapsed >= COLLECT_DURATION {
                    self.state = PowerUpState::Collected;
                }
            }
            PowerUpState::Collected => {}
        }
    }

    /// Magnet pull: move the anchor toward `target` by at most `speed * dt`
    pub fn pull_toward(&mut self, target: Vec2, speed: f32, dt: f32) {
        if !self.is_available() {
            return;
        }
        let delta = target - self.anchor;
        let step = speed * dt;
        if delta.length() <= step {
            self.anchor = target;
        } else {
            self.anchor += delta.normalize_or_zero() * step;
        }
    }
}
