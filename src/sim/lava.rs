//! Rising lava
//!
//! The front chases the player upward. Speed is the difficulty base speed
//! scaled by a progress multiplier (grows with height gained, never shrinks
//! within an attempt), plus a slow time-based acceleration, plus an escape
//! penalty when the player stalls for too long.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use crate::consts::SCREEN_WIDTH;
use crate::tuning::DifficultyConfig;

/// Initial gap below the player (px)
pub const SPAWN_DISTANCE: f32 = 500.0;
/// Progress multiplier gained per px climbed
pub const PROGRESS_GAIN: f32 = 0.0001;
pub const PROGRESS_MAX: f32 = 2.0;
/// Stalling longer than this (s) triggers the escape penalty
pub const ESCAPE_THRESHOLD: f32 = 5.0;
/// Vertical movement below this between samples counts as stalling (px)
pub const ESCAPE_MOVE_THRESHOLD: f32 = 10.0;
/// Seconds between stall samples
pub const ESCAPE_SAMPLE_INTERVAL: f32 = 0.5;
pub const ESCAPE_MULTIPLIER: f32 = 1.2;
/// Surface wave amplitude (px)
pub const SURFACE_AMPLITUDE: f32 = 15.0;
/// Feet this close above the surface already count as touching
pub const CONTACT_TOLERANCE: f32 = 5.0;
/// Gap under which the HUD shows a warning (px)
pub const WARNING_DISTANCE: f32 = 150.0;

const MAX_PARTICLES: usize = 64;
const BUBBLES_PER_SECOND: f32 = 20.0;

/// (spatial frequency, phase speed, relative amplitude)
const WAVES: [(f32, f32, f32); 3] = [(0.02, 2.0, 1.0), (0.05, 1.5, 0.5), (0.01, 0.8, 0.3)];

/// Cosmetic bubble or splash droplet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LavaParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
}

/// The rising lava front
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lava {
    /// Front height; only ever decreases until `reset`
    pub y: f32,
    pub current_speed: f32,
    pub progress_multiplier: f32,
    pub escape_timer: f32,
    /// Seconds since the attempt started (drives acceleration)
    pub elapsed: f32,
    pub paused: bool,
    base_speed: f32,
    accel: f32,
    max_speed: f32,
    last_player_y: f32,
    sample_anchor_y: f32,
    sample_timer: f32,
    stalling: bool,
    /// Animation clock for the surface waves
    time: f32,
    #[serde(skip)]
    pub particles: Vec<LavaParticle>,
}

impl Lava {
    pub fn new(config: &DifficultyConfig) -> Self {
        Self {
            y: 0.0,
            current_speed: config.lava_speed,
            progress_multiplier: 1.0,
            escape_timer: 0.0,
            elapsed: 0.0,
            paused: false,
            base_speed: config.lava_speed,
            accel: config.lava_accel,
            max_speed: config.lava_max_speed,
            last_player_y: 0.0,
            sample_anchor_y: 0.0,
            sample_timer: 0.0,
            stalling: true,
            time: 0.0,
            particles: Vec::new(),
        }
    }

    /// Seed the front a fixed distance below the player
    pub fn initialize(&mut self, player_y: f32) {
        self.y = player_y + SPAWN_DISTANCE;
        self.current_speed = self.base_speed;
        self.progress_multiplier = 1.0;
        self.escape_timer = 0.0;
        self.elapsed = 0.0;
        self.last_player_y = player_y;
        self.sample_anchor_y = player_y;
        self.sample_timer = 0.0;
        self.stalling = true;
    }

    /// Fresh pursuit for a continued life; drops all particles
    pub fn reset(&mut self, player_y: f32) {
        self.initialize(player_y);
        self.particles.clear();
        self.paused = false;
        log::debug!("Lava reset to {:.0}", self.y);
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn escape_active(&self) -> bool {
        self.escape_timer > ESCAPE_THRESHOLD
    }

    /// Advance the front. Returns true when the player touches the lava.
    pub fn update<R: Rng>(&mut self, dt: f32, player_y: f32, player_box: &Aabb, rng: &mut R) -> bool {
        if self.paused {
            return false;
        }
        self.time += dt;
        self.elapsed += dt;

        self.update_progress(player_y);
        self.update_escape_pressure(player_y, dt);

        let mut speed = self.base_speed * self.progress_multiplier + self.accel * self.elapsed;
        if self.escape_active() {
            speed *= ESCAPE_MULTIPLIER;
        }
        self.current_speed = speed.min(self.max_speed);

        self.y -= self.current_speed * dt;

        self.update_particles(dt, rng);
        self.check_contact(player_box)
    }

    fn update_progress(&mut self, player_y: f32) {
        let gained = (self.last_player_y - player_y).max(0.0);
        self.progress_multiplier =
            (self.progress_multiplier + gained * PROGRESS_GAIN).clamp(1.0, PROGRESS_MAX);
        self.last_player_y = player_y;
    }

    fn update_escape_pressure(&mut self, player_y: f32, dt: f32) {
        self.sample_timer += dt;
        if self.sample_timer >= ESCAPE_SAMPLE_INTERVAL {
            self.sample_timer -= ESCAPE_SAMPLE_INTERVAL;
            self.stalling = (player_y - self.sample_anchor_y).abs() < ESCAPE_MOVE_THRESHOLD;
            self.sample_anchor_y = player_y;
        }

        if self.stalling {
            self.escape_timer += dt;
        } else {
            self.escape_timer = (self.escape_timer - 2.0 * dt).max(0.0);
        }
    }

    /// Surface height at `x`: three superimposed sinusoids
    pub fn surface_y(&self, x: f32) -> f32 {
        self.y
            + WAVES
                .iter()
                .map(|&(freq, speed, amp)| {
                    (x * freq + self.time * speed).sin() * SURFACE_AMPLITUDE * amp
                })
                .sum::<f32>()
    }

    /// Feet at or below the surface (minus tolerance) under the player's centre
    pub fn check_contact(&self, player_box: &Aabb) -> bool {
        let surface = self.surface_y(player_box.center().x);
        surface - player_box.bottom() <= CONTACT_TOLERANCE
    }

    /// Gap between the front and the player (positive when safe)
    pub fn distance_to(&self, player_y: f32) -> f32 {
        self.y - player_y
    }

    /// Threat level in [10, 100] for the HUD
    pub fn danger_level(&self, player_y: f32) -> f32 {
        let d = self.distance_to(player_y);
        if d <= 0.0 {
            100.0
        } else if d < 100.0 {
            90.0 - d / 100.0 * 40.0
        } else if d < 300.0 {
            50.0 - (d - 100.0) / 200.0 * 40.0
        } else {
            10.0
        }
    }

    pub fn is_warning(&self, player_y: f32) -> bool {
        self.distance_to(player_y) < WARNING_DISTANCE
    }

    /// Burst of droplets where something hit the surface
    pub fn splash<R: Rng>(&mut self, x: f32, rng: &mut R) {
        for _ in 0..12 {
            if self.particles.len() >= MAX_PARTICLES {
                break;
            }
            self.particles.push(LavaParticle {
                pos: Vec2::new(x, self.surface_y(x)),
                vel: Vec2::new(rng.random_range(-120.0..120.0), rng.random_range(-360.0..-120.0)),
                life: rng.random_range(0.4..0.9),
            });
        }
    }

    fn update_particles<R: Rng>(&mut self, dt: f32, rng: &mut R) {
        if self.particles.len() < MAX_PARTICLES && rng.random::<f32>() < BUBBLES_PER_SECOND * dt {
            let x = rng.random_range(0.0..SCREEN_WIDTH);
            self.particles.push(LavaParticle {
                pos: Vec2::new(x, self.surface_y(x)),
                vel: Vec2::new(0.0, rng.random_range(-60.0..-20.0)),
                life: rng.random_range(0.5..1.5),
            });
        }
        for p in &mut self.particles {
            p.vel.y += 300.0 * dt;
            p.pos += p.vel * dt;
            p.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}
