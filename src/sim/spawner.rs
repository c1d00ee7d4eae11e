//! Dynamic enemy spawning while the level is being climbed
//!
//! Each category rolls once per tick with probability `rate * readiness * dt`.
//! Readiness ramps linearly from 0 to 1 over the category's minimum
//! interval after its last spawn, so spawns never cluster.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::drone::SurveillanceUnit;
use super::enemy::{Enemy, EnemyTag, ROCK_GRAVITY};
use super::state::EntityIds;
use crate::consts::*;
use crate::tuning::{DifficultyConfig, LevelConfig};

/// Hard cap on live enemies
pub const MAX_ENEMIES: usize = 48;
/// Rocks get more frequent within this distance of the castle
pub const SUMMIT_RANGE: f32 = 800.0;
/// Rock rate multiplier right at the castle is `1 + SUMMIT_BOOST`
pub const SUMMIT_BOOST: f32 = 4.0;
/// Transient strike rate per configured strike slot (per second)
pub const STRIKE_RATE_PER_SLOT: f32 = 0.24;
/// Flyers only spawn once the player is past this share of the climb
pub const FLYER_HEIGHT_FRACTION: f32 = 0.6;
const ROCK_MIN_INTERVAL: f32 = 1.0;
const STRIKE_MIN_INTERVAL: f32 = 1.5;
const FLYER_MIN_INTERVAL: f32 = 3.0;
/// Surveillance units appear this far above the player
const DRONE_SPAWN_HEIGHT: f32 = 400.0;
/// No new unit if another is already this close to the spawn point
const DRONE_CLEARANCE: f32 = 200.0;

/// What the spawner needs to know about the level this tick
#[derive(Debug, Clone, Copy)]
pub struct SpawnContext<'a> {
    pub player: Vec2,
    /// Centre y of the castle platform
    pub final_y: f32,
    /// Centre y of the spawn platform
    pub spawn_y: f32,
    pub enemies: &'a [Enemy],
}

impl SpawnContext<'_> {
    fn climbed_fraction(&self) -> f32 {
        let height = self.spawn_y - self.final_y;
        if height <= 0.0 {
            return 1.0;
        }
        ((self.spawn_y - self.player.y) / height).clamp(0.0, 1.0)
    }
}

/// Time since the last spawn of each category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spawner {
    pub since_rock: f32,
    pub since_strike: f32,
    pub since_flyer: f32,
    pub drone_timer: f32,
}

fn readiness(since_last: f32, min_interval: f32) -> f32 {
    (since_last / min_interval).min(1.0)
}

fn roll<R: Rng>(rng: &mut R, rate: f32, dt: f32) -> bool {
    let chance = f64::from((rate * dt).clamp(0.0, 1.0));
    rng.random_bool(chance)
}

impl Spawner {
    /// Rock rate multiplier from the distance to the castle
    pub fn summit_multiplier(player_y: f32, final_y: f32) -> f32 {
        let distance = (player_y - final_y).abs();
        if distance < SUMMIT_RANGE {
            1.0 + SUMMIT_BOOST * (1.0 - distance / SUMMIT_RANGE)
        } else {
            1.0
        }
    }

    /// Advance the timers and return any enemies spawned this tick
    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        ctx: &SpawnContext,
        level: &LevelConfig,
        difficulty: &DifficultyConfig,
        ids: &mut EntityIds,
        rng: &mut R,
    ) -> Vec<Enemy> {
        self.since_rock += dt;
        self.since_strike += dt;
        self.since_flyer += dt;
        if level.level >= 2 {
            self.drone_timer += dt;
        }

        let mut spawned = Vec::new();
        let live = ctx.enemies.iter().filter(|e| e.active).count();
        if live >= MAX_ENEMIES {
            return spawned;
        }

        let rock_rate = level.rock_rate
            * Self::summit_multiplier(ctx.player.y, ctx.final_y)
            * readiness(self.since_rock, ROCK_MIN_INTERVAL);
        if roll(rng, rock_rate, dt) {
            self.since_rock = 0.0;
            let x = (ctx.player.x + rng.random_range(-200.0..=200.0)).clamp(60.0, SCREEN_WIDTH - 60.0);
            let y = ctx.player.y - rng.random_range(200.0..=500.0);
            let gravity = ROCK_GRAVITY * level.rock_gravity_mult;
            spawned.push(Enemy::falling_hazard(ids.next(), Vec2::new(x, y), gravity, false));
        }

        if level.has_strikes() {
            // Difficulty scaling can leave zero slots; the last level keeps one
            let slots = level.strikes.max(1) as f32;
            let rate =
                STRIKE_RATE_PER_SLOT * slots * readiness(self.since_strike, STRIKE_MIN_INTERVAL);
            if roll(rng, rate, dt) {
                self.since_strike = 0.0;
                let x = (ctx.player.x + rng.random_range(-150.0..=150.0)).clamp(80.0, SCREEN_WIDTH - 80.0);
                let y = ctx.player.y - rng.random_range(50.0..=200.0);
                spawned.push(Enemy::transient_strike(ids.next(), Vec2::new(x, y)));
            }
        }

        if ctx.climbed_fraction() >= FLYER_HEIGHT_FRACTION {
            let rate = level.flyer_rate * readiness(self.since_flyer, FLYER_MIN_INTERVAL);
            if roll(rng, rate, dt) {
                self.since_flyer = 0.0;
                let side = if rng.random_bool(0.5) { -250.0 } else { 250.0 };
                let x = (ctx.player.x + side).clamp(100.0, SCREEN_WIDTH - 100.0);
                let y = ctx.player.y - rng.random_range(100.0..=300.0);
                let range = rng.random_range(level.flyer_patrol.0..=level.flyer_patrol.1);
                let speed = rng.random_range(level.flyer_speed.0..=level.flyer_speed.1);
                spawned.push(Enemy::patrol_flyer(ids.next(), Vec2::new(x, y), range, speed));
            }
        }

        if level.level >= 2 && self.drone_timer >= difficulty.drone_interval {
            self.drone_timer = 0.0;
            let x = (ctx.player.x + rng.random_range(-200.0..=200.0)).clamp(100.0, SCREEN_WIDTH - 100.0);
            let home = Vec2::new(x, ctx.player.y - DRONE_SPAWN_HEIGHT);
            let crowded = ctx.enemies.iter().any(|e| {
                e.active
                    && e.tag() == EnemyTag::SurveillanceUnit
                    && e.pos.distance(home) < DRONE_CLEARANCE
            });
            if crowded {
                log::debug!("Skipping surveillance unit spawn, another is nearby");
            } else {
                let unit = SurveillanceUnit::new(
                    home,
                    difficulty.drone_patrol_range,
                    difficulty.drone_detection_range,
                    rng,
                );
                spawned.push(Enemy::surveillance_unit(ids.next(), home, unit));
            }
        }

        spawned
    }
}
