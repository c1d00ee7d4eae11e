//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Within a
//! playing tick the order is fixed: platforms, player, flag, enemies,
//! power-ups, effects, lava, dynamic spawning, camera, cleanup.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::enemy::{EnemyContext, EnemyTag};
use super::player::{DamageOutcome, JumpKind, PlayerInput};
use super::powerup::PowerUpKind;
use super::spawner::SpawnContext;
use super::state::{COLOR_DUST, COLOR_HIT, COLOR_SPARK, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Magnet reach (px)
pub const MAGNET_RADIUS: f32 = 200.0;
/// Speed at which the magnet drags power-ups (px/s)
pub const MAGNET_PULL_SPEED: f32 = 400.0;
/// World speed while time-slow is active
pub const TIME_SLOW_FACTOR: f32 = 0.5;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump button held (edges are detected by the player)
    pub jump: bool,
    /// Pause toggle
    pub pause: bool,
    /// Continue to the next level after the flag
    pub advance: bool,
    /// Start over after game over or victory
    pub restart: bool,
}

impl TickInput {
    fn player_input(&self) -> PlayerInput {
        PlayerInput {
            left: self.left,
            right: self.right,
            jump: self.jump,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                state.lava.pause();
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                state.lava.resume();
            }
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Paused => return,
        GamePhase::GameOver | GamePhase::Victory => {
            if input.restart {
                state.restart();
            }
            return;
        }
        GamePhase::LevelComplete => {
            state.flag.update(dt);
            state.update_particles(dt);
            if input.advance {
                state.advance_level();
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;
    state.level_time += dt;
    let mut rng = state.rng_state.next_rng();

    // Enemies, lava and spawning run slower under time-slow
    let world_dt = if state.player.powerups.is_active(PowerUpKind::TimeSlow) {
        dt * TIME_SLOW_FACTOR
    } else {
        dt
    };

    update_platforms(state, dt);
    update_player(state, input, dt, &mut rng);

    state.flag.update(dt);
    if state.player.alive && state.player.hitbox().intersects(&state.flag.hitbox()) && state.flag.touch() {
        complete_level(state, &mut rng);
        return;
    }

    update_enemies(state, world_dt);
    if state.phase == GamePhase::Playing {
        update_powerups(state, dt, &mut rng);
    }
    state.update_particles(dt);
    if state.phase == GamePhase::Playing {
        update_lava(state, world_dt, &mut rng);
    }
    if state.phase == GamePhase::Playing {
        spawn_enemies(state, world_dt, &mut rng);
    }

    // The view never sinks below the last platform landed on
    let focus = state.player.pos.y.min(state.player.respawn_point.y);
    state.camera.follow(focus, dt);

    // Remove finished entities
    state.enemies.retain(|e| e.active);
    state.powerups.retain(|p| !p.is_collected());
    state.normalize_order();
}

fn update_platforms(state: &mut GameState, dt: f32) {
    for platform in &mut state.platforms {
        platform.update(dt);
    }

    // A grounded player rides its platform
    let player = &mut state.player;
    if let Some(id) = player.ground_platform.filter(|_| player.on_ground) {
        if let Some(platform) = state.platforms.iter().find(|p| p.id == id) {
            player.pos.x += platform.last_dx;
        }
    }
}

fn update_player(state: &mut GameState, input: &TickInput, dt: f32, rng: &mut Pcg32) {
    let step = state
        .player
        .update(input.player_input(), &mut state.platforms, dt);

    match step.jumped {
        Some(JumpKind::Ground) => state.events.push(GameEvent::Jump),
        Some(JumpKind::Air) => state.events.push(GameEvent::DoubleJump),
        None => {}
    }
    if step.landed {
        state.events.push(GameEvent::Land);
        let feet = state.player.hitbox().bottom();
        state.spawn_particles(Vec2::new(state.player.pos.x, feet), COLOR_DUST, 6, rng);
    }
    if let Some((id, points)) = step.first_touch {
        state.events.push(GameEvent::PlatformTouched { id, points });
    }
    if let Some(combo) = step.combo_bonus {
        state.events.push(GameEvent::ComboBonus { combo });
    }
}

fn complete_level(state: &mut GameState, rng: &mut Pcg32) {
    let bonus = state.level_bonus();
    state.player.score += bonus;
    state.last_bonus = bonus;
    state.phase = GamePhase::LevelComplete;
    state.lava.pause();
    state.events.push(GameEvent::LevelComplete {
        level: state.level,
        bonus,
    });
    let flag_pos = state.flag.pos;
    state.spawn_particles(flag_pos, COLOR_SPARK, 40, rng);
    log::info!(
        "Level {} complete in {:.1}s, bonus {} (score {})",
        state.level,
        state.level_time,
        bonus,
        state.player.score
    );
}

fn update_enemies(state: &mut GameState, dt: f32) {
    let ctx = EnemyContext {
        player: state.player.alive.then_some(state.player.pos),
        view_bottom: state.view_bottom(),
    };
    for enemy in &mut state.enemies {
        enemy.update(dt, &ctx);
        if enemy.strike_went_live() {
            state.events.push(GameEvent::StrikeActive);
        }
    }

    if !state.player.alive {
        return;
    }
    let hitbox = state.player.hitbox();
    let damage_mult = state.difficulty.enemy_damage_mult;
    let hit = state
        .enemies
        .iter_mut()
        .find(|e| e.hitbox().is_some_and(|b| b.intersects(&hitbox)));
    let Some(enemy) = hit else {
        return;
    };

    let amount = enemy.damage * damage_mult;
    let outcome = state.player.take_damage(amount);
    // Rocks shatter on anything but a free pass
    if outcome != DamageOutcome::Ignored && enemy.tag() == EnemyTag::FallingHazard {
        enemy.active = false;
    }
    let pos = state.player.pos;
    apply_damage_outcome(state, outcome, amount, pos);
}

/// Turn a damage outcome into events and phase changes
fn apply_damage_outcome(state: &mut GameState, outcome: DamageOutcome, amount: f32, hit_pos: Vec2) {
    let mut rng = state.rng_state.next_rng();
    match outcome {
        DamageOutcome::Ignored => {}
        DamageOutcome::ShieldAbsorbed => {
            state.events.push(GameEvent::ShieldHit);
            state.spawn_particles(hit_pos, COLOR_SPARK, 10, &mut rng);
        }
        DamageOutcome::Hurt => {
            state.events.push(GameEvent::Damaged { amount });
            state.spawn_particles(hit_pos, COLOR_HIT, 8, &mut rng);
        }
        DamageOutcome::LifeLost => {
            state.events.push(GameEvent::LifeLost {
                lives_left: state.player.lives,
            });
            state.lava.reset(state.player.respawn_point.y);
            state.camera.snap(state.player.pos.y);
            log::info!("Life lost, {} left", state.player.lives);
        }
        DamageOutcome::Terminal => {
            state.events.push(GameEvent::Death);
            state.events.push(GameEvent::GameOver);
            state.phase = GamePhase::GameOver;
            state.lava.pause();
            log::info!(
                "Game over on level {} with {} points",
                state.level,
                state.player.score
            );
        }
    }
}

fn update_powerups(state: &mut GameState, dt: f32, rng: &mut Pcg32) {
    let player_pos = state.player.pos;
    let magnet = state.player.powerups.is_active(PowerUpKind::Magnet);
    let hitbox = state.player.hitbox();
    let duration_mult = state.difficulty.powerup_duration_mult;

    let mut collected = Vec::new();
    for powerup in &mut state.powerups {
        if magnet && powerup.is_available() && powerup.pos.distance(player_pos) < MAGNET_RADIUS {
            powerup.pull_toward(player_pos, MAGNET_PULL_SPEED, dt);
        }
        powerup.update(dt);
        if state.player.alive
            && powerup.is_available()
            && powerup.hitbox().intersects(&hitbox)
            && powerup.collect()
        {
            collected.push((powerup.kind, powerup.pos));
        }
    }

    for (kind, pos) in collected {
        let points = state.player.activate_powerup(kind, duration_mult);
        state.events.push(GameEvent::PowerUpCollected { kind, points });
        state.spawn_particles(pos, COLOR_SPARK, 12, rng);
    }
}

fn update_lava(state: &mut GameState, dt: f32, rng: &mut Pcg32) {
    if !state.player.alive {
        return;
    }
    let hitbox = state.player.hitbox();
    let touched = state.lava.update(dt, state.player.pos.y, &hitbox, rng);
    let fell = state.player.pos.y > state.view_bottom() + FALL_DEATH_MARGIN;
    if !(touched || fell) {
        return;
    }

    if touched {
        state.lava.splash(state.player.pos.x, rng);
        state.events.push(GameEvent::LavaSplash);
    }
    let pos = state.player.pos;
    let outcome = state.player.take_lethal_damage();
    apply_damage_outcome(state, outcome, 0.0, pos);
}

fn spawn_enemies(state: &mut GameState, dt: f32, rng: &mut Pcg32) {
    let ctx = SpawnContext {
        player: state.player.pos,
        final_y: state.final_y,
        spawn_y: state.spawn_y(),
        enemies: &state.enemies,
    };
    let spawned = state.spawner.update(
        dt,
        &ctx,
        &state.level_config,
        &state.difficulty,
        &mut state.ids,
        rng,
    );
    for enemy in spawned {
        state.events.push(GameEvent::EnemySpawned { tag: enemy.tag() });
        state.enemies.push(enemy);
    }
}
