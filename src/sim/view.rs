//! Read-only render snapshot
//!
//! Everything a renderer needs for one frame, in screen coordinates, with
//! type tags instead of behaviour. Building a frame never mutates the state.

use glam::Vec2;
use serde::Serialize;

use super::enemy::{Behavior, EnemyTag, StrikePhase};
use super::lava::WARNING_DISTANCE;
use super::platform::PlatformKind;
use super::powerup::PowerUpKind;
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Sprites this far outside the view are still emitted (px)
const CULL_MARGIN: f32 = 100.0;
/// Horizontal step between lava surface samples (px)
const SURFACE_STEP: f32 = 20.0;

/// What to draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SpriteKind {
    Player,
    Platform,
    MovingPlatform,
    Castle,
    Enemy(EnemyTag),
    /// Strike indicator before it turns dangerous
    StrikeWarning,
    PowerUp(PowerUpKind),
    Flag,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    /// Centre in screen space
    pub pos: Vec2,
    pub size: Vec2,
    /// Degrees
    pub rotation: f32,
    /// 0-1
    pub alpha: f32,
    /// Mirrored horizontally
    pub flip: bool,
}

/// Values for the heads-up display
#[derive(Debug, Clone, Serialize)]
pub struct Hud {
    pub level: u32,
    pub level_name: String,
    pub score: u64,
    pub lives: u32,
    pub health: f32,
    pub max_health: f32,
    pub combo: u32,
    pub level_time: f32,
    /// 10-100
    pub danger: f32,
    pub lava_warning: bool,
    /// Active power-ups with seconds remaining
    pub powerups: Vec<(PowerUpKind, f32)>,
    pub phase: GamePhase,
    /// Share of the level climbed, 0-1
    pub progress: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub camera_y: f32,
    pub sprites: Vec<Sprite>,
    /// Lava surface polyline in screen space
    pub lava_surface: Vec<Vec2>,
    pub particles: Vec<(Vec2, u32, f32)>,
    pub hud: Hud,
}

fn sprite(kind: SpriteKind, pos: Vec2, size: Vec2) -> Sprite {
    Sprite {
        kind,
        pos,
        size,
        rotation: 0.0,
        alpha: 1.0,
        flip: false,
    }
}

/// Build the frame for the current camera position
pub fn snapshot(state: &GameState) -> Frame {
    let camera = &state.camera;
    let view = camera.view();
    let visible = |center: Vec2, size: Vec2| {
        center.y + size.y / 2.0 >= view.top() - CULL_MARGIN
            && center.y - size.y / 2.0 <= view.bottom() + CULL_MARGIN
    };

    let mut sprites = Vec::new();

    for platform in &state.platforms {
        let size = Vec2::new(platform.width, platform.height);
        if !visible(platform.pos, size) {
            continue;
        }
        let kind = match platform.kind {
            PlatformKind::Static => SpriteKind::Platform,
            PlatformKind::Moving { .. } => SpriteKind::MovingPlatform,
            PlatformKind::Castle => SpriteKind::Castle,
        };
        sprites.push(sprite(kind, camera.world_to_screen(platform.pos), size));
    }

    let flag = &state.flag;
    let flag_box = flag.hitbox();
    if visible(flag_box.center(), flag_box.max - flag_box.min) {
        let mut s = sprite(
            SpriteKind::Flag,
            camera.world_to_screen(flag.pos),
            Vec2::new(60.0, super::platform::FLAG_POLE_HEIGHT),
        );
        // Cloth height along the pole
        s.alpha = 0.5 + flag.progress * 0.5;
        sprites.push(s);
    }

    for powerup in state.powerups.iter().filter(|p| !p.is_collected()) {
        let size = Vec2::splat(POWERUP_SIZE * 2.0);
        if !visible(powerup.pos, size) {
            continue;
        }
        let mut s = sprite(
            SpriteKind::PowerUp(powerup.kind),
            camera.world_to_screen(powerup.pos),
            size * (1.0 + powerup.collect_progress() * 0.5),
        );
        s.alpha = 1.0 - powerup.collect_progress();
        sprites.push(s);
    }

    for enemy in state.enemies.iter().filter(|e| e.active) {
        let bounds = enemy.bounds();
        let size = bounds.max - bounds.min;
        if !visible(bounds.center(), size) {
            continue;
        }
        let (kind, rotation, alpha) = match &enemy.behavior {
            Behavior::PatrolFlyer(flyer) => (SpriteKind::Enemy(EnemyTag::PatrolFlyer), flyer.rotation, 1.0),
            Behavior::RotatingHazard(spinner) => {
                (SpriteKind::Enemy(EnemyTag::RotatingHazard), spinner.angle, 1.0)
            }
            Behavior::TransientStrike(strike) => match strike.phase {
                StrikePhase::Warning { .. } => (SpriteKind::StrikeWarning, 0.0, 0.5),
                StrikePhase::Active { .. } => (
                    SpriteKind::Enemy(EnemyTag::TransientStrike),
                    0.0,
                    if strike.visible { 1.0 } else { 0.3 },
                ),
            },
            _ => (SpriteKind::Enemy(enemy.tag()), 0.0, 1.0),
        };
        let mut s = sprite(kind, camera.world_to_screen(bounds.center()), size);
        s.rotation = rotation;
        s.alpha = alpha;
        sprites.push(s);
    }

    let player = &state.player;
    if player.alive {
        let mut s = sprite(
            SpriteKind::Player,
            camera.world_to_screen(player.pos),
            Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT) * player.zoom_scale,
        );
        s.flip = player.facing < 0.0;
        // Blink while invulnerable
        if player.is_invulnerable() && (player.time * 10.0) as u32 % 2 == 0 {
            s.alpha = 0.4;
        }
        sprites.push(s);
    }

    let lava_surface = (0..=(SCREEN_WIDTH / SURFACE_STEP) as u32)
        .map(|i| {
            let x = i as f32 * SURFACE_STEP;
            camera.world_to_screen(Vec2::new(x, state.lava.surface_y(x)))
        })
        .collect();

    let particles = state
        .particles
        .iter()
        .map(|p| (camera.world_to_screen(p.pos), p.color, p.life))
        .chain(
            state
                .lava
                .particles
                .iter()
                .map(|p| (camera.world_to_screen(p.pos), 0xff6a00, p.life.min(1.0))),
        )
        .collect();

    let height = state.spawn_y() - state.final_y;
    let progress = if height > 0.0 {
        ((state.spawn_y() - player.pos.y) / height).clamp(0.0, 1.0)
    } else {
        1.0
    };

    let hud = Hud {
        level: state.level,
        level_name: state.level_config.name.clone(),
        score: player.score,
        lives: player.lives,
        health: player.health,
        max_health: player.max_health,
        combo: player.combo,
        level_time: state.level_time,
        danger: state.lava.danger_level(player.pos.y),
        lava_warning: state.lava.distance_to(player.pos.y) < WARNING_DISTANCE,
        powerups: PowerUpKind::ALL
            .iter()
            .filter(|&&kind| player.powerups.is_active(kind))
            .map(|&kind| (kind, player.powerups.remaining(kind)))
            .collect(),
        phase: state.phase,
        progress,
    };

    Frame {
        camera_y: camera.y,
        sprites,
        lava_surface,
        particles,
        hud,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::Enemy;
    use crate::tuning::DifficultyConfig;

    #[test]
    fn test_snapshot_of_new_game() {
        let state = GameState::new(21, DifficultyConfig::default());
        let frame = snapshot(&state);
        let player = frame
            .sprites
            .iter()
            .find(|s| s.kind == SpriteKind::Player)
            .unwrap();
        assert_eq!(player.pos.y, CAMERA_OFFSET_Y);
        assert!(frame.sprites.iter().any(|s| s.kind == SpriteKind::Platform || s.kind == SpriteKind::MovingPlatform));
        // The castle is far above the first screen
        assert!(frame.sprites.iter().all(|s| s.kind != SpriteKind::Castle));
        assert_eq!(frame.hud.lives, 3);
        assert_eq!(frame.hud.level_name, "Cavern");
        assert!(frame.hud.progress < 0.05);
        assert_eq!(frame.lava_surface.len(), 65);
    }

    #[test]
    fn test_strike_warning_has_its_own_sprite() {
        let mut state = GameState::new(21, DifficultyConfig::default());
        let id = state.next_entity_id();
        let pos = state.player.pos - Vec2::new(0.0, 150.0);
        state.enemies.push(Enemy::transient_strike(id, pos));
        let frame = snapshot(&state);
        assert!(frame.sprites.iter().any(|s| s.kind == SpriteKind::StrikeWarning));
    }

    #[test]
    fn test_hud_lists_active_powerups() {
        let mut state = GameState::new(21, DifficultyConfig::default());
        state.player.activate_powerup(PowerUpKind::Speed, 1.0);
        let frame = snapshot(&state);
        assert_eq!(frame.hud.powerups.len(), 1);
        assert_eq!(frame.hud.powerups[0].0, PowerUpKind::Speed);
        assert!((frame.hud.powerups[0].1 - 12.0).abs() < 1e-4);
    }
}
