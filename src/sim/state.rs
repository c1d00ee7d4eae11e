//! Game state definitions

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::enemy::{Enemy, EnemyTag};
use super::level::{self, SPAWN_POS};
use super::lava::Lava;
use super::platform::{Platform, VictoryFlag};
use super::player::Player;
use super::powerup::{PowerUp, PowerUpKind};
use super::spawner::Spawner;
use crate::consts::*;
use crate::tuning::{DifficultyConfig, LevelConfig};

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Climbing
    Playing,
    /// Frozen, including the lava
    Paused,
    /// Flag reached, waiting to advance
    LevelComplete,
    /// Out of lives
    GameOver,
    /// Last level cleared
    Victory,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Things that happened during a tick, for audio and effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jump,
    DoubleJump,
    Land,
    PlatformTouched { id: u32, points: u64 },
    ComboBonus { combo: u32 },
    Damaged { amount: f32 },
    ShieldHit,
    LifeLost { lives_left: u32 },
    Death,
    PowerUpCollected { kind: PowerUpKind, points: u64 },
    EnemySpawned { tag: EnemyTag },
    StrikeActive,
    LavaSplash,
    LevelComplete { level: u32, bonus: u64 },
    GameOver,
    Victory,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Packed RGB
    pub color: u32,
    /// 0-1, decreases over time
    pub life: f32,
    pub size: f32,
}

/// Maximum particles
pub const MAX_PARTICLES: usize = 256;
/// Particle fade rate (life per second)
const PARTICLE_FADE: f32 = 1.5;
const PARTICLE_GRAVITY: f32 = 900.0;

pub const COLOR_DUST: u32 = 0xc8b89a;
pub const COLOR_SPARK: u32 = 0xffd34d;
pub const COLOR_HIT: u32 = 0xff4040;

/// RNG state wrapper for serialization
///
/// Every draw site gets a fresh `Pcg32` on the next stream, so the state
/// itself stays plain data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream += 1;
        rng
    }
}

/// Monotonic entity id source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn next(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    pub difficulty: DifficultyConfig,
    pub level_config: LevelConfig,
    /// Current level (1-based)
    pub level: u32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Seconds spent on the current level
    pub level_time: f32,
    pub player: Player,
    /// Sorted by id for determinism
    pub platforms: Vec<Platform>,
    /// Sorted by id for determinism
    pub enemies: Vec<Enemy>,
    /// Sorted by id for determinism
    pub powerups: Vec<PowerUp>,
    pub flag: VictoryFlag,
    pub lava: Lava,
    pub camera: Camera,
    pub spawner: Spawner,
    /// Centre y of the castle platform
    pub final_y: f32,
    /// Completion bonus of the last finished level
    pub last_bonus: u64,
    pub particles_enabled: bool,
    /// Events of the last tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    pub(crate) ids: EntityIds,
}

impl GameState {
    /// Create a new game on level 1
    pub fn new(seed: u64, difficulty: DifficultyConfig) -> Self {
        let player = Player::new(SPAWN_POS, &difficulty);
        let lava = Lava::new(&difficulty);
        let mut state = Self {
            seed,
            rng_state: RngState::new(seed),
            level_config: LevelConfig::for_level(1, &difficulty),
            difficulty,
            level: 1,
            phase: GamePhase::Playing,
            time_ticks: 0,
            level_time: 0.0,
            player,
            platforms: Vec::new(),
            enemies: Vec::new(),
            powerups: Vec::new(),
            flag: VictoryFlag::new(SPAWN_POS),
            lava,
            camera: Camera::centered_on(SPAWN_POS.y),
            spawner: Spawner::default(),
            final_y: SPAWN_POS.y,
            last_bonus: 0,
            particles_enabled: true,
            events: Vec::new(),
            particles: Vec::new(),
            ids: EntityIds::default(),
        };
        state.build_level(1);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        self.ids.next()
    }

    /// Generate `level` and place the player on its spawn platform.
    /// Score, lives and stats carry over from the current player.
    pub fn build_level(&mut self, level: u32) {
        let level = level.clamp(1, MAX_LEVEL);
        self.level = level;
        self.level_config = LevelConfig::for_level(level, &self.difficulty);

        let mut rng = self.rng_state.next_rng();
        let layout = level::generate(&self.level_config, &self.difficulty, &mut self.ids, &mut rng);

        let mut player = Player::new(SPAWN_POS, &self.difficulty);
        player.score = self.player.score;
        player.lives = self.player.lives;
        player.stats = self.player.stats.clone();
        if let Some(spawn) = layout.spawn_platform() {
            player.stand_on(spawn);
        }

        self.final_y = layout.final_platform().map_or(SPAWN_POS.y, |p| p.pos.y);
        self.platforms = layout.platforms;
        self.enemies = layout.enemies;
        self.powerups = layout.powerups;
        self.flag = layout.flag;
        self.lava = Lava::new(&self.difficulty);
        self.lava.initialize(player.pos.y);
        self.camera = Camera::centered_on(player.pos.y);
        self.player = player;
        self.spawner = Spawner::default();
        self.level_time = 0.0;
        self.last_bonus = 0;
        self.particles.clear();
        self.phase = GamePhase::Playing;
        self.normalize_order();
    }

    /// Move on from a completed level. After the last level the game is won.
    /// Returns false if there is no completed level to advance from.
    pub fn advance_level(&mut self) -> bool {
        if self.phase != GamePhase::LevelComplete {
            return false;
        }
        if self.level >= MAX_LEVEL {
            self.phase = GamePhase::Victory;
            self.events.push(GameEvent::Victory);
            log::info!("Victory with {} points", self.player.score);
        } else {
            let next = self.level + 1;
            log::info!("Advancing to level {next}");
            self.build_level(next);
        }
        true
    }

    /// Fresh run from level 1 with a new player
    pub fn restart(&mut self) {
        log::info!("Restarting run");
        self.player = Player::new(SPAWN_POS, &self.difficulty);
        self.time_ticks = 0;
        self.build_level(1);
    }

    /// Completion bonus for finishing the current level now
    pub fn level_bonus(&self) -> u64 {
        let spare = (PAR_TIME - self.level_time).max(0.0);
        let base = POINTS_LEVEL_COMPLETE as f32
            + spare * POINTS_PER_SPARE_SECOND
            + (self.player.lives as u64 * POINTS_PER_LIFE) as f32;
        (base * self.difficulty.completion_mult) as u64
    }

    /// World y of the bottom edge of the view
    pub fn view_bottom(&self) -> f32 {
        self.camera.bottom()
    }

    pub fn spawn_y(&self) -> f32 {
        SPAWN_POS.y
    }

    /// Burst of particles (cosmetic)
    pub fn spawn_particles<R: Rng>(&mut self, pos: Vec2, color: u32, count: usize, rng: &mut R) {
        if !self.particles_enabled {
            return;
        }
        for _ in 0..count {
            if self.particles.len() >= MAX_PARTICLES {
                break;
            }
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed = rng.random_range(60.0..240.0);
            self.particles.push(Particle {
                pos,
                vel: Vec2::from_angle(angle) * speed,
                color,
                life: 1.0,
                size: rng.random_range(2.0..5.0),
            });
        }
    }

    pub fn update_particles(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.vel.y += PARTICLE_GRAVITY * dt;
            p.pos += p.vel * dt;
            p.life -= PARTICLE_FADE * dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.platforms.sort_by_key(|p| p.id);
        self.enemies.sort_by_key(|e| e.id);
        self.powerups.sort_by_key(|p| p.id);
    }
}
