//! Player physics, damage and scoring
//!
//! Integration order each tick: timers and jump budget, gravity, horizontal
//! move (clamped to the arena), vertical move, then platform contacts.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Contact, Side, classify_platform_contact};
use super::geometry::Aabb;
use super::platform::Platform;
use super::powerup::PowerUpKind;
use crate::consts::*;
use crate::tuning::DifficultyConfig;
use crate::damp;

/// Zoom eases toward this scale while the power-up runs
const ZOOM_TARGET: f32 = 1.3;
const ZOOM_PULSE: f32 = 0.03;
const ZOOM_IN_RATE: f32 = 13.39;
const ZOOM_OUT_RATE: f32 = 6.32;

/// Held-button snapshot for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// What a single `take_damage` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invulnerable, already dead, or a non-positive amount
    Ignored,
    /// The shield took the hit and is gone
    ShieldAbsorbed,
    /// Health went down, no life lost
    Hurt,
    /// Health hit zero with lives to spare; the player respawned
    LifeLost,
    /// Last life gone
    Terminal,
}

impl DamageOutcome {
    pub fn lost_life(self) -> bool {
        matches!(self, DamageOutcome::LifeLost | DamageOutcome::Terminal)
    }
}

/// Which jump was performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    /// From the ground or inside the coyote window
    Ground,
    /// Spent an extra jump while airborne
    Air,
}

/// Remaining seconds for each timed power-up
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowerUpTimers {
    pub shield: f32,
    pub speed: f32,
    pub zoom: f32,
    pub combo: f32,
    pub time_slow: f32,
    pub magnet: f32,
    pub double_jump: f32,
}

impl PowerUpTimers {
    fn slot(&mut self, kind: PowerUpKind) -> &mut f32 {
        match kind {
            PowerUpKind::Shield => &mut self.shield,
            PowerUpKind::Speed => &mut self.speed,
            PowerUpKind::Zoom => &mut self.zoom,
            PowerUpKind::Combo => &mut self.combo,
            PowerUpKind::TimeSlow => &mut self.time_slow,
            PowerUpKind::Magnet => &mut self.magnet,
            PowerUpKind::DoubleJump => &mut self.double_jump,
        }
    }

    pub fn remaining(&self, kind: PowerUpKind) -> f32 {
        match kind {
            PowerUpKind::Shield => self.shield,
            PowerUpKind::Speed => self.speed,
            PowerUpKind::Zoom => self.zoom,
            PowerUpKind::Combo => self.combo,
            PowerUpKind::TimeSlow => self.time_slow,
            PowerUpKind::Magnet => self.magnet,
            PowerUpKind::DoubleJump => self.double_jump,
        }
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.remaining(kind) > 0.0
    }

    fn tick(&mut self, dt: f32) {
        for kind in PowerUpKind::ALL {
            let slot = self.slot(kind);
            *slot = (*slot - dt).max(0.0);
        }
    }
}

/// Per-attempt counters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerStats {
    pub platforms_touched: u32,
    pub powerups_collected: u32,
    pub jumps: u32,
    pub max_combo: u32,
    /// Highest point reached (smallest y)
    pub best_y: f32,
}

/// Result of one physics step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerStep {
    pub jumped: Option<JumpKind>,
    /// Became grounded this tick
    pub landed: bool,
    /// First touch of a platform: (platform id, points awarded)
    pub first_touch: Option<(u32, u64)>,
    /// Combo count after a touch that paid a combo bonus
    pub combo_bonus: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Sprite centre
    pub pos: Vec2,
    pub vel: Vec2,
    pub on_ground: bool,
    /// Platform currently stood on
    pub ground_platform: Option<u32>,
    pub jump_count: u32,
    pub max_jumps: u32,
    pub coyote_timer: f32,
    coyote_time: f32,
    jump_held: bool,
    run_speed: f32,
    jump_speed: f32,
    gravity: f32,

    pub health: f32,
    pub max_health: f32,
    pub lives: u32,
    pub alive: bool,
    pub score: u64,
    score_mult: f32,
    pub invulnerable_timer: f32,
    /// Where a continued life restarts
    pub respawn_point: Vec2,

    pub powerups: PowerUpTimers,
    /// Cosmetic scale (also scales the hitbox)
    pub zoom_scale: f32,
    pub combo: u32,
    pub combo_timer: f32,
    /// Facing direction for rendering (-1 left, 1 right)
    pub facing: f32,
    pub time: f32,
    pub stats: PlayerStats,
}

impl Player {
    pub fn new(pos: Vec2, config: &DifficultyConfig) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            on_ground: false,
            ground_platform: None,
            jump_count: 0,
            max_jumps: config.max_jumps,
            coyote_timer: 0.0,
            coyote_time: config.coyote_time,
            jump_held: false,
            run_speed: config.run_speed,
            jump_speed: config.jump_speed,
            gravity: config.gravity,
            health: config.max_health,
            max_health: config.max_health,
            lives: config.lives,
            alive: true,
            score: 0,
            score_mult: config.score_mult,
            invulnerable_timer: 0.0,
            respawn_point: pos,
            powerups: PowerUpTimers::default(),
            zoom_scale: 1.0,
            combo: 0,
            combo_timer: 0.0,
            facing: 1.0,
            time: 0.0,
            stats: PlayerStats {
                best_y: pos.y,
                ..Default::default()
            },
        }
    }

    /// Place the player standing on top of a platform
    pub fn stand_on(&mut self, platform: &Platform) {
        self.pos = Vec2::new(platform.pos.x, Self::rest_y(platform.top(), 1.0));
        self.vel = Vec2::ZERO;
        self.respawn_point = self.pos;
        self.stats.best_y = self.stats.best_y.min(self.pos.y);
    }

    /// Centre y that puts the hitbox bottom exactly on `top`
    fn rest_y(top: f32, zoom: f32) -> f32 {
        top - PLAYER_HITBOX_OFFSET_Y - PLAYER_HEIGHT * PLAYER_HITBOX_HEIGHT_RATIO * zoom / 2.0
    }

    /// Collision box (smaller than the sprite, scaled by zoom)
    pub fn hitbox(&self) -> Aabb {
        let size = Vec2::new(
            PLAYER_WIDTH * PLAYER_HITBOX_WIDTH_RATIO,
            PLAYER_HEIGHT * PLAYER_HITBOX_HEIGHT_RATIO,
        ) * self.zoom_scale;
        Aabb::from_center(self.pos + Vec2::new(0.0, PLAYER_HITBOX_OFFSET_Y), size)
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_timer > 0.0
    }

    pub fn has_shield(&self) -> bool {
        self.powerups.is_active(PowerUpKind::Shield)
    }

    /// Jump budget including the double-jump power-up
    pub fn effective_max_jumps(&self) -> u32 {
        self.max_jumps + u32::from(self.powerups.is_active(PowerUpKind::DoubleJump))
    }

    fn combo_mult(&self) -> f32 {
        if self.powerups.is_active(PowerUpKind::Combo) {
            2.0
        } else {
            1.0
        }
    }

    /// Advance one tick: input, gravity, integration, platform contacts
    pub fn update(&mut self, input: PlayerInput, platforms: &mut [Platform], dt: f32) -> PlayerStep {
        let mut step = PlayerStep::default();
        if !self.alive {
            return step;
        }
        self.time += dt;

        // Grounded refills the jump budget; airborne burns coyote time
        if self.on_ground {
            self.coyote_timer = self.coyote_time;
            self.jump_count = 0;
        } else {
            self.coyote_timer = (self.coyote_timer - dt).max(0.0);
        }

        self.apply_horizontal_input(input, dt);
        step.jumped = self.handle_jump(input.jump);

        self.vel.y = (self.vel.y + self.gravity * dt).min(TERMINAL_VELOCITY);

        // Horizontal first, clamped to the arena; vertical second
        let half_w = PLAYER_WIDTH / 2.0;
        self.pos.x = (self.pos.x + self.vel.x * dt).clamp(half_w, SCREEN_WIDTH - half_w);
        self.pos.y += self.vel.y * dt;

        let was_grounded = self.on_ground;
        self.resolve_platforms(platforms, &mut step);
        step.landed = self.on_ground && !was_grounded;

        self.stats.best_y = self.stats.best_y.min(self.pos.y);
        self.update_timers(dt);
        step
    }

    fn apply_horizontal_input(&mut self, input: PlayerInput, dt: f32) {
        let speed = if self.powerups.is_active(PowerUpKind::Speed) {
            self.run_speed * SPEED_BOOST
        } else {
            self.run_speed
        };

        match (input.left, input.right) {
            (true, false) => {
                self.vel.x = -speed;
                self.facing = -1.0;
            }
            (false, true) => {
                self.vel.x = speed;
                self.facing = 1.0;
            }
            _ => self.vel.x = damp(self.vel.x, 0.0, GROUND_DECEL_RATE, dt),
        }

        if !self.on_ground {
            self.vel.x *= (-AIR_DRAG_RATE * dt).exp();
        }
    }

    /// Edge-triggered: only the released-to-pressed transition jumps
    fn handle_jump(&mut self, held: bool) -> Option<JumpKind> {
        let pressed = held && !self.jump_held;
        self.jump_held = held;
        if !pressed {
            return None;
        }

        let kind = if self.on_ground || self.coyote_timer > 0.0 {
            self.jump_count = 1;
            JumpKind::Ground
        } else if self.jump_count < self.effective_max_jumps() {
            self.jump_count += 1;
            JumpKind::Air
        } else {
            return None;
        };

        self.vel.y = -self.jump_speed;
        self.coyote_timer = 0.0;
        self.on_ground = false;
        self.ground_platform = None;
        self.stats.jumps += 1;
        Some(kind)
    }

    fn resolve_platforms(&mut self, platforms: &mut [Platform], step: &mut PlayerStep) {
        self.on_ground = false;
        self.ground_platform = None;

        for platform in platforms.iter_mut() {
            let hitbox = self.hitbox();
            match classify_platform_contact(&hitbox, self.vel, self.on_ground, &platform.hitbox()) {
                Some(Contact::Landing { top }) => {
                    self.pos.y = Self::rest_y(top, self.zoom_scale);
                    self.vel.y = 0.0;
                    self.on_ground = true;
                    self.ground_platform = Some(platform.id);
                    self.jump_count = 0;
                    self.respawn_point = Vec2::new(platform.pos.x, Self::rest_y(top, 1.0));

                    if platform.touch() {
                        let (points, bonus) = self.award_platform_points();
                        step.first_touch = Some((platform.id, points));
                        if bonus {
                            step.combo_bonus = Some(self.combo);
                        }
                    }
                }
                Some(Contact::Lateral { side, edge_x }) => {
                    let half = hitbox.width() / 2.0;
                    self.pos.x = match side {
                        Side::Left => edge_x - half,
                        Side::Right => edge_x + half,
                    };
                    self.vel.x = 0.0;
                }
                None => {}
            }
        }
    }

    fn update_timers(&mut self, dt: f32) {
        self.powerups.tick(dt);
        self.invulnerable_timer = (self.invulnerable_timer - dt).max(0.0);

        let zoom_target = if self.powerups.is_active(PowerUpKind::Zoom) {
            ZOOM_TARGET + ZOOM_PULSE * (self.time * 10.0).sin()
        } else {
            1.0
        };
        let rate = if zoom_target > 1.0 { ZOOM_IN_RATE } else { ZOOM_OUT_RATE };
        self.zoom_scale = damp(self.zoom_scale, zoom_target, rate, dt);

        if self.combo > 0 {
            self.combo_timer -= dt;
            if self.combo_timer <= 0.0 {
                self.combo = 0;
                self.combo_timer = 0.0;
            }
        }
    }

    /// Quadratic bonus paid on top of a scoring event while a combo runs
    pub fn combo_bonus(&self) -> u64 {
        if self.combo > 1 {
            (10.0 * (self.combo * self.combo) as f32 * self.combo_mult()) as u64
        } else {
            0
        }
    }

    pub fn add_combo(&mut self) -> u32 {
        self.combo += 1;
        self.combo_timer = COMBO_DECAY_TIME;
        self.stats.max_combo = self.stats.max_combo.max(self.combo);
        self.combo
    }

    fn reset_combo(&mut self) {
        self.combo = 0;
        self.combo_timer = 0.0;
    }

    /// First-touch points. Returns (points, whether a combo bonus was paid).
    fn award_platform_points(&mut self) -> (u64, bool) {
        let bonus = self.combo_bonus();
        let points =
            ((POINTS_PLATFORM + bonus) as f32 * self.combo_mult() * self.score_mult) as u64;
        self.score += points;
        self.stats.platforms_touched += 1;
        self.add_combo();
        (points, bonus > 0)
    }

    /// Start a timed effect and score the pickup. Returns the points awarded.
    pub fn activate_powerup(&mut self, kind: PowerUpKind, duration_mult: f32) -> u64 {
        let duration = kind.base_duration() * duration_mult;
        let slot = self.powerups.slot(kind);
        *slot = slot.max(duration);

        let points = (POINTS_POWERUP as f32 * self.combo_mult() * self.score_mult) as u64;
        self.score += points;
        self.stats.powerups_collected += 1;
        self.add_combo();
        log::debug!("Power-up {} active for {:.1}s", kind.as_str(), duration);
        points
    }

    /// Apply contact damage
    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if !self.alive || amount <= 0.0 || self.is_invulnerable() {
            return DamageOutcome::Ignored;
        }
        if self.has_shield() {
            self.powerups.shield = 0.0;
            return DamageOutcome::ShieldAbsorbed;
        }

        self.reset_combo();
        self.health = (self.health - amount).max(0.0);
        if self.health <= 0.0 {
            return self.lose_life();
        }
        self.invulnerable_timer = HIT_INVULNERABILITY;
        DamageOutcome::Hurt
    }

    /// Lava or a fall: ignores the shield and invulnerability, always costs a life
    pub fn take_lethal_damage(&mut self) -> DamageOutcome {
        if !self.alive {
            return DamageOutcome::Ignored;
        }
        self.powerups.shield = 0.0;
        self.reset_combo();
        self.health = 0.0;
        self.lose_life()
    }

    fn lose_life(&mut self) -> DamageOutcome {
        self.lives = self.lives.saturating_sub(1);
        if self.lives > 0 {
            self.health = self.max_health;
            self.invulnerable_timer = RESPAWN_INVULNERABILITY;
            self.respawn();
            DamageOutcome::LifeLost
        } else {
            self.health = 0.0;
            self.alive = false;
            self.vel = Vec2::ZERO;
            DamageOutcome::Terminal
        }
    }

    fn respawn(&mut self) {
        self.pos = self.respawn_point;
        self.vel = Vec2::ZERO;
        self.on_ground = false;
        self.ground_platform = None;
        self.jump_count = 0;
        self.coyote_timer = self.coyote_time;
        self.zoom_scale = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Difficulty;
    use proptest::prelude::*;

    fn normal_player() -> Player {
        Player::new(Vec2::new(640.0, 500.0), &DifficultyConfig::default())
    }

    fn floor() -> Platform {
        Platform::new(1, Vec2::new(640.0, 600.0), 400.0)
    }

    /// Let the player settle on `platforms` with no input
    fn settle(player: &mut Player, platforms: &mut [Platform]) {
        for _ in 0..120 {
            player.update(PlayerInput::default(), platforms, SIM_DT);
        }
        assert!(player.on_ground);
    }

    #[test]
    fn test_damage_scenario_short_invulnerability() {
        let mut p = normal_player();
        assert_eq!(p.take_damage(30.0), DamageOutcome::Hurt);
        assert_eq!(p.health, 70.0);
        assert_eq!(p.lives, 3);
        assert!(p.is_invulnerable());
        assert_eq!(p.invulnerable_timer, HIT_INVULNERABILITY);

        assert_eq!(p.take_damage(30.0), DamageOutcome::Ignored);
        assert_eq!(p.health, 70.0);
    }

    #[test]
    fn test_damage_scenario_life_lost_respawns() {
        let mut p = normal_player();
        p.respawn_point = Vec2::new(300.0, 200.0);
        p.pos = Vec2::new(900.0, 650.0);
        p.health = 20.0;

        assert_eq!(p.take_damage(50.0), DamageOutcome::LifeLost);
        assert_eq!(p.health, p.max_health);
        assert_eq!(p.lives, 2);
        assert_eq!(p.invulnerable_timer, RESPAWN_INVULNERABILITY);
        assert_eq!(p.pos, Vec2::new(300.0, 200.0));
        assert_eq!(p.vel, Vec2::ZERO);
        assert!(p.alive);
    }

    #[test]
    fn test_shield_absorbs_exactly_one_hit() {
        let mut p = normal_player();
        p.activate_powerup(PowerUpKind::Shield, 1.0);
        assert!(p.has_shield());

        let outcome = p.take_damage(40.0);
        assert_eq!(outcome, DamageOutcome::ShieldAbsorbed);
        assert!(!outcome.lost_life());
        assert_eq!(p.health, 100.0);
        assert!(!p.has_shield());

        assert_eq!(p.take_damage(40.0), DamageOutcome::Hurt);
        assert_eq!(p.health, 60.0);
    }

    #[test]
    fn test_last_life_is_terminal() {
        let mut p = Player::new(Vec2::ZERO, &DifficultyConfig::for_difficulty(Difficulty::Hard));
        assert_eq!(p.lives, 1);
        assert_eq!(p.take_damage(500.0), DamageOutcome::Terminal);
        assert!(!p.alive);
        assert_eq!(p.lives, 0);
        assert_eq!(p.health, 0.0);
        assert_eq!(p.take_damage(10.0), DamageOutcome::Ignored);
    }

    #[test]
    fn test_lethal_damage_ignores_shield_and_invulnerability() {
        let mut p = normal_player();
        p.activate_powerup(PowerUpKind::Shield, 1.0);
        p.invulnerable_timer = 1.0;
        assert_eq!(p.take_lethal_damage(), DamageOutcome::LifeLost);
        assert_eq!(p.lives, 2);
        assert!(!p.has_shield());
    }

    #[test]
    fn test_damage_clears_combo() {
        let mut p = normal_player();
        p.add_combo();
        p.add_combo();
        p.take_damage(5.0);
        assert_eq!(p.combo, 0);
    }

    #[test]
    fn test_lands_on_platform_and_scores_once() {
        let mut p = normal_player();
        let mut platforms = vec![floor()];
        settle(&mut p, &mut platforms);

        assert!(platforms[0].touched);
        assert_eq!(p.score, POINTS_PLATFORM);
        assert_eq!(p.hitbox().bottom(), platforms[0].top());
        assert_eq!(p.vel.y, 0.0);

        // Jump and land again on the same platform
        p.update(PlayerInput { jump: true, ..Default::default() }, &mut platforms, SIM_DT);
        assert!(!p.on_ground);
        settle(&mut p, &mut platforms);
        assert_eq!(p.score, POINTS_PLATFORM);
        assert_eq!(p.stats.platforms_touched, 1);
    }

    #[test]
    fn test_jump_is_edge_triggered() {
        let mut p = normal_player();
        let mut platforms = vec![floor()];
        settle(&mut p, &mut platforms);

        let hold = PlayerInput { jump: true, ..Default::default() };
        let first = p.update(hold, &mut platforms, SIM_DT);
        assert_eq!(first.jumped, Some(JumpKind::Ground));
        // Holding the button never jumps again, even after landing
        for _ in 0..240 {
            let step = p.update(hold, &mut platforms, SIM_DT);
            assert_eq!(step.jumped, None);
        }
        assert!(p.on_ground);
    }

    #[test]
    fn test_coyote_jump_after_walking_off() {
        let mut p = normal_player();
        let mut platforms = vec![floor()];
        settle(&mut p, &mut platforms);

        // Remove the floor: the player starts falling with coyote time left
        let mut nothing: Vec<Platform> = Vec::new();
        p.update(PlayerInput::default(), &mut nothing, SIM_DT);
        assert!(!p.on_ground);
        assert!(p.coyote_timer > 0.0);
        let step = p.update(PlayerInput { jump: true, ..Default::default() }, &mut nothing, SIM_DT);
        assert_eq!(step.jumped, Some(JumpKind::Ground));
        assert!(p.vel.y < 0.0);
    }

    #[test]
    fn test_double_jump_on_easy() {
        let config = DifficultyConfig::for_difficulty(Difficulty::Easy);
        let mut p = Player::new(Vec2::new(640.0, 500.0), &config);
        let mut platforms = vec![floor()];
        settle(&mut p, &mut platforms);

        let press = PlayerInput { jump: true, ..Default::default() };
        let release = PlayerInput::default();
        assert_eq!(p.update(press, &mut platforms, SIM_DT).jumped, Some(JumpKind::Ground));
        p.update(release, &mut platforms, SIM_DT);
        assert_eq!(p.update(press, &mut platforms, SIM_DT).jumped, Some(JumpKind::Air));
        p.update(release, &mut platforms, SIM_DT);
        assert_eq!(p.update(press, &mut platforms, SIM_DT).jumped, None);
    }

    #[test]
    fn test_horizontal_velocity_set_directly_and_decays() {
        let mut p = normal_player();
        let mut platforms = vec![floor()];
        settle(&mut p, &mut platforms);

        p.update(PlayerInput { right: true, ..Default::default() }, &mut platforms, SIM_DT);
        assert_eq!(p.vel.x, DifficultyConfig::default().run_speed);

        p.update(PlayerInput::default(), &mut platforms, SIM_DT);
        assert!(p.vel.x > 0.0 && p.vel.x < DifficultyConfig::default().run_speed);
    }

    #[test]
    fn test_speed_boost() {
        let mut p = normal_player();
        let mut platforms = vec![floor()];
        settle(&mut p, &mut platforms);
        p.activate_powerup(PowerUpKind::Speed, 1.0);
        p.update(PlayerInput { left: true, ..Default::default() }, &mut platforms, SIM_DT);
        assert_eq!(p.vel.x, -DifficultyConfig::default().run_speed * SPEED_BOOST);
    }

    #[test]
    fn test_stays_inside_arena() {
        let mut p = normal_player();
        let mut platforms = vec![Platform::new(1, Vec2::new(640.0, 600.0), SCREEN_WIDTH * 2.0)];
        for _ in 0..600 {
            p.update(PlayerInput { left: true, ..Default::default() }, &mut platforms, SIM_DT);
        }
        assert_eq!(p.pos.x, PLAYER_WIDTH / 2.0);
    }

    #[test]
    fn test_combo_bonus_is_quadratic_and_decays() {
        let mut p = normal_player();
        assert_eq!(p.combo_bonus(), 0);
        p.add_combo();
        p.add_combo();
        p.add_combo();
        assert_eq!(p.combo_bonus(), 90);

        let mut nothing: Vec<Platform> = Vec::new();
        for _ in 0..(COMBO_DECAY_TIME / SIM_DT) as usize + 2 {
            p.update(PlayerInput::default(), &mut nothing, SIM_DT);
        }
        assert_eq!(p.combo, 0);
    }

    #[test]
    fn test_zoom_eases_out_and_back() {
        let mut p = normal_player();
        let mut nothing: Vec<Platform> = Vec::new();
        p.activate_powerup(PowerUpKind::Zoom, 1.0);
        for _ in 0..60 {
            p.update(PlayerInput::default(), &mut nothing, SIM_DT);
        }
        assert!(p.zoom_scale > 1.2);

        p.powerups.zoom = 0.0;
        for _ in 0..180 {
            p.update(PlayerInput::default(), &mut nothing, SIM_DT);
        }
        assert!((p.zoom_scale - 1.0).abs() < 0.01);
    }

    #[derive(Debug, Clone)]
    enum Hit {
        Damage(f32),
        Wait(u32),
        Shield,
    }

    fn hit_strategy() -> impl Strategy<Value = Hit> {
        prop_oneof![
            (1.0f32..200.0).prop_map(Hit::Damage),
            (1u32..180).prop_map(Hit::Wait),
            Just(Hit::Shield),
        ]
    }

    proptest! {
        #[test]
        fn prop_lives_never_increase(hits in proptest::collection::vec(hit_strategy(), 1..40)) {
            let mut p = normal_player();
            let mut nothing: Vec<Platform> = Vec::new();
            for hit in hits {
                let lives_before = p.lives;
                let shielded = p.has_shield();
                let invulnerable = p.is_invulnerable();
                let health_before = p.health;
                match hit {
                    Hit::Damage(d) => {
                        let outcome = p.take_damage(d);
                        if outcome.lost_life() {
                            prop_assert_eq!(p.lives, lives_before - 1);
                            prop_assert!(!shielded && !invulnerable);
                            prop_assert!(d >= health_before);
                        } else {
                            prop_assert_eq!(p.lives, lives_before);
                        }
                    }
                    Hit::Wait(ticks) => {
                        for _ in 0..ticks {
                            p.update(PlayerInput::default(), &mut nothing, SIM_DT);
                        }
                        prop_assert_eq!(p.lives, lives_before);
                    }
                    Hit::Shield => {
                        p.activate_powerup(PowerUpKind::Shield, 1.0);
                    }
                }
                prop_assert!(p.lives <= lives_before);
                prop_assert!(p.health >= 0.0 && p.health <= p.max_health);
            }
        }

        #[test]
        fn prop_airborne_jumps_within_budget(presses in proptest::collection::vec(any::<bool>(), 1..200)) {
            let config = DifficultyConfig::for_difficulty(Difficulty::Easy);
            let mut p = Player::new(Vec2::new(640.0, 0.0), &config);
            // Start airborne with the coyote window already spent
            p.coyote_timer = 0.0;
            let mut nothing: Vec<Platform> = Vec::new();
            let mut air_jumps = 0;
            for held in presses {
                let step = p.update(PlayerInput { jump: held, ..Default::default() }, &mut nothing, SIM_DT);
                if step.jumped.is_some() {
                    air_jumps += 1;
                }
                prop_assert!(p.jump_count <= p.effective_max_jumps());
            }
            prop_assert!(air_jumps <= config.max_jumps);
        }
    }
}
