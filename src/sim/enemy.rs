//! Enemies
//!
//! One `Enemy` struct carries the shared fields (position, active flag,
//! damage); `Behavior` holds the per-variant state and is dispatched with a
//! `match`. Footprints are axis-aligned boxes; the rotating hazard keeps an
//! unrotated box regardless of its spin.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::drone::{DRONE_DAMAGE, DRONE_HEIGHT, DRONE_WIDTH, SurveillanceUnit};
use super::geometry::Aabb;
use crate::error::SimError;
use crate::{sine_wave, wrap_degrees};

// === Patrol flyer ===
pub const FLYER_WIDTH: f32 = 35.0;
pub const FLYER_HEIGHT: f32 = 30.0;
pub const FLYER_SPEED: f32 = 90.0;
pub const FLYER_PATROL_RANGE: f32 = 150.0;
pub const FLYER_BOB_AMPLITUDE: f32 = 40.0;
/// Angular speed of the bob (rad/s)
pub const FLYER_BOB_FREQUENCY: f32 = 2.0;
pub const FLYER_DAMAGE: f32 = 15.0;

// === Rotating hazard ===
pub const SPINNER_SIZE: f32 = 40.0;
/// Degrees per second
pub const SPINNER_SPEED: f32 = 120.0;
pub const SPINNER_DAMAGE: f32 = 25.0;

// === Falling hazard ===
pub const ROCK_SIZE: f32 = 30.0;
pub const ROCK_GRAVITY: f32 = 7200.0;
pub const ROCK_TERMINAL_VELOCITY: f32 = 900.0;
pub const ROCK_DAMAGE: f32 = 30.0;
/// Rocks are culled this far below the visible area
pub const ROCK_CULL_MARGIN: f32 = 200.0;
/// A dormant rock starts falling once the player is this close below
pub const ROCK_TRIGGER_DISTANCE: f32 = 600.0;

// === Transient strike ===
pub const STRIKE_WIDTH: f32 = 15.0;
pub const STRIKE_HEIGHT: f32 = 100.0;
pub const STRIKE_WARNING: f32 = 0.3;
pub const STRIKE_LIFETIME: f32 = 0.5;
pub const STRIKE_FLICKER: f32 = 0.05;
pub const STRIKE_DAMAGE: f32 = 35.0;

/// Enemy type tags (used by spawners, renderers and audio)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyTag {
    PatrolFlyer,
    RotatingHazard,
    FallingHazard,
    TransientStrike,
    SurveillanceUnit,
}

impl EnemyTag {
    pub const ALL: [EnemyTag; 5] = [
        EnemyTag::PatrolFlyer,
        EnemyTag::RotatingHazard,
        EnemyTag::FallingHazard,
        EnemyTag::TransientStrike,
        EnemyTag::SurveillanceUnit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyTag::PatrolFlyer => "patrol_flyer",
            EnemyTag::RotatingHazard => "rotating_hazard",
            EnemyTag::FallingHazard => "falling_hazard",
            EnemyTag::TransientStrike => "transient_strike",
            EnemyTag::SurveillanceUnit => "surveillance_unit",
        }
    }
}

impl fmt::Display for EnemyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnemyTag {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patrol_flyer" | "bat" => Ok(EnemyTag::PatrolFlyer),
            "rotating_hazard" | "trap" => Ok(EnemyTag::RotatingHazard),
            "falling_hazard" | "rock" => Ok(EnemyTag::FallingHazard),
            "transient_strike" | "lightning" => Ok(EnemyTag::TransientStrike),
            "surveillance_unit" | "drone" => Ok(EnemyTag::SurveillanceUnit),
            _ => Err(SimError::unknown("enemy", s)),
        }
    }
}

/// Read-only view of the world an enemy may react to
#[derive(Debug, Clone, Copy)]
pub struct EnemyContext {
    /// Player centre, if there is a live player
    pub player: Option<Vec2>,
    /// World y of the bottom edge of the camera view
    pub view_bottom: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatrolFlyer {
    pub origin: Vec2,
    pub range: f32,
    pub speed: f32,
    pub direction: f32,
    pub rotation: f32,
    time: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotatingHazard {
    /// Degrees in [0, 360)
    pub angle: f32,
    /// Degrees per second
    pub spin_speed: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingHazard {
    pub vel_y: f32,
    pub gravity: f32,
    pub dormant: bool,
}

/// Strike lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StrikePhase {
    /// Indicator only, harmless
    Warning { elapsed: f32 },
    Active { elapsed: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransientStrike {
    pub phase: StrikePhase,
    /// Flicker state during the active phase (cosmetic)
    pub visible: bool,
}

/// Per-variant state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Behavior {
    PatrolFlyer(PatrolFlyer),
    RotatingHazard(RotatingHazard),
    FallingHazard(FallingHazard),
    TransientStrike(TransientStrike),
    SurveillanceUnit(SurveillanceUnit),
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    /// Centre (top-centre for strikes)
    pub pos: Vec2,
    pub active: bool,
    pub damage: f32,
    pub behavior: Behavior,
}

impl Enemy {
    pub fn patrol_flyer(id: u32, pos: Vec2, range: f32, speed: f32) -> Self {
        Self {
            id,
            pos,
            active: true,
            damage: FLYER_DAMAGE,
            behavior: Behavior::PatrolFlyer(PatrolFlyer {
                origin: pos,
                range,
                speed,
                direction: 1.0,
                rotation: 0.0,
                time: 0.0,
            }),
        }
    }

    pub fn rotating_hazard(id: u32, pos: Vec2, spin_speed: f32) -> Self {
        Self {
            id,
            pos,
            active: true,
            damage: SPINNER_DAMAGE,
            behavior: Behavior::RotatingHazard(RotatingHazard {
                angle: 0.0,
                spin_speed,
            }),
        }
    }

    pub fn falling_hazard(id: u32, pos: Vec2, gravity: f32, dormant: bool) -> Self {
        Self {
            id,
            pos,
            active: true,
            damage: ROCK_DAMAGE,
            behavior: Behavior::FallingHazard(FallingHazard {
                vel_y: 0.0,
                gravity,
                dormant,
            }),
        }
    }

    pub fn transient_strike(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            active: true,
            damage: STRIKE_DAMAGE,
            behavior: Behavior::TransientStrike(TransientStrike {
                phase: StrikePhase::Warning { elapsed: 0.0 },
                visible: true,
            }),
        }
    }

    pub fn surveillance_unit(id: u32, pos: Vec2, unit: SurveillanceUnit) -> Self {
        Self {
            id,
            pos,
            active: true,
            damage: DRONE_DAMAGE,
            behavior: Behavior::SurveillanceUnit(unit),
        }
    }

    /// Build an enemy from its tag with default tuning
    pub fn spawn<R: Rng>(id: u32, tag: EnemyTag, pos: Vec2, rng: &mut R) -> Self {
        match tag {
            EnemyTag::PatrolFlyer => Self::patrol_flyer(id, pos, FLYER_PATROL_RANGE, FLYER_SPEED),
            EnemyTag::RotatingHazard => Self::rotating_hazard(id, pos, SPINNER_SPEED),
            EnemyTag::FallingHazard => Self::falling_hazard(id, pos, ROCK_GRAVITY, false),
            EnemyTag::TransientStrike => Self::transient_strike(id, pos),
            EnemyTag::SurveillanceUnit => {
                Self::surveillance_unit(id, pos, SurveillanceUnit::new(pos, 200.0, 300.0, rng))
            }
        }
    }

    /// Build an enemy from a string tag; unknown tags are an error
    pub fn spawn_named<R: Rng>(id: u32, tag: &str, pos: Vec2, rng: &mut R) -> Result<Self, SimError> {
        Ok(Self::spawn(id, tag.parse()?, pos, rng))
    }

    pub fn tag(&self) -> EnemyTag {
        match self.behavior {
            Behavior::PatrolFlyer(_) => EnemyTag::PatrolFlyer,
            Behavior::RotatingHazard(_) => EnemyTag::RotatingHazard,
            Behavior::FallingHazard(_) => EnemyTag::FallingHazard,
            Behavior::TransientStrike(_) => EnemyTag::TransientStrike,
            Behavior::SurveillanceUnit(_) => EnemyTag::SurveillanceUnit,
        }
    }

    /// Full sprite box, whether or not it currently hurts
    pub fn bounds(&self) -> Aabb {
        match self.behavior {
            Behavior::PatrolFlyer(_) => {
                Aabb::from_center(self.pos, Vec2::new(FLYER_WIDTH, FLYER_HEIGHT))
            }
            Behavior::RotatingHazard(_) => Aabb::from_center(self.pos, Vec2::splat(SPINNER_SIZE)),
            Behavior::FallingHazard(_) => Aabb::from_center(self.pos, Vec2::splat(ROCK_SIZE)),
            Behavior::TransientStrike(_) => Aabb::from_top_left(
                self.pos - Vec2::new(STRIKE_WIDTH / 2.0, 0.0),
                Vec2::new(STRIKE_WIDTH, STRIKE_HEIGHT),
            ),
            Behavior::SurveillanceUnit(_) => {
                Aabb::from_center(self.pos, Vec2::new(DRONE_WIDTH, DRONE_HEIGHT))
            }
        }
    }

    /// Damaging footprint; `None` while inactive or harmless
    pub fn hitbox(&self) -> Option<Aabb> {
        if !self.active {
            return None;
        }
        match &self.behavior {
            Behavior::TransientStrike(strike)
                if matches!(strike.phase, StrikePhase::Warning { .. }) =>
            {
                None
            }
            _ => Some(self.bounds()),
        }
    }

    pub fn update(&mut self, dt: f32, ctx: &EnemyContext) {
        if !self.active {
            return;
        }
        match &mut self.behavior {
            Behavior::PatrolFlyer(flyer) => {
                flyer.time += dt;
                self.pos.x += flyer.speed * flyer.direction * dt;
                let offset = self.pos.x - flyer.origin.x;
                if offset.abs() > flyer.range {
                    self.pos.x = flyer.origin.x + flyer.range * offset.signum();
                    flyer.direction = -offset.signum();
                }
                self.pos.y = flyer.origin.y
                    + sine_wave(flyer.time, FLYER_BOB_AMPLITUDE, FLYER_BOB_FREQUENCY);
                flyer.rotation = wrap_degrees(flyer.rotation + 120.0 * dt);
            }
            Behavior::RotatingHazard(spinner) => {
                spinner.angle = wrap_degrees(spinner.angle + spinner.spin_speed * dt);
            }
            Behavior::FallingHazard(rock) => {
                if rock.dormant {
                    match ctx.player {
                        Some(player) if player.y - self.pos.y <= ROCK_TRIGGER_DISTANCE => {
                            rock.dormant = false;
                        }
                        _ => return,
                    }
                }
                rock.vel_y = (rock.vel_y + rock.gravity * dt).min(ROCK_TERMINAL_VELOCITY);
                self.pos.y += rock.vel_y * dt;
                if self.pos.y > ctx.view_bottom + ROCK_CULL_MARGIN {
                    self.active = false;
                }
            }
            Behavior::TransientStrike(strike) => match &mut strike.phase {
                StrikePhase::Warning { elapsed } => {
                    *elapsed += dt;
                    if *elapsed >= STRIKE_WARNING {
                        strike.phase = StrikePhase::Active { elapsed: 0.0 };
                        strike.visible = true;
                    }
                }
                StrikePhase::Active { elapsed } => {
                    *elapsed += dt;
                    strike.visible = ((*elapsed / STRIKE_FLICKER) as u32) % 2 == 0;
                    if *elapsed >= STRIKE_LIFETIME {
                        self.active = false;
                    }
                }
            },
            Behavior::SurveillanceUnit(unit) => {
                unit.update(&mut self.pos, dt, ctx.player);
            }
        }
    }

    /// Strike just switched from warning to active this tick
    pub fn strike_went_live(&self) -> bool {
        matches!(
            &self.behavior,
            Behavior::TransientStrike(TransientStrike {
                phase: StrikePhase::Active { elapsed },
                ..
            }) if *elapsed == 0.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ctx(player: Option<Vec2>) -> EnemyContext {
        EnemyContext {
            player,
            view_bottom: 720.0,
        }
    }

    #[test]
    fn test_tag_parsing() {
        for tag in EnemyTag::ALL {
            assert_eq!(tag.as_str().parse::<EnemyTag>().unwrap(), tag);
        }
        assert_eq!("bat".parse::<EnemyTag>().unwrap(), EnemyTag::PatrolFlyer);
        let err = "dragon".parse::<EnemyTag>().unwrap_err();
        assert_eq!(err.to_string(), "unknown enemy variant 'dragon'");
    }

    #[test]
    fn test_spawn_named_unknown_variant() {
        let mut rng = Pcg32::seed_from_u64(1);
        let result = Enemy::spawn_named(1, "kraken", Vec2::ZERO, &mut rng);
        assert!(matches!(result, Err(SimError::UnknownVariant { .. })));
        let ok = Enemy::spawn_named(2, "drone", Vec2::ZERO, &mut rng).unwrap();
        assert_eq!(ok.tag(), EnemyTag::SurveillanceUnit);
    }

    #[test]
    fn test_flyer_reverses_at_bounds_and_bobs() {
        let origin = Vec2::new(600.0, 100.0);
        let mut e = Enemy::patrol_flyer(1, origin, 100.0, 200.0);
        let mut reversed = false;
        for _ in 0..300 {
            e.update(SIM_DT, &ctx(None));
            assert!((e.pos.x - origin.x).abs() <= 100.0 + 1e-3);
            assert!((e.pos.y - origin.y).abs() <= FLYER_BOB_AMPLITUDE + 1e-3);
            if let Behavior::PatrolFlyer(f) = &e.behavior {
                reversed |= f.direction < 0.0;
            }
        }
        assert!(reversed);
    }

    #[test]
    fn test_rotating_hazard_wraps_and_keeps_axis_aligned_box() {
        let mut e = Enemy::rotating_hazard(1, Vec2::new(100.0, 100.0), SPINNER_SPEED);
        let before = e.hitbox();
        for _ in 0..200 {
            e.update(SIM_DT, &ctx(None));
        }
        if let Behavior::RotatingHazard(s) = &e.behavior {
            assert!(s.angle >= 0.0 && s.angle < 360.0);
            assert!(s.angle > 0.0);
        }
        // The footprint does not rotate with the sprite
        assert_eq!(e.hitbox(), before);
        assert_eq!(e.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_rock_falls_to_terminal_and_culls_below_view() {
        let mut e = Enemy::falling_hazard(1, Vec2::new(300.0, 0.0), ROCK_GRAVITY, false);
        for _ in 0..30 {
            e.update(SIM_DT, &ctx(None));
        }
        if let Behavior::FallingHazard(r) = &e.behavior {
            assert_eq!(r.vel_y, ROCK_TERMINAL_VELOCITY);
        }
        for _ in 0..120 {
            e.update(SIM_DT, &ctx(None));
        }
        assert!(!e.active);
        assert!(e.hitbox().is_none());
    }

    #[test]
    fn test_dormant_rock_waits_for_player() {
        let mut e = Enemy::falling_hazard(1, Vec2::new(300.0, -2000.0), ROCK_GRAVITY, true);
        e.update(SIM_DT, &ctx(None));
        e.update(SIM_DT, &ctx(Some(Vec2::new(300.0, 0.0))));
        assert_eq!(e.pos.y, -2000.0);
        e.update(SIM_DT, &ctx(Some(Vec2::new(300.0, -1500.0))));
        assert!(e.pos.y > -2000.0);
    }

    #[test]
    fn test_strike_lifecycle() {
        let mut e = Enemy::transient_strike(1, Vec2::new(500.0, 0.0));
        assert!(e.hitbox().is_none(), "warning phase is harmless");
        let mut went_live = 0;
        let mut ticks = 0;
        while e.active {
            e.update(SIM_DT, &ctx(None));
            if e.strike_went_live() {
                went_live += 1;
                assert!(e.hitbox().is_some());
            }
            ticks += 1;
            assert!(ticks < 120);
        }
        assert_eq!(went_live, 1);
        let total = ticks as f32 * SIM_DT;
        assert!((total - (STRIKE_WARNING + STRIKE_LIFETIME)).abs() < 2.0 * SIM_DT);
    }

    #[test]
    fn test_inactive_enemy_never_updates_or_hits() {
        let mut e = Enemy::patrol_flyer(1, Vec2::ZERO, 100.0, 100.0);
        e.active = false;
        e.update(1.0, &ctx(None));
        assert_eq!(e.pos, Vec2::ZERO);
        assert!(e.hitbox().is_none());
    }
}
