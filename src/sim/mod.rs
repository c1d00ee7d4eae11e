//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod camera;
pub mod collision;
pub mod drone;
pub mod enemy;
pub mod geometry;
pub mod lava;
pub mod level;
pub mod platform;
pub mod player;
pub mod powerup;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod view;

pub use camera::Camera;
pub use enemy::{Enemy, EnemyTag};
pub use geometry::Aabb;
pub use lava::Lava;
pub use platform::{Platform, PlatformKind, VictoryFlag};
pub use player::{DamageOutcome, Player};
pub use powerup::{PowerUp, PowerUpKind};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use view::{Frame, SpriteKind, snapshot};
