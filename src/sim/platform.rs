//! Platforms and the victory flag

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use crate::consts::*;

/// Flag pole height (px)
pub const FLAG_POLE_HEIGHT: f32 = 150.0;
/// Flag cloth rises at this speed once touched (px/s)
pub const FLAG_RAISE_SPEED: f32 = 200.0;

/// Platform behaviour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlatformKind {
    Static,
    /// Oscillates between `origin_x - range` and `origin_x + range`
    Moving {
        origin_x: f32,
        range: f32,
        speed: f32,
        direction: f32,
    },
    /// Level exit at the top of the climb
    Castle,
}

/// A platform entity (position is the centre of the slab)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub kind: PlatformKind,
    /// Set on first landing, never cleared
    pub touched: bool,
    pub is_spawn: bool,
    pub is_final: bool,
    /// Horizontal displacement during the last update (carries riders)
    #[serde(default)]
    pub last_dx: f32,
}

impl Platform {
    pub fn new(id: u32, pos: Vec2, width: f32) -> Self {
        Self {
            id,
            pos,
            width,
            height: PLATFORM_HEIGHT,
            kind: PlatformKind::Static,
            touched: false,
            is_spawn: false,
            is_final: false,
            last_dx: 0.0,
        }
    }

    pub fn moving(id: u32, pos: Vec2, width: f32, range: f32, speed: f32) -> Self {
        Self {
            kind: PlatformKind::Moving {
                origin_x: pos.x,
                range,
                speed,
                direction: 1.0,
            },
            ..Self::new(id, pos, width)
        }
    }

    pub fn spawn(id: u32, pos: Vec2) -> Self {
        Self {
            is_spawn: true,
            ..Self::new(id, pos, SPAWN_PLATFORM_WIDTH)
        }
    }

    pub fn castle(id: u32, pos: Vec2) -> Self {
        Self {
            kind: PlatformKind::Castle,
            is_final: true,
            ..Self::new(id, pos, CASTLE_PLATFORM_WIDTH)
        }
    }

    pub fn hitbox(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::new(self.width, self.height))
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.height / 2.0
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.kind, PlatformKind::Moving { .. })
    }

    /// Rest x position (oscillation centre for moving platforms)
    pub fn anchor_x(&self) -> f32 {
        match self.kind {
            PlatformKind::Moving { origin_x, .. } => origin_x,
            _ => self.pos.x,
        }
    }

    /// Mark as touched. Returns true only for the first touch.
    pub fn touch(&mut self) -> bool {
        let first = !self.touched;
        self.touched = true;
        first
    }

    pub fn update(&mut self, dt: f32) {
        self.last_dx = 0.0;
        if let PlatformKind::Moving {
            origin_x,
            range,
            speed,
            ref mut direction,
        } = self.kind
        {
            let before = self.pos.x;
            let mut x = before + speed * *direction * dt;
            if x > origin_x + range {
                x = origin_x + range;
                *direction = -1.0;
            } else if x < origin_x - range {
                x = origin_x - range;
                *direction = 1.0;
            }
            self.pos.x = x;
            self.last_dx = x - before;
        }
    }
}

/// The victory flag planted on the castle platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VictoryFlag {
    /// Foot of the pole
    pub pos: Vec2,
    pub touched: bool,
    pub raised: bool,
    /// Raise animation progress in [0, 1]
    pub progress: f32,
}

impl VictoryFlag {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            touched: false,
            raised: false,
            progress: 0.0,
        }
    }

    /// Trigger area: 100 px wide, covering the whole pole
    pub fn hitbox(&self) -> Aabb {
        Aabb::from_top_left(
            Vec2::new(self.pos.x - 30.0, self.pos.y - FLAG_POLE_HEIGHT - 20.0),
            Vec2::new(100.0, FLAG_POLE_HEIGHT + 40.0),
        )
    }

    /// Returns true on the first touch
    pub fn touch(&mut self) -> bool {
        if self.touched {
            return false;
        }
        self.touched = true;
        true
    }

    pub fn update(&mut self, dt: f32) {
        if self.touched && !self.raised {
            self.progress += dt * FLAG_RAISE_SPEED / FLAG_POLE_HEIGHT;
            if self.progress >= 1.0 {
                self.progress = 1.0;
                self.raised = true;
            }
        }
    }
}
