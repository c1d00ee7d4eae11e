//! Follow camera

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use crate::consts::*;
use crate::damp;

/// Vertical follow camera; `y` is the world y of the top of the view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub y: f32,
}

impl Camera {
    /// Camera already settled on `player_y`
    pub fn centered_on(player_y: f32) -> Self {
        Self {
            y: player_y - CAMERA_OFFSET_Y,
        }
    }

    /// Ease toward `player_y - CAMERA_OFFSET_Y`
    pub fn follow(&mut self, player_y: f32, dt: f32) {
        self.y = damp(self.y, player_y - CAMERA_OFFSET_Y, CAMERA_SMOOTHING_RATE, dt);
    }

    pub fn snap(&mut self, player_y: f32) {
        self.y = player_y - CAMERA_OFFSET_Y;
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + SCREEN_HEIGHT
    }

    /// World-space rectangle currently on screen
    pub fn view(&self) -> Aabb {
        Aabb::from_top_left(Vec2::new(0.0, self.y), Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT))
    }

    pub fn world_to_screen(&self, pos: Vec2) -> Vec2 {
        Vec2::new(pos.x, pos.y - self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_converges_without_overshoot() {
        let mut cam = Camera::centered_on(600.0);
        let target = 100.0 - CAMERA_OFFSET_Y;
        let mut last = cam.y;
        for _ in 0..120 {
            cam.follow(100.0, SIM_DT);
            assert!(cam.y <= last && cam.y >= target);
            last = cam.y;
        }
        assert!((cam.y - target).abs() < 0.1);
    }

    #[test]
    fn test_view_and_screen_mapping() {
        let cam = Camera { y: -500.0 };
        assert_eq!(cam.bottom(), 220.0);
        assert!(cam.view().contains_point(Vec2::new(640.0, 0.0)));
        assert_eq!(cam.world_to_screen(Vec2::new(10.0, -400.0)), Vec2::new(10.0, 100.0));
    }
}
