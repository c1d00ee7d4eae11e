//! Surveillance unit state machine
//!
//! The sensor only refreshes every `SENSOR_COOLDOWN` seconds. Each refresh
//! records the player position, extrapolates a predicted position from the
//! last two samples and picks a mode:
//! - inside `TOO_CLOSE`: evade (flee away from the prediction)
//! - inside detection range: chase the prediction
//! - otherwise (or no player at all): patrol the waypoints, or hover

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::SCREEN_WIDTH;

pub const DRONE_WIDTH: f32 = 60.0;
pub const DRONE_HEIGHT: f32 = 40.0;
pub const DRONE_DAMAGE: f32 = 20.0;
/// Seconds between sensor refreshes
pub const SENSOR_COOLDOWN: f32 = 1.0;
/// Closer than this the unit backs off instead of chasing (px)
pub const TOO_CLOSE: f32 = 150.0;
pub const PATROL_SPEED: f32 = 120.0;
pub const CHASE_SPEED: f32 = 150.0;
pub const EVADE_SPEED: f32 = 180.0;
/// A waypoint counts as reached inside this radius (px)
pub const WAYPOINT_RADIUS: f32 = 10.0;
/// Chasing closer than this fires the (cosmetic) laser
pub const LASER_RANGE: f32 = 100.0;
const HISTORY_LEN: usize = 10;
const PATROL_POINTS: usize = 4;
/// Hover bob speed (px/s peak)
const HOVER_SPEED: f32 = 30.0;
/// Vertical leash around the spawn point
const LEASH: f32 = 400.0;

/// Current behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DroneMode {
    Patrol,
    Chase,
    Evade,
    Hover,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveillanceUnit {
    pub mode: DroneMode,
    pub home: Vec2,
    pub patrol_points: Vec<Vec2>,
    pub patrol_index: usize,
    pub detection_range: f32,
    /// Speed used while patrolling or hovering (px/s)
    pub cruise_speed: f32,
    pub detection_timer: f32,
    pub history: VecDeque<Vec2>,
    pub predicted: Option<Vec2>,
    pub player_detected: bool,
    pub laser_active: bool,
    /// Sensor sweep angle (cosmetic)
    pub scan_angle: f32,
    time: f32,
}

impl SurveillanceUnit {
    /// Unit with `PATROL_POINTS` random waypoints within `patrol_range` of `home`
    pub fn new<R: Rng>(home: Vec2, patrol_range: f32, detection_range: f32, rng: &mut R) -> Self {
        let patrol_points = if patrol_range > 0.0 {
            (0..PATROL_POINTS)
                .map(|_| {
                    home + Vec2::new(
                        rng.random_range(-patrol_range..=patrol_range),
                        rng.random_range(-patrol_range / 2.0..=patrol_range / 2.0),
                    )
                })
                .collect()
        } else {
            Vec::new()
        };
        Self::with_waypoints(home, patrol_points, detection_range)
    }

    pub fn with_waypoints(home: Vec2, patrol_points: Vec<Vec2>, detection_range: f32) -> Self {
        let mode = if patrol_points.is_empty() {
            DroneMode::Hover
        } else {
            DroneMode::Patrol
        };
        Self {
            mode,
            home,
            patrol_points,
            patrol_index: 0,
            detection_range,
            cruise_speed: PATROL_SPEED,
            detection_timer: 0.0,
            history: VecDeque::with_capacity(HISTORY_LEN),
            predicted: None,
            player_detected: false,
            laser_active: false,
            scan_angle: 0.0,
            time: 0.0,
        }
    }

    fn idle_mode(&self) -> DroneMode {
        if self.patrol_points.is_empty() {
            DroneMode::Hover
        } else {
            DroneMode::Patrol
        }
    }

    /// Refresh the sensor from the player position (or its absence)
    fn sense(&mut self, pos: Vec2, player: Option<Vec2>) {
        self.detection_timer = SENSOR_COOLDOWN;

        let Some(player) = player else {
            self.player_detected = false;
            self.mode = self.idle_mode();
            return;
        };

        let distance = pos.distance(player);
        if distance >= self.detection_range {
            self.player_detected = false;
            self.mode = self.idle_mode();
            return;
        }

        self.player_detected = true;
        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(player);
        self.predicted = Some(self.predict());
        self.mode = if distance < TOO_CLOSE {
            DroneMode::Evade
        } else {
            DroneMode::Chase
        };
    }

    /// Linear extrapolation two samples ahead
    fn predict(&self) -> Vec2 {
        let mut recent = self.history.iter().rev();
        match (recent.next(), recent.next()) {
            (Some(&last), Some(&second_last)) => last + (last - second_last) * 2.0,
            (Some(&last), None) => last,
            _ => self.home,
        }
    }

    pub fn update(&mut self, pos: &mut Vec2, dt: f32, player: Option<Vec2>) {
        self.time += dt;
        self.scan_angle += dt * 3.0;
        self.detection_timer -= dt;
        if self.detection_timer <= 0.0 {
            self.sense(*pos, player);
        }

        // Losing the player between refreshes also drops the chase
        if player.is_none() && matches!(self.mode, DroneMode::Chase | DroneMode::Evade) {
            self.player_detected = false;
            self.mode = self.idle_mode();
        }

        self.laser_active = false;
        match self.mode {
            DroneMode::Hover => {
                pos.y += self.time.sin() * HOVER_SPEED * dt;
            }
            DroneMode::Patrol => {
                let target = self.patrol_points[self.patrol_index];
                let delta = target - *pos;
                if delta.length() < WAYPOINT_RADIUS {
                    self.patrol_index = (self.patrol_index + 1) % self.patrol_points.len();
                } else {
                    *pos += delta.normalize_or_zero() * (self.cruise_speed * dt).min(delta.length());
                }
            }
            DroneMode::Chase => {
                let target = self.predicted.unwrap_or(self.home);
                let delta = target - *pos;
                let distance = delta.length();
                if distance > 0.0 {
                    *pos += delta / distance * (CHASE_SPEED * dt).min(distance);
                    self.laser_active = distance < LASER_RANGE;
                }
            }
            DroneMode::Evade => {
                let threat = self.predicted.unwrap_or(*pos);
                let away = (*pos - threat).normalize_or_zero();
                *pos += away * EVADE_SPEED * dt;
            }
        }

        let half_w = DRONE_WIDTH / 2.0;
        pos.x = pos.x.clamp(half_w, SCREEN_WIDTH - half_w);
        pos.y = pos.y.clamp(self.home.y - LEASH, self.home.y + LEASH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn unit() -> (SurveillanceUnit, Vec2) {
        let home = Vec2::new(640.0, 0.0);
        let points = vec![
            home + Vec2::new(100.0, 0.0),
            home + Vec2::new(-100.0, 0.0),
        ];
        (SurveillanceUnit::with_waypoints(home, points, 300.0), home)
    }

    #[test]
    fn test_patrol_without_player() {
        let (mut d, mut pos) = unit();
        for _ in 0..40 {
            d.update(&mut pos, SIM_DT, None);
        }
        assert_eq!(d.mode, DroneMode::Patrol);
        assert!(!d.player_detected);
        // Heading for the first waypoint at cruise speed
        assert!((pos.x - 720.0).abs() < 1.0, "x = {}", pos.x);
    }

    #[test]
    fn test_hover_without_waypoints() {
        let mut d = SurveillanceUnit::with_waypoints(Vec2::ZERO, Vec::new(), 300.0);
        let mut pos = Vec2::new(640.0, 0.0);
        d.update(&mut pos, SIM_DT, Some(Vec2::new(640.0, 1000.0)));
        assert_eq!(d.mode, DroneMode::Hover);
    }

    #[test]
    fn test_chase_inside_detection_range() {
        let (mut d, mut pos) = unit();
        let player = Vec2::new(640.0, 250.0);
        d.update(&mut pos, SIM_DT, Some(player));
        assert_eq!(d.mode, DroneMode::Chase);
        assert!(d.player_detected);
        assert!(pos.y > 0.0, "moves toward the player");
    }

    #[test]
    fn test_evade_when_too_close() {
        let (mut d, mut pos) = unit();
        let player = Vec2::new(640.0, 100.0);
        d.update(&mut pos, SIM_DT, Some(player));
        assert_eq!(d.mode, DroneMode::Evade);
        assert!(pos.y < 0.0, "backs away from the player");
    }

    #[test]
    fn test_sensor_only_refreshes_on_cooldown() {
        let (mut d, mut pos) = unit();
        // First refresh: player far away
        d.update(&mut pos, SIM_DT, Some(Vec2::new(640.0, 2000.0)));
        assert_eq!(d.mode, DroneMode::Patrol);
        // Player jumps into range; the sensor has not refreshed yet
        d.update(&mut pos, SIM_DT, Some(Vec2::new(640.0, 250.0)));
        assert_eq!(d.mode, DroneMode::Patrol);
        for _ in 0..60 {
            let player = Vec2::new(pos.x, pos.y + 250.0);
            d.update(&mut pos, SIM_DT, Some(player));
        }
        assert_eq!(d.mode, DroneMode::Chase);
    }

    #[test]
    fn test_prediction_extrapolates_two_samples() {
        let (mut d, _) = unit();
        d.history.push_back(Vec2::new(0.0, 0.0));
        d.history.push_back(Vec2::new(10.0, -5.0));
        assert_eq!(d.predict(), Vec2::new(30.0, -15.0));
    }

    #[test]
    fn test_history_is_bounded() {
        let (mut d, mut pos) = unit();
        for i in 0..40 {
            d.detection_timer = 0.0;
            let player = pos + Vec2::new(0.0, 200.0 + i as f32);
            d.update(&mut pos, SIM_DT, Some(player));
        }
        assert_eq!(d.history.len(), HISTORY_LEN);
    }

    #[test]
    fn test_losing_player_drops_chase() {
        let (mut d, mut pos) = unit();
        d.update(&mut pos, SIM_DT, Some(Vec2::new(640.0, 250.0)));
        assert_eq!(d.mode, DroneMode::Chase);
        d.update(&mut pos, SIM_DT, None);
        assert_eq!(d.mode, DroneMode::Patrol);
        assert!(!d.player_detected);
    }

    #[test]
    fn test_random_waypoints_within_range() {
        let mut rng = Pcg32::seed_from_u64(42);
        let home = Vec2::new(600.0, -300.0);
        let d = SurveillanceUnit::new(home, 150.0, 200.0, &mut rng);
        assert_eq!(d.patrol_points.len(), PATROL_POINTS);
        for p in &d.patrol_points {
            assert!((p.x - home.x).abs() <= 150.0);
            assert!((p.y - home.y).abs() <= 75.0);
        }
    }

    #[test]
    fn test_stays_inside_arena() {
        let (mut d, _) = unit();
        let mut pos = Vec2::new(10.0, 0.0);
        d.update(&mut pos, SIM_DT, None);
        assert!(pos.x >= DRONE_WIDTH / 2.0);
    }
}
