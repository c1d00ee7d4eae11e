//! Data-driven game balance
//!
//! One `DifficultyConfig` record per difficulty replaces string-keyed
//! lookups. Components take `&DifficultyConfig`; nothing reads a global.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_LEVEL;
use crate::error::{ConfigError, SimError};

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" | "medium" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(SimError::unknown("difficulty", s)),
        }
    }
}

/// Every difficulty-dependent parameter, in per-second units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub difficulty: Difficulty,

    // === Player ===
    /// Horizontal run speed (px/s)
    pub run_speed: f32,
    /// Upward launch speed of a jump (px/s)
    pub jump_speed: f32,
    /// Player gravity (px/s²)
    pub gravity: f32,
    /// Jumps available before touching ground again
    pub max_jumps: u32,
    pub lives: u32,
    pub max_health: f32,
    /// Grace window after walking off a ledge (s)
    pub coyote_time: f32,

    // === Enemies & power-ups ===
    /// Scales per-level enemy counts
    pub enemy_rate: f32,
    pub enemy_damage_mult: f32,
    /// Scales per-level power-up counts
    pub powerup_rate: f32,
    pub powerup_duration_mult: f32,
    /// Seconds between surveillance unit spawns (levels 2+)
    pub drone_interval: f32,
    /// Scales the per-level initial surveillance unit count
    pub drone_count_mult: f32,
    pub drone_patrol_range: f32,
    pub drone_detection_range: f32,

    // === Lava ===
    /// Base ascent speed (px/s)
    pub lava_speed: f32,
    /// Speed gained per second of level time (px/s²)
    pub lava_accel: f32,
    /// Hard cap on ascent speed (px/s)
    pub lava_max_speed: f32,

    // === Scoring ===
    pub score_mult: f32,
    /// Multiplier on the level-complete bonus
    pub completion_mult: f32,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::Normal)
    }
}

impl DifficultyConfig {
    /// Built-in preset for a difficulty
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                difficulty,
                run_speed: 330.0,
                jump_speed: 780.0,
                gravity: 1260.0,
                max_jumps: 2,
                lives: 5,
                max_health: 150.0,
                coyote_time: 0.20,
                enemy_rate: 0.4,
                enemy_damage_mult: 0.5,
                powerup_rate: 2.0,
                powerup_duration_mult: 1.5,
                drone_interval: 12.0,
                drone_count_mult: 0.5,
                drone_patrol_range: 120.0,
                drone_detection_range: 150.0,
                lava_speed: 30.0,
                lava_accel: 0.018,
                lava_max_speed: 180.0,
                score_mult: 0.8,
                completion_mult: 1.0,
            },
            Difficulty::Normal => Self {
                difficulty,
                run_speed: 420.0,
                jump_speed: 900.0,
                gravity: 1800.0,
                max_jumps: 1,
                lives: 3,
                max_health: 100.0,
                coyote_time: 0.10,
                enemy_rate: 1.0,
                enemy_damage_mult: 1.0,
                powerup_rate: 1.0,
                powerup_duration_mult: 1.0,
                drone_interval: 8.0,
                drone_count_mult: 1.0,
                drone_patrol_range: 150.0,
                drone_detection_range: 200.0,
                lava_speed: 60.0,
                lava_accel: 0.048,
                lava_max_speed: 240.0,
                score_mult: 1.0,
                completion_mult: 1.5,
            },
            Difficulty::Hard => Self {
                difficulty,
                run_speed: 510.0,
                jump_speed: 1020.0,
                gravity: 2520.0,
                max_jumps: 1,
                lives: 1,
                max_health: 80.0,
                coyote_time: 0.05,
                enemy_rate: 1.8,
                enemy_damage_mult: 1.5,
                powerup_rate: 0.4,
                powerup_duration_mult: 0.7,
                drone_interval: 5.0,
                drone_count_mult: 1.5,
                drone_patrol_range: 200.0,
                drone_detection_range: 300.0,
                lava_speed: 132.0,
                lava_accel: 0.18,
                lava_max_speed: 360.0,
                score_mult: 1.5,
                completion_mult: 2.0,
            },
        }
    }

    /// Parse and validate a JSON override
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON override from disk
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded {} tuning from {}", config.difficulty, path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("run_speed", self.run_speed),
            ("jump_speed", self.jump_speed),
            ("gravity", self.gravity),
            ("max_health", self.max_health),
            ("powerup_duration_mult", self.powerup_duration_mult),
            ("drone_interval", self.drone_interval),
            ("drone_patrol_range", self.drone_patrol_range),
            ("drone_detection_range", self.drone_detection_range),
            ("lava_speed", self.lava_speed),
            ("lava_max_speed", self.lava_max_speed),
            ("score_mult", self.score_mult),
            ("completion_mult", self.completion_mult),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                });
            }
        }

        let non_negative = [
            ("coyote_time", self.coyote_time),
            ("enemy_rate", self.enemy_rate),
            ("enemy_damage_mult", self.enemy_damage_mult),
            ("powerup_rate", self.powerup_rate),
            ("drone_count_mult", self.drone_count_mult),
            ("lava_accel", self.lava_accel),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be zero or positive, got {value}"),
                });
            }
        }

        if self.lives == 0 {
            return Err(ConfigError::Invalid {
                field: "lives",
                reason: "at least one life is required".to_string(),
            });
        }
        if self.max_jumps == 0 {
            return Err(ConfigError::Invalid {
                field: "max_jumps",
                reason: "at least one jump is required".to_string(),
            });
        }
        if self.lava_max_speed < self.lava_speed {
            return Err(ConfigError::Invalid {
                field: "lava_max_speed",
                reason: format!(
                    "cap {} is below base speed {}",
                    self.lava_max_speed, self.lava_speed
                ),
            });
        }
        Ok(())
    }

    /// Highest point of a standing jump (px)
    pub fn jump_apex(&self) -> f32 {
        self.jump_speed * self.jump_speed / (2.0 * self.gravity)
    }
}

/// Per-level layout counts and enemy tuning, already scaled by difficulty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub level: u32,
    pub name: String,
    pub platforms: u32,
    pub flyers: u32,
    pub rotating_hazards: u32,
    pub falling_hazards: u32,
    pub strikes: u32,
    pub powerups: u32,
    /// Patrol half-width range for flyers (px)
    pub flyer_patrol: (f32, f32),
    /// Lateral flyer speed range (px/s)
    pub flyer_speed: (f32, f32),
    pub spin_mult: f32,
    pub rock_gravity_mult: f32,
    /// Initial surveillance units before the difficulty multiplier
    pub base_drones: u32,
    /// Dynamic falling hazard rate (per second)
    pub rock_rate: f32,
    /// Dynamic flyer rate once high in the level (per second)
    pub flyer_rate: f32,
}

impl LevelConfig {
    /// Counts for `level` (clamped to 1..=MAX_LEVEL), scaled by the difficulty rates
    pub fn for_level(level: u32, difficulty: &DifficultyConfig) -> Self {
        let level = level.clamp(1, MAX_LEVEL);
        let mut config = Self::base(level);
        let scale = |count: u32, rate: f32| (count as f32 * rate) as u32;
        config.flyers = scale(config.flyers, difficulty.enemy_rate);
        config.rotating_hazards = scale(config.rotating_hazards, difficulty.enemy_rate);
        config.falling_hazards = scale(config.falling_hazards, difficulty.enemy_rate);
        config.strikes = scale(config.strikes, difficulty.enemy_rate);
        config.powerups = scale(config.powerups, difficulty.powerup_rate);
        config
    }

    fn base(level: u32) -> Self {
        match level {
            1 => Self {
                level,
                name: "Cavern".to_string(),
                platforms: 10,
                flyers: 2,
                rotating_hazards: 1,
                falling_hazards: 0,
                strikes: 0,
                powerups: 4,
                flyer_patrol: (100.0, 180.0),
                flyer_speed: (90.0, 120.0),
                spin_mult: 1.0,
                rock_gravity_mult: 1.0,
                base_drones: 0,
                rock_rate: 0.18,
                flyer_rate: 0.12,
            },
            2 => Self {
                level,
                name: "Forge".to_string(),
                platforms: 12,
                flyers: 3,
                rotating_hazards: 2,
                falling_hazards: 1,
                strikes: 0,
                powerups: 5,
                flyer_patrol: (120.0, 200.0),
                flyer_speed: (120.0, 150.0),
                spin_mult: 1.3,
                rock_gravity_mult: 1.2,
                base_drones: 2,
                rock_rate: 0.24,
                flyer_rate: 0.18,
            },
            _ => Self {
                level,
                name: "Storm Keep".to_string(),
                platforms: 15,
                flyers: 3,
                rotating_hazards: 2,
                falling_hazards: 2,
                strikes: 2,
                powerups: 6,
                flyer_patrol: (150.0, 250.0),
                flyer_speed: (150.0, 180.0),
                spin_mult: 1.6,
                rock_gravity_mult: 1.4,
                base_drones: 3,
                rock_rate: 0.30,
                flyer_rate: 0.24,
            },
        }
    }

    /// Transient strikes only appear on the last level
    pub fn has_strikes(&self) -> bool {
        self.level >= MAX_LEVEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        for d in Difficulty::ALL {
            DifficultyConfig::for_difficulty(d).validate().unwrap();
        }
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(" easy ".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        let err = "nightmare".parse::<Difficulty>().unwrap_err();
        assert_eq!(
            err,
            SimError::UnknownVariant {
                kind: "difficulty",
                name: "nightmare".to_string()
            }
        );
    }

    #[test]
    fn test_json_override_round_trip_and_validation() {
        let mut config = DifficultyConfig::for_difficulty(Difficulty::Hard);
        config.lives = 2;
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(DifficultyConfig::from_json_str(&json).unwrap(), config);

        config.gravity = -1.0;
        let json = serde_json::to_string(&config).unwrap();
        let err = DifficultyConfig::from_json_str(&json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "gravity", .. }));
    }

    #[test]
    fn test_zero_lives_rejected() {
        let mut config = DifficultyConfig::default();
        config.lives = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "lives", .. })
        ));
    }

    #[test]
    fn test_level_counts_scale_with_difficulty() {
        let easy = LevelConfig::for_level(2, &DifficultyConfig::for_difficulty(Difficulty::Easy));
        let hard = LevelConfig::for_level(2, &DifficultyConfig::for_difficulty(Difficulty::Hard));
        // 3 * 0.4 truncates to 1, 3 * 1.8 truncates to 5
        assert_eq!(easy.flyers, 1);
        assert_eq!(hard.flyers, 5);
        assert_eq!(easy.powerups, 10);
        assert_eq!(hard.powerups, 2);
        assert_eq!(easy.platforms, hard.platforms);
    }

    #[test]
    fn test_jump_clears_largest_generated_gap() {
        for d in Difficulty::ALL {
            let config = DifficultyConfig::for_difficulty(d);
            assert!(config.jump_apex() > 160.0, "{d}: apex {}", config.jump_apex());
        }
    }

    #[test]
    fn test_strikes_only_on_last_level() {
        let config = LevelConfig::for_level(1, &DifficultyConfig::default());
        assert!(!config.has_strikes());
        assert!(LevelConfig::for_level(9, &DifficultyConfig::default()).has_strikes());

        let slots = |d| LevelConfig::for_level(3, &DifficultyConfig::for_difficulty(d)).strikes;
        assert_eq!(slots(Difficulty::Easy), 0);
        assert_eq!(slots(Difficulty::Normal), 2);
        assert_eq!(slots(Difficulty::Hard), 3);
    }
}
