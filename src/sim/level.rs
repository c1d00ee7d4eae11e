//! Level generation
//!
//! Builds the static layout for one level: an ascending column of platforms
//! from the spawn platform up to the castle, the victory flag, the initial
//! enemy placement and the power-ups. Placement is seeded and deterministic.
//!
//! Soft shortfalls (too few platforms for a category, no platform near a
//! section) produce fewer entities and are logged, never reported as errors.

use glam::Vec2;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use super::drone::SurveillanceUnit;
use super::enemy::{Enemy, ROCK_GRAVITY, SPINNER_SPEED};
use super::platform::{Platform, VictoryFlag};
use super::powerup::{PowerUp, PowerUpKind};
use super::state::EntityIds;
use crate::consts::*;
use crate::tuning::{DifficultyConfig, LevelConfig};

/// Centre of the spawn platform
pub const SPAWN_POS: Vec2 = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - 100.0);
/// Every Nth gap is stretched
pub const RHYTHM_INTERVAL: u32 = 5;
pub const RHYTHM_GAP_MULT: f32 = 1.5;
/// Gap between the last platform and the castle
pub const CASTLE_GAP: f32 = PLATFORM_VERTICAL_SPACING * 2.0;
/// Largest vertical gap the generator ever produces
pub const MAX_VERTICAL_GAP: f32 = CASTLE_GAP;
/// Largest edge-to-edge horizontal gap between consecutive platforms
pub const MAX_HORIZONTAL_GAP: f32 = 260.0;
/// Flag pole stands this far left of the castle centre
pub const FLAG_OFFSET_X: f32 = 100.0;
/// Power-ups guaranteed near the spawn
pub const FIXED_POWERUPS: [(PowerUpKind, Vec2); 2] = [
    (PowerUpKind::Shield, Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - 150.0)),
    (PowerUpKind::Speed, Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - 250.0)),
];
/// Power-ups float this far above their platform's top
const POWERUP_LIFT: f32 = 40.0;
/// Flyers attach to platforms within this distance of their section centre
const FLYER_SEARCH_RADIUS: f32 = 300.0;
const FLYER_OFFSET_X: f32 = 150.0;
const ROCK_SECTIONS: u32 = 4;
const ROCK_SECTION_MARGIN: f32 = 100.0;
const MIN_TRAP_GAP: f32 = 120.0;
const DRONE_SPACING: f32 = 150.0;
/// Extra detection range for surveillance units on the last level
const LAST_LEVEL_DETECTION_BONUS: f32 = 50.0;

/// Output of the generator
#[derive(Debug, Clone)]
pub struct Layout {
    /// Ordered bottom to top; the spawn platform is first
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub powerups: Vec<PowerUp>,
    pub flag: VictoryFlag,
    /// Vertical distance from the spawn platform to the castle
    pub height: f32,
}

impl Layout {
    pub fn spawn_platform(&self) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.is_spawn)
    }

    pub fn final_platform(&self) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.is_final)
    }
}

/// Generate the layout for `level`
pub fn generate<R: Rng>(
    level: &LevelConfig,
    difficulty: &DifficultyConfig,
    ids: &mut EntityIds,
    rng: &mut R,
) -> Layout {
    let mut platforms = generate_platforms(level, ids, rng);
    if enforce_single_final(&mut platforms, ids) {
        log::warn!("Level {}: no castle platform, added a fallback", level.level);
    }

    let (flag, height) = match platforms.iter().find(|p| p.is_final) {
        Some(castle) => (
            VictoryFlag::new(Vec2::new(castle.pos.x - FLAG_OFFSET_X, castle.top())),
            SPAWN_POS.y - castle.pos.y,
        ),
        // enforce_single_final always leaves one
        None => (VictoryFlag::new(SPAWN_POS), 0.0),
    };

    let mut enemies = Vec::new();
    place_flyers(level, &platforms, ids, rng, &mut enemies);
    place_rotating_hazards(level, &platforms, ids, rng, &mut enemies);
    place_falling_hazards(level, &platforms, height, ids, rng, &mut enemies);
    place_surveillance_units(level, difficulty, &platforms, height, ids, rng, &mut enemies);

    let powerups = place_powerups(level, &platforms, ids, rng);

    log::info!(
        "Level {} '{}': {} platforms ({} moving), {} enemies, {} power-ups, height {:.0}",
        level.level,
        level.name,
        platforms.len(),
        platforms.iter().filter(|p| p.is_moving()).count(),
        enemies.len(),
        powerups.len(),
        height
    );

    Layout {
        platforms,
        enemies,
        powerups,
        flag,
        height,
    }
}

/// Horizontal band for the zone cycling left / right / centre by index
fn zone_range(index: u32) -> (f32, f32) {
    let mid = SCREEN_WIDTH / 2.0;
    match index % 3 {
        0 => (PLATFORM_WIDTH + 50.0, mid - 50.0),
        1 => (mid + 50.0, SCREEN_WIDTH - PLATFORM_WIDTH - 50.0),
        _ => (mid - 100.0, mid + 100.0),
    }
}

/// Width range and moving chance by how far up the column we are
fn tier(index: u32, count: u32) -> ((f32, f32), f64) {
    let progress = index as f32 / count.max(1) as f32;
    if progress < 0.3 {
        ((160.0, 200.0), 0.1)
    } else if progress < 0.7 {
        ((140.0, 180.0), 0.25)
    } else {
        ((120.0, 160.0), 0.4)
    }
}

/// Clamp `x` so a platform of `width` stays reachable from `prev` and on screen
fn reachable_x(x: f32, width: f32, prev: &Platform) -> f32 {
    let reach = MAX_HORIZONTAL_GAP + (width + prev.width) / 2.0;
    let anchor = prev.anchor_x();
    x.clamp(anchor - reach, anchor + reach)
        .clamp(width / 2.0, SCREEN_WIDTH - width / 2.0)
}

fn generate_platforms<R: Rng>(level: &LevelConfig, ids: &mut EntityIds, rng: &mut R) -> Vec<Platform> {
    let count = level.platforms;
    let mut platforms = Vec::with_capacity(count as usize + 2);
    platforms.push(Platform::spawn(ids.next(), SPAWN_POS));

    let mut y = SPAWN_POS.y;
    for i in 1..=count {
        y -= if i % RHYTHM_INTERVAL == 0 {
            PLATFORM_VERTICAL_SPACING * RHYTHM_GAP_MULT
        } else {
            PLATFORM_VERTICAL_SPACING
        };

        let ((min_w, max_w), move_chance) = tier(i, count);
        let width = rng.random_range(min_w..=max_w).round();
        let (lo, hi) = zone_range(i);
        let x = rng.random_range(lo..=hi).round();
        let x = match platforms.last() {
            Some(prev) => reachable_x(x, width, prev),
            None => x,
        };

        let platform = if rng.random_bool(move_chance) {
            // Keep the whole sweep on screen
            let range = rng
                .random_range(100.0..=200.0f32)
                .min(x - width / 2.0)
                .min(SCREEN_WIDTH - width / 2.0 - x)
                .max(0.0);
            let speed = rng.random_range(60.0..=180.0);
            Platform::moving(ids.next(), Vec2::new(x, y), width, range, speed)
        } else {
            Platform::new(ids.next(), Vec2::new(x, y), width)
        };
        platforms.push(platform);
    }

    let castle_x = match platforms.last() {
        Some(prev) => reachable_x(SCREEN_WIDTH / 2.0, CASTLE_PLATFORM_WIDTH, prev),
        None => SCREEN_WIDTH / 2.0,
    };
    platforms.push(Platform::castle(ids.next(), Vec2::new(castle_x, y - CASTLE_GAP)));
    platforms
}

/// Make sure exactly one platform is final: the highest one wins, and a
/// fallback castle is added above the column when none exists.
/// Returns true if a fallback was added.
pub fn enforce_single_final(platforms: &mut Vec<Platform>, ids: &mut EntityIds) -> bool {
    let highest_final = platforms
        .iter()
        .filter(|p| p.is_final)
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|p| p.id);

    match highest_final {
        Some(keep) => {
            for platform in platforms.iter_mut().filter(|p| p.id != keep) {
                platform.is_final = false;
            }
            false
        }
        None => {
            let top = platforms.iter().min_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
            let pos = match top {
                Some(prev) => Vec2::new(
                    reachable_x(SCREEN_WIDTH / 2.0, CASTLE_PLATFORM_WIDTH, prev),
                    prev.pos.y - CASTLE_GAP,
                ),
                None => SPAWN_POS - Vec2::new(0.0, CASTLE_GAP),
            };
            platforms.push(Platform::castle(ids.next(), pos));
            true
        }
    }
}

/// Whether consecutive platforms from spawn to final stay within the
/// generator's vertical and horizontal gap limits
pub fn is_climbable(platforms: &[Platform]) -> bool {
    let mut column: Vec<&Platform> = platforms.iter().collect();
    column.sort_by(|a, b| b.pos.y.total_cmp(&a.pos.y));

    let (Some(first), Some(last)) = (column.first(), column.last()) else {
        return false;
    };
    if !first.is_spawn || !last.is_final {
        return false;
    }

    column.windows(2).all(|pair| {
        let (lower, upper) = (pair[0], pair[1]);
        let rise = lower.pos.y - upper.pos.y;
        let edge_gap =
            (upper.anchor_x() - lower.anchor_x()).abs() - (upper.width + lower.width) / 2.0;
        rise > 0.0 && rise <= MAX_VERTICAL_GAP + 1e-3 && edge_gap <= MAX_HORIZONTAL_GAP + 1e-3
    })
}

fn place_flyers<R: Rng>(
    level: &LevelConfig,
    platforms: &[Platform],
    ids: &mut EntityIds,
    rng: &mut R,
    enemies: &mut Vec<Enemy>,
) {
    let wanted = level.flyers;
    if wanted == 0 {
        return;
    }
    if platforms.len() < 5 {
        log::debug!("Too few platforms for flyers, skipping");
        return;
    }

    let candidates: Vec<&Platform> = platforms.iter().filter(|p| !p.is_spawn).collect();
    let top = platforms.iter().map(|p| p.pos.y).fold(SPAWN_POS.y, f32::min);
    let sections = (wanted / 2).max(2);
    let section_height = (SPAWN_POS.y - top) / sections as f32;

    let mut placed = 0;
    for i in 0..wanted {
        let section = i % sections;
        let target_y = SPAWN_POS.y - (section as f32 + 0.5) * section_height;
        let closest = candidates
            .iter()
            .map(|p| (p, (p.pos.y - target_y).abs()))
            .filter(|(_, d)| *d < FLYER_SEARCH_RADIUS)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(p, _)| *p);
        let Some(platform) = closest else {
            continue;
        };

        let side = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
        let x = (platform.anchor_x() + side * FLYER_OFFSET_X).clamp(100.0, SCREEN_WIDTH - 100.0);
        let y = platform.pos.y - rng.random_range(60.0..=120.0);
        let range = rng.random_range(level.flyer_patrol.0..=level.flyer_patrol.1);
        let speed = rng.random_range(level.flyer_speed.0..=level.flyer_speed.1);
        enemies.push(Enemy::patrol_flyer(ids.next(), Vec2::new(x, y), range, speed));
        placed += 1;
    }
    if placed < wanted {
        log::debug!("Placed {placed} of {wanted} flyers");
    }
}

/// Rotating hazards sit midway across the taller gaps
fn place_rotating_hazards<R: Rng>(
    level: &LevelConfig,
    platforms: &[Platform],
    ids: &mut EntityIds,
    rng: &mut R,
    enemies: &mut Vec<Enemy>,
) {
    let wanted = level.rotating_hazards as usize;
    if wanted == 0 {
        return;
    }
    if platforms.len() < 4 {
        log::debug!("Too few platforms for rotating hazards, skipping");
        return;
    }

    let mut gaps: Vec<Vec2> = platforms
        .windows(2)
        .filter(|pair| (pair[0].pos.y - pair[1].pos.y).abs() >= MIN_TRAP_GAP)
        .map(|pair| {
            Vec2::new(
                (pair[0].anchor_x() + pair[1].anchor_x()) / 2.0,
                (pair[0].pos.y + pair[1].pos.y) / 2.0,
            )
        })
        .collect();
    gaps.shuffle(rng);
    if gaps.len() < wanted {
        log::debug!("Only {} gaps for {} rotating hazards", gaps.len(), wanted);
    }

    let mut chosen: Vec<Vec2> = gaps.into_iter().take(wanted).collect();
    chosen.sort_by(|a, b| b.y.total_cmp(&a.y));
    for pos in chosen {
        enemies.push(Enemy::rotating_hazard(
            ids.next(),
            pos,
            SPINNER_SPEED * level.spin_mult,
        ));
    }
}

/// Dormant rocks above platforms in each height quarter
fn place_falling_hazards<R: Rng>(
    level: &LevelConfig,
    platforms: &[Platform],
    height: f32,
    ids: &mut EntityIds,
    rng: &mut R,
    enemies: &mut Vec<Enemy>,
) {
    let wanted = level.falling_hazards;
    if wanted == 0 {
        return;
    }
    if platforms.len() < 3 {
        log::debug!("Too few platforms for falling hazards, skipping");
        return;
    }

    let section_height = height / ROCK_SECTIONS as f32;
    let gravity = ROCK_GRAVITY * level.rock_gravity_mult;
    for i in 0..wanted {
        let section = (i % ROCK_SECTIONS) as f32;
        let low = SPAWN_POS.y - section * section_height - ROCK_SECTION_MARGIN;
        let high = SPAWN_POS.y - (section + 1.0) * section_height + ROCK_SECTION_MARGIN;
        let suitable: Vec<&Platform> = platforms
            .iter()
            .filter(|p| p.pos.y > high && p.pos.y < low)
            .collect();
        let Some(platform) = suitable.choose(rng) else {
            log::debug!("No platform in section {section} for a falling hazard");
            continue;
        };
        let x = (platform.anchor_x() + rng.random_range(-80.0..=80.0)).clamp(60.0, SCREEN_WIDTH - 60.0);
        let y = platform.pos.y - rng.random_range(200.0..=350.0);
        enemies.push(Enemy::falling_hazard(ids.next(), Vec2::new(x, y), gravity, true));
    }
}

fn place_surveillance_units<R: Rng>(
    level: &LevelConfig,
    difficulty: &DifficultyConfig,
    platforms: &[Platform],
    height: f32,
    ids: &mut EntityIds,
    rng: &mut R,
    enemies: &mut Vec<Enemy>,
) {
    if level.base_drones == 0 {
        return;
    }
    let count = ((level.base_drones as f32 * difficulty.drone_count_mult) as u32).max(1);
    let mut detection = difficulty.drone_detection_range;
    if level.level >= MAX_LEVEL {
        detection += LAST_LEVEL_DETECTION_BONUS;
    }

    for i in 0..count {
        if platforms.len() <= (i * 2) as usize {
            log::debug!("Too few platforms for surveillance unit {i}");
            break;
        }
        let x = rng.random_range(100.0..=SCREEN_WIDTH - 100.0);
        let y = SPAWN_POS.y - height * 0.5 - i as f32 * DRONE_SPACING;
        let home = Vec2::new(x, y);
        let unit = SurveillanceUnit::new(home, difficulty.drone_patrol_range, detection, rng);
        enemies.push(Enemy::surveillance_unit(ids.next(), home, unit));
    }
}

fn place_powerups<R: Rng>(
    level: &LevelConfig,
    platforms: &[Platform],
    ids: &mut EntityIds,
    rng: &mut R,
) -> Vec<PowerUp> {
    let mut powerups: Vec<PowerUp> = FIXED_POWERUPS
        .iter()
        .map(|&(kind, pos)| PowerUp::new(ids.next(), kind, pos))
        .collect();

    let eligible: Vec<&Platform> = platforms
        .iter()
        .filter(|p| !p.is_spawn && !p.is_final)
        .collect();
    let extra = level.powerups.saturating_sub(FIXED_POWERUPS.len() as u32);
    if extra > 0 && eligible.is_empty() {
        log::debug!("No platforms for {extra} extra power-ups");
        return powerups;
    }

    for _ in 0..extra {
        let (Some(platform), Some(&kind)) = (eligible.choose(rng), PowerUpKind::ALL.choose(rng))
        else {
            break;
        };
        let pos = Vec2::new(platform.anchor_x(), platform.top() - POWERUP_LIFT);
        powerups.push(PowerUp::new(ids.next(), kind, pos));
    }
    powerups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::{Behavior, EnemyTag};
    use crate::tuning::Difficulty;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    fn build(level: u32, difficulty: Difficulty, seed: u64) -> Layout {
        let config = DifficultyConfig::for_difficulty(difficulty);
        let level = LevelConfig::for_level(level, &config);
        let mut ids = EntityIds::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        generate(&level, &config, &mut ids, &mut rng)
    }

    #[test]
    fn test_level_one_layout() {
        let layout = build(1, Difficulty::Normal, 7);
        // spawn + 10 + castle
        assert_eq!(layout.platforms.len(), 12);
        assert_eq!(layout.platforms.iter().filter(|p| p.is_spawn).count(), 1);
        assert_eq!(layout.platforms.iter().filter(|p| p.is_final).count(), 1);

        let positions: HashSet<(i32, i32)> = layout
            .platforms
            .iter()
            .map(|p| (p.pos.x as i32, p.pos.y as i32))
            .collect();
        assert_eq!(positions.len(), layout.platforms.len());
    }

    #[test]
    fn test_spawn_and_castle_positions() {
        let layout = build(1, Difficulty::Normal, 3);
        let spawn = layout.spawn_platform().unwrap();
        assert_eq!(spawn.pos, SPAWN_POS);
        assert_eq!(spawn.width, SPAWN_PLATFORM_WIDTH);

        let castle = layout.final_platform().unwrap();
        assert_eq!(castle.width, CASTLE_PLATFORM_WIDTH);
        // 10 gaps, two of them stretched, plus the castle gap
        let expected = 8.0 * 80.0 + 2.0 * 120.0 + CASTLE_GAP;
        assert!((layout.height - expected).abs() < 1e-3);
        assert_eq!(layout.flag.pos.y, castle.top());
        assert_eq!(layout.flag.pos.x, castle.pos.x - FLAG_OFFSET_X);
    }

    #[test]
    fn test_widths_narrow_toward_the_top() {
        let layout = build(3, Difficulty::Normal, 11);
        let normal: Vec<&Platform> = layout
            .platforms
            .iter()
            .filter(|p| !p.is_spawn && !p.is_final)
            .collect();
        assert!(normal.first().unwrap().width >= 160.0);
        assert!(normal.last().unwrap().width <= 160.0);
    }

    #[test]
    fn test_moving_platforms_stay_on_screen() {
        for seed in 0..20 {
            let layout = build(3, Difficulty::Hard, seed);
            for p in &layout.platforms {
                if let crate::sim::platform::PlatformKind::Moving { origin_x, range, .. } = p.kind {
                    assert!(origin_x - range - p.width / 2.0 >= -1e-3);
                    assert!(origin_x + range + p.width / 2.0 <= SCREEN_WIDTH + 1e-3);
                }
            }
        }
    }

    #[test]
    fn test_fixed_powerups_always_present() {
        let config = DifficultyConfig::for_difficulty(Difficulty::Hard);
        let mut level = LevelConfig::for_level(1, &config);
        level.powerups = 0;
        let mut ids = EntityIds::default();
        let layout = generate(&level, &config, &mut ids, &mut Pcg32::seed_from_u64(1));
        assert_eq!(layout.powerups.len(), 2);
        assert_eq!(layout.powerups[0].kind, PowerUpKind::Shield);
        assert_eq!(layout.powerups[1].kind, PowerUpKind::Speed);
    }

    #[test]
    fn test_extra_powerups_avoid_spawn_and_castle() {
        let layout = build(3, Difficulty::Easy, 5);
        let castle_top = layout.final_platform().unwrap().top();
        for p in layout.powerups.iter().skip(2) {
            assert!(p.pos.y > castle_top);
            assert!(p.pos.y < SPAWN_POS.y - PLATFORM_VERTICAL_SPACING);
        }
        // easy doubles the power-up count
        assert_eq!(layout.powerups.len(), 12);
    }

    #[test]
    fn test_rocks_start_dormant_and_strikes_are_not_placed() {
        let layout = build(3, Difficulty::Normal, 9);
        let rocks: Vec<&Enemy> = layout
            .enemies
            .iter()
            .filter(|e| e.tag() == EnemyTag::FallingHazard)
            .collect();
        assert!(!rocks.is_empty());
        for rock in rocks {
            assert!(matches!(&rock.behavior, Behavior::FallingHazard(r) if r.dormant));
        }
        assert!(layout.enemies.iter().all(|e| e.tag() != EnemyTag::TransientStrike));
    }

    #[test]
    fn test_surveillance_units_from_level_two() {
        let count = |level, difficulty| {
            build(level, difficulty, 2)
                .enemies
                .iter()
                .filter(|e| e.tag() == EnemyTag::SurveillanceUnit)
                .count()
        };
        assert_eq!(count(1, Difficulty::Normal), 0);
        assert_eq!(count(2, Difficulty::Normal), 2);
        assert_eq!(count(2, Difficulty::Easy), 1);
        assert_eq!(count(3, Difficulty::Hard), 4);
    }

    #[test]
    fn test_too_few_platforms_skips_categories() {
        let config = DifficultyConfig::default();
        let mut level = LevelConfig::for_level(3, &config);
        level.platforms = 1;
        let mut ids = EntityIds::default();
        let layout = generate(&level, &config, &mut ids, &mut Pcg32::seed_from_u64(4));
        assert_eq!(layout.platforms.len(), 3);
        assert!(layout.enemies.iter().all(|e| e.tag() != EnemyTag::PatrolFlyer));
        assert!(layout.enemies.iter().all(|e| e.tag() != EnemyTag::RotatingHazard));
        assert!(is_climbable(&layout.platforms));
    }

    #[test]
    fn test_enforce_single_final_adds_fallback() {
        let mut ids = EntityIds::default();
        let mut platforms = vec![
            Platform::spawn(ids.next(), SPAWN_POS),
            Platform::new(ids.next(), SPAWN_POS - Vec2::new(0.0, 80.0), 120.0),
        ];
        assert!(enforce_single_final(&mut platforms, &mut ids));
        assert_eq!(platforms.iter().filter(|p| p.is_final).count(), 1);
        assert!(is_climbable(&platforms));
    }

    #[test]
    fn test_enforce_single_final_keeps_highest() {
        let mut ids = EntityIds::default();
        let mut platforms = vec![
            Platform::spawn(ids.next(), SPAWN_POS),
            Platform::castle(ids.next(), SPAWN_POS - Vec2::new(0.0, 80.0)),
            Platform::castle(ids.next(), SPAWN_POS - Vec2::new(0.0, 160.0)),
        ];
        assert!(!enforce_single_final(&mut platforms, &mut ids));
        let finals: Vec<&Platform> = platforms.iter().filter(|p| p.is_final).collect();
        assert_eq!(finals.len(), 1);
        assert_eq!(finals[0].pos.y, SPAWN_POS.y - 160.0);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = build(2, Difficulty::Normal, 42);
        let b = build(2, Difficulty::Normal, 42);
        let pos = |l: &Layout| l.platforms.iter().map(|p| p.pos).collect::<Vec<_>>();
        assert_eq!(pos(&a), pos(&b));
        assert_eq!(a.enemies.len(), b.enemies.len());
    }

    proptest! {
        #[test]
        fn prop_every_level_is_completable(
            seed in any::<u64>(),
            level in 1u32..=3,
            difficulty in prop::sample::select(Difficulty::ALL.to_vec()),
        ) {
            let layout = build(level, difficulty, seed);
            prop_assert_eq!(layout.platforms.iter().filter(|p| p.is_final).count(), 1);
            prop_assert_eq!(layout.platforms.iter().filter(|p| p.is_spawn).count(), 1);
            prop_assert!(is_climbable(&layout.platforms));
        }
    }
}
