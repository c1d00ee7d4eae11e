//! Simple climbing bot
//!
//! Picks the lowest platform above the last one landed on and steers
//! toward it: run to the near edge, jump once the gap is short enough,
//! spend extra jumps while falling short. Stateless, so it can drive any
//! `GameState` (demo runs, attract mode).

use super::platform::Platform;
use super::state::{GamePhase, GameState};
use super::tick::TickInput;
use crate::consts::PLAYER_HEIGHT;

/// Share of the jump apex the bot is willing to climb in one jump
const REACH_FACTOR: f32 = 0.9;
/// Edge-to-edge distance from which a running jump makes it (px)
const JUMP_GAP: f32 = 200.0;
/// Stop steering inside this distance of the target x (px)
const DEADZONE: f32 = 8.0;
/// Keep this far inside the current platform's edge (px)
const EDGE_MARGIN: f32 = 12.0;

/// The platform the bot is heading for, if any
pub fn target_platform(state: &GameState) -> Option<&Platform> {
    let standing_top = state.player.respawn_point.y + PLAYER_HEIGHT / 2.0;
    let reach = state.difficulty.jump_apex() * REACH_FACTOR;
    let x = state.player.pos.x;

    state
        .platforms
        .iter()
        .filter(|p| p.top() < standing_top - 1.0 && standing_top - p.top() <= reach)
        .min_by(|a, b| {
            a.top()
                .total_cmp(&b.top())
                .reverse()
                .then((a.pos.x - x).abs().total_cmp(&(b.pos.x - x).abs()))
        })
}

/// Input for the next tick
pub fn steer(state: &GameState) -> TickInput {
    match state.phase {
        GamePhase::LevelComplete => {
            return TickInput {
                advance: true,
                ..Default::default()
            };
        }
        GamePhase::Playing => {}
        _ => return TickInput::default(),
    }

    let player = &state.player;
    let target = target_platform(state);
    let goal_x = match target {
        Some(platform) => platform.pos.x,
        None => state.flag.pos.x,
    };

    let dx = goal_x - player.pos.x;
    let mut input = TickInput {
        left: dx < -DEADZONE,
        right: dx > DEADZONE,
        ..Default::default()
    };

    let Some(target) = target else {
        return input;
    };
    let gap = dx.abs() - target.width / 2.0;

    if player.on_ground {
        let ground = player
            .ground_platform
            .and_then(|id| state.platforms.iter().find(|p| p.id == id));
        let at_edge = ground.is_some_and(|g| {
            let hitbox = g.hitbox();
            if dx > 0.0 {
                player.pos.x >= hitbox.right() - EDGE_MARGIN
            } else {
                player.pos.x <= hitbox.left() + EDGE_MARGIN
            }
        });
        input.jump = gap < JUMP_GAP || at_edge;
    } else {
        let feet = player.hitbox().bottom();
        input.jump = player.vel.y > 0.0
            && feet > target.top()
            && player.jump_count < player.effective_max_jumps();
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::tick;
    use crate::tuning::{Difficulty, DifficultyConfig};
    use crate::consts::{MAX_LEVEL, SIM_DT};
    use glam::Vec2;

    /// Drive the bot with hazards stripped until the flag is reached.
    /// Returns the ticks taken, or `None` at the limit.
    fn climb_to_flag(state: &mut GameState, max_ticks: u32) -> Option<u32> {
        for ticks in 0..max_ticks {
            state.enemies.clear();
            state.powerups.clear();
            state.lava.pause();
            state.player.lives = state.player.lives.max(3);

            let input = steer(state);
            tick(state, &input, SIM_DT);
            assert_ne!(state.phase, GamePhase::GameOver);
            if state.phase == GamePhase::LevelComplete {
                return Some(ticks);
            }
        }
        None
    }

    #[test]
    fn test_advances_after_level_complete() {
        let mut state = GameState::new(1, DifficultyConfig::default());
        state.phase = GamePhase::LevelComplete;
        assert!(steer(&state).advance);
        state.phase = GamePhase::GameOver;
        let input = steer(&state);
        assert!(!input.advance && !input.jump && !input.left && !input.right);
    }

    #[test]
    fn test_targets_lowest_platform_above() {
        let state = GameState::new(4, DifficultyConfig::default());
        let target = target_platform(&state).unwrap();
        let spawn = state.platforms.iter().find(|p| p.is_spawn).unwrap();
        assert!(target.top() < spawn.top());
        let lowest_above = state
            .platforms
            .iter()
            .filter(|p| p.top() < spawn.top())
            .map(|p| p.top())
            .fold(f32::MIN, f32::max);
        assert_eq!(target.top(), lowest_above);
    }

    #[test]
    fn test_steers_toward_target() {
        let mut state = GameState::new(4, DifficultyConfig::default());
        state.platforms.retain(|p| p.is_spawn);
        let id = state.next_entity_id();
        state
            .platforms
            .push(Platform::new(id, Vec2::new(1000.0, 540.0), 150.0));
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.player.on_ground);

        let input = steer(&state);
        assert!(input.right && !input.left);
        // Still too far to jump from the middle of the spawn platform
        assert!(!input.jump);
    }

    #[test]
    fn test_climbs_from_spawn() {
        let mut state = GameState::new(8, DifficultyConfig::for_difficulty(Difficulty::Easy));
        let start_y = state.player.pos.y;
        for _ in 0..600 {
            let input = steer(&state);
            tick(&mut state, &input, SIM_DT);
        }
        assert!(state.player.stats.jumps > 0);
        assert!(state.player.stats.best_y < start_y - 100.0);
    }

    #[test]
    fn test_every_generated_level_can_be_finished() {
        for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            for level in 1..=MAX_LEVEL {
                let mut state = GameState::new(31, DifficultyConfig::for_difficulty(difficulty));
                state.build_level(level);
                let ticks = climb_to_flag(&mut state, 300 * 60);
                assert!(ticks.is_some(), "{difficulty} level {level} was not finished");
                assert!(state.flag.touched, "{difficulty} level {level}");
            }
        }
    }
}
