//! High score leaderboard system
//!
//! One top-10 board per difficulty, persisted as a single JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PersistError;
use crate::persistence;
use crate::tuning::Difficulty;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;
/// Longest name kept on the board (characters)
pub const MAX_NAME_LEN: usize = 12;
/// Used when the player leaves the name blank
pub const DEFAULT_NAME: &str = "PLAYER";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    /// Player's score
    pub score: u64,
    /// Level reached
    pub level: u32,
    /// Unix timestamp (s) when achieved
    pub timestamp: u64,
}

impl HighScoreEntry {
    pub fn date(&self) -> String {
        format_date(self.timestamp)
    }
}

/// Trimmed, upper-cased, at most `MAX_NAME_LEN` characters
pub fn sanitize_name(name: &str) -> String {
    let name: String = name.trim().chars().take(MAX_NAME_LEN).collect();
    if name.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        name.to_uppercase()
    }
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, name: &str, score: u64, level: u32, timestamp: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            name: sanitize_name(name),
            score,
            level,
            timestamp,
        };

        // Ties keep the older entry first
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

/// The per-difficulty boards
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Leaderboards {
    pub easy: HighScores,
    pub normal: HighScores,
    pub hard: HighScores,
}

impl Leaderboards {
    pub fn board(&self, difficulty: Difficulty) -> &HighScores {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Normal => &self.normal,
            Difficulty::Hard => &self.hard,
        }
    }

    pub fn board_mut(&mut self, difficulty: Difficulty) -> &mut HighScores {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Normal => &mut self.normal,
            Difficulty::Hard => &mut self.hard,
        }
    }

    /// Record a finished run. Returns the rank if it made the board.
    pub fn record(
        &mut self,
        difficulty: Difficulty,
        name: &str,
        score: u64,
        level: u32,
        timestamp: u64,
    ) -> Option<usize> {
        let rank = self.board_mut(difficulty).add_score(name, score, level, timestamp);
        if let Some(rank) = rank {
            log::info!("New {difficulty} high score #{rank}: {score}");
        }
        rank
    }

    /// Load all boards; a missing file starts fresh
    pub fn load(path: &Path) -> Result<Self, PersistError> {
        match persistence::read_json::<Self>(path)? {
            Some(mut boards) => {
                for difficulty in Difficulty::ALL {
                    let board = boards.board_mut(difficulty);
                    board.entries.sort_by(|a, b| b.score.cmp(&a.score));
                    board.entries.truncate(MAX_HIGH_SCORES);
                }
                log::info!(
                    "Loaded high scores ({} / {} / {})",
                    boards.easy.entries.len(),
                    boards.normal.entries.len(),
                    boards.hard.entries.len()
                );
                Ok(boards)
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        persistence::write_json(path, self)
    }
}

/// Format a unix timestamp (s) as `YYYY-MM-DD` (UTC)
pub fn format_date(timestamp: u64) -> String {
    // Howard Hinnant's `civil_from_days` (proleptic Gregorian, 400-year eras)
    let days = (timestamp / 86_400) as i64 + 719_468;
    let era = days.div_euclid(146_097);
    let doe = days.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    format!("{year:04}-{month:02}-{day:02}")
}
