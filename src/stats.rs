/*
stats.rs

Copyright 2025 Hervé Quatremain

This file is part of Memory Maze.

Memory Maze is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Memory Maze is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Memory Maze. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Player statistics.
//!
//! The main object, [`GameStats`], keeps the best level reached, the number of games, the
//! unlocked levels, and the best completion time for each level.
//! This object is saved when the player completes a level, and is restored when the game starts.
//! See the [`crate::saver::stats`] module that saves and restores the [`GameStats`] object.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Best completion of a level.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LevelTime {
    /// Completion time, in seconds.
    pub best_time: f64,

    /// Number of attempts it took to complete the level with that time.
    pub attempts: u32,

    /// Completion timestamp, in milliseconds since the Unix epoch.
    pub completed_at: i64,
}

/// Player statistics.
///
/// Fields missing from a saved record take their default values.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct GameStats {
    /// Highest level completed.
    pub best_level: u32,

    /// Number of completed levels.
    pub games_won: u32,

    /// Number of completed and failed levels.
    pub total_games_played: u32,

    /// Best completion for each level, indexed by a string in the format "level_<level>".
    pub level_times: HashMap<String, LevelTime>,

    /// Highest level the player can start.
    pub unlocked_level: u32,
}

impl Default for GameStats {
    fn default() -> Self {
        Self {
            best_level: 1,
            games_won: 0,
            total_games_played: 0,
            level_times: HashMap::new(),
            unlocked_level: 1,
        }
    }
}

impl GameStats {
    /// Return the string that is used as an index for the level times.
    fn level_key(level: u32) -> String {
        format!("level_{level}")
    }

    /// Record a level completion and return whether the time is a new best time for the level.
    ///
    /// `when` is the completion timestamp in milliseconds since the Unix epoch.
    pub fn record_completion(&mut self, level: u32, time: f64, attempts: u32, when: i64) -> bool {
        self.games_won += 1;
        self.total_games_played += 1;

        let key: String = Self::level_key(level);
        let new_best: bool = match self.level_times.get(&key) {
            Some(t) => time < t.best_time,
            None => true,
        };
        if new_best {
            self.level_times.insert(
                key,
                LevelTime {
                    best_time: time,
                    attempts,
                    completed_at: when,
                },
            );
        }

        self.best_level = self.best_level.max(level);
        self.unlocked_level = self.unlocked_level.max(level + 1);
        new_best
    }

    /// Raise the best level. Return false if the given level is not higher.
    pub fn raise_best_level(&mut self, level: u32) -> bool {
        if level <= self.best_level {
            return false;
        }
        self.best_level = level;
        self.unlocked_level = self.unlocked_level.max(level);
        true
    }

    /// Return the best completion time of the level, in seconds.
    pub fn best_time(&self, level: u32) -> Option<f64> {
        self.level_times
            .get(&Self::level_key(level))
            .map(|t| t.best_time)
    }

    /// Whether the player can start the given level.
    pub fn is_level_unlocked(&self, level: u32) -> bool {
        level <= self.unlocked_level
    }

    /// Return the level times sorted by level. Entries with an unexpected key are skipped.
    pub fn sorted_level_times(&self) -> Vec<(u32, LevelTime)> {
        let mut ret: Vec<(u32, LevelTime)> = self
            .level_times
            .iter()
            .filter_map(|(k, t)| {
                k.strip_prefix("level_")
                    .and_then(|l| l.parse::<u32>().ok())
                    .map(|l| (l, *t))
            })
            .collect();
        ret.sort_by_key(|(l, _)| *l);
        ret
    }
}
