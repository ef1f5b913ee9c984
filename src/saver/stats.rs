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

//! Save and restore the player statistics.
//!
//! The saved object is a serialization of the [`GameStats`] object in JSON format by using
//! [`serde`].
//! Reading the statistics never fails: a missing or invalid record is replaced by the default
//! statistics.

use chrono::Utc;
use log::{debug, warn};

use super::store::{KeyValueStore, Result};
use crate::config::STORAGE_KEY;
use crate::stats::GameStats;

/// Object to save and restore the player statistics.
#[derive(Debug)]
pub struct SaverStats<S: KeyValueStore> {
    store: S,

    /// Key of the record in the store.
    key: String,
}

impl<S: KeyValueStore> SaverStats<S> {
    /// Create a [`SaverStats`] object that uses the default storage key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    /// Create a [`SaverStats`] object that uses the given storage key.
    pub fn with_key(store: S, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
        }
    }

    /// Return a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Retrieve the [`GameStats`] object.
    ///
    /// Return None if no statistics have been saved yet.
    pub fn load(&self) -> Result<Option<GameStats>> {
        match self.store.get(&self.key)? {
            Some(s) => Ok(Some(serde_json::from_str(&s)?)),
            None => Ok(None),
        }
    }

    /// Return the saved statistics, or the default statistics if they cannot be read.
    pub fn get_stats(&self) -> GameStats {
        match self.load() {
            Ok(Some(stats)) => stats,
            Ok(None) => GameStats::default(),
            Err(e) => {
                warn!("Error loading the statistics: {e}");
                GameStats::default()
            }
        }
    }

    /// Save the provided [`GameStats`] object. Return false if the statistics cannot be saved.
    pub fn save_stats(&mut self, stats: &GameStats) -> bool {
        let res: Result<()> = serde_json::to_string(stats)
            .map_err(Into::into)
            .and_then(|s| self.store.set(&self.key, &s));
        match res {
            Ok(()) => true,
            Err(e) => {
                warn!("Error saving the statistics: {e}");
                false
            }
        }
    }

    /// Record a level completion and return the updated statistics.
    ///
    /// `time` is the completion time in seconds.
    pub fn record_level_completion(&mut self, level: u32, time: f64, attempts: u32) -> GameStats {
        let mut stats: GameStats = self.get_stats();

        if stats.record_completion(level, time, attempts, Utc::now().timestamp_millis()) {
            debug!("New best time for level {level}: {time:.1}s");
        }
        self.save_stats(&stats);
        stats
    }

    /// Raise the best level. Return false if the level is not higher than the saved one.
    pub fn update_best_level(&mut self, level: u32) -> bool {
        let mut stats: GameStats = self.get_stats();

        if stats.raise_best_level(level) {
            self.save_stats(&stats);
            return true;
        }
        false
    }

    /// Return the best completion time for the level, in seconds.
    pub fn get_best_time(&self, level: u32) -> Option<f64> {
        self.get_stats().best_time(level)
    }

    /// Whether the player can start the given level.
    pub fn is_level_unlocked(&self, level: u32) -> bool {
        self.get_stats().is_level_unlocked(level)
    }

    /// Count a played game that was not won.
    pub fn record_game_played(&mut self) {
        let mut stats: GameStats = self.get_stats();

        stats.total_games_played += 1;
        self.save_stats(&stats);
    }

    /// Delete the saved statistics. Return false if they cannot be deleted.
    pub fn reset_data(&mut self) -> bool {
        match self.store.remove(&self.key) {
            Ok(()) => true,
            Err(e) => {
                warn!("Error resetting the statistics: {e}");
                false
            }
        }
    }
}
