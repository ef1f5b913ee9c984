/*
config.rs

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

//! Application constants and timer settings.

use std::time::Duration;

pub const APPLICATION_NAME: &str = "memory-maze";

pub const COPYRIGHT_NOTICE: &str = "Copyright 2025 Hervé Quatremain
License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>.
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law.";

/// Key of the statistics record in the store.
pub const STORAGE_KEY: &str = "memoryMazeData";

/// Durations of the timed steps of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Delay between showing the maze and starting the preview ("get ready").
    pub start_delay: Duration,

    /// How long each path cell stays highlighted during the preview.
    pub highlight: Duration,

    /// Pause between two highlighted cells.
    pub highlight_gap: Duration,

    /// Delay between a wrong selection and the game over state.
    pub failure_delay: Duration,

    /// Delay between two cells when revealing the solution.
    pub reveal_step: Duration,

    /// Delay between the game over state and the game over summary.
    pub summary_delay: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            start_delay: Duration::from_millis(1000),
            highlight: Duration::from_millis(800),
            highlight_gap: Duration::from_millis(200),
            failure_delay: Duration::from_millis(500),
            reveal_step: Duration::from_millis(150),
            summary_delay: Duration::from_millis(2000),
        }
    }
}

impl Timings {
    /// Return the timings with every duration divided by `factor`.
    pub fn scaled_down(&self, factor: u32) -> Self {
        let factor: u32 = factor.max(1);
        Self {
            start_delay: self.start_delay / factor,
            highlight: self.highlight / factor,
            highlight_gap: self.highlight_gap / factor,
            failure_delay: self.failure_delay / factor,
            reveal_step: self.reveal_step / factor,
            summary_delay: self.summary_delay / factor,
        }
    }

    /// Duration of the whole preview of a path of `len` cells, start delay included.
    pub fn preview_duration(&self, len: usize) -> Duration {
        let len: u32 = u32::try_from(len).unwrap_or(u32::MAX);
        self.start_delay + (self.highlight + self.highlight_gap) * len
    }
}
