/*
presenter.rs

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

//! Render callbacks.
//!
//! The [`crate::game::Session`] object owns the game rules but no rendering. It calls the
//! methods of a [`Presenter`] object to update the display.

use std::time::Duration;

use crate::generator::cell::Position;
use crate::generator::maze::Maze;
use crate::stats::GameStats;

/// Message to display above the maze.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    /// The maze is displayed, the preview is about to start.
    GetReady,

    /// The path is being highlighted.
    Memorize,

    /// The player must select the cells in order.
    YourTurn,

    /// The player selected a wrong cell; the solution is being revealed.
    Failed,

    /// The player gave up; the solution is being revealed.
    GaveUp,

    /// The player reproduced the whole path.
    Completed,
}

/// Marks on the cells that the player selected.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mark {
    Correct,
    Wrong,
}

/// Result of a completed level.
#[derive(Debug, Clone, PartialEq)]
pub struct WinSummary {
    pub level: u32,

    /// Time between the end of the preview and the last selection.
    pub time: Duration,

    /// Always 100: a level is only completed when every selection is correct.
    pub accuracy: u8,

    /// Number of attempts it took to complete the level.
    pub attempts: u32,

    /// Best completion time for the level, in seconds, this one included.
    pub best_time: Option<f64>,

    /// Whether this completion is the best time for the level.
    pub new_best: bool,
}

/// Result of a failed level.
#[derive(Debug, Clone, PartialEq)]
pub struct GameOverSummary {
    pub level: u32,

    /// Number of cells correctly selected before the failure.
    pub progress: usize,

    /// Number of cells in the path.
    pub total: usize,

    pub attempts: u32,
}

/// Display callbacks.
pub trait Presenter {
    /// Display the menu with the player statistics.
    fn show_menu(&mut self, _stats: &GameStats) {}

    /// Display a new maze. No cell is highlighted or marked.
    fn show_maze(&mut self, maze: &Maze, level: u32);

    /// Display the status message.
    fn show_status(&mut self, _status: Status) {}

    /// Highlight or clear the highlight of a cell.
    fn highlight_cell(&mut self, position: Position, on: bool);

    /// Mark a cell that the player selected.
    fn mark_cell(&mut self, position: Position, mark: Mark);

    /// Display the number of cells correctly selected so far.
    fn update_progress(&mut self, _current: usize, _total: usize) {}

    /// Display the summary of a completed level.
    fn show_win(&mut self, summary: &WinSummary);

    /// Display the summary of a failed level.
    fn show_game_over(&mut self, summary: &GameOverSummary);
}
