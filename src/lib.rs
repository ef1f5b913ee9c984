/*
lib.rs

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

//! Memory Maze: memorize a path through a maze, then reproduce it.
//!
//! * [`generator`] builds random mazes and the path to memorize.
//! * [`game`] drives a game session: preview, player selections, win and game over.
//! * [`scheduler`] provides the cancellable timers of the session.
//! * [`stats`] and [`saver`] keep the player statistics between games.
//! * [`presenter`] is the interface between a session and its display.

pub mod config;
pub mod game;
pub mod generator;
pub mod presenter;
pub mod saver;
pub mod scheduler;
pub mod stats;
