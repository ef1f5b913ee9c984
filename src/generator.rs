/*
generator.rs

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

//! Generate random mazes.
//!
//! A maze is represented by a [`maze::Maze`] object: a square grid of [`cell::Cell`] objects and
//! the [`path::Path`] that the player must memorize and reproduce.
//!
//! You create a maze by creating a [`maze::MazeGenerator`] object and by using its
//! [`maze::MazeGenerator::generate`] method. Generation goes through three steps:
//!
//! * A random walk from the top left corner to the bottom right corner, represented by a
//!   [`random_path::RandomPath`] object.
//!   The walk mostly moves toward the finish cell, with random detours.
//!   If the walk takes too long or visits too many cells, then it is retried, and after several
//!   attempts a walk without detours is used.
//!
//! * Walls are randomly added on the cells that are not on the walk.
//!   The wall density increases with the level.
//!
//! * The path is extended with free cells next to it until it reaches a length that depends on
//!   the grid size and the level.
//!   The extra cells are inserted before the finish cell.
//!
//! The random source is provided by the caller, so that a seeded generator produces the same
//! maze.

pub mod cell;
pub mod maze;
pub mod path;
pub mod random_path;
