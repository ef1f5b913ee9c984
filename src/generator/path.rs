/*
path.rs

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

//! Path the player must reproduce.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::cell::Position;

/// Path object.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(from = "Vec<Position>", into = "Vec<Position>")]
pub struct Path {
    /// Path as an ordered list of positions.
    path: Vec<Position>,

    /// Stores the visited status of the positions.
    /// Instead of looking for the position in the [`Path::path`] vector, this
    /// [`std::collections::HashSet`] speeds up the lookup.
    visited: HashSet<Position>,
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl From<Vec<Position>> for Path {
    fn from(path: Vec<Position>) -> Self {
        let visited: HashSet<Position> = path.iter().copied().collect();
        Self { path, visited }
    }
}

impl From<Path> for Vec<Position> {
    fn from(path: Path) -> Self {
        path.path
    }
}

impl Path {
    /// Create a [`Path`] object.
    pub fn new(capacity: usize) -> Self {
        Self {
            path: Vec::with_capacity(capacity),
            visited: HashSet::with_capacity(capacity),
        }
    }

    /// Add a position to the end of the path.
    pub fn push(&mut self, position: Position) {
        self.path.push(position);
        self.visited.insert(position);
    }

    /// Add a position just before the last position of the path.
    ///
    /// The last position stays the last one, which keeps the finish cell at the end of the path
    /// when detours are added. On an empty path, the position is pushed.
    pub fn insert_before_last(&mut self, position: Position) {
        let index: usize = self.path.len().saturating_sub(1);
        self.path.insert(index, position);
        self.visited.insert(position);
    }

    /// Get the number of positions in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Whether the path has no positions.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Whether the position is in the path or not.
    pub fn contains(&self, position: Position) -> bool {
        self.visited.contains(&position)
    }

    /// Return a reference to the path vector.
    pub fn get(&self) -> &[Position] {
        &self.path
    }

    /// Return the position at the given index.
    pub fn get_at(&self, index: usize) -> Option<Position> {
        self.path.get(index).copied()
    }

    /// Return the index of the given position in the path.
    pub fn position_index(&self, position: Position) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        self.path.iter().position(|p| *p == position)
    }

    /// Return the first position in the path.
    pub fn get_first(&self) -> Option<Position> {
        self.path.first().copied()
    }

    /// Return the last position in the path.
    pub fn get_last(&self) -> Option<Position> {
        self.path.last().copied()
    }
}
