/*
cell.rs

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

//! Grid cells and positions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a cell in the grid. `x` is the column and `y` the row, both starting at 0.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    /// Create a [`Position`] object.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between the two positions.
    pub fn distance(&self, other: Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Move one step in the given direction.
    ///
    /// Return None if the step leaves the grid on the top or left side. The caller checks the
    /// bottom and right sides against the grid size.
    pub fn step(&self, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.offset();
        Some(Position {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned moves.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// The four directions, in the order neighbors are scanned.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Column and row offsets for the direction.
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}

/// Type of a cell.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    #[default]
    Path,
    Wall,
    Start,
    Finish,
}

impl CellKind {
    /// Character used to draw the cell in a terminal.
    pub fn symbol(&self) -> char {
        match self {
            CellKind::Path => '.',
            CellKind::Wall => '#',
            CellKind::Start => 'S',
            CellKind::Finish => 'F',
        }
    }
}

/// Cell of the maze grid.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Cell {
    pub position: Position,
    pub kind: CellKind,
}

impl Cell {
    /// Create a [`Cell`] object of kind [`CellKind::Path`].
    pub fn new(x: usize, y: usize) -> Self {
        Self {
            position: Position::new(x, y),
            kind: CellKind::Path,
        }
    }

    /// Whether the cell is a wall.
    pub fn is_wall(&self) -> bool {
        self.kind == CellKind::Wall
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_stops_at_top_left_border() {
        let origin = Position::new(0, 0);

        assert_eq!(origin.step(Direction::Up), None);
        assert_eq!(origin.step(Direction::Left), None);
        assert_eq!(origin.step(Direction::Right), Some(Position::new(1, 0)));
        assert_eq!(origin.step(Direction::Down), Some(Position::new(0, 1)));
    }

    #[test]
    fn distance_is_manhattan() {
        assert_eq!(Position::new(0, 0).distance(Position::new(3, 3)), 6);
        assert_eq!(Position::new(3, 1).distance(Position::new(1, 2)), 3);
    }
}
