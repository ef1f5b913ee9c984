/*
maze.rs

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

//! Build a maze: grid, walls, and the path to memorize.

use log::{debug, warn};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cell::{Cell, CellKind, Direction, Position};
use super::path::Path;
use super::random_path::{RandomPath, RandomPathError};

/// Number of random walks to try before falling back to a walk without detours.
pub const MAX_WALK_ATTEMPTS: usize = 8;

/// Largest grid used by the game.
pub const MAX_SIZE: usize = 8;

/// Smallest grid used by the game.
pub const MIN_SIZE: usize = 4;

/// Type of errors.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("Maze size must be at least 1")]
    InvalidSize,
}

/// Return the grid size for the given level: 4x4 for the first levels, up to 8x8.
pub fn size_for_level(level: u32) -> usize {
    (MIN_SIZE + (level / 2) as usize).min(MAX_SIZE)
}

/// Wall density for the given level. Increases with the level, up to 30%.
pub fn wall_density(level: u32) -> f64 {
    (f64::from(level) * 0.05).min(0.3)
}

/// Maximum path length for a grid: 70% of the cells, but never shorter than the shortest route
/// from the start to the finish.
pub fn max_path_length(size: usize) -> usize {
    let cap: usize = size * size * 7 / 10;
    cap.max((2 * size).saturating_sub(1))
}

/// Length the path is extended to.
pub fn target_path_length(size: usize, level: u32) -> usize {
    (size * 2 + level as usize).min(size * size * 7 / 10)
}

/// Generated maze.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Maze {
    /// Cells, indexed by `grid[y][x]`.
    grid: Vec<Vec<Cell>>,

    /// Cells to select, in order.
    path: Path,

    pub start: Position,
    pub finish: Position,
    pub size: usize,
}

impl Maze {
    /// Return the cell at the given position, or None if the position is outside the grid.
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.grid.get(position.y)?.get(position.x)
    }

    /// Return the rows of the grid.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.grid
    }

    /// Return the path that the player must reproduce.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the position is inside the grid.
    pub fn is_valid_position(&self, position: Position) -> bool {
        position.x < self.size && position.y < self.size
    }

    /// Return the in-grid neighbors of the given position.
    pub fn get_adjacent(&self, position: Position) -> Vec<Position> {
        adjacent(position, self.size)
    }

    /// Whether no cell of the path is a wall.
    pub fn is_path_valid(&self) -> bool {
        self.path
            .get()
            .iter()
            .all(|p| self.cell(*p).is_some_and(|c| !c.is_wall()))
    }

    /// Number of cells of the given kind.
    pub fn count(&self, kind: CellKind) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|c| c.kind == kind)
            .count()
    }
}

/// Return the in-grid neighbors of the given position.
fn adjacent(position: Position, size: usize) -> Vec<Position> {
    Direction::ALL
        .iter()
        .filter_map(|d| position.step(*d))
        .filter(|p| p.x < size && p.y < size)
        .collect()
}

/// Maze generator.
#[derive(Debug, Clone)]
pub struct MazeGenerator {
    /// Number of random walks to try before using a walk without detours.
    walk_attempts: usize,

    /// Number of walks that were rejected during the last generation.
    pub rejected_walks: usize,

    /// Whether the last generation used the walk without detours.
    pub used_fallback: bool,
}

impl Default for MazeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MazeGenerator {
    /// Create a [`MazeGenerator`] object.
    pub fn new() -> Self {
        Self::with_attempts(MAX_WALK_ATTEMPTS)
    }

    /// Create a [`MazeGenerator`] object that tries `walk_attempts` random walks.
    pub fn with_attempts(walk_attempts: usize) -> Self {
        Self {
            walk_attempts,
            rejected_walks: 0,
            used_fallback: false,
        }
    }

    /// Generate a maze for the given grid size and level.
    ///
    /// The path starts at the top left corner and ends at the bottom right corner. It never
    /// crosses a wall.
    ///
    /// # Errors
    ///
    /// Return [`MazeError::InvalidSize`] when `size` is 0.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        size: usize,
        level: u32,
        rng: &mut R,
    ) -> Result<Maze, MazeError> {
        if size == 0 {
            return Err(MazeError::InvalidSize);
        }
        debug!("Generating a {size}x{size} maze for level {level}");

        let mut grid: Vec<Vec<Cell>> = Self::create_empty(size);
        let main_path: Path = self.main_path(size, rng);

        let start: Position = Position::new(0, 0);
        let finish: Position = Position::new(size - 1, size - 1);
        grid[finish.y][finish.x].kind = CellKind::Finish;
        grid[start.y][start.x].kind = CellKind::Start;

        Self::add_walls(&mut grid, &main_path, level, rng);

        let target: usize = target_path_length(size, level);
        let path: Path = Self::extend_path(&grid, main_path, target, rng);
        debug!(
            "Path of {} cells (target {target}): {:?}",
            path.len(),
            path.get()
        );

        Ok(Maze {
            grid,
            path,
            start,
            finish,
            size,
        })
    }

    /// Create a grid where all the cells are [`CellKind::Path`].
    fn create_empty(size: usize) -> Vec<Vec<Cell>> {
        (0..size)
            .map(|y| (0..size).map(|x| Cell::new(x, y)).collect())
            .collect()
    }

    /// Walk from the start to the finish. Retry when the walk is rejected, and use a walk without
    /// detours when all the attempts fail.
    fn main_path<R: Rng + ?Sized>(&mut self, size: usize, rng: &mut R) -> Path {
        let mut walk: RandomPath = RandomPath::new(size, max_path_length(size));

        self.rejected_walks = 0;
        self.used_fallback = false;
        for _ in 0..self.walk_attempts {
            match walk.generate(rng, true) {
                Ok(path) => return path,
                Err(e) => {
                    self.rejected_walks += 1;
                    debug!("Walk rejected: {e:?}");
                }
            }
        }

        warn!(
            "No valid random walk after {} attempts, using a direct walk",
            self.walk_attempts
        );
        self.used_fallback = true;
        // A walk without detours only takes moves toward the finish and fits the length limit
        walk.generate(rng, false).unwrap_or_else(|e: RandomPathError| {
            warn!("Direct walk failed ({e:?}), following the grid border");
            let mut path: Path = Path::new(2 * size);
            for x in 0..size {
                path.push(Position::new(x, 0));
            }
            for y in 1..size {
                path.push(Position::new(size - 1, y));
            }
            path
        })
    }

    /// Turn random cells that are not on the path into walls.
    fn add_walls<R: Rng + ?Sized>(grid: &mut [Vec<Cell>], path: &Path, level: u32, rng: &mut R) {
        let density: f64 = wall_density(level);
        let mut walls: usize = 0;

        for cell in grid.iter_mut().flatten() {
            if path.contains(cell.position) {
                continue;
            }
            if rng.random_bool(density) {
                cell.kind = CellKind::Wall;
                walls += 1;
            }
        }
        debug!("{walls} walls added (density {density})");
    }

    /// Add detours to the path until it reaches the target length, or until there are no more
    /// free cells next to the path.
    ///
    /// The detours are inserted before the finish cell, which stays the last cell of the path.
    fn extend_path<R: Rng + ?Sized>(
        grid: &[Vec<Cell>],
        mut path: Path,
        target: usize,
        rng: &mut R,
    ) -> Path {
        let size: usize = grid.len();

        while path.len() < target {
            // A cell next to several path cells gets several chances to be selected
            let candidates: Vec<Position> = path
                .get()
                .iter()
                .flat_map(|p| adjacent(*p, size))
                .filter(|p| !path.contains(*p) && !grid[p.y][p.x].is_wall())
                .collect();

            match candidates.choose(rng) {
                Some(p) => path.insert_before_last(*p),
                None => {
                    debug!(
                        "No more free cells next to the path ({} of {target})",
                        path.len()
                    );
                    break;
                }
            }
        }
        path
    }
}
