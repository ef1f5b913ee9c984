/*
random_path.rs

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

//! Generate a random walk from the start cell to the finish cell.

use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::cell::{Direction, Position};
use super::path;

/// Probability, at each step, of also allowing moves that do not get closer to the finish.
const DETOUR_PROBABILITY: f64 = 0.3;

/// The walk gives up after `size * size * STEPS_PER_CELL` steps.
const STEPS_PER_CELL: usize = 16;

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum RandomPathError {
    /// No move available from the current position.
    NoMove,

    /// The walk did not reach the finish before the step limit.
    TooManySteps,

    /// The walk visited more cells than the path can hold.
    TooLong,
}

/// [`RandomPath`] object.
pub struct RandomPath {
    /// Number of rows and columns of the grid.
    pub size: usize,

    /// Starting cell.
    pub start: Position,

    /// Cell the walk must reach.
    pub finish: Position,

    /// Maximum number of distinct cells in the walk.
    pub max_length: usize,

    /// Number of steps it took to generate the last walk.
    pub iteration: usize,
}

impl RandomPath {
    /// Create the object for a `size` x `size` grid, walking from the top left corner to the
    /// bottom right corner.
    pub fn new(size: usize, max_length: usize) -> Self {
        let last: usize = size.saturating_sub(1);
        Self {
            size,
            start: Position::new(0, 0),
            finish: Position::new(last, last),
            max_length,
            iteration: 0,
        }
    }

    /// Generate and return a random walk.
    ///
    /// At each step, the candidate moves are the moves that reduce the distance to the finish
    /// cell. When `detours` is set, the walk also randomly allows all the moves that stay in the
    /// grid. A position already visited is not added twice to the path.
    ///
    /// Without detours, the walk always reaches the finish cell in `2 * size - 1` cells.
    ///
    /// # Errors
    ///
    /// The method returns an error if the walk gets stuck, takes too many steps, or visits more
    /// cells than [`RandomPath::max_length`]. In that case the method can be retried.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        detours: bool,
    ) -> Result<path::Path, RandomPathError> {
        let max_steps: usize = self.size * self.size * STEPS_PER_CELL;
        let mut path: path::Path = path::Path::new(self.size * self.size);
        let mut current: Position = self.start;

        self.iteration = 0;
        path.push(current);

        while current != self.finish {
            if self.iteration >= max_steps {
                debug!("Walk abandoned after {} steps", self.iteration);
                return Err(RandomPathError::TooManySteps);
            }
            self.iteration += 1;

            let moves: Vec<Direction> = self.candidate_moves(current, rng, detours);
            let direction: Direction = match moves.choose(rng) {
                Some(d) => *d,
                None => {
                    debug!("No move from {current}");
                    return Err(RandomPathError::NoMove);
                }
            };
            current = self.clamped_step(current, direction);

            if !path.contains(current) {
                path.push(current);
                if path.len() > self.max_length {
                    debug!(
                        "Walk longer than {} cells after {} steps",
                        self.max_length, self.iteration
                    );
                    return Err(RandomPathError::TooLong);
                }
            }
        }

        debug!(
            "Walk of {} cells in {} steps",
            path.len(),
            self.iteration
        );
        Ok(path)
    }

    /// Return the moves allowed from the given position.
    fn candidate_moves<R: Rng + ?Sized>(
        &self,
        current: Position,
        rng: &mut R,
        detours: bool,
    ) -> Vec<Direction> {
        let mut moves: Vec<Direction> = Vec::with_capacity(8);

        // Moves that get closer to the finish
        if current.x < self.finish.x {
            moves.push(Direction::Right);
        }
        if current.x > self.finish.x {
            moves.push(Direction::Left);
        }
        if current.y < self.finish.y {
            moves.push(Direction::Down);
        }
        if current.y > self.finish.y {
            moves.push(Direction::Up);
        }

        // Some random moves for variety
        if detours && rng.random_bool(DETOUR_PROBABILITY) {
            for direction in Direction::ALL {
                if let Some(p) = current.step(direction)
                    && p.x < self.size
                    && p.y < self.size
                {
                    moves.push(direction);
                }
            }
        }
        moves
    }

    /// Move one step and keep the result inside the grid.
    fn clamped_step(&self, current: Position, direction: Direction) -> Position {
        let (dx, dy) = direction.offset();
        let last: usize = self.size.saturating_sub(1);
        Position::new(
            current.x.checked_add_signed(dx).unwrap_or(0).min(last),
            current.y.checked_add_signed(dy).unwrap_or(0).min(last),
        )
    }
}
