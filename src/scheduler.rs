/*
scheduler.rs

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

//! Cancellable timers for a single-threaded game loop.
//!
//! The [`Scheduler`] keeps a virtual clock that the caller moves forward with
//! [`Scheduler::poll`]. Timers are tagged with the epoch that was current when they were
//! scheduled. [`Scheduler::cancel_all`] starts a new epoch: the timers of the previous epochs are
//! dropped when they come due and never fire.

use log::debug;
use std::time::Duration;

/// Scheduled timer.
#[derive(Debug)]
struct Task<E> {
    /// Clock value when the timer fires.
    due: Duration,

    /// Epoch when the timer was scheduled.
    epoch: u64,

    /// Scheduling order, to fire timers with the same due time in order.
    sequence: u64,

    event: E,
}

/// Timer queue.
#[derive(Debug)]
pub struct Scheduler<E> {
    /// Virtual clock.
    now: Duration,

    /// Current epoch.
    epoch: u64,

    /// Next sequence number.
    sequence: u64,

    tasks: Vec<Task<E>>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    /// Create a [`Scheduler`] object with the clock at zero.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            epoch: 0,
            sequence: 0,
            tasks: Vec::new(),
        }
    }

    /// Return the current clock value.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Return the current epoch.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Fire `event` after `delay`.
    pub fn schedule(&mut self, delay: Duration, event: E) {
        self.tasks.push(Task {
            due: self.now + delay,
            epoch: self.epoch,
            sequence: self.sequence,
            event,
        });
        self.sequence += 1;
    }

    /// Cancel all the pending timers.
    pub fn cancel_all(&mut self) {
        self.epoch += 1;
        debug!("Timers cancelled, epoch {}", self.epoch);
    }

    /// Return the number of timers that can still fire.
    pub fn pending(&self) -> usize {
        self.tasks.iter().filter(|t| t.epoch == self.epoch).count()
    }

    /// Return the time until the next timer fires, or None if no timer is pending.
    pub fn next_delay(&self) -> Option<Duration> {
        self.tasks
            .iter()
            .filter(|t| t.epoch == self.epoch)
            .map(|t| t.due.saturating_sub(self.now))
            .min()
    }

    /// Return the next event due at or before `until` and move the clock to its due time.
    ///
    /// When no timer is due, the clock moves to `until` and None is returned. Call the method
    /// in a loop so that timers scheduled by the returned events are also processed.
    pub fn poll(&mut self, until: Duration) -> Option<E> {
        let epoch: u64 = self.epoch;
        self.tasks.retain(|t| t.epoch == epoch);

        let next: Option<usize> = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.sequence))
            .map(|(i, _)| i);

        match next {
            Some(i) => {
                let task: Task<E> = self.tasks.swap_remove(i);
                self.now = self.now.max(task.due);
                Some(task.event)
            }
            None => {
                self.now = self.now.max(until);
                None
            }
        }
    }
}
