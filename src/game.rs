/*
game.rs

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

//! Manage a game session.
//!
//! A [`Session`] object moves through the following states:
//!
//! ```text
//! Menu -> Preview -> Playing -> Win -----> Preview (replay or next level)
//!                           \-> GameOver -> Preview (retry)
//! ```
//!
//! `Win` and `GameOver` can also go back to `Menu`.
//!
//! Starting a level generates a new maze and schedules the preview: after a short delay, the
//! cells of the path are highlighted one at a time. When the preview ends, the player selects the
//! cells in the same order. A wrong selection reveals the solution and ends the attempt.
//!
//! Timers run on the virtual clock of a [`Scheduler`] object that the caller moves forward with
//! [`Session::advance`]. Starting a level or going back to the menu cancels all the pending
//! timers, so a preview that is still running never highlights cells of the next maze.

use log::{debug, info};
use rand::Rng;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::config::Timings;
use crate::generator::cell::{Cell, Position};
use crate::generator::maze::{self, Maze, MazeError, MazeGenerator};
use crate::presenter::{GameOverSummary, Mark, Presenter, Status, WinSummary};
use crate::saver::stats::SaverStats;
use crate::saver::store::KeyValueStore;
use crate::scheduler::Scheduler;
use crate::stats::GameStats;

/// Session states.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameState {
    Menu,
    Preview,
    Playing,
    Win,
    GameOver,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameState::Menu => write!(f, "menu"),
            GameState::Preview => write!(f, "preview"),
            GameState::Playing => write!(f, "playing"),
            GameState::Win => write!(f, "win"),
            GameState::GameOver => write!(f, "game over"),
        }
    }
}

/// Type of errors.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Levels start at 1")]
    InvalidLevel,

    #[error("Operation not available in the {0} state")]
    InvalidState(GameState),

    #[error(transparent)]
    Maze(#[from] MazeError),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Result of a cell selection.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The session does not accept selections (not playing, or the attempt already failed).
    Ignored,

    /// The position is outside the grid.
    OutOfBounds,

    /// Walls cannot be selected.
    Wall,

    /// The cell is the next cell of the path.
    Correct { progress: usize },

    /// The cell is the last cell of the path: the level is completed.
    Completed,

    /// The cell is not the next cell of the path: the attempt fails.
    Wrong,
}

/// Timer events.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum TimerEvent {
    /// End of the "get ready" delay.
    BeginPreview,

    /// Highlight the path cell at the given index, or end the preview after the last cell.
    Highlight(usize),

    /// Clear the highlight of the path cell at the given index.
    Unhighlight(usize),

    /// Highlight the path cell at the given index while revealing the solution.
    Reveal(usize),

    /// End of the delay that follows a failure.
    Fail,

    /// Display the game over summary.
    ShowSummary,
}

/// Manage a game session.
pub struct Session<P: Presenter, S: KeyValueStore, R: Rng> {
    generator: MazeGenerator,
    saver: SaverStats<S>,
    presenter: P,
    rng: R,
    timings: Timings,
    scheduler: Scheduler<TimerEvent>,

    state: GameState,

    /// Current level, starting at 1.
    level: u32,

    /// Maze of the current attempt.
    maze: Option<Maze>,

    /// Cells correctly selected so far.
    selected: Vec<Position>,

    /// Clock value when the preview ended.
    start_time: Option<Duration>,

    /// Elapsed time, frozen when the attempt ends.
    final_time: Option<Duration>,

    /// Number of attempts for the current level. Reset when the level is completed.
    attempts: u32,

    /// Whether the current attempt failed and selections are no longer accepted.
    input_locked: bool,
}

impl<P: Presenter, S: KeyValueStore, R: Rng> Session<P, S, R> {
    /// Create a [`Session`] object in the [`GameState::Menu`] state.
    pub fn new(
        generator: MazeGenerator,
        saver: SaverStats<S>,
        presenter: P,
        rng: R,
        timings: Timings,
    ) -> Self {
        Self {
            generator,
            saver,
            presenter,
            rng,
            timings,
            scheduler: Scheduler::new(),
            state: GameState::Menu,
            level: 1,
            maze: None,
            selected: Vec::new(),
            start_time: None,
            final_time: None,
            attempts: 0,
            input_locked: false,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Return the maze of the current attempt.
    pub fn maze(&self) -> Option<&Maze> {
        self.maze.as_ref()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn saver(&self) -> &SaverStats<S> {
        &self.saver
    }

    /// Return the saved player statistics.
    pub fn stats(&self) -> GameStats {
        self.saver.get_stats()
    }

    /// Whether the session currently accepts cell selections.
    pub fn is_input_accepted(&self) -> bool {
        self.state == GameState::Playing && !self.input_locked
    }

    /// Return the number of cells correctly selected and the length of the path.
    pub fn get_progress(&self) -> (usize, usize) {
        let total: usize = self.maze.as_ref().map_or(0, |m| m.path().len());
        (self.selected.len(), total)
    }

    /// Return the time since the end of the preview, or None if the preview is not over.
    /// The time stops when the attempt ends.
    pub fn elapsed(&self) -> Option<Duration> {
        match self.final_time {
            Some(t) => Some(t),
            None => self
                .start_time
                .map(|s| self.scheduler.now().saturating_sub(s)),
        }
    }

    /// Return the time until the next timer fires.
    pub fn next_timer_delay(&self) -> Option<Duration> {
        self.scheduler.next_delay()
    }

    /// Move the clock forward and process the timers that come due.
    pub fn advance(&mut self, elapsed: Duration) {
        let until: Duration = self.scheduler.now() + elapsed;
        while let Some(event) = self.scheduler.poll(until) {
            self.handle(event);
        }
    }

    /// Start a new game from the first level.
    pub fn start_game(&mut self) -> Result<()> {
        self.attempts = 0;
        self.start_level(1)
    }

    /// Generate a maze for the given level and start the preview.
    ///
    /// # Errors
    ///
    /// Return [`SessionError::InvalidLevel`] for level 0.
    pub fn start_level(&mut self, level: u32) -> Result<()> {
        if level == 0 {
            return Err(SessionError::InvalidLevel);
        }
        self.scheduler.cancel_all();

        let size: usize = maze::size_for_level(level);
        let maze: Maze = self.generator.generate(size, level, &mut self.rng)?;

        self.level = level;
        self.attempts += 1;
        self.selected.clear();
        self.start_time = None;
        self.final_time = None;
        self.input_locked = false;
        self.state = GameState::Preview;
        info!(
            "Level {level}, attempt {}: {size}x{size} maze, path of {} cells",
            self.attempts,
            maze.path().len()
        );

        self.presenter.show_maze(&maze, level);
        self.presenter.show_status(Status::GetReady);
        self.presenter.update_progress(0, maze.path().len());
        self.maze = Some(maze);

        self.scheduler
            .schedule(self.timings.start_delay, TimerEvent::BeginPreview);
        Ok(())
    }

    /// Start the current level again with a new maze.
    pub fn restart_level(&mut self) -> Result<()> {
        if self.state == GameState::Menu {
            return Err(SessionError::InvalidState(self.state));
        }
        self.start_level(self.level)
    }

    /// Play the completed level again with a new maze.
    pub fn replay_level(&mut self) -> Result<()> {
        self.require(GameState::Win)?;
        self.start_level(self.level)
    }

    /// Start the level that follows the completed level.
    pub fn next_level(&mut self) -> Result<()> {
        self.require(GameState::Win)?;
        self.start_level(self.level + 1)
    }

    /// Try the failed level again with a new maze.
    pub fn retry_level(&mut self) -> Result<()> {
        self.require(GameState::GameOver)?;
        self.start_level(self.level)
    }

    /// Cancel the level in progress, if any, and display the menu.
    pub fn back_to_menu(&mut self) {
        self.scheduler.cancel_all();
        self.state = GameState::Menu;
        self.input_locked = false;
        let stats: GameStats = self.saver.get_stats();
        self.presenter.show_menu(&stats);
    }

    /// Process the selection of the cell at the given coordinates.
    pub fn select_cell(&mut self, x: usize, y: usize) -> SelectOutcome {
        if !self.is_input_accepted() {
            return SelectOutcome::Ignored;
        }
        let position: Position = Position::new(x, y);
        let (cell, expected, total): (Cell, Option<Position>, usize) = match &self.maze {
            Some(m) => match m.cell(position) {
                Some(c) => (*c, m.path().get_at(self.selected.len()), m.path().len()),
                None => return SelectOutcome::OutOfBounds,
            },
            None => return SelectOutcome::Ignored,
        };
        if cell.is_wall() {
            debug!("Wall selected at {position}");
            return SelectOutcome::Wall;
        }

        if expected != Some(position) {
            debug!("Wrong cell {position}, expected {expected:?}");
            self.presenter.mark_cell(position, Mark::Wrong);
            self.fail(Status::Failed);
            return SelectOutcome::Wrong;
        }

        self.selected.push(position);
        self.presenter.mark_cell(position, Mark::Correct);
        self.presenter.update_progress(self.selected.len(), total);
        if self.selected.len() == total {
            self.complete_level();
            return SelectOutcome::Completed;
        }
        SelectOutcome::Correct {
            progress: self.selected.len(),
        }
    }

    /// Abandon the current attempt and reveal the solution.
    ///
    /// Return false if no attempt is in progress.
    pub fn give_up(&mut self) -> bool {
        match self.state {
            GameState::Preview | GameState::Playing if !self.input_locked => {
                info!("Level {} abandoned", self.level);
                self.scheduler.cancel_all();
                self.fail(Status::GaveUp);
                true
            }
            _ => false,
        }
    }

    fn require(&self, state: GameState) -> Result<()> {
        if self.state != state {
            return Err(SessionError::InvalidState(self.state));
        }
        Ok(())
    }

    /// Return the path cell at the given index.
    fn path_cell(&self, index: usize) -> Option<Position> {
        self.maze.as_ref().and_then(|m| m.path().get_at(index))
    }

    fn handle(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::BeginPreview => {
                self.presenter.show_status(Status::Memorize);
                self.handle(TimerEvent::Highlight(0));
            }
            TimerEvent::Highlight(i) => match self.path_cell(i) {
                Some(p) => {
                    self.presenter.highlight_cell(p, true);
                    self.scheduler
                        .schedule(self.timings.highlight, TimerEvent::Unhighlight(i));
                }
                None => self.end_preview(),
            },
            TimerEvent::Unhighlight(i) => {
                if let Some(p) = self.path_cell(i) {
                    self.presenter.highlight_cell(p, false);
                }
                self.scheduler
                    .schedule(self.timings.highlight_gap, TimerEvent::Highlight(i + 1));
            }
            TimerEvent::Reveal(i) => {
                if let Some(p) = self.path_cell(i) {
                    self.presenter.highlight_cell(p, true);
                    self.scheduler
                        .schedule(self.timings.reveal_step, TimerEvent::Reveal(i + 1));
                }
            }
            TimerEvent::Fail => {
                self.state = GameState::GameOver;
                self.saver.record_game_played();
                info!("Game over at level {}", self.level);
                self.scheduler
                    .schedule(self.timings.summary_delay, TimerEvent::ShowSummary);
            }
            TimerEvent::ShowSummary => {
                let (progress, total) = self.get_progress();
                self.presenter.show_game_over(&GameOverSummary {
                    level: self.level,
                    progress,
                    total,
                    attempts: self.attempts,
                });
            }
        }
    }

    fn end_preview(&mut self) {
        debug!("Preview done");
        self.state = GameState::Playing;
        self.start_time = Some(self.scheduler.now());
        self.presenter.show_status(Status::YourTurn);
    }

    /// Lock the input, stop the clock, reveal the solution, and schedule the game over.
    fn fail(&mut self, status: Status) {
        self.input_locked = true;
        self.final_time = self.elapsed();
        self.presenter.show_status(status);
        self.handle(TimerEvent::Reveal(0));
        self.scheduler
            .schedule(self.timings.failure_delay, TimerEvent::Fail);
    }

    fn complete_level(&mut self) {
        let time: Duration = self.elapsed().unwrap_or_default();
        self.final_time = Some(time);
        self.state = GameState::Win;

        let seconds: f64 = time.as_secs_f64();
        let previous_best: Option<f64> = self.saver.get_best_time(self.level);
        let stats: GameStats =
            self.saver
                .record_level_completion(self.level, seconds, self.attempts);
        info!(
            "Level {} completed in {seconds:.1}s after {} attempts",
            self.level, self.attempts
        );

        let summary: WinSummary = WinSummary {
            level: self.level,
            time,
            accuracy: 100,
            attempts: self.attempts,
            best_time: stats.best_time(self.level),
            new_best: previous_best.is_none_or(|b| seconds < b),
        };
        self.presenter.show_status(Status::Completed);
        self.presenter.show_win(&summary);
        self.attempts = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::cell::CellKind;
    use crate::saver::store::MemoryStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Menu,
        Maze(u32),
        Status(Status),
        Highlight(Position, bool),
        Mark(Position, Mark),
        Progress(usize, usize),
        Win(WinSummary),
        GameOver(GameOverSummary),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Recorder {
        fn lit(&self, position: Position, on: bool) -> bool {
            self.calls.contains(&Call::Highlight(position, on))
        }

        fn game_over_shown(&self) -> bool {
            self.calls.iter().any(|c| matches!(c, Call::GameOver(_)))
        }

        fn highlighted(&self) -> Vec<Position> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Highlight(p, true) => Some(*p),
                    _ => None,
                })
                .collect()
        }
    }

    impl Presenter for Recorder {
        fn show_menu(&mut self, _stats: &GameStats) {
            self.calls.push(Call::Menu);
        }

        fn show_maze(&mut self, _maze: &Maze, level: u32) {
            self.calls.push(Call::Maze(level));
        }

        fn show_status(&mut self, status: Status) {
            self.calls.push(Call::Status(status));
        }

        fn highlight_cell(&mut self, position: Position, on: bool) {
            self.calls.push(Call::Highlight(position, on));
        }

        fn mark_cell(&mut self, position: Position, mark: Mark) {
            self.calls.push(Call::Mark(position, mark));
        }

        fn update_progress(&mut self, current: usize, total: usize) {
            self.calls.push(Call::Progress(current, total));
        }

        fn show_win(&mut self, summary: &WinSummary) {
            self.calls.push(Call::Win(summary.clone()));
        }

        fn show_game_over(&mut self, summary: &GameOverSummary) {
            self.calls.push(Call::GameOver(summary.clone()));
        }
    }

    type TestSession = Session<Recorder, MemoryStore, StdRng>;

    fn session(seed: u64) -> TestSession {
        Session::new(
            MazeGenerator::new(),
            SaverStats::new(MemoryStore::new()),
            Recorder::default(),
            StdRng::seed_from_u64(seed),
            Timings::default(),
        )
    }

    fn path_of(session: &TestSession) -> Vec<Position> {
        session.maze().unwrap().path().get().to_vec()
    }

    /// Start the level and run the whole preview.
    fn start_and_preview(session: &mut TestSession, level: u32) {
        session.start_level(level).unwrap();
        let len: usize = session.get_progress().1;
        session.advance(Timings::default().preview_duration(len));
        assert_eq!(session.state(), GameState::Playing);
    }

    /// Return a cell that is neither a wall nor on the path.
    fn off_path_cell(session: &TestSession) -> Option<Position> {
        let maze: &Maze = session.maze().unwrap();
        maze.rows()
            .iter()
            .flatten()
            .find(|c| !c.is_wall() && !maze.path().contains(c.position))
            .map(|c| c.position)
    }

    #[test]
    fn replaying_the_path_wins() {
        let mut session: TestSession = session(1);
        start_and_preview(&mut session, 1);
        let path: Vec<Position> = path_of(&session);

        for (i, p) in path.iter().enumerate() {
            let outcome: SelectOutcome = session.select_cell(p.x, p.y);
            if i + 1 == path.len() {
                assert_eq!(outcome, SelectOutcome::Completed);
            } else {
                assert_eq!(outcome, SelectOutcome::Correct { progress: i + 1 });
            }
        }

        assert_eq!(session.state(), GameState::Win);
        assert_eq!(session.get_progress(), (path.len(), path.len()));
        assert_eq!(session.stats().games_won, 1);
        assert_eq!(session.attempts(), 0);
        assert!(session.presenter().calls.iter().any(|c| matches!(
            c,
            Call::Win(WinSummary {
                level: 1,
                accuracy: 100,
                attempts: 1,
                new_best: true,
                ..
            })
        )));
    }

    #[test]
    fn preview_highlights_the_path_in_order() {
        let mut session: TestSession = session(2);
        start_and_preview(&mut session, 3);

        assert_eq!(session.presenter().highlighted(), path_of(&session));
        let statuses: Vec<Status> = session
            .presenter()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Status(s) => Some(*s),
                _ => None,
            })
            .collect();
        assert_eq!(
            statuses,
            vec![Status::GetReady, Status::Memorize, Status::YourTurn]
        );
    }

    #[test]
    fn highlights_do_not_overlap() {
        let mut session: TestSession = session(3);
        start_and_preview(&mut session, 1);

        let mut lit: usize = 0;
        for call in &session.presenter().calls {
            match call {
                Call::Highlight(_, true) => {
                    lit += 1;
                    assert_eq!(lit, 1);
                }
                Call::Highlight(_, false) => lit -= 1,
                _ => (),
            }
        }
        assert_eq!(lit, 0);
    }

    #[test]
    fn selections_during_preview_are_ignored() {
        let mut session: TestSession = session(4);
        session.start_level(1).unwrap();
        let first: Position = path_of(&session)[0];

        assert_eq!(session.select_cell(first.x, first.y), SelectOutcome::Ignored);
        session.advance(Duration::from_millis(1500));
        assert_eq!(session.state(), GameState::Preview);
        assert_eq!(session.select_cell(first.x, first.y), SelectOutcome::Ignored);
        assert_eq!(session.get_progress().0, 0);
        assert_eq!(session.elapsed(), None);
    }

    #[test]
    fn wall_and_out_of_bounds_selections_are_no_ops() {
        let mut wall: Option<(TestSession, Position)> = None;
        for seed in 0..50 {
            let mut s: TestSession = session(seed);
            start_and_preview(&mut s, 8);
            let found: Option<Position> = s
                .maze()
                .unwrap()
                .rows()
                .iter()
                .flatten()
                .find(|c| c.kind == CellKind::Wall)
                .map(|c| c.position);
            if let Some(p) = found {
                wall = Some((s, p));
                break;
            }
        }
        let (mut session, wall) = wall.expect("no maze with a wall");
        let first: Position = path_of(&session)[0];
        session.select_cell(first.x, first.y);

        assert_eq!(session.select_cell(wall.x, wall.y), SelectOutcome::Wall);
        assert_eq!(session.select_cell(99, 0), SelectOutcome::OutOfBounds);
        assert_eq!(session.state(), GameState::Playing);
        assert_eq!(session.get_progress().0, 1);
        session.advance(Duration::from_secs(10));
        assert_eq!(session.state(), GameState::Playing);
    }

    #[test]
    fn wrong_selection_ends_in_game_over() {
        let mut session: TestSession = session(5);
        start_and_preview(&mut session, 1);
        let wrong: Position = off_path_cell(&session).unwrap();
        let path: Vec<Position> = path_of(&session);

        assert_eq!(session.select_cell(wrong.x, wrong.y), SelectOutcome::Wrong);
        assert!(!session.is_input_accepted());
        assert_eq!(
            session.select_cell(path[0].x, path[0].y),
            SelectOutcome::Ignored
        );
        let frozen: Option<Duration> = session.elapsed();

        session.advance(Duration::from_millis(500));
        assert_eq!(session.state(), GameState::GameOver);
        assert_eq!(session.stats().total_games_played, 1);
        assert_eq!(session.stats().games_won, 0);
        assert_eq!(session.elapsed(), frozen);

        session.advance(Duration::from_secs(10));
        let calls: &[Call] = &session.presenter().calls;
        assert!(calls.contains(&Call::Mark(wrong, Mark::Wrong)));
        assert!(calls.contains(&Call::GameOver(GameOverSummary {
            level: 1,
            progress: 0,
            total: path.len(),
            attempts: 1,
        })));
        assert!(!calls.iter().any(|c| matches!(c, Call::Win(_))));

        // The solution is revealed in order after the preview highlights
        let highlighted: Vec<Position> = session.presenter().highlighted();
        assert_eq!(&highlighted[path.len()..], path.as_slice());
    }

    #[test]
    fn selecting_a_later_path_cell_fails() {
        let mut session: TestSession = session(6);
        start_and_preview(&mut session, 2);
        let second: Position = path_of(&session)[1];

        assert_eq!(session.select_cell(second.x, second.y), SelectOutcome::Wrong);
    }

    #[test]
    fn restart_cancels_the_running_preview() {
        let mut session: TestSession = session(7);
        session.start_level(1).unwrap();
        session.advance(Duration::from_millis(2500));
        let before: usize = session.presenter().highlighted().len();
        assert!(before > 0);

        session.restart_level().unwrap();
        let path: Vec<Position> = path_of(&session);
        session.advance(Timings::default().preview_duration(path.len()));

        assert_eq!(&session.presenter().highlighted()[before..], path.as_slice());
        assert_eq!(session.attempts(), 2);
        assert_eq!(session.state(), GameState::Playing);
    }

    #[test]
    fn completion_time_is_measured_from_the_end_of_the_preview() {
        let mut session: TestSession = session(8);
        start_and_preview(&mut session, 3);
        session.advance(Duration::from_millis(4200));

        for p in path_of(&session) {
            session.select_cell(p.x, p.y);
        }

        assert_eq!(session.elapsed(), Some(Duration::from_millis(4200)));
        let stats: GameStats = session.stats();
        assert_eq!(stats.best_time(3), Some(4.2));
        assert_eq!(stats.best_level, 3);
        assert_eq!(stats.unlocked_level, 4);
    }

    #[test]
    fn give_up_reveals_the_solution() {
        let mut session: TestSession = session(9);
        start_and_preview(&mut session, 1);

        assert!(session.give_up());
        assert!(!session.give_up());
        session.advance(Duration::from_secs(10));

        assert_eq!(session.state(), GameState::GameOver);
        assert_eq!(session.stats().games_won, 0);
        let calls: &[Call] = &session.presenter().calls;
        assert!(calls.contains(&Call::Status(Status::GaveUp)));
        assert!(!calls.contains(&Call::Status(Status::Failed)));
        assert!(
            !session
                .presenter()
                .calls
                .iter()
                .any(|c| matches!(c, Call::Mark(_, Mark::Wrong)))
        );
    }

    #[test]
    fn retry_and_next_level_transitions() {
        let mut session: TestSession = session(10);
        start_and_preview(&mut session, 1);
        assert_eq!(
            session.next_level(),
            Err(SessionError::InvalidState(GameState::Playing))
        );

        session.give_up();
        session.advance(Duration::from_secs(1));
        session.retry_level().unwrap();
        assert_eq!(session.attempts(), 2);
        assert_eq!(session.level(), 1);

        let len: usize = session.get_progress().1;
        session.advance(Timings::default().preview_duration(len));
        for p in path_of(&session) {
            session.select_cell(p.x, p.y);
        }
        assert_eq!(session.stats().level_times["level_1"].attempts, 2);
        assert_eq!(session.retry_level(), Err(SessionError::InvalidState(GameState::Win)));

        session.next_level().unwrap();
        assert_eq!(session.level(), 2);
        assert_eq!(session.attempts(), 1);
        assert_eq!(session.state(), GameState::Preview);
        assert_eq!(session.maze().unwrap().size, 5);
    }

    #[test]
    fn back_to_menu_cancels_timers() {
        let mut session: TestSession = session(11);
        session.start_level(2).unwrap();
        session.advance(Duration::from_millis(1200));

        session.back_to_menu();

        assert_eq!(session.state(), GameState::Menu);
        assert_eq!(session.next_timer_delay(), None);
        assert_eq!(session.presenter().calls.last(), Some(&Call::Menu));
        assert_eq!(
            session.restart_level(),
            Err(SessionError::InvalidState(GameState::Menu))
        );
        session.start_game().unwrap();
        assert_eq!(session.level(), 1);
        assert_eq!(session.attempts(), 1);
    }

    #[test]
    fn preview_steps_follow_the_timings() {
        let mut session: TestSession = session(13);
        session.start_level(2).unwrap();
        let path: Vec<Position> = path_of(&session);

        session.advance(Duration::from_millis(999));
        assert!(session.presenter().highlighted().is_empty());
        session.advance(Duration::from_millis(1));
        assert!(session.presenter().lit(path[0], true));

        // Each cell stays lit for 800 ms
        session.advance(Duration::from_millis(799));
        assert!(!session.presenter().lit(path[0], false));
        session.advance(Duration::from_millis(1));
        assert!(session.presenter().lit(path[0], false));

        // Then a 200 ms pause before the next cell
        session.advance(Duration::from_millis(199));
        assert!(!session.presenter().lit(path[1], true));
        session.advance(Duration::from_millis(1));
        assert!(session.presenter().lit(path[1], true));
        assert_eq!(session.state(), GameState::Preview);
    }

    #[test]
    fn failure_steps_follow_the_timings() {
        let mut session: TestSession = session(14);
        start_and_preview(&mut session, 1);
        let path: Vec<Position> = path_of(&session);
        let wrong: Position = off_path_cell(&session).unwrap();
        let preview_highlights: usize = session.presenter().highlighted().len();

        session.select_cell(wrong.x, wrong.y);
        assert_eq!(session.presenter().highlighted().len(), preview_highlights + 1);

        // One revealed cell every 150 ms
        session.advance(Duration::from_millis(149));
        assert_eq!(session.presenter().highlighted().len(), preview_highlights + 1);
        session.advance(Duration::from_millis(1));
        assert_eq!(session.presenter().highlighted().len(), preview_highlights + 2);
        assert_eq!(session.presenter().highlighted()[preview_highlights + 1], path[1]);

        // Game over 500 ms after the wrong selection
        session.advance(Duration::from_millis(349));
        assert_eq!(session.state(), GameState::Playing);
        assert!(!session.is_input_accepted());
        session.advance(Duration::from_millis(1));
        assert_eq!(session.state(), GameState::GameOver);

        // Summary 2000 ms after the game over
        session.advance(Duration::from_millis(1999));
        assert!(!session.presenter().game_over_shown());
        session.advance(Duration::from_millis(1));
        assert!(session.presenter().game_over_shown());
    }

    #[test]
    fn level_zero_is_rejected() {
        let mut session: TestSession = session(12);

        assert_eq!(session.start_level(0), Err(SessionError::InvalidLevel));
        assert_eq!(session.state(), GameState::Menu);
    }
}
