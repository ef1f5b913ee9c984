/*
terminal.rs

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

//! Play in a terminal.
//!
//! [`TerminalPresenter`] draws the maze with characters and the [`play`] function reads the
//! player commands from the standard input.

use chrono::{DateTime, Local};
use log::debug;
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use memory_maze::game::{GameState, SelectOutcome, Session};
use memory_maze::generator::cell::Position;
use memory_maze::generator::maze::Maze;
use memory_maze::presenter::{GameOverSummary, Mark, Presenter, Status, WinSummary};
use memory_maze::saver::store::KeyValueStore;
use memory_maze::stats::GameStats;

/// Clear the screen and move the cursor to the top left corner.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

const HELP: &str = "Commands: <x> <y> select a cell, g give up, r restart, p replay, n next level,
          s new game, m menu, h help, q quit";

/// Draw the grid. `symbol` returns the character for each cell.
pub fn render_grid(maze: &Maze, symbol: impl Fn(Position) -> char) -> String {
    let mut ret: String = String::from("   ");
    for x in 0..maze.size {
        ret.push_str(&format!("{x} "));
    }
    ret.push('\n');
    for y in 0..maze.size {
        ret.push_str(&format!("{y:>2} "));
        for x in 0..maze.size {
            ret.push(symbol(Position::new(x, y)));
            ret.push(' ');
        }
        ret.push('\n');
    }
    ret
}

/// Format the player statistics.
pub fn format_stats(stats: &GameStats) -> String {
    let mut ret: String = format!(
        "Best level: {}\nGames won: {}\nGames played: {}\nUnlocked level: {}\n",
        stats.best_level, stats.games_won, stats.total_games_played, stats.unlocked_level
    );
    for (level, time) in stats.sorted_level_times() {
        let when: String = match DateTime::from_timestamp_millis(time.completed_at) {
            Some(dt) => format!("{}", dt.with_timezone(&Local).format("%c")),
            None => String::from("-"),
        };
        ret.push_str(&format!(
            "  Level {level:>2}: {:.1}s in {} attempt(s), {when}\n",
            time.best_time, time.attempts
        ));
    }
    ret
}

/// Draw the game in the terminal.
#[derive(Default)]
pub struct TerminalPresenter {
    maze: Option<Maze>,
    level: u32,
    highlighted: HashSet<Position>,
    marks: HashMap<Position, Mark>,
    status: Option<Status>,
    progress: (usize, usize),
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Character for the cell at the given position.
    fn symbol(&self, maze: &Maze, position: Position) -> char {
        if self.highlighted.contains(&position) {
            return '@';
        }
        match self.marks.get(&position) {
            Some(Mark::Correct) => '+',
            Some(Mark::Wrong) => 'X',
            None => maze.cell(position).map_or(' ', |c| c.kind.symbol()),
        }
    }

    /// Return the screen content.
    pub fn render(&self) -> String {
        let maze: &Maze = match &self.maze {
            Some(m) => m,
            None => return String::new(),
        };
        let status: &str = match self.status {
            Some(Status::GetReady) => "get ready...",
            Some(Status::Memorize) => "memorize the path...",
            Some(Status::YourTurn) => "select the cells in order!",
            Some(Status::Failed) => "wrong cell, here is the path",
            Some(Status::GaveUp) => "here is the path",
            Some(Status::Completed) => "completed!",
            None => "",
        };
        format!(
            "Level {}: {status}\n\n{}\nProgress: {} / {}\n",
            self.level,
            render_grid(maze, |p| self.symbol(maze, p)),
            self.progress.0,
            self.progress.1
        )
    }

    fn redraw(&self) {
        print!("{CLEAR_SCREEN}{}", self.render());
        let _ = io::stdout().flush();
    }
}

impl Presenter for TerminalPresenter {
    fn show_menu(&mut self, stats: &GameStats) {
        self.maze = None;
        println!("{CLEAR_SCREEN}Memory Maze\n\n{}", format_stats(stats));
        println!("s: new game, q: quit");
    }

    fn show_maze(&mut self, maze: &Maze, level: u32) {
        self.maze = Some(maze.clone());
        self.level = level;
        self.highlighted.clear();
        self.marks.clear();
        self.redraw();
    }

    fn show_status(&mut self, status: Status) {
        self.status = Some(status);
        self.redraw();
    }

    fn highlight_cell(&mut self, position: Position, on: bool) {
        if on {
            self.highlighted.insert(position);
        } else {
            self.highlighted.remove(&position);
        }
        self.redraw();
    }

    fn mark_cell(&mut self, position: Position, mark: Mark) {
        self.marks.insert(position, mark);
        self.redraw();
    }

    fn update_progress(&mut self, current: usize, total: usize) {
        self.progress = (current, total);
        self.redraw();
    }

    fn show_win(&mut self, summary: &WinSummary) {
        println!(
            "\nLevel {} completed in {:.1}s, accuracy {}%",
            summary.level,
            summary.time.as_secs_f64(),
            summary.accuracy
        );
        if summary.new_best {
            println!("New best time!");
        } else if let Some(best) = summary.best_time {
            println!("Best time: {best:.1}s");
        }
        println!("n: next level, p: replay, m: menu");
    }

    fn show_game_over(&mut self, summary: &GameOverSummary) {
        println!(
            "\nGame over at level {}: {} of {} cells (attempt {})",
            summary.level, summary.progress, summary.total, summary.attempts
        );
        println!("r: try again, m: menu");
    }
}

/// Player command.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Select(usize, usize),
    GiveUp,
    Restart,
    Replay,
    Next,
    NewGame,
    Menu,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        [x, y] => Some(Command::Select(x.parse().ok()?, y.parse().ok()?)),
        ["g"] => Some(Command::GiveUp),
        ["r"] => Some(Command::Restart),
        ["p"] => Some(Command::Replay),
        ["n"] => Some(Command::Next),
        ["s"] => Some(Command::NewGame),
        ["m"] => Some(Command::Menu),
        ["h"] => Some(Command::Help),
        ["q"] => Some(Command::Quit),
        _ => None,
    }
}

/// Whether to keep playing after a command.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Run the player command in the given line.
fn handle_line<S: KeyValueStore, R: Rng>(
    session: &mut Session<TerminalPresenter, S, R>,
    line: &str,
) -> Flow {
    let command: Command = match parse_command(line) {
        Some(c) => c,
        None => {
            println!("{HELP}");
            return Flow::Continue;
        }
    };
    debug!("Command {command:?}");

    let res = match command {
        Command::Select(x, y) => {
            match session.select_cell(x, y) {
                SelectOutcome::Ignored => println!("Not now"),
                SelectOutcome::OutOfBounds => println!("No cell at ({x}, {y})"),
                SelectOutcome::Wall => println!("That is a wall"),
                _ => (),
            }
            Ok(())
        }
        Command::GiveUp => {
            session.give_up();
            Ok(())
        }
        Command::Restart if session.state() == GameState::GameOver => session.retry_level(),
        Command::Restart => session.restart_level(),
        Command::Replay => session.replay_level(),
        Command::Next => session.next_level(),
        Command::NewGame => session.start_game(),
        Command::Menu => {
            session.back_to_menu();
            Ok(())
        }
        Command::Help => {
            println!("{HELP}");
            Ok(())
        }
        Command::Quit => return Flow::Quit,
    };
    if let Err(e) = res {
        println!("{e}");
    }
    Flow::Continue
}

/// Process the timers and the lines from `receiver` until the player quits or the input ends.
///
/// Lines are handled as soon as they arrive, with the session clock brought up to date first,
/// so a selection typed during the preview is ignored.
fn run<S: KeyValueStore, R: Rng>(
    session: &mut Session<TerminalPresenter, S, R>,
    receiver: &Receiver<String>,
) {
    let mut clock: Instant = Instant::now();
    let mut prompt: bool = true;
    loop {
        let delay: Option<Duration> = session.next_timer_delay();
        if prompt && (delay.is_none() || session.is_input_accepted()) {
            print!("[{}] > ", session.state());
            let _ = io::stdout().flush();
            prompt = false;
        }

        let received: Result<String, RecvTimeoutError> = match delay {
            Some(d) => receiver.recv_timeout(d),
            None => receiver
                .recv()
                .map_err(|_| RecvTimeoutError::Disconnected),
        };
        session.advance(clock.elapsed());
        clock = Instant::now();

        match received {
            Ok(line) => {
                prompt = true;
                if handle_line(session, &line) == Flow::Quit {
                    return;
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if session.is_input_accepted() {
                    prompt = true;
                }
            }
            Err(RecvTimeoutError::Disconnected) => return,
        }
    }
}

/// Play from the given level until the player quits or the input ends.
pub fn play<S: KeyValueStore, R: Rng>(
    session: &mut Session<TerminalPresenter, S, R>,
    level: u32,
) -> Result<(), Box<dyn Error>> {
    let (sender, receiver) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if sender.send(line).is_err() {
                break;
            }
        }
    });

    session.start_level(level)?;
    run(session, &receiver);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use memory_maze::config::Timings;
    use memory_maze::generator::maze::MazeGenerator;
    use memory_maze::saver::stats::SaverStats;
    use memory_maze::saver::store::MemoryStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn commands() {
        assert_eq!(parse_command(" 2 3 "), Some(Command::Select(2, 3)));
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("2 x"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn render_shows_marks_and_highlights() {
        let mut rng: StdRng = StdRng::seed_from_u64(5);
        let maze: Maze = MazeGenerator::new().generate(4, 1, &mut rng).unwrap();
        let second: Position = maze.path().get()[1];
        let mut presenter: TerminalPresenter = TerminalPresenter::new();

        presenter.show_maze(&maze, 1);
        presenter.mark_cell(Position::new(0, 0), Mark::Correct);
        presenter.highlight_cell(second, true);

        let screen: String = presenter.render();
        let rows: Vec<&str> = screen.lines().collect();
        assert!(rows[0].starts_with("Level 1"));
        assert_eq!(rows[2], "   0 1 2 3 ");
        assert!(rows[3].starts_with(" 0 + "));
        let row: &str = rows[3 + second.y];
        assert_eq!(row.chars().nth(3 + 2 * second.x), Some('@'));
        assert!(screen.ends_with("Progress: 0 / 0\n"));
    }

    #[test]
    fn stats_list_levels_in_order() {
        let mut stats: GameStats = GameStats::default();
        stats.record_completion(4, 3.5, 2, 0);
        stats.record_completion(1, 1.5, 1, 0);

        let text: String = format_stats(&stats);
        let first: usize = text.find("Level  1: 1.5s").unwrap();
        let second: usize = text.find("Level  4: 3.5s in 2 attempt(s)").unwrap();
        assert!(first < second);
        assert!(text.contains("Best level: 4"));
    }

    type TestSession = Session<TerminalPresenter, MemoryStore, StdRng>;

    fn new_session() -> TestSession {
        Session::new(
            MazeGenerator::new(),
            SaverStats::new(MemoryStore::new()),
            TerminalPresenter::new(),
            StdRng::seed_from_u64(1),
            Timings::default(),
        )
    }

    #[test]
    fn selection_typed_during_preview_is_dropped() {
        let mut session: TestSession = new_session();
        session.start_level(1).unwrap();
        let first: Position = session.maze().unwrap().path().get()[0];
        let (sender, receiver) = mpsc::channel::<String>();
        sender.send(format!("{} {}", first.x, first.y)).unwrap();
        drop(sender);

        run(&mut session, &receiver);

        assert_eq!(session.state(), GameState::Preview);
        assert_eq!(session.get_progress().0, 0);
    }

    #[test]
    fn quit_stops_before_later_lines() {
        let mut session: TestSession = new_session();
        session.start_level(1).unwrap();
        let (sender, receiver) = mpsc::channel::<String>();
        sender.send(String::from("q")).unwrap();
        sender.send(String::from("m")).unwrap();

        run(&mut session, &receiver);

        assert_eq!(session.state(), GameState::Preview);
        assert_eq!(receiver.try_recv().ok().as_deref(), Some("m"));
    }

    #[test]
    fn give_up_status_is_neutral() {
        let mut presenter: TerminalPresenter = TerminalPresenter::new();
        let mut rng: StdRng = StdRng::seed_from_u64(2);
        let maze: Maze = MazeGenerator::new().generate(4, 1, &mut rng).unwrap();
        presenter.show_maze(&maze, 1);
        presenter.show_status(Status::GaveUp);

        assert!(presenter.render().starts_with("Level 1: here is the path\n"));
    }
}
