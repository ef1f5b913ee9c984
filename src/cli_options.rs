/*
cli_options.rs

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

//! Process command-line options.
//!
//! Without options, the game starts in the terminal at level 1.
//! Some options are intended for developers tuning the maze generator: Memory Maze can print
//! generated mazes and some statistics about the generation.
//!
//! # Examples
//!
//! Play from level 3 with shorter timers:
//!
//! ```text
//! $ memory-maze --level 3 --fast
//! ```
//!
//! Print two mazes for level 5:
//!
//! ```text
//! $ memory-maze -g 5 -c 2 --seed 42
//!    0 1 2 3 4 5
//!  0 S . . # . .
//!  ...
//! ```

use clap::Parser;
use log::{debug, error};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::env;
use std::path::PathBuf;

use memory_maze::config::{APPLICATION_NAME, COPYRIGHT_NOTICE, Timings};
use memory_maze::game::Session;
use memory_maze::generator::maze::{self, Maze, MazeGenerator};
use memory_maze::saver::stats::SaverStats;
use memory_maze::saver::store::FileStore;

use crate::terminal::{self, TerminalPresenter};

/// Memorize a path through a maze, then reproduce it.
#[derive(Parser)]
#[command(long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Level to start from
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    level: u32,

    /// Print mazes generated for the given level instead of playing
    #[arg(short, long, value_name = "LEVEL", value_parser = clap::value_parser!(u32).range(1..))]
    generate: Option<u32>,

    /// Number of mazes to generate
    #[arg(short, long, default_value_t = 1, requires = "generate")]
    count: usize,

    /// Print some statistics after generating the mazes
    #[arg(short, long, default_value_t = false, requires = "generate")]
    summary: bool,

    /// Seed for the random generator
    #[arg(long)]
    seed: Option<u64>,

    /// Print the player statistics
    #[arg(long, default_value_t = false)]
    stats: bool,

    /// Delete the player statistics
    #[arg(long, default_value_t = false)]
    reset: bool,

    /// Directory where the statistics are saved
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Speed up the preview and the other timers
    #[arg(long, default_value_t = false)]
    fast: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Return the directory where the statistics are saved.
fn default_data_dir() -> PathBuf {
    if let Some(dir) = env::var_os("XDG_DATA_HOME") {
        return PathBuf::from(dir).join(APPLICATION_NAME);
    }
    match env::var_os("HOME") {
        Some(home) => PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APPLICATION_NAME),
        None => PathBuf::from(format!(".{APPLICATION_NAME}")),
    }
}

/// Print generated mazes, and optionally some statistics.
fn print_mazes(level: u32, count: usize, summary: bool, rng: &mut StdRng) -> u8 {
    let size: usize = maze::size_for_level(level);
    let target: usize = maze::target_path_length(size, level);
    let mut generator: MazeGenerator = MazeGenerator::new();
    let mut lengths: Vec<usize> = Vec::with_capacity(count);
    let mut rejected: usize = 0;
    let mut fallbacks: usize = 0;

    for i in 0..count {
        debug!("Maze {i}");
        let maze: Maze = match generator.generate(size, level, rng) {
            Ok(m) => m,
            Err(e) => {
                error!("{e}");
                return 1;
            }
        };
        rejected += generator.rejected_walks;
        if generator.used_fallback {
            fallbacks += 1;
        }

        // Verify the path before printing it
        if !maze.is_path_valid() || maze.path().get_last() != Some(maze.finish) {
            eprintln!("Invalid path: {:?}", maze.path().get());
            panic!("Bug: the generated path crosses a wall or misses the finish");
        }

        println!(
            "{}",
            terminal::render_grid(&maze, |p| match maze.path().position_index(p) {
                Some(idx) => char::from_digit((idx % 36) as u32, 36).unwrap_or('?'),
                None => maze.cell(p).map_or(' ', |c| c.kind.symbol()),
            })
        );
        println!("Path ({} cells): {:?}\n", maze.path().len(), maze.path().get());
        lengths.push(maze.path().len());
    }

    if summary && !lengths.is_empty() {
        let total: usize = lengths.iter().sum();
        println!(
            "
         grid size = {size}x{size}
     target length = {target}
    average length = {:.1}
        min length = {}
        max length = {}
    rejected walks = {rejected}
         fallbacks = {fallbacks}",
            total as f64 / lengths.len() as f64,
            lengths.iter().min().unwrap_or(&0),
            lengths.iter().max().unwrap_or(&0),
        );
    }
    0
}

/// Parse and process command-line options. Return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let mut rng: StdRng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    //
    // Print mazes
    //
    if let Some(level) = args.generate {
        return print_mazes(level, args.count, args.summary, &mut rng);
    }

    let data_dir: PathBuf = args.data_dir.unwrap_or_else(default_data_dir);
    let mut saver: SaverStats<FileStore> = SaverStats::new(FileStore::new(data_dir));

    //
    // Statistics
    //
    if args.reset {
        if !saver.reset_data() {
            eprintln!("Cannot delete the statistics");
            return 1;
        }
        println!("Statistics deleted");
        return 0;
    }
    if args.stats {
        print!("{}", terminal::format_stats(&saver.get_stats()));
        return 0;
    }

    //
    // Play
    //
    if !saver.is_level_unlocked(args.level) {
        eprintln!(
            "Level {} is locked. The highest unlocked level is {}.",
            args.level,
            saver.get_stats().unlocked_level
        );
        return 1;
    }
    let timings: Timings = if args.fast {
        Timings::default().scaled_down(4)
    } else {
        Timings::default()
    };
    let mut session = Session::new(
        MazeGenerator::new(),
        saver,
        TerminalPresenter::new(),
        rng,
        timings,
    );
    match terminal::play(&mut session, args.level) {
        Ok(()) => 0,
        Err(e) => {
            error!("{e}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn arguments_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn count_requires_generate() {
        assert!(Args::try_parse_from(["memory-maze", "-c", "3"]).is_err());
        assert!(Args::try_parse_from(["memory-maze", "-g", "2", "-c", "3"]).is_ok());
        assert!(Args::try_parse_from(["memory-maze", "--level", "0"]).is_err());
    }

    #[test]
    fn mazes_are_printed() {
        let mut rng: StdRng = StdRng::seed_from_u64(1);

        assert_eq!(print_mazes(4, 3, true, &mut rng), 0);
    }
}
