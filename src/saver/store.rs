/*
store.rs

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

//! Key-value storage.
//!
//! [`FileStore`] saves each value in a `<key>.json` file in a data directory.
//! [`MemoryStore`] keeps the values in memory and is used when nothing must be written to disk.

use log::debug;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use thiserror::Error;

/// Type of errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Cannot access the saved data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid saved data: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Durable key-value store.
pub trait KeyValueStore {
    /// Return the value for the key, or None if the key is not set.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set the value for the key.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove the key. Removing a key that is not set is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Store the values in files.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Absolute path to the directory where the files are saved.
    data_dir: PathBuf,
}

impl FileStore {
    /// Create a [`FileStore`] object.
    ///
    /// The directory is created when the first value is saved.
    pub fn new(data_dir: PathBuf) -> Self {
        debug!("Data directory: {data_dir:?}");
        Self { data_dir }
    }

    /// Return the path to the file that stores the key.
    fn file_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.file_path(key)) {
            Ok(s) => Ok(Some(s)),
            Err(error) => match error.kind() {
                ErrorKind::NotFound => Ok(None),
                _ => Err(error.into()),
            },
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        let file: File = File::create(self.file_path(key))?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        writer.write_all(value.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.file_path(key)) {
            Ok(()) => Ok(()),
            Err(error) => match error.kind() {
                ErrorKind::NotFound => Ok(()),
                _ => Err(error.into()),
            },
        }
    }
}

/// Store the values in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty [`MemoryStore`] object.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}
