use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use tempfile::env::temp_dir;

use crate::{storage::table::Table, types::error::Result, types::row::Row};

pub fn get_unix_timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis()
}

pub fn create_temp_db_path() -> PathBuf {
    let mut temp_path = temp_dir();
    temp_path.push(format!("lumbung_test_{}.db", get_unix_timestamp_millis()));
    temp_path
}

pub fn create_temp_db_path_with_prefix(prefix: &str) -> PathBuf {
    let mut temp_path = temp_dir();
    temp_path.push(format!("{}_{}.db", prefix, get_unix_timestamp_millis()));
    temp_path
}

/// A user row with deterministic field values, matching the shape the shell
/// inserts: `(i, user<i>, user<i>@example.com)`.
pub fn sample_row(i: usize) -> Row {
    Row::new(i as u32, &format!("user{i}"), &format!("user{i}@example.com"))
        .expect("sample fields fit the fixed columns")
}

pub struct TempDatabase {
    pub path: PathBuf,
    pub table: Option<Table>,
}

impl TempDatabase {
    pub fn new() -> Self {
        Self {
            path: create_temp_db_path(),
            table: None,
        }
    }

    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            path: create_temp_db_path_with_prefix(prefix),
            table: None,
        }
    }

    pub fn open_table(&mut self) -> Result<&mut Table> {
        let table = Table::open(&self.path)?;
        self.table = Some(table);
        Ok(self.table.as_mut().expect("table opened above"))
    }

    /// Flush and drop the current handle, simulating an orderly shutdown.
    pub fn close_table(&mut self) -> Result<()> {
        if let Some(table) = self.table.as_mut() {
            table.flush()?;
        }
        self.table = None;
        Ok(())
    }
}

impl Default for TempDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        self.table = None;
        if self.path.exists() {
            let _ = fs::remove_file(&self.path);
        }
    }
}
