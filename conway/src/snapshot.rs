//! Flat persisted form of a board.
//!
//! A snapshot stores `width`, `height` and a string of `'0'`/`'1'`
//! characters, row-major: the character for `(x, y)` sits at
//! `y * width + x`. Decoding is lenient about the string length (missing
//! characters are dead cells, extra ones are ignored) so that a damaged
//! record still yields a well-formed grid.
//!
//! # Files
//!
//! Snapshots are written as JSON using write-to-temp-then-rename, so a reader
//! sees either the old file or the new one, never a partial write.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::GridError;
use crate::grid::Grid;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    pub cells: String,
}

/// Row-major `'0'`/`'1'` encoding of `grid`.
pub fn encode_cells(grid: &Grid) -> String {
    let mut encoded = String::with_capacity(grid.cell_count());
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            encoded.push(if grid.is_alive(x, y) { '1' } else { '0' });
        }
    }
    encoded
}

/// Inverse of [`encode_cells`]. Anything other than `'1'`, including a
/// missing character, is a dead cell.
pub fn decode_cells(encoded: &str, width: usize, height: usize) -> Result<Grid, GridError> {
    let mut live = Vec::new();
    for (index, cell) in encoded.chars().take(width.saturating_mul(height)).enumerate() {
        if cell == '1' {
            live.push((index % width, index / width));
        }
    }
    Grid::with_live_cells(width, height, &live)
}

impl Snapshot {
    pub fn from_grid(grid: &Grid) -> Self {
        Self { width: grid.width(), height: grid.height(), cells: encode_cells(grid) }
    }

    pub fn to_grid(&self) -> Result<Grid, GridError> {
        decode_cells(&self.cells, self.width, self.height)
    }

    pub fn read_json(path: &Path) -> Result<Self, SnapshotError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<(), SnapshotError> {
        let mut buf = serde_json::to_string_pretty(self)?;
        buf.push('\n');
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, buf)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }
}
