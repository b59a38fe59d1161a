// error.rs - Error types for the conway engine

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::snapshot::SnapshotError;
use crate::store::SnapshotId;

/// Result alias for engine, service and config operations.
pub type LifeResult<T> = Result<T, LifeError>;

/// Rejected grid shapes. Raised eagerly by the `Grid` constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },

    #[error("column {column} has {found} cells, expected {expected}")]
    Ragged { column: usize, expected: usize, found: usize },

    #[error("cells are {found_width}x{found_height}, expected {width}x{height}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        found_width: usize,
        found_height: usize,
    },

    #[error("a {width}x{height} grid has too many cells to store")]
    TooManyCells { width: usize, height: usize },

    #[error("cell ({x}, {y}) lies outside a {width}x{height} grid")]
    OutOfBounds { x: usize, y: usize, width: usize, height: usize },
}

#[derive(Debug, Error)]
pub enum LifeError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("failed to start worker runtime: {0}")]
    Runtime(#[source] io::Error),

    #[error("failed to read config {path}: {source}")]
    Config { path: PathBuf, source: io::Error },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse { path: PathBuf, source: toml::de::Error },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("board {width}x{height} exceeds the {max}x{max} limit")]
    TooLarge { width: usize, height: usize, max: usize },

    #[error("board {0} not found")]
    NotFound(SnapshotId),

    #[error("number of generations must be non-negative, got {0}")]
    NegativeGenerations(i64),

    #[error("max iterations must be positive, got {0}")]
    InvalidIterations(i64),
}
