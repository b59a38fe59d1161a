//! Conway's Game of Life on bounded boards.
//!
//! - [`Grid`]: an immutable rectangle of cells, addressed `(x, y)`.
//! - [`Engine`]: steps a grid one or N generations; boards larger than the
//!   configured threshold are computed column-parallel on a tokio runtime.
//! - [`Engine::final_state`]: runs a board until it dies out, settles, or
//!   cycles, within an iteration budget.
//! - [`Snapshot`] / [`SnapshotStore`] / [`BoardService`]: the flat persisted
//!   form and the request-side operations built on top of the engine.
//!
//! ```
//! use conway::{Engine, EngineConfig, Grid};
//!
//! let engine = Engine::new(EngineConfig::default())?;
//! let blinker = Grid::with_live_cells(5, 5, &[(1, 2), (2, 2), (3, 2)])?;
//! let result = engine.settle(&blinker);
//! assert!(result.is_cyclic);
//! assert_eq!(result.cycle_length, 2);
//! # Ok::<(), conway::LifeError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod service;
pub mod snapshot;
pub mod store;
pub mod trajectory;

pub use config::{
    DEFAULT_MAX_ITERATIONS, DEFAULT_PARALLEL_THRESHOLD, EngineConfig, LifeConfig, ViewerConfig,
};
pub use engine::{next_cell_state, Engine};
pub use error::{GridError, LifeError, LifeResult};
pub use grid::{Grid, GridKey};
pub use patterns::{random_grid, Pattern, PATTERNS};
pub use service::{BoardService, BoardUpload, BoardView, FinalStateView};
pub use snapshot::{decode_cells, encode_cells, Snapshot, SnapshotError};
pub use store::{MemoryStore, SnapshotId, SnapshotStore};
pub use trajectory::{Behavior, FinalState};
