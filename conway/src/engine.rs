// engine.rs - Generation engine
//
// Every step reads one grid and builds a fresh one. Large boards are split
// into column ranges, each computed by its own tokio task against the shared
// input; the slabs are joined back in column order.

use std::num::NonZeroUsize;
use std::ops::Range;
use std::panic;
use std::sync::Arc;
use std::thread;

use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinHandle;
use tracing::trace;

use crate::config::EngineConfig;
use crate::error::{LifeError, LifeResult};
use crate::grid::Grid;

/// Conway's rule for one cell given its live neighbour count.
pub fn next_cell_state(alive: bool, live_neighbors: u8) -> bool {
    match (alive, live_neighbors) {
        (true, 2) | (true, 3) => true,   // Survival
        (false, 3)            => true,   // Birth
        _                     => false,  // Death or stays dead
    }
}

/// Next states for `columns` of `grid`, column-major.
fn compute_columns(grid: &Grid, columns: Range<usize>) -> Vec<bool> {
    let height = grid.height();
    let mut slab = Vec::with_capacity(columns.len() * height);
    for x in columns {
        for y in 0..height {
            slab.push(next_cell_state(grid.is_alive(x, y), grid.live_neighbors(x, y)));
        }
    }
    slab
}

/// Splits `0..width` into at most `parts` contiguous, non-empty ranges.
fn column_ranges(width: usize, parts: usize) -> Vec<Range<usize>> {
    let parts = parts.clamp(1, width.max(1));
    let chunk = width.div_ceil(parts);
    (0..width)
        .step_by(chunk.max(1))
        .map(|start| start..(start + chunk).min(width))
        .collect()
}

/// Steps grids forward. Owns the worker runtime used for large boards.
///
/// All methods block the calling thread until the result is ready; call them
/// from `spawn_blocking` when inside an async context.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    workers: usize,
    runtime: Runtime,
}

impl Engine {
    pub fn new(config: EngineConfig) -> LifeResult<Self> {
        config.validate()?;
        let workers = config
            .worker_threads
            .unwrap_or_else(|| thread::available_parallelism().map_or(1, NonZeroUsize::get));
        let runtime = Builder::new_multi_thread()
            .worker_threads(workers)
            .thread_name("conway-worker")
            .build()
            .map_err(LifeError::Runtime)?;
        Ok(Self { config, workers, runtime })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether a board this size takes the column-parallel path.
    pub fn is_parallel(&self, grid: &Grid) -> bool {
        grid.cell_count() > self.config.parallel_threshold
    }

    /// One synchronous generation.
    pub fn next_generation(&self, grid: &Grid) -> Grid {
        if self.is_parallel(grid) {
            self.parallel_step(Arc::new(grid.clone()))
        } else {
            compute_sequential(grid)
        }
    }

    /// Applies `generations` steps one after another. Zero returns a copy.
    pub fn advance(&self, grid: &Grid, generations: usize) -> Grid {
        let mut current = Arc::new(grid.clone());
        for _ in 0..generations {
            current = Arc::new(self.step_shared(&current));
        }
        Arc::unwrap_or_clone(current)
    }

    /// Same as `next_generation` for a grid the caller already shares.
    pub(crate) fn step_shared(&self, grid: &Arc<Grid>) -> Grid {
        if self.is_parallel(grid) {
            self.parallel_step(Arc::clone(grid))
        } else {
            compute_sequential(grid)
        }
    }

    fn parallel_step(&self, grid: Arc<Grid>) -> Grid {
        let (width, height) = (grid.width(), grid.height());
        let ranges = column_ranges(width, self.workers);
        trace!(width, height, tasks = ranges.len(), "dispatching column tasks");

        self.runtime.block_on(async {
            let handles: Vec<JoinHandle<Vec<bool>>> = ranges
                .into_iter()
                .map(|columns| {
                    let grid = Arc::clone(&grid);
                    tokio::spawn(async move { compute_columns(&grid, columns) })
                })
                .collect();

            let mut cells = Vec::with_capacity(width * height);
            for handle in handles {
                match handle.await {
                    Ok(slab) => cells.extend(slab),
                    // Surface a worker panic on the caller's thread as-is.
                    Err(err) => match err.try_into_panic() {
                        Ok(payload) => panic::resume_unwind(payload),
                        Err(err) => panic!("column task did not complete: {err}"),
                    },
                }
            }
            Grid::from_column_major(width, height, cells)
        })
    }
}

fn compute_sequential(grid: &Grid) -> Grid {
    let cells = compute_columns(grid, 0..grid.width());
    Grid::from_column_major(grid.width(), grid.height(), cells)
}
