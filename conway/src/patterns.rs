// patterns.rs - Named seed patterns and a seeded random fill

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::error::GridError;
use crate::grid::Grid;

/// A named set of live cells, as `(x, y)` offsets from the pattern's
/// top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

pub const BLOCK: Pattern = Pattern {
    name: "Block",
    cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
};

pub const BLINKER: Pattern = Pattern {
    name: "Blinker",
    cells: &[(0, 0), (1, 0), (2, 0)],
};

pub const TOAD: Pattern = Pattern {
    name: "Toad",
    cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
};

pub const BEACON: Pattern = Pattern {
    name: "Beacon",
    cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
};

pub const GLIDER: Pattern = Pattern {
    name: "Glider",
    cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
};

pub const PULSAR: Pattern = Pattern {
    name: "Pulsar",
    cells: &[
        // Top half
        (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
        (0, 2), (5, 2), (7, 2), (12, 2),
        (0, 3), (5, 3), (7, 3), (12, 3),
        (0, 4), (5, 4), (7, 4), (12, 4),
        (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
        // Bottom half (mirrored)
        (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
        (0, 8), (5, 8), (7, 8), (12, 8),
        (0, 9), (5, 9), (7, 9), (12, 9),
        (0, 10), (5, 10), (7, 10), (12, 10),
        (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
    ],
};

pub const R_PENTOMINO: Pattern = Pattern {
    name: "R-pentomino",
    cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
};

pub const GOSPER_GLIDER_GUN: Pattern = Pattern {
    name: "Gosper Glider Gun",
    cells: &[
        (24, 0),
        (22, 1), (24, 1),
        (12, 2), (13, 2), (20, 2), (21, 2), (34, 2), (35, 2),
        (11, 3), (15, 3), (20, 3), (21, 3), (34, 3), (35, 3),
        (0, 4), (1, 4), (10, 4), (16, 4), (20, 4), (21, 4),
        (0, 5), (1, 5), (10, 5), (14, 5), (16, 5), (17, 5), (22, 5), (24, 5),
        (10, 6), (16, 6), (24, 6),
        (11, 7), (15, 7),
        (12, 8), (13, 8),
    ],
};

pub const PATTERNS: &[Pattern] = &[
    BLOCK,
    BLINKER,
    TOAD,
    BEACON,
    GLIDER,
    PULSAR,
    R_PENTOMINO,
    GOSPER_GLIDER_GUN,
];

impl Pattern {
    /// Width and height of the pattern's bounding box.
    pub fn extent(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(w, h), &(x, y)| (w.max(x + 1), h.max(y + 1)))
    }

    /// A `width` x `height` board holding this pattern with its top-left
    /// corner at `origin`. Cells that fall off the board are dropped.
    pub fn place(
        &self,
        width: usize,
        height: usize,
        origin: (usize, usize),
    ) -> Result<Grid, GridError> {
        let (ox, oy) = origin;
        let live: Vec<(usize, usize)> = self
            .cells
            .iter()
            .map(|&(x, y)| (x + ox, y + oy))
            .filter(|&(x, y)| x < width && y < height)
            .collect();
        Grid::with_live_cells(width, height, &live)
    }

    /// Places the pattern in the middle of the board.
    pub fn centered(&self, width: usize, height: usize) -> Result<Grid, GridError> {
        let (w, h) = self.extent();
        self.place(width, height, (width.saturating_sub(w) / 2, height.saturating_sub(h) / 2))
    }
}

/// Deterministic random board with roughly a third of the cells alive.
pub fn random_grid(width: usize, height: usize, seed_value: u64) -> Result<Grid, GridError> {
    let mut hasher = DefaultHasher::new();
    seed_value.hash(&mut hasher);
    let mut seed = hasher.finish();

    let mut columns = Vec::with_capacity(width);
    for _ in 0..width {
        let mut column = Vec::with_capacity(height);
        for _ in 0..height {
            seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
            column.push(seed % 3 == 0);
        }
        columns.push(column);
    }
    Grid::new(width, height, Some(columns))
}
