// grid.rs - Grid model for Conway's Game of Life

use std::fmt;

use crate::error::GridError;

/// Positions of the eight neighbours relative to a cell, as (dx, dy).
const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// A bounded rectangle of alive/dead cells.
///
/// Cells are addressed `(x, y)` with `x` the column and `y` the row. Storage
/// is column-major so that a column is a contiguous slice, which is what the
/// engine partitions on. A grid is never mutated once built; operations that
/// "change" it return a new grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

/// Content-derived key used for trajectory lookups.
///
/// Two grids produce the same key exactly when they compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridKey(Box<[u8]>);

impl GridKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<(), GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::ZeroDimension { width, height });
    }
    // A Vec<bool> holds at most isize::MAX elements.
    match width.checked_mul(height) {
        Some(cells) if cells <= isize::MAX as usize => Ok(()),
        _ => Err(GridError::TooManyCells { width, height }),
    }
}

impl Grid {
    /// Builds a `width` x `height` grid, adopting `cells` (indexed `[x][y]`)
    /// when given. Cells whose shape differs from the declared dimensions
    /// are rejected rather than ignored.
    pub fn new(
        width: usize,
        height: usize,
        cells: Option<Vec<Vec<bool>>>,
    ) -> Result<Self, GridError> {
        check_dimensions(width, height)?;
        let Some(columns) = cells else {
            return Ok(Self::blank(width, height));
        };

        let found_width = columns.len();
        let found_height = columns.first().map_or(0, Vec::len);
        if found_width != width || found_height != height {
            return Err(GridError::DimensionMismatch { width, height, found_width, found_height });
        }
        Self::from_columns(columns)
    }

    /// All-dead grid.
    pub fn dead(width: usize, height: usize) -> Result<Self, GridError> {
        check_dimensions(width, height)?;
        Ok(Self::blank(width, height))
    }

    /// Builds a grid from a 2-D array indexed `[x][y]`; the grid takes the
    /// array's dimensions.
    pub fn from_columns(columns: Vec<Vec<bool>>) -> Result<Self, GridError> {
        let width = columns.len();
        let height = columns.first().map_or(0, Vec::len);
        check_dimensions(width, height)?;

        let mut cells = Vec::with_capacity(width * height);
        for (column, values) in columns.into_iter().enumerate() {
            if values.len() != height {
                return Err(GridError::Ragged { column, expected: height, found: values.len() });
            }
            cells.extend(values);
        }
        Ok(Self { width, height, cells })
    }

    /// Grid with exactly the listed `(x, y)` cells alive.
    pub fn with_live_cells(
        width: usize,
        height: usize,
        live: &[(usize, usize)],
    ) -> Result<Self, GridError> {
        let mut grid = Self::dead(width, height)?;
        for &(x, y) in live {
            let index = grid.index(x, y)?;
            grid.cells[index] = true;
        }
        Ok(grid)
    }

    /// Assembles a grid from column-major cells produced by the engine.
    pub(crate) fn from_column_major(width: usize, height: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self { width, height, cells }
    }

    fn blank(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![false; width * height] }
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfBounds { x, y, width: self.width, height: self.height });
        }
        Ok(x * self.height + y)
    }

    /// Copies the cells out as a 2-D array indexed `[x][y]`.
    pub fn to_columns(&self) -> Vec<Vec<bool>> {
        self.cells.chunks(self.height).map(<[bool]>::to_vec).collect()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        self.index(x, y).ok().map(|index| self.cells[index])
    }

    /// Out-of-bounds positions read as dead.
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.get(x, y).unwrap_or(false)
    }

    /// The cells of column `x`, top to bottom.
    pub fn column(&self, x: usize) -> Option<&[bool]> {
        if x >= self.width {
            return None;
        }
        let start = x * self.height;
        Some(&self.cells[start..start + self.height])
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn is_extinct(&self) -> bool {
        !self.cells.contains(&true)
    }

    /// Coordinates of every live cell, column by column.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let height = self.height;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(index, _)| (index / height, index % height))
    }

    /// Live cells among the in-bounds neighbours of `(x, y)`. Edges do not
    /// wrap, so corner cells have three neighbours and edge cells five.
    pub fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        let mut count = 0;
        for &(dx, dy) in &NEIGHBOUR_OFFSETS {
            if let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) {
                if self.is_alive(nx, ny) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Copy of this grid with the cell at `(x, y)` flipped.
    pub fn toggled(&self, x: usize, y: usize) -> Result<Self, GridError> {
        let index = self.index(x, y)?;
        let mut next = self.clone();
        next.cells[index] = !next.cells[index];
        Ok(next)
    }

    /// Dimensions followed by the cells packed eight to a byte.
    pub fn canonical_key(&self) -> GridKey {
        let mut bytes = Vec::with_capacity(16 + self.cells.len().div_ceil(8));
        bytes.extend_from_slice(&(self.width as u64).to_le_bytes());
        bytes.extend_from_slice(&(self.height as u64).to_le_bytes());
        for chunk in self.cells.chunks(8) {
            let mut byte = 0u8;
            for (bit, &alive) in chunk.iter().enumerate() {
                if alive {
                    byte |= 1 << bit;
                }
            }
            bytes.push(byte);
        }
        GridKey(bytes.into_boxed_slice())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                f.write_str(if self.is_alive(x, y) { "■" } else { "□" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
