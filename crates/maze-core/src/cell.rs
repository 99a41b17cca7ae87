use serde::{Deserialize, Serialize};

/// A (row, column) coordinate on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance |drow| + |dcol|
    pub fn manhattan(&self, other: Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Whether the two cells share an edge
    pub fn is_adjacent(&self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }

    /// In-bounds axis-aligned neighbors in the order up, down, left, right.
    ///
    /// The order is the tie-break for equally ranked frontier entries, so
    /// callers that want deterministic expansion must not reorder it.
    pub fn neighbors(&self, rows: usize, cols: usize) -> impl Iterator<Item = Cell> {
        let Cell { row, col } = *self;
        let up = row.checked_sub(1).map(|r| Cell::new(r, col));
        let down = (row + 1 < rows).then(|| Cell::new(row + 1, col));
        let left = col.checked_sub(1).map(|c| Cell::new(row, c));
        let right = (col + 1 < cols).then(|| Cell::new(row, col + 1));
        [up, down, left, right].into_iter().flatten()
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
