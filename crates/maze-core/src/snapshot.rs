use crate::{Cell, CellKind, Grid, SearchState};
use serde::{Deserialize, Serialize};

/// How a cell should be painted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellRole {
    Wall,
    Free,
    Start,
    Goal,
    Frontier,
    Explored,
    Path,
}

impl From<CellKind> for CellRole {
    fn from(kind: CellKind) -> Self {
        match kind {
            CellKind::Free => CellRole::Free,
            CellKind::Occupied => CellRole::Wall,
            CellKind::Start => CellRole::Start,
            CellKind::Goal => CellRole::Goal,
        }
    }
}

/// Read-only picture of a search, one role per cell.
///
/// Path beats explored, explored beats frontier, and anything else shows
/// its grid classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    rows: usize,
    cols: usize,
    base: Vec<CellRole>,
    roles: Vec<CellRole>,
    path: Vec<Cell>,
}

impl Snapshot {
    pub(crate) fn capture(grid: &Grid, state: &SearchState) -> Self {
        let base: Vec<CellRole> = grid.cells().map(|c| CellRole::from(grid.kind(c))).collect();
        let mut roles = base.clone();
        let cols = grid.cols();

        let mut paint = |cell: Cell, role: CellRole| {
            if grid.in_bounds(cell) {
                roles[cell.row * cols + cell.col] = role;
            }
        };
        for entry in state.frontier() {
            paint(entry.cell, CellRole::Frontier);
        }
        for &cell in state.explored() {
            paint(cell, CellRole::Explored);
        }
        for &cell in state.path() {
            paint(cell, CellRole::Path);
        }

        Self {
            rows: grid.rows(),
            cols,
            base,
            roles,
            path: state.path().to_vec(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn role(&self, cell: Cell) -> CellRole {
        if cell.row < self.rows && cell.col < self.cols {
            self.roles[cell.row * self.cols + cell.col]
        } else {
            CellRole::Wall
        }
    }

    pub fn count(&self, role: CellRole) -> usize {
        self.roles.iter().filter(|&&r| r == role).count()
    }

    /// The same picture with only the first `n` path cells marked, for
    /// drawing the solution one cell at a time. Hidden path cells show as
    /// explored.
    pub fn with_path_prefix(&self, n: usize) -> Snapshot {
        let mut out = self.clone();
        for cell in self.path.iter().skip(n) {
            out.roles[cell.row * self.cols + cell.col] = CellRole::Explored;
        }
        out
    }

    /// Solution path in start-to-goal order; empty unless solved
    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    /// Classification of the cell ignoring search progress
    pub fn base_role(&self, cell: Cell) -> CellRole {
        if cell.row < self.rows && cell.col < self.cols {
            self.base[cell.row * self.cols + cell.col]
        } else {
            CellRole::Wall
        }
    }
}
