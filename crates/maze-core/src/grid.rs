use crate::{Cell, Result, SearchError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Classification of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Free,
    Occupied,
    Start,
    Goal,
}

impl CellKind {
    /// Decode the numeric value used by the text encoding
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(CellKind::Free),
            1 => Some(CellKind::Occupied),
            2 => Some(CellKind::Start),
            3 => Some(CellKind::Goal),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            CellKind::Free => 0,
            CellKind::Occupied => 1,
            CellKind::Start => 2,
            CellKind::Goal => 3,
        }
    }
}

/// A rectangular occupancy grid, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellKind>,
}

impl Grid {
    /// Create a grid of free cells
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CellKind::Free; rows * cols],
        }
    }

    /// Create a grid of occupied cells
    pub fn filled(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CellKind::Occupied; rows * cols],
        }
    }

    /// Build a grid from rows of numeric codes
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        let first = rows.first().ok_or(SearchError::EmptyGrid)?;
        let cols = first.len();
        if cols == 0 {
            return Err(SearchError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(SearchError::RaggedRow {
                    row: r,
                    expected: cols,
                    found: row.len(),
                });
            }
            for &code in row {
                let kind = CellKind::from_code(code as i64).ok_or(SearchError::UnknownCellCode {
                    line: r + 1,
                    code: code as i64,
                })?;
                cells.push(kind);
            }
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Parse the whitespace separated text encoding.
    ///
    /// One line per row. Blank lines and `#` comments are skipped. Values may
    /// be written as floats (`1.0`, `0.000e+00`) as long as they are integral.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows: Vec<Vec<CellKind>> = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let content = raw.split('#').next().unwrap_or("").trim();
            if content.is_empty() {
                continue;
            }

            let mut row = Vec::new();
            for token in content.split(|c: char| c.is_whitespace() || c == ',') {
                if token.is_empty() {
                    continue;
                }
                let code = parse_code(token).ok_or_else(|| SearchError::BadToken {
                    line,
                    token: token.to_string(),
                })?;
                let kind =
                    CellKind::from_code(code).ok_or(SearchError::UnknownCellCode { line, code })?;
                row.push(kind);
            }

            if let Some(first) = rows.first() {
                if row.len() != first.len() {
                    return Err(SearchError::RaggedRow {
                        row: rows.len(),
                        expected: first.len(),
                        found: row.len(),
                    });
                }
            }
            rows.push(row);
        }

        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        if cols == 0 {
            return Err(SearchError::EmptyGrid);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Read and parse a grid file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Classification of `cell`; out-of-bounds cells read as occupied
    pub fn kind(&self, cell: Cell) -> CellKind {
        if self.in_bounds(cell) {
            self.cells[cell.row * self.cols + cell.col]
        } else {
            CellKind::Occupied
        }
    }

    pub fn set(&mut self, cell: Cell, kind: CellKind) {
        if self.in_bounds(cell) {
            self.cells[cell.row * self.cols + cell.col] = kind;
        }
    }

    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.kind(cell) == CellKind::Occupied
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.cols).map(move |c| Cell::new(r, c)))
    }

    fn find_all(&self, kind: CellKind) -> impl Iterator<Item = Cell> + '_ {
        self.cells().filter(move |&c| self.kind(c) == kind)
    }

    /// First start cell, if any
    pub fn start(&self) -> Option<Cell> {
        self.find_all(CellKind::Start).next()
    }

    /// First goal cell, if any
    pub fn goal(&self) -> Option<Cell> {
        self.find_all(CellKind::Goal).next()
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&k| k == kind).count()
    }

    /// The unique start and goal cells.
    ///
    /// This is the one pre-run check: missing or repeated endpoints are
    /// configuration errors, reported before any search state exists.
    pub fn endpoints(&self) -> Result<(Cell, Cell)> {
        let mut starts = self.find_all(CellKind::Start);
        let start = starts.next().ok_or(SearchError::MissingStart)?;
        if let Some(second) = starts.next() {
            return Err(SearchError::DuplicateStart(start, second));
        }

        let mut goals = self.find_all(CellKind::Goal);
        let goal = goals.next().ok_or(SearchError::MissingGoal)?;
        if let Some(second) = goals.next() {
            return Err(SearchError::DuplicateGoal(goal, second));
        }

        Ok((start, goal))
    }
}

fn parse_code(token: &str) -> Option<i64> {
    if let Ok(v) = token.parse::<i64>() {
        return Some(v);
    }
    let v = token.parse::<f64>().ok()?;
    if v.is_finite() && v.fract() == 0.0 {
        Some(v as i64)
    } else {
        None
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for r in 0..self.rows {
            for c in 0..self.cols {
                if c > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.kind(Cell::new(r, c)).code())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Grid {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integers() {
        let grid = Grid::parse("2 0 1\n0 0 3\n").unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.kind(Cell::new(0, 2)), CellKind::Occupied);
        assert_eq!(grid.start(), Some(Cell::new(0, 0)));
        assert_eq!(grid.goal(), Some(Cell::new(1, 2)));
    }

    #[test]
    fn test_parse_loadtxt_floats() {
        let text = "# saved with numpy\n\
                    2.000000000000000000e+00 0.000000000000000000e+00\n\
                    \n\
                    1.0 3.0\n";
        let grid = Grid::parse(text).unwrap();
        assert_eq!(grid.rows(), 2);
        assert!(grid.is_blocked(Cell::new(1, 0)));
        assert_eq!(grid.endpoints().unwrap(), (Cell::new(0, 0), Cell::new(1, 1)));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Grid::parse(""), Err(SearchError::EmptyGrid)));
        assert!(matches!(
            Grid::parse("0 0\n0"),
            Err(SearchError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            })
        ));
        assert!(matches!(
            Grid::parse("0 x"),
            Err(SearchError::BadToken { line: 1, .. })
        ));
        assert!(matches!(
            Grid::parse("0 0\n0 0.5"),
            Err(SearchError::BadToken { line: 2, .. })
        ));
        assert!(matches!(
            Grid::parse("0 7"),
            Err(SearchError::UnknownCellCode { line: 1, code: 7 })
        ));
    }

    #[test]
    fn test_endpoints_validation() {
        let no_start = Grid::parse("0 0\n0 3").unwrap();
        assert!(matches!(no_start.endpoints(), Err(SearchError::MissingStart)));

        let no_goal = Grid::parse("2 0\n0 0").unwrap();
        assert!(matches!(no_goal.endpoints(), Err(SearchError::MissingGoal)));

        let two_starts = Grid::parse("2 2\n0 3").unwrap();
        assert!(matches!(
            two_starts.endpoints(),
            Err(SearchError::DuplicateStart(..))
        ));

        let two_goals = Grid::parse("2 3\n3 0").unwrap();
        let err = two_goals.endpoints().unwrap_err();
        assert!(err.is_configuration());
        assert!(matches!(err, SearchError::DuplicateGoal(..)));
    }

    #[test]
    fn test_out_of_bounds_is_blocked() {
        let grid = Grid::new(2, 2);
        assert!(!grid.is_blocked(Cell::new(1, 1)));
        assert!(grid.is_blocked(Cell::new(2, 0)));
        assert!(!grid.in_bounds(Cell::new(0, 2)));
    }

    #[test]
    fn test_display_round_trips() {
        let text = "2 0 1\n1 0 3\n";
        let grid = Grid::parse(text).unwrap();
        assert_eq!(grid.to_string(), text);
    }

    #[test]
    fn test_from_rows() {
        let grid = Grid::from_rows(&[vec![2, 1], vec![0, 3]]).unwrap();
        assert_eq!(grid.count(CellKind::Occupied), 1);
        assert!(matches!(
            Grid::from_rows(&[vec![0, 0], vec![0]]),
            Err(SearchError::RaggedRow { .. })
        ));
        assert!(matches!(Grid::from_rows(&[]), Err(SearchError::EmptyGrid)));
    }
}
