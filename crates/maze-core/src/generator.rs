use crate::{Cell, CellKind, Grid, Result, SearchError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of built-in mazes
pub const MAZE_COUNT: usize = 6;

/// Configuration for maze generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Grid height, at least 3
    pub rows: usize,
    /// Grid width, at least 3
    pub cols: usize,
    /// Chance of knocking out each remaining interior wall after carving.
    /// 0.0 gives a perfect maze with exactly one route between any two cells.
    pub loop_factor: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rows: 33,
            cols: 33,
            loop_factor: 0.1,
        }
    }
}

impl GeneratorConfig {
    pub fn with_size(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn with_loop_factor(mut self, loop_factor: f64) -> Self {
        self.loop_factor = loop_factor;
        self
    }
}

/// Random maze generator
pub struct MazeGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl Default for MazeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MazeGenerator {
    /// Create a new generator with default configuration
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator with custom configuration
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator with a specific seed for reproducibility
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config_mut(&mut self) -> &mut GeneratorConfig {
        &mut self.config
    }

    /// Generate a maze with start at (1, 1) and goal in the far corner room.
    ///
    /// Rooms sit on odd coordinates and are joined by randomized depth-first
    /// carving, so every room is reachable from the start.
    pub fn generate(&mut self) -> Grid {
        let rows = self.config.rows.max(3);
        let cols = self.config.cols.max(3);
        let mut grid = Grid::filled(rows, cols);

        let last_row = last_room(rows);
        let last_col = last_room(cols);
        let start = Cell::new(1, 1);
        let goal = Cell::new(last_row, last_col);

        grid.set(start, CellKind::Free);
        let mut stack = vec![start];
        while let Some(&current) = stack.last() {
            let mut next: Vec<(Cell, Cell)> = room_steps(current, last_row, last_col)
                .filter(|(_, room)| grid.is_blocked(*room))
                .collect();

            if next.is_empty() {
                stack.pop();
                continue;
            }

            next.shuffle(&mut self.rng);
            let (wall, room) = next[0];
            grid.set(wall, CellKind::Free);
            grid.set(room, CellKind::Free);
            stack.push(room);
        }

        let loop_factor = self.config.loop_factor.clamp(0.0, 1.0);
        if loop_factor > 0.0 {
            let mut opened = 0;
            for r in 1..rows - 1 {
                for c in 1..cols - 1 {
                    let cell = Cell::new(r, c);
                    // walls between two rooms, horizontally or vertically
                    let between = (r % 2 == 1 && c % 2 == 0 && c < last_col)
                        || (r % 2 == 0 && c % 2 == 1 && r < last_row);
                    if between && grid.is_blocked(cell) && self.rng.gen_bool(loop_factor) {
                        grid.set(cell, CellKind::Free);
                        opened += 1;
                    }
                }
            }
            debug!(opened, "knocked out extra walls");
        }

        grid.set(start, CellKind::Start);
        grid.set(goal, CellKind::Goal);
        grid
    }
}

/// Largest odd index strictly inside `0..n`
fn last_room(n: usize) -> usize {
    if n % 2 == 0 {
        n - 3
    } else {
        n - 2
    }
}

/// (wall, room) pairs two cells away in the up, down, left, right directions
fn room_steps(cell: Cell, last_row: usize, last_col: usize) -> impl Iterator<Item = (Cell, Cell)> {
    let Cell { row, col } = cell;
    let up = (row >= 3).then(|| (Cell::new(row - 1, col), Cell::new(row - 2, col)));
    let down = (row + 2 <= last_row).then(|| (Cell::new(row + 1, col), Cell::new(row + 2, col)));
    let left = (col >= 3).then(|| (Cell::new(row, col - 1), Cell::new(row, col - 2)));
    let right = (col + 2 <= last_col).then(|| (Cell::new(row, col + 1), Cell::new(row, col + 2)));
    [up, down, left, right].into_iter().flatten()
}

/// One of the numbered built-in 33x33 mazes.
///
/// The same id always yields the same grid. Maze 1 is a perfect maze;
/// higher ids have progressively more loops.
pub fn builtin_maze(id: usize) -> Result<Grid> {
    if !(1..=MAZE_COUNT).contains(&id) {
        return Err(SearchError::MazeIdOutOfRange {
            id,
            max: MAZE_COUNT,
        });
    }

    const LOOP_FACTORS: [f64; MAZE_COUNT] = [0.0, 0.05, 0.1, 0.15, 0.25, 0.4];
    let mut generator = MazeGenerator::with_seed(0x6d61_7a65 + id as u64);
    generator.config_mut().loop_factor = LOOP_FACTORS[id - 1];
    Ok(generator.generate())
}
