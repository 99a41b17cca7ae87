//! Step-wise search over 2-D occupancy grids.
//!
//! A [`SearchEngine`] explores a [`Grid`] one expansion per [`SearchEngine::step`]
//! call so that a front-end can paint the frontier and explored set between
//! steps. Three strategies share the same bookkeeping and differ only in how
//! the next frontier entry is chosen:
//!
//! - [`Strategy::BreadthFirst`]: oldest entry first
//! - [`Strategy::UniformCost`]: lowest path cost `g`
//! - [`Strategy::AStar`]: lowest `g + h` with the Manhattan heuristic
//!
//! ```
//! use maze_core::{Driver, Grid, Outcome, RunConfig, Strategy};
//!
//! let grid = Grid::parse("2 0 0\n1 1 0\n0 0 3").unwrap();
//! let mut driver = Driver::new(grid, Strategy::AStar, RunConfig::default()).unwrap();
//! let report = driver.run();
//! assert_eq!(report.outcome, Outcome::Solved);
//! assert_eq!(report.cost, 4);
//! ```

mod cell;
mod driver;
mod engine;
mod error;
mod generator;
mod grid;
mod path;
mod snapshot;
mod state;
mod strategy;

pub use cell::Cell;
pub use driver::{Driver, Outcome, RunConfig, SearchReport, DEFAULT_STEP_BUDGET};
pub use engine::{SearchEngine, StepStatus};
pub use error::{Result, SearchError};
pub use generator::{builtin_maze, GeneratorConfig, MazeGenerator, MAZE_COUNT};
pub use grid::{CellKind, Grid};
pub use path::reconstruct;
pub use snapshot::{CellRole, Snapshot};
pub use state::{FrontierEntry, Metrics, SearchState};
pub use strategy::Strategy;
