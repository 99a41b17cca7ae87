//! Single-expansion search engine.
//!
//! One [`SearchEngine::step`] pops at most one frontier entry and probes at
//! most four neighbors. A cell is discovered once: the first expansion that
//! reaches it fixes its parent, cost and depth, and later (even cheaper)
//! routes to a cell already in the frontier are ignored. With unit step
//! costs breadth-first and uniform-cost still return shortest paths; A*
//! returns the first path it completes, which on open grids can be longer.

use crate::{path, Cell, FrontierEntry, Grid, Metrics, SearchState, Snapshot, Strategy};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// What a single [`SearchEngine::step`] call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Nothing to do: the run already finished or was never configured
    Idle,
    /// Expanded this cell and queued its new neighbors
    Expanded(Cell),
    /// Popped the goal; the path is available
    Found(Cell),
    /// Frontier ran dry without reaching the goal
    Exhausted,
}

impl StepStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepStatus::Found(_) | StepStatus::Exhausted)
    }
}

/// A strategy together with the state of its current run
#[derive(Debug, Clone)]
pub struct SearchEngine {
    strategy: Strategy,
    state: SearchState,
}

impl SearchEngine {
    /// Create an engine with no run configured
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            state: SearchState::new(None, None, None),
        }
    }

    /// Discard any previous run and start a new one.
    ///
    /// Missing endpoints are accepted and leave the engine idle; callers
    /// validate endpoints once up front (see [`Grid::endpoints`]).
    /// Endpoints outside the grid count as missing.
    pub fn reset(&mut self, grid: Grid, start: Option<Cell>, goal: Option<Cell>) {
        debug!(
            strategy = self.strategy.name(),
            rows = grid.rows(),
            cols = grid.cols(),
            ?start,
            ?goal,
            "reset"
        );
        self.state = SearchState::new(Some(grid), start, goal);
    }

    /// Perform one expansion
    pub fn step(&mut self) -> StepStatus {
        if self.state.done {
            return StepStatus::Idle;
        }
        let (Some(start), Some(goal)) = (self.state.start, self.state.goal) else {
            warn!("step() called before start and goal were set");
            return StepStatus::Idle;
        };
        let Some((rows, cols)) = self.state.grid.as_ref().map(|g| (g.rows(), g.cols())) else {
            warn!("step() called without a grid");
            return StepStatus::Idle;
        };

        let Some(idx) = self.strategy.select(&self.state.frontier) else {
            self.state.done = true;
            self.state.path.clear();
            info!(
                strategy = self.strategy.name(),
                expanded = self.state.explored.len(),
                "frontier exhausted, no path"
            );
            return StepStatus::Exhausted;
        };
        let Some(current) = self.state.take(idx) else {
            return StepStatus::Idle;
        };

        self.state.mark_explored(current.cell);

        if current.cell == goal {
            self.finish(start, current);
            return StepStatus::Found(current.cell);
        }

        let Some(depth) = self.state.depth_of(current.cell) else {
            panic!("internal invariant violated: {} was queued without a depth", current.cell);
        };
        for neighbor in current.cell.neighbors(rows, cols) {
            if self.is_blocked(neighbor) || self.state.is_discovered(neighbor) {
                continue;
            }

            self.state.push(FrontierEntry {
                cell: neighbor,
                h: self.strategy.heuristic(neighbor, goal),
                g: current.g + 1,
                parent: current.cell,
            });
            self.state.parent_of.entry(neighbor).or_insert(current.cell);
            self.state.depth_of.insert(neighbor, depth + 1);
            self.state.metrics.max_depth = self.state.metrics.max_depth.max(depth + 1);
        }

        self.state.update_memory_metrics();
        debug!(
            cell = %current.cell,
            g = current.g,
            frontier = self.state.frontier.len(),
            "expanded"
        );
        StepStatus::Expanded(current.cell)
    }

    fn is_blocked(&self, cell: Cell) -> bool {
        self.state.grid.as_ref().map_or(true, |g| g.is_blocked(cell))
    }

    fn finish(&mut self, start: Cell, current: FrontierEntry) {
        self.state.done = true;
        self.state.metrics.cost = current.g;

        let path = path::reconstruct(&self.state.parent_of, start, current.cell);
        let moves = path.len() - 1;
        if moves != current.g {
            panic!(
                "internal invariant violated: tracked cost {} but path has {} moves",
                current.g, moves
            );
        }
        self.state.metrics.cost = moves;
        self.state.path = path;

        info!(
            strategy = self.strategy.name(),
            cost = moves,
            expanded = self.state.explored.len(),
            max_frontier = self.state.metrics.max_frontier_size,
            "goal reached"
        );
    }

    // ==================== Queries ====================

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.state.grid()
    }

    pub fn frontier(&self) -> &VecDeque<FrontierEntry> {
        self.state.frontier()
    }

    /// Cells currently in the frontier, in insertion order
    pub fn frontier_cells(&self) -> Vec<Cell> {
        self.state.frontier.iter().map(|e| e.cell).collect()
    }

    /// Expanded cells in expansion order
    pub fn explored(&self) -> &[Cell] {
        self.state.explored()
    }

    pub fn is_done(&self) -> bool {
        self.state.done
    }

    /// Finished with a non-empty path
    pub fn is_solved(&self) -> bool {
        self.state.done && !self.state.path.is_empty()
    }

    /// Solution path, start to goal; empty until success
    pub fn path(&self) -> &[Cell] {
        self.state.path()
    }

    pub fn cost(&self) -> usize {
        self.state.metrics.cost
    }

    pub fn metrics(&self) -> Metrics {
        self.state.metrics
    }

    /// Number of expanded nodes
    pub fn expanded(&self) -> usize {
        self.state.explored.len()
    }

    pub fn max_depth(&self) -> usize {
        self.state.metrics.max_depth
    }

    pub fn max_frontier_size(&self) -> usize {
        self.state.metrics.max_frontier_size
    }

    pub fn max_nodes_in_memory(&self) -> usize {
        self.state.metrics.max_nodes_in_memory
    }

    pub fn depth_of(&self, cell: Cell) -> Option<usize> {
        self.state.depth_of(cell)
    }

    pub fn parent_of(&self, cell: Cell) -> Option<Cell> {
        self.state.parent_of.get(&cell).copied()
    }

    /// Role of every cell for painting; `None` before the first reset
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.state.grid().map(|grid| Snapshot::capture(grid, &self.state))
    }
}
