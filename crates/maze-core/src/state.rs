use crate::{Cell, Grid};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// A discovered cell waiting to be expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontierEntry {
    pub cell: Cell,
    /// Heuristic estimate to the goal
    pub h: usize,
    /// Path cost from the start
    pub g: usize,
    pub parent: Cell,
}

impl FrontierEntry {
    pub fn f(&self) -> usize {
        self.g + self.h
    }
}

/// Search metrics; every field only grows during a run except `cost`,
/// which is written once on success
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub cost: usize,
    pub max_depth: usize,
    pub max_frontier_size: usize,
    pub max_nodes_in_memory: usize,
}

/// Mutable state of one search run
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub(crate) grid: Option<Grid>,
    pub(crate) start: Option<Cell>,
    pub(crate) goal: Option<Cell>,
    /// Insertion ordered; never holds the same cell twice
    pub(crate) frontier: VecDeque<FrontierEntry>,
    pub(crate) in_frontier: HashSet<Cell>,
    /// Expansion order
    pub(crate) explored: Vec<Cell>,
    pub(crate) explored_set: HashSet<Cell>,
    pub(crate) parent_of: HashMap<Cell, Cell>,
    pub(crate) depth_of: HashMap<Cell, usize>,
    pub(crate) done: bool,
    pub(crate) path: Vec<Cell>,
    pub(crate) metrics: Metrics,
}

impl SearchState {
    /// Fresh state with the start cell as the only frontier entry.
    /// Endpoints outside the grid are dropped.
    pub fn new(grid: Option<Grid>, start: Option<Cell>, goal: Option<Cell>) -> Self {
        let on_grid = |cell: &Cell| grid.as_ref().map_or(true, |g| g.in_bounds(*cell));
        let start = start.filter(on_grid);
        let goal = goal.filter(on_grid);
        let mut state = Self {
            grid,
            start,
            goal,
            ..Self::default()
        };
        if let Some(start) = start {
            state.push(FrontierEntry {
                cell: start,
                h: 0,
                g: 0,
                parent: start,
            });
            state.depth_of.insert(start, 0);
        }
        state
    }

    /// A grid, start and goal are all present
    pub fn is_configured(&self) -> bool {
        self.grid.is_some() && self.start.is_some() && self.goal.is_some()
    }

    pub(crate) fn push(&mut self, entry: FrontierEntry) {
        debug_assert!(!self.in_frontier.contains(&entry.cell));
        self.in_frontier.insert(entry.cell);
        self.frontier.push_back(entry);
    }

    pub(crate) fn take(&mut self, idx: usize) -> Option<FrontierEntry> {
        let entry = self.frontier.remove(idx)?;
        self.in_frontier.remove(&entry.cell);
        Some(entry)
    }

    /// Already expanded or waiting in the frontier
    pub(crate) fn is_discovered(&self, cell: Cell) -> bool {
        self.explored_set.contains(&cell) || self.in_frontier.contains(&cell)
    }

    pub(crate) fn mark_explored(&mut self, cell: Cell) {
        if self.explored_set.insert(cell) {
            self.explored.push(cell);
        }
    }

    pub(crate) fn update_memory_metrics(&mut self) {
        let frontier = self.frontier.len();
        self.metrics.max_frontier_size = self.metrics.max_frontier_size.max(frontier);
        self.metrics.max_nodes_in_memory = self
            .metrics
            .max_nodes_in_memory
            .max(frontier + self.explored.len());
    }

    pub fn frontier(&self) -> &VecDeque<FrontierEntry> {
        &self.frontier
    }

    pub fn explored(&self) -> &[Cell] {
        &self.explored
    }

    pub fn is_explored(&self, cell: Cell) -> bool {
        self.explored_set.contains(&cell)
    }

    pub fn in_frontier(&self, cell: Cell) -> bool {
        self.in_frontier.contains(&cell)
    }

    pub fn parent_of(&self) -> &HashMap<Cell, Cell> {
        &self.parent_of
    }

    pub fn depth_of(&self, cell: Cell) -> Option<usize> {
        self.depth_of.get(&cell).copied()
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub fn start(&self) -> Option<Cell> {
        self.start
    }

    pub fn goal(&self) -> Option<Cell> {
        self.goal
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_seeds_frontier_with_start() {
        let start = Cell::new(1, 1);
        let state = SearchState::new(Some(Grid::new(3, 3)), Some(start), Some(Cell::new(2, 2)));

        assert!(state.is_configured());
        assert_eq!(state.frontier().len(), 1);
        let entry = state.frontier()[0];
        assert_eq!((entry.cell, entry.h, entry.g, entry.parent), (start, 0, 0, start));
        assert_eq!(state.depth_of(start), Some(0));
        assert!(state.explored().is_empty());
        assert!(!state.is_done());
        assert_eq!(state.metrics(), Metrics::default());
    }

    #[test]
    fn test_unset_start_leaves_empty_state() {
        let state = SearchState::new(None, None, None);
        assert!(!state.is_configured());
        assert!(state.frontier().is_empty());
        assert!(state.depth_of.is_empty());
    }

    #[test]
    fn test_off_grid_endpoints_dropped() {
        let grid = Grid::new(3, 3);
        let state = SearchState::new(Some(grid), Some(Cell::new(5, 5)), Some(Cell::new(0, 3)));

        assert!(!state.is_configured());
        assert_eq!(state.start(), None);
        assert_eq!(state.goal(), None);
        assert!(state.frontier().is_empty());
    }

    #[test]
    fn test_take_clears_membership() {
        let a = Cell::new(0, 0);
        let mut state = SearchState::new(Some(Grid::new(2, 2)), Some(a), Some(Cell::new(1, 1)));
        assert!(state.is_discovered(a));
        let entry = state.take(0).unwrap();
        assert_eq!(entry.cell, a);
        assert!(!state.in_frontier(a));
        assert!(!state.is_discovered(a));

        state.mark_explored(a);
        state.mark_explored(a);
        assert_eq!(state.explored(), &[a]);
        assert!(state.is_discovered(a));
    }
}
