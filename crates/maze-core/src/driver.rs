//! Run loop around a [`SearchEngine`].
//!
//! The driver validates the grid once, then steps the engine until it
//! finishes or the step budget runs out. Running out of budget is reported
//! separately from running out of frontier.

use crate::{Cell, Grid, Result, SearchEngine, StepStatus, Strategy};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default step budget
pub const DEFAULT_STEP_BUDGET: usize = 100_000;

/// Per-run settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Maximum number of `step()` calls before giving up
    pub step_budget: usize,
    /// Front-ends reveal the solution one cell per tick
    pub reveal_path: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            step_budget: DEFAULT_STEP_BUDGET,
            reveal_path: true,
        }
    }
}

impl RunConfig {
    pub fn with_step_budget(mut self, step_budget: usize) -> Self {
        self.step_budget = step_budget;
        self
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Goal reached
    Solved,
    /// Frontier exhausted; the goal is unreachable
    NoPath,
    /// Step budget used up while the search was still going
    BudgetExhausted,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Solved => write!(f, "Solved"),
            Outcome::NoPath => write!(f, "No path"),
            Outcome::BudgetExhausted => write!(f, "Timeout"),
        }
    }
}

/// Summary of a finished (or abandoned) run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    pub strategy: Strategy,
    pub outcome: Outcome,
    /// Number of `step()` calls made
    pub steps: usize,
    pub cost: usize,
    pub expanded: usize,
    pub max_frontier_size: usize,
    pub max_nodes_in_memory: usize,
    pub max_depth: usize,
    pub path: Vec<Cell>,
}

impl std::fmt::Display for SearchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.outcome == Outcome::BudgetExhausted {
            return writeln!(f, "Timeout after {} steps", self.steps);
        }
        writeln!(f, "------------------------")?;
        match self.outcome {
            Outcome::Solved => writeln!(f, "Found Path with {} cost", self.cost)?,
            _ => writeln!(f, "No path found")?,
        }
        writeln!(f, "Expanded {} nodes", self.expanded)?;
        writeln!(f, "Max Frontier size {}", self.max_frontier_size)?;
        writeln!(f, "Max node memory size {}", self.max_nodes_in_memory)?;
        writeln!(f, "Max depth {}", self.max_depth)?;
        writeln!(f, "------------------------")
    }
}

/// Owns an engine for one grid and steps it under a budget
#[derive(Debug, Clone)]
pub struct Driver {
    engine: SearchEngine,
    grid: Grid,
    start: Cell,
    goal: Cell,
    config: RunConfig,
    steps: usize,
}

impl Driver {
    /// Validate the grid's endpoints and reset a fresh engine on it.
    ///
    /// Missing or repeated start/goal cells are returned as errors here,
    /// before any search state exists.
    pub fn new(grid: Grid, strategy: Strategy, config: RunConfig) -> Result<Self> {
        let (start, goal) = grid.endpoints()?;
        let mut engine = SearchEngine::new(strategy);
        engine.reset(grid.clone(), Some(start), Some(goal));
        Ok(Self {
            engine,
            grid,
            start,
            goal,
            config,
            steps: 0,
        })
    }

    /// Start over on the same grid, optionally with another strategy
    pub fn restart(&mut self, strategy: Strategy) {
        self.engine = SearchEngine::new(strategy);
        self.engine
            .reset(self.grid.clone(), Some(self.start), Some(self.goal));
        self.steps = 0;
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn budget_exhausted(&self) -> bool {
        !self.engine.is_done() && self.steps >= self.config.step_budget
    }

    /// The run has ended one way or another
    pub fn is_finished(&self) -> bool {
        self.engine.is_done() || self.budget_exhausted()
    }

    /// Advance by one step unless finished
    pub fn step(&mut self) -> StepStatus {
        if self.is_finished() {
            return StepStatus::Idle;
        }
        self.steps += 1;
        let status = self.engine.step();
        if self.budget_exhausted() {
            warn!(
                budget = self.config.step_budget,
                strategy = self.engine.strategy().name(),
                "step budget exhausted"
            );
        }
        status
    }

    /// Step to the end and report
    pub fn run(&mut self) -> SearchReport {
        self.run_with(|_| {})
    }

    /// Step to the end, calling `observer` after every step
    pub fn run_with(&mut self, mut observer: impl FnMut(&SearchEngine)) -> SearchReport {
        while !self.is_finished() {
            self.step();
            observer(&self.engine);
        }
        let report = self.report();
        info!(
            strategy = report.strategy.name(),
            outcome = %report.outcome,
            steps = report.steps,
            "run finished"
        );
        report
    }

    /// Outcome so far; `None` while the run is still going
    pub fn outcome(&self) -> Option<Outcome> {
        if self.engine.is_solved() {
            Some(Outcome::Solved)
        } else if self.engine.is_done() {
            Some(Outcome::NoPath)
        } else if self.budget_exhausted() {
            Some(Outcome::BudgetExhausted)
        } else {
            None
        }
    }

    /// Report of the current state. An unfinished run reports as budget
    /// exhausted.
    pub fn report(&self) -> SearchReport {
        let metrics = self.engine.metrics();
        SearchReport {
            strategy: self.engine.strategy(),
            outcome: self.outcome().unwrap_or(Outcome::BudgetExhausted),
            steps: self.steps,
            cost: metrics.cost,
            expanded: self.engine.expanded(),
            max_frontier_size: metrics.max_frontier_size,
            max_nodes_in_memory: metrics.max_nodes_in_memory,
            max_depth: metrics.max_depth,
            path: self.engine.path().to_vec(),
        }
    }
}
