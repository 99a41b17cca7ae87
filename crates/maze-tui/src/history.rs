use maze_core::{Outcome, SearchReport, Strategy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Oldest records are dropped beyond this many
pub const MAX_HISTORY: usize = 500;

/// One finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub id: u64,
    /// "maze 3" or the grid file name
    pub maze: String,
    pub strategy: Strategy,
    pub outcome: Outcome,
    pub steps: usize,
    pub cost: usize,
    pub expanded: usize,
    pub max_frontier_size: usize,
    pub max_nodes_in_memory: usize,
    pub max_depth: usize,
    /// Unix timestamp of the run
    pub timestamp: u64,
}

/// Past runs, newest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunHistory {
    pub history: Vec<RunRecord>,
    next_id: u64,
}

impl RunHistory {
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
            next_id: 1,
        }
    }

    /// Get the save file path
    fn save_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("maze_search_history.json")
    }

    /// Load history from file; a missing or unreadable file starts empty
    pub fn load() -> Self {
        match fs::read_to_string(Self::save_path()) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!("ignoring unreadable run history: {}", e);
                Self::new()
            }),
            Err(_) => Self::new(),
        }
    }

    /// Save history to file
    pub fn save(&self) {
        let path = Self::save_path();
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, json) {
                    warn!("could not write {}: {}", path.display(), e);
                }
            }
            Err(e) => warn!("could not serialize run history: {}", e),
        }
    }

    /// Record a finished run
    pub fn record(&mut self, maze: &str, report: &SearchReport) -> &RunRecord {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let record = RunRecord {
            id: self.next_id.max(1),
            maze: maze.to_string(),
            strategy: report.strategy,
            outcome: report.outcome,
            steps: report.steps,
            cost: report.cost,
            expanded: report.expanded,
            max_frontier_size: report.max_frontier_size,
            max_nodes_in_memory: report.max_nodes_in_memory,
            max_depth: report.max_depth,
            timestamp,
        };
        self.next_id = record.id + 1;
        debug!(id = record.id, maze, strategy = record.strategy.name(), "recorded run");

        self.history.insert(0, record);
        self.history.truncate(MAX_HISTORY);
        &self.history[0]
    }

    /// Solved run of `strategy` on `maze` with the fewest expansions
    pub fn best_for(&self, maze: &str, strategy: Strategy) -> Option<&RunRecord> {
        self.history
            .iter()
            .filter(|r| r.maze == maze && r.strategy == strategy && r.outcome == Outcome::Solved)
            .min_by_key(|r| r.expanded)
    }
}
