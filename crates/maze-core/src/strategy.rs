use crate::{Cell, FrontierEntry, SearchError};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Frontier expansion policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// FIFO queue, h = 0
    BreadthFirst,
    /// Lowest g first, h = 0
    UniformCost,
    /// Lowest g + h first, h = Manhattan distance to the goal
    AStar,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::BreadthFirst, Strategy::UniformCost, Strategy::AStar];

    /// Identifier accepted on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::BreadthFirst => "bfs",
            Strategy::UniformCost => "ucs",
            Strategy::AStar => "astar",
        }
    }

    /// Heuristic estimate of the remaining cost from `cell` to `goal`
    pub fn heuristic(&self, cell: Cell, goal: Cell) -> usize {
        match self {
            Strategy::BreadthFirst | Strategy::UniformCost => 0,
            Strategy::AStar => cell.manhattan(goal),
        }
    }

    /// Index of the frontier entry to expand next.
    ///
    /// The frontier is kept in insertion order, so taking the first minimum
    /// breaks priority ties by insertion order.
    pub fn select(&self, frontier: &VecDeque<FrontierEntry>) -> Option<usize> {
        if frontier.is_empty() {
            return None;
        }
        match self {
            Strategy::BreadthFirst => Some(0),
            Strategy::UniformCost => first_min_by_key(frontier, |e| e.g),
            Strategy::AStar => first_min_by_key(frontier, |e| e.f()),
        }
    }

    /// Next strategy in [`Strategy::ALL`], wrapping around
    pub fn next(&self) -> Strategy {
        let idx = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

fn first_min_by_key(
    frontier: &VecDeque<FrontierEntry>,
    key: impl Fn(&FrontierEntry) -> usize,
) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (idx, entry) in frontier.iter().enumerate() {
        let k = key(entry);
        match best {
            Some((_, best_k)) if best_k <= k => {}
            _ => best = Some((idx, k)),
        }
    }
    best.map(|(idx, _)| idx)
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::BreadthFirst => write!(f, "Breadth-first"),
            Strategy::UniformCost => write!(f, "Uniform-cost"),
            Strategy::AStar => write!(f, "A*"),
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(Strategy::BreadthFirst),
            "ucs" | "uniform-cost" | "dijkstra" => Ok(Strategy::UniformCost),
            "astar" | "a*" | "a-star" => Ok(Strategy::AStar),
            // the abstract base exists but cannot step
            "base" => Err(SearchError::StrategyNotImplemented(s.to_string())),
            _ => Err(SearchError::UnknownStrategy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(row: usize, h: usize, g: usize) -> FrontierEntry {
        let cell = Cell::new(row, 0);
        FrontierEntry {
            cell,
            h,
            g,
            parent: cell,
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("bfs".parse::<Strategy>().unwrap(), Strategy::BreadthFirst);
        assert_eq!("UCS".parse::<Strategy>().unwrap(), Strategy::UniformCost);
        assert_eq!("dijkstra".parse::<Strategy>().unwrap(), Strategy::UniformCost);
        assert_eq!("astar".parse::<Strategy>().unwrap(), Strategy::AStar);
        assert_eq!("A*".parse::<Strategy>().unwrap(), Strategy::AStar);

        for s in Strategy::ALL {
            assert_eq!(s.name().parse::<Strategy>().unwrap(), s);
        }
    }

    #[test]
    fn test_unknown_and_abstract_names_differ() {
        let unknown = "dfs".parse::<Strategy>().unwrap_err();
        assert!(matches!(unknown, SearchError::UnknownStrategy(ref n) if n == "dfs"));

        let base = "base".parse::<Strategy>().unwrap_err();
        assert!(matches!(base, SearchError::StrategyNotImplemented(_)));

        assert_ne!(unknown.to_string(), base.to_string());
        assert!(unknown.is_configuration());
        assert!(base.is_configuration());
    }

    #[test]
    fn test_select_rules() {
        let frontier: VecDeque<FrontierEntry> =
            vec![entry(0, 5, 3), entry(1, 1, 4), entry(2, 9, 1), entry(3, 0, 5)].into();

        assert_eq!(Strategy::BreadthFirst.select(&frontier), Some(0));
        assert_eq!(Strategy::UniformCost.select(&frontier), Some(2));
        // f = 8, 5, 10, 5: first of the tied entries wins
        assert_eq!(Strategy::AStar.select(&frontier), Some(1));

        assert_eq!(Strategy::AStar.select(&VecDeque::new()), None);
    }

    #[test]
    fn test_heuristic() {
        let goal = Cell::new(4, 4);
        assert_eq!(Strategy::AStar.heuristic(Cell::new(0, 0), goal), 8);
        assert_eq!(Strategy::UniformCost.heuristic(Cell::new(0, 0), goal), 0);
        assert_eq!(Strategy::BreadthFirst.heuristic(Cell::new(0, 0), goal), 0);
    }

    #[test]
    fn test_next_cycles() {
        assert_eq!(Strategy::BreadthFirst.next(), Strategy::UniformCost);
        assert_eq!(Strategy::AStar.next(), Strategy::BreadthFirst);
    }
}
