//! Properties every strategy must satisfy, checked step by step.

use maze_core::{
    builtin_maze, Cell, Driver, Grid, MazeGenerator, Outcome, RunConfig, SearchEngine, SearchError,
    Strategy, MAZE_COUNT,
};
use std::collections::HashSet;

fn engine_on(grid: &Grid, strategy: Strategy) -> SearchEngine {
    let (start, goal) = grid.endpoints().unwrap();
    let mut engine = SearchEngine::new(strategy);
    engine.reset(grid.clone(), Some(start), Some(goal));
    engine
}

fn assert_valid_path(grid: &Grid, engine: &SearchEngine) {
    let (start, goal) = grid.endpoints().unwrap();
    let path = engine.path();

    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&goal));
    assert_eq!(engine.cost(), path.len() - 1);
    for pair in path.windows(2) {
        assert!(pair[0].is_adjacent(pair[1]), "{} -> {}", pair[0], pair[1]);
    }
    for cell in path {
        assert!(!grid.is_blocked(*cell));
    }
    let unique: HashSet<Cell> = path.iter().copied().collect();
    assert_eq!(unique.len(), path.len(), "path revisits a cell");
}

#[test]
fn frontier_unique_and_explored_monotonic() {
    for id in 1..=MAZE_COUNT {
        let grid = builtin_maze(id).unwrap();
        for strategy in Strategy::ALL {
            let mut engine = engine_on(&grid, strategy);
            let mut last_explored = 0;
            let mut last_metrics = engine.metrics();
            let bound = grid.rows() * grid.cols() + 1;

            for _ in 0..bound {
                if engine.is_done() {
                    break;
                }
                engine.step();

                let cells = engine.frontier_cells();
                let unique: HashSet<Cell> = cells.iter().copied().collect();
                assert_eq!(unique.len(), cells.len(), "duplicate frontier cell");
                for cell in &cells {
                    assert!(!engine.state().is_explored(*cell));
                }

                assert!(engine.expanded() >= last_explored);
                last_explored = engine.expanded();

                let m = engine.metrics();
                assert!(m.max_depth >= last_metrics.max_depth);
                assert!(m.max_frontier_size >= last_metrics.max_frontier_size);
                assert!(m.max_nodes_in_memory >= last_metrics.max_nodes_in_memory);
                last_metrics = m;
            }

            assert!(engine.is_done(), "maze {id} {strategy} did not terminate");
            assert_valid_path(&grid, &engine);
        }
    }
}

#[test]
fn breadth_first_expands_in_depth_order() {
    for id in 1..=MAZE_COUNT {
        let grid = builtin_maze(id).unwrap();
        let mut engine = engine_on(&grid, Strategy::BreadthFirst);
        while !engine.is_done() {
            engine.step();
        }

        let depths: Vec<usize> = engine
            .explored()
            .iter()
            .map(|&c| engine.depth_of(c).unwrap())
            .collect();
        assert!(
            depths.windows(2).all(|w| w[0] <= w[1]),
            "maze {id}: breadth-first layering broken"
        );
    }
}

#[test]
fn astar_and_uniform_cost_match_breadth_first_cost() {
    for id in 1..=MAZE_COUNT {
        let grid = builtin_maze(id).unwrap();
        let reports: Vec<_> = Strategy::ALL
            .iter()
            .map(|&s| {
                Driver::new(grid.clone(), s, RunConfig::default())
                    .unwrap()
                    .run()
            })
            .collect();

        for report in &reports {
            assert_eq!(report.outcome, Outcome::Solved);
            assert_eq!(report.cost, reports[0].cost, "maze {id} {}", report.strategy);
        }
        // the heuristic never makes A* expand more than breadth-first here
        assert!(reports[2].expanded <= reports[0].expanded);
    }
}

#[test]
fn random_mazes_agree_on_cost() {
    for seed in 0..20 {
        let mut generator = MazeGenerator::with_seed(seed);
        generator.config_mut().rows = 15;
        generator.config_mut().cols = 21;
        generator.config_mut().loop_factor = 0.3;
        let grid = generator.generate();

        let costs: Vec<usize> = Strategy::ALL
            .iter()
            .map(|&s| {
                let mut engine = engine_on(&grid, s);
                while !engine.is_done() {
                    engine.step();
                }
                assert_valid_path(&grid, &engine);
                engine.cost()
            })
            .collect();
        assert!(costs.iter().all(|&c| c == costs[0]), "seed {seed}: {costs:?}");
    }
}

#[test]
fn open_five_by_five() {
    let grid = Grid::parse(
        "2 0 0 0 0\n\
         0 0 0 0 0\n\
         0 0 0 0 0\n\
         0 0 0 0 0\n\
         0 0 0 0 3",
    )
    .unwrap();

    for strategy in Strategy::ALL {
        let report = Driver::new(grid.clone(), strategy, RunConfig::default())
            .unwrap()
            .run();
        assert_eq!(report.outcome, Outcome::Solved);
        assert_eq!(report.path.len(), 9);
        assert_eq!(report.cost, 8);
        assert_eq!(report.path[0], Cell::new(0, 0));
        assert_eq!(report.path[8], Cell::new(4, 4));
    }
}

#[test]
fn walled_goal_reports_no_path() {
    let grid = Grid::parse(
        "2 0 0 0 0\n\
         0 0 0 0 0\n\
         0 0 0 1 0\n\
         0 0 1 3 1\n\
         0 0 0 1 0",
    )
    .unwrap();

    for strategy in Strategy::ALL {
        let report = Driver::new(grid.clone(), strategy, RunConfig::default())
            .unwrap()
            .run();
        assert_eq!(report.outcome, Outcome::NoPath);
        assert!(report.path.is_empty());
        assert_eq!(report.cost, 0);
    }
}

#[test]
fn missing_goal_is_configuration_error() {
    let grid = Grid::parse("0 0 0\n0 2 0\n0 0 0").unwrap();
    for strategy in Strategy::ALL {
        let err = Driver::new(grid.clone(), strategy, RunConfig::default()).unwrap_err();
        assert!(err.is_configuration());
        assert!(matches!(err, SearchError::MissingGoal));
    }
}
