//! Basic example of using the maze search engine

use maze_core::{builtin_maze, Cell, Driver, Grid, RunConfig, SearchEngine, Strategy};

fn main() {
    // Parse a small grid: 0 free, 1 wall, 2 start, 3 goal
    let grid: Grid = "2 0 0 0 0\n\
                      1 1 1 1 0\n\
                      0 0 0 1 0\n\
                      0 1 0 0 0\n\
                      0 1 3 1 1"
        .parse()
        .expect("valid grid");
    println!("Parsed grid:\n{}", grid);

    // Step an engine by hand and watch the frontier grow
    let (start, goal) = grid.endpoints().expect("start and goal present");
    let mut engine = SearchEngine::new(Strategy::AStar);
    engine.reset(grid.clone(), Some(start), Some(goal));
    for _ in 0..3 {
        let status = engine.step();
        println!("{:?}: frontier {:?}", status, engine.frontier_cells());
    }

    // Let a driver finish the job for each strategy
    for strategy in Strategy::ALL {
        let mut driver = Driver::new(grid.clone(), strategy, RunConfig::default())
            .expect("grid has endpoints");
        let report = driver.run();
        println!("{}: {} steps", strategy, report.steps);
        print!("{}", report);
    }

    // Built-in mazes are deterministic
    let maze = builtin_maze(3).expect("maze 3 exists");
    let report = Driver::new(maze, Strategy::BreadthFirst, RunConfig::default())
        .expect("built-in mazes have endpoints")
        .run();
    let path: Vec<String> = report.path.iter().take(5).map(Cell::to_string).collect();
    println!("Maze 3 starts with {} ...", path.join(" -> "));
}
