//! Terminal front-end for step-wise maze search.
//!
//! ```bash
//! # Watch A* solve built-in maze 3
//! maze --maze-id 3 --algorithm astar
//!
//! # Load a grid file and print the summary only
//! maze --maze-file mazes/maze1.txt --algorithm bfs --headless
//! ```

mod app;
mod history;
mod render;
mod theme;

use app::{App, AppAction};
use clap::{ArgGroup, Parser};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use history::RunHistory;
use maze_core::{builtin_maze, Driver, Grid, RunConfig, Strategy, MAZE_COUNT};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use theme::{Theme, ThemeName};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "maze", version, about = "Watch grid search algorithms explore a maze")]
#[command(group(ArgGroup::new("maze").required(true).args(["maze_id", "maze_file"])))]
struct Args {
    /// Built-in maze number (1..=6)
    #[arg(long)]
    maze_id: Option<usize>,

    /// Grid file: one row per line, 0 free, 1 wall, 2 start, 3 goal
    #[arg(long)]
    maze_file: Option<PathBuf>,

    /// Search algorithm: bfs | ucs | astar
    #[arg(long, alias = "search-algorithm-name")]
    algorithm: String,

    /// Give up after this many steps
    #[arg(long, default_value_t = maze_core::DEFAULT_STEP_BUDGET)]
    budget: usize,

    /// Milliseconds between steps in the interactive view
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Color theme
    #[arg(long, value_enum, default_value_t = ThemeName::Dark)]
    theme: ThemeName,

    /// Run to completion without the terminal UI and print the summary
    #[arg(long)]
    headless: bool,

    /// With --headless, print the summary as JSON
    #[arg(long, requires = "headless")]
    json: bool,

    /// Show the solution at once instead of tracing it cell by cell
    #[arg(long)]
    no_reveal: bool,

    /// Do not read or write the run history file
    #[arg(long)]
    no_history: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.headless);

    exit_code(run(args))
}

/// Report a failed run once, through the logger
fn exit_code(result: maze_core::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(headless: bool) {
    let default = if headless {
        "maze=info,maze_core=info"
    } else {
        "maze=warn,maze_core=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: Args) -> maze_core::Result<()> {
    // Configuration is checked before any grid is touched
    let strategy: Strategy = args.algorithm.parse()?;
    let (grid, label) = load_grid(&args)?;
    info!("{} is loaded", label);

    let config = RunConfig {
        step_budget: args.budget,
        reveal_path: !args.no_reveal,
    };
    let driver = Driver::new(grid, strategy, config)?;
    let history = (!args.no_history).then(RunHistory::load);

    if args.headless {
        run_headless(driver, &label, history, args.json)
    } else {
        let app = App::new(
            driver,
            label,
            Duration::from_millis(args.tick_ms),
            Theme::named(args.theme),
            history,
        );
        run_interactive(app)
    }
}

fn load_grid(args: &Args) -> maze_core::Result<(Grid, String)> {
    match (&args.maze_file, args.maze_id) {
        (Some(path), _) => {
            let label = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok((Grid::load(path)?, label))
        }
        (None, Some(id)) => Ok((builtin_maze(id)?, format!("maze {}", id))),
        (None, None) => Err(maze_core::SearchError::MazeIdOutOfRange {
            id: 0,
            max: MAZE_COUNT,
        }),
    }
}

fn run_headless(
    mut driver: Driver,
    label: &str,
    history: Option<RunHistory>,
    json: bool,
) -> maze_core::Result<()> {
    let report = driver.run();

    if let Some(mut history) = history {
        let previous_best = history
            .best_for(label, report.strategy)
            .map(|r| r.expanded);
        history.record(label, &report);
        history.save();
        if let Some(best) = previous_best {
            info!(best, "fewest expansions recorded for this maze and algorithm");
        }
    }

    let mut stdout = io::stdout();
    if json {
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        writeln!(stdout, "{}", text)?;
    } else {
        write!(stdout, "{}", report)?;
    }
    Ok(())
}

fn run_interactive(mut app: App) -> maze_core::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Run the app
    let result = run_app(&mut stdout, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;
    result?;

    print!("{}", app.report());
    Ok(())
}

fn run_app(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.get_tick_rate();

        // Render
        render::render(stdout, app)?;
        stdout.flush()?;

        // Handle input with timeout for the next step
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    // release and repeat events (Windows)
                } else if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    break;
                } else if let AppAction::Quit = app.handle_key(key) {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("maze").chain(args.iter().copied()))
    }

    #[test]
    fn test_args_require_a_maze() {
        assert!(parse(&["--algorithm", "bfs"]).is_err());
        assert!(parse(&["--maze-id", "1", "--maze-file", "x.txt", "--algorithm", "bfs"]).is_err());
        let args = parse(&["--maze-id", "2", "--algorithm", "astar"]).unwrap();
        assert_eq!(args.maze_id, Some(2));
        assert_eq!(args.budget, maze_core::DEFAULT_STEP_BUDGET);
        assert!(!args.headless);
    }

    #[test]
    fn test_json_requires_headless() {
        assert!(parse(&["--maze-id", "1", "--algorithm", "bfs", "--json"]).is_err());
        assert!(parse(&["--maze-id", "1", "--algorithm", "bfs", "--json", "--headless"]).is_ok());
    }

    #[test]
    fn test_out_of_range_maze_rejected_before_load() {
        let args = parse(&["--maze-id", "7", "--algorithm", "bfs"]).unwrap();
        let err = load_grid(&args).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let args = parse(&["--maze-id", "1", "--algorithm", "dfs", "--headless", "--no-history"])
            .unwrap();
        assert!(matches!(
            run(args),
            Err(maze_core::SearchError::UnknownStrategy(_))
        ));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failure_reported_once() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let code = tracing::subscriber::with_default(subscriber, || {
            exit_code(Err(maze_core::SearchError::MissingGoal))
        });

        assert_eq!(format!("{:?}", code), format!("{:?}", ExitCode::FAILURE));
        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.matches("End position is not set").count(), 1);
        assert!(output.contains("ERROR"));
    }

    #[test]
    fn test_headless_run_succeeds() {
        let args = parse(&[
            "--maze-id",
            "1",
            "--algorithm",
            "ucs",
            "--headless",
            "--no-history",
        ])
        .unwrap();
        assert!(run(args).is_ok());
    }
}
