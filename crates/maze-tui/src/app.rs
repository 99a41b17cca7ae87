use crate::history::RunHistory;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use maze_core::{Driver, Outcome, SearchReport, Snapshot, Strategy};
use std::time::Duration;
use tracing::info;

/// Fastest and slowest allowed tick
const MIN_TICK: Duration = Duration::from_millis(1);
const MAX_TICK: Duration = Duration::from_millis(1000);

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Where the current run is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Engine is being stepped
    Searching,
    /// Solution drawn one more cell per tick; holds the cells shown so far
    Revealing(usize),
    /// Final picture stays up until the user quits
    Finished,
}

/// The main application state
pub struct App {
    /// Engine and budget for the loaded grid
    pub driver: Driver,
    /// Label shown in the title and used as the history key
    pub maze_label: String,
    pub phase: Phase,
    pub paused: bool,
    /// Time between engine steps
    pub tick: Duration,
    pub theme: Theme,
    /// Message to display
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
    /// Run history; `None` when history is disabled
    pub history: Option<RunHistory>,
    /// Whether the current run has been recorded
    run_recorded: bool,
}

impl App {
    pub fn new(
        driver: Driver,
        maze_label: String,
        tick: Duration,
        theme: Theme,
        history: Option<RunHistory>,
    ) -> Self {
        Self {
            driver,
            maze_label,
            phase: Phase::Searching,
            paused: false,
            tick: tick.clamp(MIN_TICK, MAX_TICK),
            theme,
            message: None,
            message_timer: 0,
            history,
            run_recorded: false,
        }
    }

    /// Get the tick rate
    pub fn get_tick_rate(&self) -> Duration {
        match self.phase {
            Phase::Searching | Phase::Revealing(_) => self.tick,
            Phase::Finished => Duration::from_millis(100),
        }
    }

    /// Advance one tick
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        match self.phase {
            Phase::Searching => {
                if !self.paused {
                    self.advance_search();
                }
            }
            Phase::Revealing(shown) => {
                let total = self.driver.engine().path().len();
                self.phase = if shown + 1 >= total {
                    Phase::Finished
                } else {
                    Phase::Revealing(shown + 1)
                };
            }
            Phase::Finished => {}
        }
    }

    fn advance_search(&mut self) {
        self.driver.step();
        if !self.driver.is_finished() {
            return;
        }

        self.record_run();
        let report = self.driver.report();
        self.phase = match report.outcome {
            Outcome::Solved if self.driver.config().reveal_path => Phase::Revealing(0),
            _ => Phase::Finished,
        };
        match report.outcome {
            Outcome::Solved => self.show_message(&format!("Found path with {} cost", report.cost)),
            Outcome::NoPath => self.show_message("No path to the goal"),
            Outcome::BudgetExhausted => self.show_message("Timeout"),
        }
    }

    /// Record the current run to history
    fn record_run(&mut self) {
        if self.run_recorded {
            return;
        }
        self.run_recorded = true;

        let report = self.driver.report();
        info!(maze = %self.maze_label, outcome = %report.outcome, "run complete");
        if let Some(history) = self.history.as_mut() {
            history.record(&self.maze_label, &report);
            history.save();
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30;
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,

            KeyCode::Char(' ') => {
                if self.phase == Phase::Searching {
                    self.paused = !self.paused;
                    self.show_message(if self.paused { "Paused" } else { "Resumed" });
                }
            }

            // Single step while paused
            KeyCode::Char('s') => {
                if self.phase == Phase::Searching && self.paused {
                    self.advance_search();
                }
            }

            // Run the rest of the search without drawing
            KeyCode::Char('f') => {
                while self.phase == Phase::Searching {
                    self.advance_search();
                }
            }

            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.tick = (self.tick / 2).max(MIN_TICK);
                self.show_message(&format!("Step every {} ms", self.tick.as_millis()));
            }
            KeyCode::Char('-') => {
                self.tick = (self.tick * 2).min(MAX_TICK);
                self.show_message(&format!("Step every {} ms", self.tick.as_millis()));
            }

            KeyCode::Char('r') => {
                self.restart(self.driver.engine().strategy());
                self.show_message("Restarted");
            }
            KeyCode::Char('a') => {
                let next = self.driver.engine().strategy().next();
                self.restart(next);
                self.show_message(&format!("Algorithm: {}", next));
            }

            _ => {}
        }
        AppAction::Continue
    }

    fn restart(&mut self, strategy: Strategy) {
        self.driver.restart(strategy);
        self.phase = Phase::Searching;
        self.paused = false;
        self.run_recorded = false;
    }

    /// Picture to paint this frame
    pub fn snapshot(&self) -> Option<Snapshot> {
        let snap = self.driver.engine().snapshot()?;
        Some(match self.phase {
            Phase::Revealing(shown) => snap.with_path_prefix(shown + 1),
            Phase::Searching | Phase::Finished => snap,
        })
    }

    pub fn status_text(&self) -> &'static str {
        match (self.phase, self.driver.outcome()) {
            (Phase::Searching, _) if self.paused => "Paused",
            (Phase::Searching, _) => "Searching",
            (Phase::Revealing(_), _) => "Tracing path",
            (Phase::Finished, Some(Outcome::Solved)) => "Solved",
            (Phase::Finished, Some(Outcome::NoPath)) => "No path",
            (Phase::Finished, Some(Outcome::BudgetExhausted)) => "Timeout",
            (Phase::Finished, None) => "Stopped",
        }
    }

    /// Final report for printing after the terminal is restored
    pub fn report(&self) -> SearchReport {
        self.driver.report()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use maze_core::{Grid, RunConfig};

    fn app() -> App {
        let grid = Grid::parse("2 0 0\n1 1 0\n3 0 0").unwrap();
        let driver = Driver::new(grid, Strategy::BreadthFirst, RunConfig::default()).unwrap();
        App::new(
            driver,
            "test".to_string(),
            Duration::from_millis(10),
            Theme::default(),
            None,
        )
    }

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_ticks_search_then_reveal() {
        let mut app = app();
        let mut ticks = 0;
        while app.phase == Phase::Searching {
            app.tick();
            ticks += 1;
            assert!(ticks < 100);
        }
        assert_eq!(app.phase, Phase::Revealing(0));
        assert_eq!(app.snapshot().unwrap().count(maze_core::CellRole::Path), 1);

        while app.phase != Phase::Finished {
            app.tick();
        }
        assert_eq!(app.snapshot().unwrap().count(maze_core::CellRole::Path), 7);
        assert_eq!(app.status_text(), "Solved");
        assert_eq!(app.report().cost, 6);
    }

    #[test]
    fn test_pause_and_single_step() {
        let mut app = app();
        app.handle_key(key(' '));
        assert!(app.paused);

        app.tick();
        assert_eq!(app.driver.engine().expanded(), 0);

        app.handle_key(key('s'));
        assert_eq!(app.driver.engine().expanded(), 1);
        assert_eq!(app.status_text(), "Paused");
    }

    #[test]
    fn test_finish_and_cycle_algorithm() {
        let mut app = app();
        app.handle_key(key('f'));
        assert_ne!(app.phase, Phase::Searching);
        assert!(app.driver.engine().is_solved());

        app.handle_key(key('a'));
        assert_eq!(app.phase, Phase::Searching);
        assert_eq!(app.driver.engine().strategy(), Strategy::UniformCost);
        assert_eq!(app.driver.engine().expanded(), 0);
    }

    #[test]
    fn test_speed_keys_clamped() {
        let mut app = app();
        for _ in 0..20 {
            app.handle_key(key('+'));
        }
        assert_eq!(app.tick, MIN_TICK);
        for _ in 0..20 {
            app.handle_key(key('-'));
        }
        assert_eq!(app.tick, MAX_TICK);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert!(matches!(app.handle_key(key('q')), AppAction::Quit));
        assert!(matches!(
            app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            AppAction::Quit
        ));
    }
}
