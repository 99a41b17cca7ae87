use crate::app::App;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use maze_core::{Cell, Snapshot};
use std::io;

/// Terminal columns per grid cell
const CELL_WIDTH: u16 = 2;
/// Width of the info panel to the right of the grid
const PANEL_WIDTH: u16 = 28;
/// Rows below the grid for the controls line and messages
const FOOTER_HEIGHT: u16 = 5;

/// Part of the grid that fits on screen, and its framed size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    rows: usize,
    cols: usize,
    width: u16,
    height: u16,
}

/// Clip a `rows` x `cols` grid to the terminal, keeping room for the frame,
/// the info panel and the footer
fn layout(rows: usize, cols: usize, term_width: u16, term_height: u16) -> Layout {
    let max_cols = term_width.saturating_sub(PANEL_WIDTH + 4) / CELL_WIDTH;
    let max_rows = term_height.saturating_sub(FOOTER_HEIGHT);
    let rows = rows.min(usize::from(max_rows));
    let cols = cols.min(usize::from(max_cols));
    Layout {
        rows,
        cols,
        width: to_u16(cols).saturating_mul(CELL_WIDTH).saturating_add(2),
        height: to_u16(rows).saturating_add(2),
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    queue!(
        stdout,
        Hide,
        SetBackgroundColor(app.theme.bg),
        Clear(ClearType::All)
    )?;

    let Some(snapshot) = app.snapshot() else {
        queue!(stdout, Show)?;
        return Ok(());
    };

    let view = layout(snapshot.rows(), snapshot.cols(), term_width, term_height);
    let grid_width = view.width;
    let grid_height = view.height;

    // Center the grid horizontally, leave room for info panel
    let total_width = grid_width.saturating_add(2 + PANEL_WIDTH);
    let start_x = term_width.saturating_sub(total_width) / 2;
    let start_y = if term_height > grid_height.saturating_add(4) { 1 } else { 0 };

    render_grid(stdout, app, &snapshot, view, start_x, start_y)?;
    render_info_panel(stdout, app, start_x + grid_width + 2, start_y)?;
    render_controls(stdout, app, start_x, start_y + grid_height + 1)?;

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width, start_y + grid_height)?;
    }

    queue!(stdout, Show)?;
    Ok(())
}

fn render_grid(
    stdout: &mut io::Stdout,
    app: &App,
    snapshot: &Snapshot,
    view: Layout,
    x: u16,
    y: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let horizontal = format!("+{}+", "-".repeat(view.cols * usize::from(CELL_WIDTH)));

    queue!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.border),
        Print(&horizontal)
    )?;

    for row in 0..view.rows {
        let cell_y = y + 1 + to_u16(row);
        queue!(
            stdout,
            MoveTo(x, cell_y),
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.border),
            Print("|")
        )?;
        for col in 0..view.cols {
            let role = snapshot.role(Cell::new(row, col));
            queue!(
                stdout,
                SetBackgroundColor(theme.role_color(role)),
                Print("  ")
            )?;
        }
        queue!(
            stdout,
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.border),
            Print("|")
        )?;
    }

    queue!(
        stdout,
        MoveTo(x, y + 1 + to_u16(view.rows)),
        Print(&horizontal)
    )?;
    Ok(())
}

fn render_info_panel(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let engine = app.driver.engine();
    let metrics = engine.metrics();

    queue!(
        stdout,
        SetBackgroundColor(theme.bg),
        MoveTo(x, y),
        SetForegroundColor(theme.key),
        Print("=== MAZE SEARCH ===")
    )?;

    let status_color = match app.status_text() {
        "Solved" => theme.success,
        "No path" | "Timeout" => theme.error,
        _ => theme.fg,
    };

    let cost = if engine.is_solved() {
        engine.cost().to_string()
    } else {
        "-".to_string()
    };

    let lines = [
        ("Maze", app.maze_label.clone()),
        ("Algorithm", engine.strategy().to_string()),
        ("Steps", format!("{}/{}", app.driver.steps(), app.driver.config().step_budget)),
        ("Expanded", engine.expanded().to_string()),
        ("Frontier", engine.frontier().len().to_string()),
        ("Max frontier", metrics.max_frontier_size.to_string()),
        ("Max memory", metrics.max_nodes_in_memory.to_string()),
        ("Max depth", metrics.max_depth.to_string()),
        ("Cost", cost),
    ];

    queue!(
        stdout,
        MoveTo(x, y + 2),
        SetForegroundColor(theme.info),
        Print("Status: "),
        SetForegroundColor(status_color),
        Print(format!("{:>12}", app.status_text()))
    )?;

    for (i, (label, value)) in lines.iter().enumerate() {
        queue!(
            stdout,
            MoveTo(x, y + 4 + i as u16),
            SetForegroundColor(theme.info),
            Print(format!("{:<13}{:>7}", format!("{}:", label), value))
        )?;
    }

    // Legend
    let legend_y = y + 5 + lines.len() as u16;
    let legend = [
        (theme.start, "start"),
        (theme.goal, "goal"),
        (theme.frontier, "frontier"),
        (theme.explored, "explored"),
        (theme.path, "path"),
    ];
    for (i, (color, name)) in legend.iter().enumerate() {
        queue!(
            stdout,
            MoveTo(x, legend_y + i as u16),
            SetBackgroundColor(*color),
            Print("  "),
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.info),
            Print(format!(" {}", name))
        )?;
    }

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let controls = [
        ("space", "pause"),
        ("s", "step"),
        ("f", "finish"),
        ("+/-", "speed"),
        ("r", "restart"),
        ("a", "algorithm"),
        ("q", "quit"),
    ];

    queue!(stdout, MoveTo(x, y), SetBackgroundColor(theme.bg))?;
    for (key, action) in controls {
        queue!(
            stdout,
            SetForegroundColor(theme.key),
            Print(key),
            SetForegroundColor(theme.info),
            Print(format!(" {}  ", action))
        )?;
    }
    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
    y: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let x = term_width.saturating_sub(to_u16(msg.len())) / 2;
    queue!(
        stdout,
        MoveTo(x, y + 3),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.key),
        Print(msg)
    )?;
    Ok(())
}
