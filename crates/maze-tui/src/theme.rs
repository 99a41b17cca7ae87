use clap::ValueEnum;
use crossterm::style::Color;
use maze_core::CellRole;

/// Named themes selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeName {
    Dark,
    Light,
    HighContrast,
}

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Frame around the grid
    pub border: Color,
    /// Occupied cell
    pub wall: Color,
    /// Unvisited free cell
    pub free: Color,
    pub start: Color,
    pub goal: Color,
    /// Discovered, not yet expanded
    pub frontier: Color,
    /// Expanded
    pub explored: Color,
    /// Solution path
    pub path: Color,
    /// Info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
    pub success: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn named(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
            ThemeName::HighContrast => Self::high_contrast(),
        }
    }

    /// Color used to paint a cell with the given role
    pub fn role_color(&self, role: CellRole) -> Color {
        match role {
            CellRole::Wall => self.wall,
            CellRole::Free => self.free,
            CellRole::Start => self.start,
            CellRole::Goal => self.goal,
            CellRole::Frontier => self.frontier,
            CellRole::Explored => self.explored,
            CellRole::Path => self.path,
        }
    }

    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 130, g: 140, b: 170 },
            wall: Color::Rgb { r: 70, g: 75, b: 90 },
            free: Color::Rgb { r: 35, g: 40, b: 55 },
            start: Color::Rgb { r: 79, g: 189, b: 186 },
            goal: Color::Rgb { r: 246, g: 137, b: 137 },
            frontier: Color::Rgb { r: 220, g: 70, b: 70 },
            explored: Color::Rgb { r: 60, g: 90, b: 200 },
            path: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
        }
    }

    /// Light theme, close to the classic maze palette
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 206, g: 171, b: 147 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            border: Color::Rgb { r: 120, g: 90, b: 70 },
            wall: Color::Rgb { r: 227, g: 202, b: 165 },
            free: Color::Rgb { r: 255, g: 251, b: 233 },
            start: Color::Rgb { r: 79, g: 189, b: 186 },
            goal: Color::Rgb { r: 246, g: 137, b: 137 },
            frontier: Color::Rgb { r: 255, g: 0, b: 0 },
            explored: Color::Rgb { r: 0, g: 0, b: 255 },
            path: Color::Rgb { r: 0, g: 255, b: 0 },
            info: Color::Rgb { r: 60, g: 50, b: 45 },
            key: Color::Rgb { r: 160, g: 70, b: 10 },
            success: Color::Rgb { r: 40, g: 140, b: 60 },
            error: Color::Rgb { r: 200, g: 40, b: 40 },
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            border: Color::White,
            wall: Color::Grey,
            free: Color::Black,
            start: Color::Cyan,
            goal: Color::Magenta,
            frontier: Color::Red,
            explored: Color::Blue,
            path: Color::Green,
            info: Color::Grey,
            key: Color::Yellow,
            success: Color::Green,
            error: Color::Red,
        }
    }
}
