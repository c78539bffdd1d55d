use ratatui::style::Color;

use crate::clock::Mode;

pub const THEMES: &[&str] = &["default", "nord", "dracula", "gruvbox"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub focus_color: Color,
    pub relax_color: Color,
    pub fill_color: Color,
    pub border_color: Color,
    pub accent_color: Color,
    pub modal_color: Color,
}

impl Theme {
    pub fn mode_color(&self, mode: Mode) -> Color {
        match mode {
            Mode::Focus => self.focus_color,
            Mode::Relax => self.relax_color,
        }
    }
}

pub fn get_theme(name: &str) -> Theme {
    match name {
        "nord" => Theme {
            focus_color: Color::Rgb(136, 192, 208),
            relax_color: Color::Rgb(163, 190, 140),
            fill_color: Color::Rgb(208, 135, 112),
            border_color: Color::Rgb(129, 161, 193),
            accent_color: Color::Rgb(235, 203, 139),
            modal_color: Color::Rgb(216, 222, 233),
        },
        "dracula" => Theme {
            focus_color: Color::Rgb(189, 147, 249),
            relax_color: Color::Rgb(80, 250, 123),
            fill_color: Color::Rgb(255, 184, 108),
            border_color: Color::Rgb(200, 100, 255),
            accent_color: Color::Rgb(255, 121, 198),
            modal_color: Color::Rgb(248, 248, 242),
        },
        "gruvbox" => Theme {
            focus_color: Color::Rgb(254, 128, 25),
            relax_color: Color::Rgb(184, 187, 38),
            fill_color: Color::Rgb(146, 131, 116),
            border_color: Color::Rgb(255, 200, 100),
            accent_color: Color::Rgb(250, 189, 47),
            modal_color: Color::Rgb(235, 219, 178),
        },
        _ => Theme {
            focus_color: Color::Rgb(46, 49, 146),
            relax_color: Color::Rgb(27, 255, 255),
            fill_color: Color::Rgb(106, 56, 5),
            border_color: Color::Rgb(27, 255, 255),
            accent_color: Color::Rgb(255, 255, 255),
            modal_color: Color::Rgb(255, 234, 186),
        },
    }
}

/// Known theme name, or `default`.
pub fn theme_name(name: &str) -> &'static str {
    THEMES.iter().copied().find(|&t| t == name).unwrap_or("default")
}

/// Shape the fill is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vessel {
    Coffee,
    Egg,
}

impl Vessel {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "egg" | "egg-timer" | "hourglass" => Self::Egg,
            _ => Self::Coffee,
        }
    }

    /// Inner width of each row, top to bottom.
    pub fn row_widths(&self) -> &'static [u16] {
        match self {
            Self::Coffee => &[12, 12, 12, 12, 12, 12, 12, 12],
            Self::Egg => &[12, 10, 8, 6, 4, 4, 6, 8, 10, 12],
        }
    }
}
