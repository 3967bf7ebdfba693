use ratatui::style::Color;

/// Glyphs used in page titles and lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Icon {
    Dashboard,
    Admin,
    History,
    Permit,
    Warning,
    Active,
    Inactive,
}

impl Icon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Dashboard => "▦",
            Icon::Admin => "◉",
            Icon::History => "↺",
            Icon::Permit => "▤",
            Icon::Warning => "⚠",
            Icon::Active => "●",
            Icon::Inactive => "○",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Icon::Warning => Color::Yellow,
            Icon::Active => Color::Green,
            Icon::Inactive => Color::DarkGray,
            _ => Color::Cyan,
        }
    }
}
