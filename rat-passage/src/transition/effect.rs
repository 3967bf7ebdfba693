//! Visual effects applied to the view that is entering or leaving.

use std::fmt;
use std::str::FromStr;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};

use super::phase::Direction;

/// How a transition looks on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransitionStyle {
    None,
    #[default]
    Fade,
    Slide,
}

impl TransitionStyle {
    /// Area to render the view into for the given moment of a transition.
    ///
    /// Slide pushes the view off to the right while exiting and pulls it in
    /// from the right while entering.
    pub fn view_area(self, direction: Direction, progress: f32, area: Rect) -> Rect {
        if self != TransitionStyle::Slide {
            return area;
        }
        let hidden = 1.0 - visibility(direction, progress);
        let offset = ((area.width as f32) * hidden).round() as u16;
        let offset = offset.min(area.width);
        Rect {
            x: area.x + offset,
            width: area.width - offset,
            ..area
        }
    }

    /// Post-process the rendered view in `area`.
    pub fn paint(self, direction: Direction, progress: f32, area: Rect, buf: &mut Buffer) {
        if self != TransitionStyle::Fade {
            return;
        }
        let area = area.intersection(buf.area);
        match fade_tier(visibility(direction, progress)) {
            FadeTier::Full => {}
            FadeTier::Dim => {
                let dim = Style::default()
                    .fg(Color::DarkGray)
                    .remove_modifier(Modifier::BOLD);
                for y in area.top()..area.bottom() {
                    for x in area.left()..area.right() {
                        if let Some(cell) = buf.cell_mut((x, y)) {
                            cell.set_style(dim);
                        }
                    }
                }
            }
            FadeTier::Hidden => {
                for y in area.top()..area.bottom() {
                    for x in area.left()..area.right() {
                        if let Some(cell) = buf.cell_mut((x, y)) {
                            cell.reset();
                        }
                    }
                }
            }
        }
    }
}

/// How much of a view is shown, `1.0` fully visible.
pub fn visibility(direction: Direction, progress: f32) -> f32 {
    let progress = progress.clamp(0.0, 1.0);
    match direction {
        Direction::Exit => 1.0 - progress,
        Direction::Enter => progress,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FadeTier {
    Full,
    Dim,
    Hidden,
}

fn fade_tier(visible: f32) -> FadeTier {
    if visible >= 2.0 / 3.0 {
        FadeTier::Full
    } else if visible >= 1.0 / 3.0 {
        FadeTier::Dim
    } else {
        FadeTier::Hidden
    }
}

impl fmt::Display for TransitionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransitionStyle::None => "none",
            TransitionStyle::Fade => "fade",
            TransitionStyle::Slide => "slide",
        };
        f.write_str(name)
    }
}

impl FromStr for TransitionStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(TransitionStyle::None),
            "fade" => Ok(TransitionStyle::Fade),
            "slide" => Ok(TransitionStyle::Slide),
            other => Err(format!(
                "Unknown transition style: '{}'. Available styles: none, fade, slide",
                other
            )),
        }
    }
}
