use crossterm::style::{Color, ContentStyle, Stylize};
use std::fmt::Display;

/// Semantic colors used by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hue {
    Cyan,
    Green,
    Yellow,
    Magenta,
    Red,
    Blue,
    Gray,
    White,
}

impl Hue {
    fn color(self) -> Color {
        match self {
            Hue::Cyan => Color::Cyan,
            Hue::Green => Color::Green,
            Hue::Yellow => Color::Yellow,
            Hue::Magenta => Color::Magenta,
            Hue::Red => Color::Red,
            Hue::Blue => Color::Blue,
            Hue::Gray => Color::DarkGrey,
            Hue::White => Color::White,
        }
    }
}

/// Turns text into ANSI-styled text, or leaves it untouched when color is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn disabled() -> Self {
        Self::new(false)
    }

    pub fn paint(&self, hue: Hue, text: impl Display) -> String {
        let text = text.to_string();
        if !self.enabled || text.is_empty() {
            return text;
        }
        ContentStyle::new().with(hue.color()).apply(text).to_string()
    }

    pub fn bold(&self, hue: Hue, text: impl Display) -> String {
        let text = text.to_string();
        if !self.enabled || text.is_empty() {
            return text;
        }
        ContentStyle::new()
            .with(hue.color())
            .bold()
            .apply(text)
            .to_string()
    }
}
