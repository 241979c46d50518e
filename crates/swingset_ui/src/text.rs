//! Text placement and measurement.
//!
//! Glyph rasterization belongs to the presentation layer. Layout only needs
//! a size estimate, which a [`FontMetrics`] implementation supplies.

use crate::layout::{Point, Rect};
use crate::render::RenderCommand;
use crate::style::Color;

/// Which part of a text box is placed on the given position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    /// Position is the center of the text box.
    #[default]
    Center,
    /// Position is the top-left corner of the text box.
    TopLeft,
}

impl TextAnchor {
    /// Returns the box of a `width` x `height` text placed at `position`.
    #[must_use]
    pub fn place(self, position: Point, width: f64, height: f64) -> Rect {
        match self {
            Self::Center => Rect::from_center(position, width, height),
            Self::TopLeft => Rect::new(position.x, position.y, width, height),
        }
    }
}

/// Measures rendered text.
pub trait FontMetrics {
    /// Returns `(width, height)` of `text` at `font_size`.
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64);
}

/// Fixed-advance estimate, good enough for laying out boxes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    /// Glyph advance as a fraction of the font size.
    pub advance: f64,
    /// Line height as a fraction of the font size.
    pub line_height: f64,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance: 0.5,
            line_height: 0.7,
        }
    }
}

impl FontMetrics for MonospaceMetrics {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        let chars = text.chars().count() as f64;
        (chars * self.advance * font_size, self.line_height * font_size)
    }
}

/// Queues a line of text.
pub fn text(
    commands: &mut Vec<RenderCommand>,
    content: &str,
    position: Point,
    color: Color,
    font_size: f64,
    anchor: TextAnchor,
) {
    commands.push(RenderCommand::Text {
        text: content.to_owned(),
        position,
        anchor,
        color,
        font_size,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monospace_measure() {
        let metrics = MonospaceMetrics::default();
        let (w, h) = metrics.measure("abcd", 30.0);

        assert!((w - 60.0).abs() < 1e-9);
        assert!((h - 21.0).abs() < 1e-9);
        assert_eq!(metrics.measure("", 30.0).0, 0.0);
    }

    #[test]
    fn test_anchor_place() {
        let at = Point::new(100.0, 50.0);
        assert_eq!(TextAnchor::TopLeft.place(at, 20.0, 10.0), Rect::new(100.0, 50.0, 20.0, 10.0));
        assert_eq!(TextAnchor::Center.place(at, 20.0, 10.0), Rect::new(90.0, 45.0, 20.0, 10.0));
    }

    #[test]
    fn test_text_helper_pushes_command() {
        let mut commands = Vec::new();
        text(&mut commands, "mass", Point::new(1.0, 2.0), Color::BLACK, 20.0, TextAnchor::TopLeft);

        assert!(matches!(
            &commands[0],
            RenderCommand::Text { text, anchor: TextAnchor::TopLeft, .. } if text == "mass"
        ));
    }
}
