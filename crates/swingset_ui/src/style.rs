//! Colors and widget styling.
//!
//! The default look is black ink on white boxes over a cream background.

use bytemuck::{Pod, Zeroable};

/// RGBA color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Cream window background.
    pub const CREAM: Self = Self::rgb8(255, 250, 220);
    /// Slider track grey.
    pub const TRACK: Self = Self::rgb8(150, 150, 150);
    /// Slider handle.
    pub const HANDLE: Self = Self::rgb8(25, 25, 25);
    /// Pendulum arm.
    pub const ARM: Self = Self::rgb8(60, 60, 60);
    /// Pendulum bob.
    pub const BOB: Self = Self::rgb8(200, 60, 40);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from RGB values (0-1) with full alpha.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates an opaque color from 8-bit channels.
    #[must_use]
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Style for a text-bearing widget (button, dropdown).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Text and outline color.
    pub foreground: Color,
    /// Box fill color.
    pub background: Color,
    /// Outline width.
    pub border_width: f64,
    /// Font size.
    pub font_size: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            foreground: Color::BLACK,
            background: Color::WHITE,
            border_width: 2.0,
            font_size: 30.0,
        }
    }
}

impl Style {
    /// Sets the font size.
    #[must_use]
    pub const fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets foreground and background colors.
    #[must_use]
    pub const fn with_colors(mut self, foreground: Color, background: Color) -> Self {
        self.foreground = foreground;
        self.background = background;
        self
    }
}
