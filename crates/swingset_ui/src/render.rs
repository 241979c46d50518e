//! UI rendering system.
//!
//! Widgets and the chain describe themselves as [`RenderCommand`]s. The
//! frame's commands are collected by a [`UIRenderer`] and handed to a
//! [`RenderSink`] once per tick.

use crate::layout::{Point, Rect};
use crate::style::Color;
use crate::text::TextAnchor;

/// A drawing primitive in screen space.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Filled rectangle.
    Rect {
        /// Bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
        /// Corner radius.
        corner_radius: f64,
    },
    /// Rectangle outline.
    RectOutline {
        /// Bounds.
        bounds: Rect,
        /// Stroke color.
        color: Color,
        /// Line width.
        width: f64,
    },
    /// Filled ellipse inscribed in a rectangle.
    Ellipse {
        /// Bounding box.
        bounds: Rect,
        /// Fill color.
        color: Color,
    },
    /// Filled circle.
    Circle {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
        /// Fill color.
        color: Color,
    },
    /// Line segment.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Stroke color.
        color: Color,
        /// Line width.
        width: f64,
    },
    /// Text.
    Text {
        /// Text content.
        text: String,
        /// Anchor position.
        position: Point,
        /// Which part of the text box sits on `position`.
        anchor: TextAnchor,
        /// Text color.
        color: Color,
        /// Font size.
        font_size: f64,
    },
}

/// Collects the render commands of one frame.
pub struct UIRenderer {
    /// All commands from the frame.
    commands: Vec<RenderCommand>,
}

impl UIRenderer {
    /// Creates a new UI renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(256),
        }
    }

    /// Begins a new frame, discarding anything left over.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
    }

    /// Adds a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Adds multiple render commands.
    pub fn extend(&mut self, commands: impl IntoIterator<Item = RenderCommand>) {
        self.commands.extend(commands);
    }

    /// Mutable access to the command list, for `render(&mut Vec<_>)` callers.
    pub fn commands_mut(&mut self) -> &mut Vec<RenderCommand> {
        &mut self.commands
    }

    /// Commands collected so far.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Ends the frame and returns its commands.
    ///
    /// The commands stay in place until the next [`Self::begin_frame`], which
    /// clears them but keeps the allocation.
    pub fn end_frame(&mut self) -> &[RenderCommand] {
        &self.commands
    }

    /// Returns the number of commands collected this frame.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }
}

impl Default for UIRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Destination for a finished frame (the presentation layer).
pub trait RenderSink {
    /// Draws one frame.
    ///
    /// Called once per tick with everything that tick produced.
    fn present(&mut self, frame: &[RenderCommand]);
}
