//! Push button with a text label.

use tracing::debug;

use super::core::{hit_test, Debouncer, Widget, WidgetId, WidgetResponse, WidgetState};
use crate::command::{BoxedCommand, Command};
use crate::error::WidgetResult;
use crate::input::InputState;
use crate::layout::{Point, Rect};
use crate::render::RenderCommand;
use crate::style::Style;
use crate::text::{self, FontMetrics, TextAnchor};

/// Padding added around the label, in total per axis.
pub const BUTTON_PADDING: f64 = 20.0;

/// A button that runs its command once per press edge.
pub struct Button {
    state: WidgetState,
    label: String,
    command: BoxedCommand,
    debouncer: Debouncer,
    style: Style,
}

impl Button {
    /// Creates a button whose label's top-left corner sits at `pos`.
    ///
    /// The clickable box is the measured label grown by [`BUTTON_PADDING`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::WidgetError::InvalidBounds`] if the label measures to
    /// an empty box (for example an empty label with zero padding).
    pub fn new(
        id: WidgetId,
        label: impl Into<String>,
        pos: Point,
        command: impl Command + 'static,
        style: Style,
        metrics: &dyn FontMetrics,
    ) -> WidgetResult<Self> {
        let label = label.into();
        let (w, h) = metrics.measure(&label, style.font_size);
        let rect = Rect::new(pos.x, pos.y, w, h)
            .inflate(BUTTON_PADDING, BUTTON_PADDING)
            .validated()?;

        Ok(Self {
            state: WidgetState::new(id, rect),
            label,
            command: Box::new(command),
            debouncer: Debouncer::new(),
            style,
        })
    }

    /// Current label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replaces the label. The button keeps its position and size.
    pub fn change_text(&mut self, new_text: impl Into<String>) {
        self.label = new_text.into();
    }

    /// Clickable box.
    #[must_use]
    pub fn button_rect(&self) -> Rect {
        self.state.rect
    }

    /// Advances the debouncer; invokes the command on a press edge.
    pub fn press(&mut self, pointer: Point, pressed: bool) -> WidgetResponse {
        let hovered = hit_test(self.state.rect, pointer);
        let clicked = self.debouncer.step(pressed, hovered);
        self.state.interaction = self.debouncer.state();
        self.state.hovered = hovered;

        if clicked {
            debug!(widget = self.state.id.raw(), label = %self.label, "button fired");
            self.command.invoke();
        }

        WidgetResponse {
            clicked,
            hovered,
            ..WidgetResponse::default()
        }
    }

    /// Queues the box, its outline and the centered label.
    pub fn draw(&self, commands: &mut Vec<RenderCommand>) {
        commands.push(RenderCommand::Rect {
            bounds: self.state.rect,
            color: self.style.background,
            corner_radius: 0.0,
        });
        commands.push(RenderCommand::RectOutline {
            bounds: self.state.rect,
            color: self.style.foreground,
            width: self.style.border_width,
        });
        text::text(
            commands,
            &self.label,
            self.state.rect.center(),
            self.style.foreground,
            self.style.font_size,
            TextAnchor::Center,
        );
    }
}

impl Widget for Button {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn update(&mut self, input: &InputState) -> WidgetResponse {
        self.press(input.pointer, input.pointer_pressed)
    }

    fn render(&self, commands: &mut Vec<RenderCommand>) {
        self.draw(commands);
    }
}
