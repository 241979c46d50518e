//! Horizontal value slider.
//!
//! ```text
//!   caption
//!  ┌──────────(●)───────────────┐   handle: height x height, drawn round
//!  └────────────────────────────┘   track:  width x height/2
//! ```
//!
//! Once the handle is grabbed the slider follows the pointer's x coordinate
//! anywhere on screen until release; only the track ends limit it.

use tracing::warn;

use super::core::{hit_test, Debouncer, Widget, WidgetId, WidgetResponse, WidgetState};
use crate::error::{WidgetError, WidgetResult};
use crate::input::InputState;
use crate::layout::{Point, Rect};
use crate::render::RenderCommand;
use crate::style::Color;
use crate::text::{self, TextAnchor};

/// Caption font size.
const CAPTION_SIZE: f64 = 20.0;

/// Rounds to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A draggable value slider.
pub struct Slider {
    state: WidgetState,
    track_rect: Rect,
    handle_rect: Rect,
    min_val: f64,
    max_val: f64,
    value: f64,
    dragging: bool,
    grab: Debouncer,
    caption: Option<String>,
    track_color: Color,
    handle_color: Color,
}

impl Slider {
    /// Creates a slider whose widget box has its top-left corner at `pos`.
    ///
    /// The value range defaults to `[0, 1]` and the value starts at `0`.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidBounds`] if `width` or `height` is not
    /// positive.
    pub fn new(id: WidgetId, pos: Point, width: f64, height: f64) -> WidgetResult<Self> {
        let rect = Rect::new(pos.x, pos.y, width, height).validated()?;
        let track_rect = Rect::new(pos.x, pos.y + height * 0.25, width, height * 0.5);
        let handle_rect = Rect::from_center(Point::new(track_rect.x, rect.center().y), height, height);

        Ok(Self {
            state: WidgetState::new(id, rect),
            track_rect,
            handle_rect,
            min_val: 0.0,
            max_val: 1.0,
            value: 0.0,
            dragging: false,
            grab: Debouncer::new(),
            caption: None,
            track_color: Color::TRACK,
            handle_color: Color::HANDLE,
        })
    }

    /// Sets the value range. The bounds are ordered if given reversed.
    ///
    /// The value is reset to the lower bound. A range with `min == max` is
    /// accepted; the slider then pins its value and reports
    /// [`WidgetError::Degenerate`] when dragged.
    #[must_use]
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min_val = min.min(max);
        self.max_val = min.max(max);
        self.value = self.min_val;
        self.place_handle(self.track_rect.x);
        self
    }

    /// Sets the starting value.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Degenerate`] if the range is empty.
    pub fn with_value(mut self, value: f64) -> WidgetResult<Self> {
        self.set_value(value)?;
        Ok(self)
    }

    /// Sets a caption drawn above the track.
    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Sets track and handle colors.
    #[must_use]
    pub fn with_colors(mut self, track: Color, handle: Color) -> Self {
        self.track_color = track;
        self.handle_color = handle;
        self
    }

    /// Current value, always within `[min_val, max_val]`.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Value range as `(min, max)`.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.min_val, self.max_val)
    }

    /// True while the handle is grabbed.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Track rectangle.
    #[must_use]
    pub fn track_rect(&self) -> Rect {
        self.track_rect
    }

    /// Handle rectangle.
    #[must_use]
    pub fn handle_rect(&self) -> Rect {
        self.handle_rect
    }

    /// Returns true if the value range is empty.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        // Exact comparison: only a truly empty range breaks normalization.
        #[allow(clippy::float_cmp)]
        let empty = self.min_val == self.max_val;
        empty
    }

    /// Moves the value (and handle) to `value`, clamped into range.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Degenerate`] if the range is empty; the value
    /// stays pinned at the lower bound.
    pub fn set_value(&mut self, value: f64) -> WidgetResult<()> {
        if self.is_degenerate() {
            self.value = self.min_val;
            self.place_handle(self.track_rect.x);
            return Err(self.degenerate());
        }
        let value = value.clamp(self.min_val, self.max_val);
        let t = (value - self.min_val) / (self.max_val - self.min_val);
        self.value = value;
        self.place_handle(self.track_rect.x + t * self.track_rect.width);
        Ok(())
    }

    /// Repositions the whole slider so its box is centered on `center`.
    pub fn set_center(&mut self, center: Point) {
        let old = self.state.rect.center();
        let (dx, dy) = (center.x - old.x, center.y - old.y);
        self.state.rect = self.state.rect.translate(dx, dy);
        self.track_rect = self.track_rect.translate(dx, dy);
        self.handle_rect = self.handle_rect.translate(dx, dy);
    }

    /// Advances the drag state machine for one tick.
    pub fn drag(&mut self, pointer: Point, pressed: bool) -> WidgetResponse {
        let hovered = hit_test(self.handle_rect, pointer);
        let mut response = WidgetResponse {
            hovered,
            ..WidgetResponse::default()
        };

        if self.grab.step(pressed, hovered) {
            self.dragging = true;
            if self.is_degenerate() {
                warn!(
                    widget = self.state.id.raw(),
                    min = self.min_val,
                    "slider grabbed with an empty value range"
                );
            }
        }
        if !pressed {
            self.dragging = false;
        }
        self.state.interaction = self.grab.state();
        self.state.hovered = hovered;

        if self.dragging {
            let x = pointer.x.clamp(self.track_rect.x, self.track_rect.right());
            self.place_handle(x);

            let previous = self.value;
            if self.is_degenerate() {
                self.value = self.min_val;
                response.fault = Some(self.degenerate());
            } else {
                let t = (x - self.track_rect.x) / self.track_rect.width;
                let raw = self.min_val + t * (self.max_val - self.min_val);
                self.value = round2(raw).clamp(self.min_val, self.max_val);
            }
            response.changed = (self.value - previous).abs() > f64::EPSILON;
        }

        response
    }

    /// Queues the track, handle and caption.
    pub fn draw(&self, commands: &mut Vec<RenderCommand>) {
        commands.push(RenderCommand::Rect {
            bounds: self.track_rect,
            color: self.track_color,
            corner_radius: 3.0,
        });
        commands.push(RenderCommand::Ellipse {
            bounds: self.handle_rect,
            color: self.handle_color,
        });
        if let Some(caption) = &self.caption {
            let at = Point::new(self.track_rect.x, self.state.rect.y - CAPTION_SIZE);
            text::text(
                commands,
                &format!("{caption}: {:.2}", self.value),
                at,
                Color::BLACK,
                CAPTION_SIZE,
                TextAnchor::TopLeft,
            );
        }
    }

    fn place_handle(&mut self, center_x: f64) {
        let center = Point::new(center_x, self.handle_rect.center().y);
        self.handle_rect = self.handle_rect.with_center(center);
    }

    fn degenerate(&self) -> WidgetError {
        WidgetError::Degenerate {
            min: self.min_val,
            max: self.max_val,
        }
    }
}

impl Widget for Slider {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn update(&mut self, input: &InputState) -> WidgetResponse {
        self.drag(input.pointer, input.pointer_pressed)
    }

    fn render(&self, commands: &mut Vec<RenderCommand>) {
        self.draw(commands);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 100px wide, 30px tall slider at (50, 50): track spans x 50..150.
    fn slider() -> Slider {
        Slider::new(WidgetId::new(1), Point::new(50.0, 50.0), 100.0, 30.0).unwrap()
    }

    fn handle_center(slider: &Slider) -> Point {
        slider.handle_rect().center()
    }

    #[test]
    fn test_layout_matches_box() {
        let slider = slider();
        assert_eq!(slider.track_rect(), Rect::new(50.0, 57.5, 100.0, 15.0));
        assert_eq!(slider.handle_rect().width, 30.0);
        assert_eq!(handle_center(&slider), Point::new(50.0, 65.0));
        assert_eq!(slider.value(), 0.0);
    }

    #[test]
    fn test_rejects_flat_bounds() {
        let err = Slider::new(WidgetId::new(1), Point::ZERO, 100.0, 0.0).err();
        assert_eq!(err, Some(WidgetError::InvalidBounds { width: 100.0, height: 0.0 }));
    }

    #[test]
    fn test_drag_tracks_pointer() {
        let mut slider = slider();

        let response = slider.drag(Point::new(55.0, 65.0), true);
        assert!(slider.is_dragging());
        assert!(response.changed);
        assert!((slider.value() - 0.05).abs() < 1e-9);

        // The pointer leaves the handle's own rect; the drag continues.
        slider.drag(Point::new(120.0, 200.0), true);
        assert!((slider.value() - 0.7).abs() < 1e-9);
        assert!((handle_center(&slider).x - 120.0).abs() < 1e-9);

        slider.drag(Point::new(120.0, 200.0), false);
        assert!(!slider.is_dragging());

        // Released: moving the pointer no longer affects the value.
        slider.drag(Point::new(60.0, 200.0), false);
        assert!((slider.value() - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_drag_clamps_to_track() {
        let mut slider = slider();
        slider.drag(Point::new(50.0, 65.0), true);

        slider.drag(Point::new(500.0, 65.0), true);
        assert_eq!(slider.value(), 1.0);
        assert_eq!(handle_center(&slider).x, 150.0);

        slider.drag(Point::new(-500.0, 65.0), true);
        assert_eq!(slider.value(), 0.0);
        assert_eq!(handle_center(&slider).x, 50.0);
    }

    #[test]
    fn test_value_monotonic_and_in_range() {
        let mut slider = slider().with_range(2.0, 10.0);
        slider.drag(Point::new(50.0, 65.0), true);

        let mut last = slider.value();
        for step in 0..=300 {
            let x = 20.0 + f64::from(step) * 0.5;
            slider.drag(Point::new(x, 90.0), true);
            let value = slider.value();
            assert!((2.0..=10.0).contains(&value), "value {value} out of range");
            assert!(value >= last, "value went backwards at x={x}");
            let center = handle_center(&slider).x;
            assert!(center >= slider.track_rect().x && center <= slider.track_rect().right());
            last = value;
        }
    }

    #[test]
    fn test_value_rounded_to_two_places() {
        let mut slider = slider();
        slider.drag(Point::new(50.0, 65.0), true);
        slider.drag(Point::new(83.333, 65.0), true);
        assert_eq!(slider.value(), 0.33);
    }

    #[test]
    fn test_press_off_handle_does_not_grab() {
        let mut slider = slider();
        slider.drag(Point::new(140.0, 65.0), true);
        assert!(!slider.is_dragging());
        assert_eq!(slider.value(), 0.0);
    }

    #[test]
    fn test_set_value_positions_handle() {
        let mut slider = slider().with_range(0.0, 4.0);
        slider.set_value(1.0).unwrap();
        assert_eq!(handle_center(&slider).x, 75.0);

        slider.set_value(99.0).unwrap();
        assert_eq!(slider.value(), 4.0);
    }

    #[test]
    fn test_degenerate_range_reports_instead_of_dividing() {
        let mut slider = slider().with_range(3.0, 3.0);
        assert!(slider.is_degenerate());
        assert_eq!(
            slider.set_value(5.0),
            Err(WidgetError::Degenerate { min: 3.0, max: 3.0 })
        );

        slider.drag(Point::new(50.0, 65.0), true);
        let response = slider.drag(Point::new(120.0, 65.0), true);
        assert_eq!(response.fault, Some(WidgetError::Degenerate { min: 3.0, max: 3.0 }));
        assert_eq!(slider.value(), 3.0);
        assert!(slider.value().is_finite());
    }

    #[test]
    fn test_set_center_moves_rigidly() {
        let mut slider = slider();
        let offset = handle_center(&slider).x - slider.track_rect().x;

        slider.set_center(Point::new(300.0, 300.0));
        assert_eq!(slider.bounds().center(), Point::new(300.0, 300.0));
        assert_eq!(slider.track_rect().center(), Point::new(300.0, 300.0));
        assert!((handle_center(&slider).x - slider.track_rect().x - offset).abs() < 1e-9);
    }

    #[test]
    fn test_draw_does_not_mutate() {
        let slider = slider().with_caption("mass");
        let mut commands = Vec::new();
        slider.draw(&mut commands);

        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[1], RenderCommand::Ellipse { .. }));
    }
}
