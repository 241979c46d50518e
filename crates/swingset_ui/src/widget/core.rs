//! Core widget types and traits.
//!
//! Every interactive control shares the same two primitives: [`hit_test`]
//! and [`debounce`]. Button, dropdown and slider grab all go through them
//! instead of carrying their own press/release bookkeeping.

use crate::error::WidgetError;
use crate::input::InputState;
use crate::layout::{Point, Rect};
use crate::render::RenderCommand;

/// Unique identifier for a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Creates a new widget ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Pointer interaction state of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    /// Not claimed by a press.
    #[default]
    Idle,
    /// A press landed on the widget and has not been released yet.
    Pressed,
}

/// Returns true if the pointer is over `bounds`.
#[inline]
#[must_use]
pub fn hit_test(bounds: Rect, pointer: Point) -> bool {
    bounds.contains(pointer)
}

/// Advances the press state machine by one tick.
///
/// Returns `(fires, new_state)`. A widget fires only on the tick where a
/// press over it finds it `Idle`; holding the button keeps it `Pressed`, and
/// any release returns it to `Idle` wherever the pointer is.
#[inline]
#[must_use]
pub fn debounce(
    pressed_now: bool,
    bounds_hit: bool,
    state: InteractionState,
) -> (bool, InteractionState) {
    let fires = bounds_hit && pressed_now && state == InteractionState::Idle;
    let new_state = if bounds_hit && pressed_now {
        InteractionState::Pressed
    } else if !pressed_now {
        InteractionState::Idle
    } else {
        state
    };
    (fires, new_state)
}

/// Owned wrapper around [`debounce`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Debouncer {
    state: InteractionState,
}

impl Debouncer {
    /// Creates an idle debouncer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: InteractionState::Idle,
        }
    }

    /// Feeds one tick; returns true on a press edge.
    pub fn step(&mut self, pressed_now: bool, bounds_hit: bool) -> bool {
        let (fires, next) = debounce(pressed_now, bounds_hit, self.state);
        self.state = next;
        fires
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> InteractionState {
        self.state
    }
}

/// Common widget state.
#[derive(Debug, Clone)]
pub struct WidgetState {
    /// Widget identifier.
    pub id: WidgetId,
    /// Bounding rectangle.
    pub rect: Rect,
    /// Press state.
    pub interaction: InteractionState,
    /// Pointer is over the widget this tick.
    pub hovered: bool,
}

impl WidgetState {
    /// Creates a new widget state.
    #[must_use]
    pub fn new(id: WidgetId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            interaction: InteractionState::Idle,
            hovered: false,
        }
    }
}

/// Response from widget update.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WidgetResponse {
    /// Widget fired (button press, dropdown toggle or selection).
    pub clicked: bool,
    /// Widget value changed.
    pub changed: bool,
    /// Pointer is over the widget.
    pub hovered: bool,
    /// Recoverable fault hit during the update.
    pub fault: Option<WidgetError>,
}

/// Base trait for all widgets.
pub trait Widget {
    /// Returns the widget's state.
    fn state(&self) -> &WidgetState;

    /// Returns mutable access to the widget's state.
    fn state_mut(&mut self) -> &mut WidgetState;

    /// Handles this tick's input.
    ///
    /// Called every tick, pressed or not, so release edges are never missed.
    fn update(&mut self, input: &InputState) -> WidgetResponse;

    /// Generates render commands for this widget. Must not mutate state.
    fn render(&self, commands: &mut Vec<RenderCommand>);

    /// Returns the widget's bounding rectangle.
    fn bounds(&self) -> Rect {
        self.state().rect
    }
}
