//! Input handling for UI.
//!
//! The window layer hands the core one [`InputState`] snapshot per tick.
//! Widgets only ever look at the snapshot; edge detection is their job.

use crate::layout::Point;

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape key.
    Escape,
    /// Space bar.
    Space,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Plus / equals key.
    Plus,
    /// Minus key.
    Minus,
    /// R key.
    R,
    /// Q key.
    Q,
}

/// Input state for the current tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    /// Pointer position in screen coordinates.
    pub pointer: Point,
    /// Primary pointer button is held.
    pub pointer_pressed: bool,
    /// Keys held during this tick.
    held_keys: Vec<Key>,
    /// The window asked to close.
    pub quit_requested: bool,
}

impl InputState {
    /// Creates an empty snapshot: pointer at the origin, nothing held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot with the pointer at `(x, y)` and the button released.
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            pointer: Point::new(x, y),
            ..Self::default()
        }
    }

    /// Marks the primary button as held.
    #[must_use]
    pub fn pressed(mut self) -> Self {
        self.pointer_pressed = true;
        self
    }

    /// Marks the primary button as released.
    #[must_use]
    pub fn released(mut self) -> Self {
        self.pointer_pressed = false;
        self
    }

    /// Adds a held key.
    #[must_use]
    pub fn with_key(mut self, key: Key) -> Self {
        self.hold(key);
        self
    }

    /// Marks the snapshot as carrying a quit request.
    #[must_use]
    pub fn quit(mut self) -> Self {
        self.quit_requested = true;
        self
    }

    /// Records a held key. Duplicates are ignored.
    pub fn hold(&mut self, key: Key) {
        if !self.held_keys.contains(&key) {
            self.held_keys.push(key);
        }
    }

    /// Returns true if the key is held this tick.
    #[must_use]
    pub fn key_held(&self, key: Key) -> bool {
        self.held_keys.contains(&key)
    }

    /// Returns all held keys in the order they were recorded.
    #[must_use]
    pub fn held_keys(&self) -> &[Key] {
        &self.held_keys
    }
}

/// Source of per-tick input snapshots (the window/event layer).
pub trait InputSource {
    /// Returns the input for the coming tick.
    ///
    /// Called exactly once per tick.
    fn poll(&mut self) -> InputState;
}
