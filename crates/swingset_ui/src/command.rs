//! Zero-argument commands held by buttons and dropdown options.

/// Something a widget can trigger.
///
/// The widget never knows what the command does; it only decides when.
pub trait Command {
    /// Runs the command.
    fn invoke(&mut self);
}

impl<F: FnMut()> Command for F {
    fn invoke(&mut self) {
        self()
    }
}

/// Owned, type-erased command.
pub type BoxedCommand = Box<dyn Command>;
