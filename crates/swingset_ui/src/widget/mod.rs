//! Widget system for UI components.
//!
//! Sliders, buttons and dropdowns built on one shared hit-test and debounce
//! core, plus the registry that owns them.

mod button;
mod core;
mod dropdown;
mod registry;
mod slider;

pub use button::{Button, BUTTON_PADDING};
pub use self::core::{
    debounce, hit_test, Debouncer, InteractionState, Widget, WidgetId, WidgetResponse, WidgetState,
};
pub use dropdown::Dropdown;
pub use registry::{ButtonId, Controls, ControlsReport, DropdownId, ParamLookup, SliderId};
pub use slider::Slider;
