//! Widget registry.
//!
//! Owns every control of a scene and walks them in registration order.
//! Registration order is also input priority: when widgets overlap, the
//! earlier one sees the press edge first.

use tracing::warn;

use super::button::Button;
use super::core::{Widget, WidgetId, WidgetResponse};
use super::dropdown::Dropdown;
use super::slider::Slider;
use crate::error::WidgetError;
use crate::input::InputState;
use crate::render::RenderCommand;

/// Handle to a slider in a [`Controls`] registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SliderId(pub usize);

/// Handle to a button in a [`Controls`] registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonId(pub usize);

/// Handle to a dropdown in a [`Controls`] registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DropdownId(pub usize);

#[derive(Debug, Clone, Copy)]
enum Entry {
    Slider(usize),
    Button(usize),
    Dropdown(usize),
}

/// Read access to live slider values.
pub trait ParamLookup {
    /// Current value of slider `id`, or `None` if there is no such slider.
    fn param(&self, id: SliderId) -> Option<f64>;
}

/// Summary of one update pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlsReport {
    /// Sliders whose value moved this tick.
    pub changed_sliders: Vec<SliderId>,
    /// Number of buttons and dropdowns that fired.
    pub fired: usize,
    /// Recoverable faults, tagged with the widget that raised them.
    pub faults: Vec<(WidgetId, WidgetError)>,
}

/// Owning container for all widgets of a scene.
#[derive(Default)]
pub struct Controls {
    sliders: Vec<Slider>,
    buttons: Vec<Button>,
    dropdowns: Vec<Dropdown>,
    order: Vec<Entry>,
    next_id: u64,
}

impl Controls {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    /// Generates a new unique widget ID.
    pub fn next_id(&mut self) -> WidgetId {
        let id = WidgetId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Registers a slider.
    pub fn add_slider(&mut self, slider: Slider) -> SliderId {
        let index = self.sliders.len();
        self.sliders.push(slider);
        self.order.push(Entry::Slider(index));
        SliderId(index)
    }

    /// Registers a button.
    pub fn add_button(&mut self, button: Button) -> ButtonId {
        let index = self.buttons.len();
        self.buttons.push(button);
        self.order.push(Entry::Button(index));
        ButtonId(index)
    }

    /// Registers a dropdown.
    pub fn add_dropdown(&mut self, dropdown: Dropdown) -> DropdownId {
        let index = self.dropdowns.len();
        self.dropdowns.push(dropdown);
        self.order.push(Entry::Dropdown(index));
        DropdownId(index)
    }

    /// Slider by handle.
    #[must_use]
    pub fn slider(&self, id: SliderId) -> Option<&Slider> {
        self.sliders.get(id.0)
    }

    /// Mutable slider by handle.
    pub fn slider_mut(&mut self, id: SliderId) -> Option<&mut Slider> {
        self.sliders.get_mut(id.0)
    }

    /// Button by handle.
    #[must_use]
    pub fn button(&self, id: ButtonId) -> Option<&Button> {
        self.buttons.get(id.0)
    }

    /// Mutable button by handle.
    pub fn button_mut(&mut self, id: ButtonId) -> Option<&mut Button> {
        self.buttons.get_mut(id.0)
    }

    /// Dropdown by handle.
    #[must_use]
    pub fn dropdown(&self, id: DropdownId) -> Option<&Dropdown> {
        self.dropdowns.get(id.0)
    }

    /// Total number of registered widgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Updates every widget once, in registration order.
    pub fn update(&mut self, input: &InputState) -> ControlsReport {
        let mut report = ControlsReport::default();

        for &entry in &self.order {
            let (id, response): (WidgetId, WidgetResponse) = match entry {
                Entry::Slider(index) => {
                    let slider = &mut self.sliders[index];
                    let response = slider.update(input);
                    if response.changed {
                        report.changed_sliders.push(SliderId(index));
                    }
                    (slider.state().id, response)
                }
                Entry::Button(index) => {
                    let button = &mut self.buttons[index];
                    (button.state().id, button.update(input))
                }
                Entry::Dropdown(index) => {
                    let dropdown = &mut self.dropdowns[index];
                    (dropdown.state().id, dropdown.update(input))
                }
            };

            if response.clicked && !matches!(entry, Entry::Slider(_)) {
                report.fired += 1;
            }
            if let Some(fault) = response.fault {
                warn!(widget = id.raw(), %fault, "widget fault");
                report.faults.push((id, fault));
            }
        }

        report
    }

    /// Draws every widget, in registration order.
    pub fn render(&self, commands: &mut Vec<RenderCommand>) {
        for &entry in &self.order {
            match entry {
                Entry::Slider(index) => self.sliders[index].render(commands),
                Entry::Button(index) => self.buttons[index].render(commands),
                Entry::Dropdown(index) => self.dropdowns[index].render(commands),
            }
        }
    }
}

impl ParamLookup for Controls {
    fn param(&self, id: SliderId) -> Option<f64> {
        self.slider(id).map(Slider::value)
    }
}
