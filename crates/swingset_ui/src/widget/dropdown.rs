//! Dropdown selector.
//!
//! ```text
//!  ┌──────────────┬───┐
//!  │   selected   │ v │   header: bar box + arrow box (toggles open)
//!  ├──────────────┼───┘
//!  │   option 0   │       options: header width, fixed height,
//!  ├──────────────┤                insertion order, append-only
//!  │   option 1   │
//!  └──────────────┘
//! ```
//!
//! Header and options share one debouncer, so the press that opens the list
//! can never also select the option that appears under the pointer.

use tracing::debug;

use super::core::{hit_test, Debouncer, Widget, WidgetId, WidgetResponse, WidgetState};
use crate::command::{BoxedCommand, Command};
use crate::error::WidgetResult;
use crate::input::InputState;
use crate::layout::{Point, Rect};
use crate::render::RenderCommand;
use crate::style::Style;
use crate::text::{self, FontMetrics, TextAnchor};

/// Arrow glyph shown while closed.
const CLOSED_GLYPH: &str = "v";
/// Arrow glyph shown while open.
const OPEN_GLYPH: &str = "^";

/// One entry in the option stack.
struct DropdownOption {
    label: String,
    box_rect: Rect,
    command: BoxedCommand,
}

/// What a press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Header,
    Option(usize),
}

/// A dropdown with an append-only list of commands.
pub struct Dropdown {
    state: WidgetState,
    bar_rect: Rect,
    arrow_rect: Rect,
    option_height: f64,
    options: Vec<DropdownOption>,
    open: bool,
    selected_label: String,
    selected_index: Option<usize>,
    debouncer: Debouncer,
    style: Style,
}

impl Dropdown {
    /// Default horizontal padding, total.
    pub const PAD_X: f64 = 30.0;
    /// Default vertical padding, total.
    pub const PAD_Y: f64 = 20.0;

    /// Creates a closed dropdown whose header text starts at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::WidgetError::InvalidBounds`] if the header measures to
    /// an empty box.
    pub fn new(
        id: WidgetId,
        default_text: impl Into<String>,
        pos: Point,
        style: Style,
        metrics: &dyn FontMetrics,
    ) -> WidgetResult<Self> {
        Self::with_padding(id, default_text, pos, style, metrics, Self::PAD_X, Self::PAD_Y)
    }

    /// Like [`Dropdown::new`] with explicit padding.
    ///
    /// # Errors
    ///
    /// Returns [`crate::WidgetError::InvalidBounds`] if the header measures to
    /// an empty box.
    pub fn with_padding(
        id: WidgetId,
        default_text: impl Into<String>,
        pos: Point,
        style: Style,
        metrics: &dyn FontMetrics,
        pad_x: f64,
        pad_y: f64,
    ) -> WidgetResult<Self> {
        let default_text = default_text.into();
        let (w, h) = metrics.measure(&default_text, style.font_size);
        let bar_rect = Rect::new(pos.x, pos.y, w, h).inflate(pad_x, pad_y).validated()?;

        let (aw, ah) = metrics.measure(CLOSED_GLYPH, style.font_size);
        let arrow_rect = Rect::new(
            bar_rect.right() - style.border_width,
            bar_rect.y,
            aw + pad_x,
            ah + pad_y,
        );
        let option_height = h + pad_y;

        let header = Rect::new(
            bar_rect.x,
            bar_rect.y,
            arrow_rect.right() - bar_rect.x,
            bar_rect.height.max(arrow_rect.height),
        );

        Ok(Self {
            state: WidgetState::new(id, header),
            bar_rect,
            arrow_rect,
            option_height,
            options: Vec::new(),
            open: false,
            selected_label: default_text,
            selected_index: None,
            debouncer: Debouncer::new(),
            style,
        })
    }

    /// Appends an option below the current last one.
    ///
    /// The first option added also becomes the header text.
    pub fn add_option(&mut self, label: impl Into<String>, command: impl Command + 'static) {
        let label = label.into();
        let top = self
            .options
            .last()
            .map_or(self.bar_rect.bottom(), |last| last.box_rect.bottom())
            - self.style.border_width;
        let box_rect = Rect::new(self.bar_rect.x, top, self.bar_rect.width, self.option_height);

        if self.options.is_empty() {
            self.selected_label.clone_from(&label);
        }
        self.options.push(DropdownOption {
            label,
            box_rect,
            command: Box::new(command),
        });
    }

    /// True while the option stack is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Label shown in the header.
    #[must_use]
    pub fn selected_label(&self) -> &str {
        &self.selected_label
    }

    /// Index of the last selected option, if any was selected.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    /// Number of options.
    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Box of option `index`, in insertion order.
    #[must_use]
    pub fn option_rect(&self, index: usize) -> Option<Rect> {
        self.options.get(index).map(|option| option.box_rect)
    }

    /// Header box (bar and arrow).
    #[must_use]
    pub fn header_rect(&self) -> Rect {
        self.state.rect
    }

    fn target(&self, pointer: Point) -> Option<Target> {
        if hit_test(self.bar_rect, pointer) || hit_test(self.arrow_rect, pointer) {
            return Some(Target::Header);
        }
        if !self.open {
            return None;
        }
        self.options
            .iter()
            .position(|option| hit_test(option.box_rect, pointer))
            .map(Target::Option)
    }

    /// Advances the dropdown state machine for one tick.
    pub fn interact(&mut self, pointer: Point, pressed: bool) -> WidgetResponse {
        let target = self.target(pointer);
        let fired = self.debouncer.step(pressed, target.is_some());
        self.state.interaction = self.debouncer.state();
        self.state.hovered = target.is_some();

        let mut response = WidgetResponse {
            clicked: fired,
            hovered: target.is_some(),
            ..WidgetResponse::default()
        };
        if !fired {
            return response;
        }

        match target {
            Some(Target::Header) => {
                self.open = !self.open;
                debug!(widget = self.state.id.raw(), open = self.open, "dropdown toggled");
            }
            Some(Target::Option(index)) => {
                self.select(index);
                response.changed = true;
            }
            None => {}
        }
        response
    }

    fn select(&mut self, index: usize) {
        let Some(option) = self.options.get_mut(index) else {
            return;
        };
        self.open = false;
        self.selected_index = Some(index);
        self.selected_label.clone_from(&option.label);
        debug!(widget = self.state.id.raw(), option = %option.label, "dropdown option selected");
        option.command.invoke();
    }

    fn draw_box(&self, commands: &mut Vec<RenderCommand>, bounds: Rect, label: &str) {
        commands.push(RenderCommand::Rect {
            bounds,
            color: self.style.background,
            corner_radius: 0.0,
        });
        commands.push(RenderCommand::RectOutline {
            bounds,
            color: self.style.foreground,
            width: self.style.border_width,
        });
        text::text(
            commands,
            label,
            bounds.center(),
            self.style.foreground,
            self.style.font_size,
            TextAnchor::Center,
        );
    }

    /// Queues the header and, while open, the option stack.
    pub fn draw(&self, commands: &mut Vec<RenderCommand>) {
        self.draw_box(commands, self.bar_rect, &self.selected_label);
        let glyph = if self.open { OPEN_GLYPH } else { CLOSED_GLYPH };
        self.draw_box(commands, self.arrow_rect, glyph);

        if self.open {
            for option in &self.options {
                self.draw_box(commands, option.box_rect, &option.label);
            }
        }
    }
}

impl Widget for Dropdown {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn update(&mut self, input: &InputState) -> WidgetResponse {
        self.interact(input.pointer, input.pointer_pressed)
    }

    fn render(&self, commands: &mut Vec<RenderCommand>) {
        self.draw(commands);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::MonospaceMetrics;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn dropdown() -> Dropdown {
        Dropdown::new(
            WidgetId::new(3),
            "gravity",
            Point::new(20.0, 20.0),
            Style::default(),
            &MonospaceMetrics::default(),
        )
        .unwrap()
    }

    /// Clicks once (press then release) at `at`.
    fn click(dropdown: &mut Dropdown, at: Point) -> WidgetResponse {
        let response = dropdown.interact(at, true);
        dropdown.interact(at, false);
        response
    }

    fn with_logged_options(labels: &[&str]) -> (Dropdown, Rc<RefCell<Vec<String>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dropdown = dropdown();
        for label in labels {
            let log = Rc::clone(&log);
            let name = (*label).to_owned();
            dropdown.add_option(*label, move || log.borrow_mut().push(name.clone()));
        }
        (dropdown, log)
    }

    #[test]
    fn test_header_toggles() {
        let mut dropdown = dropdown();
        let header = dropdown.header_rect().center();

        click(&mut dropdown, header);
        assert!(dropdown.is_open());
        click(&mut dropdown, header);
        assert!(!dropdown.is_open());
    }

    #[test]
    fn test_hold_on_header_toggles_once() {
        let mut dropdown = dropdown();
        let header = dropdown.header_rect().center();

        for _ in 0..5 {
            dropdown.interact(header, true);
        }
        assert!(dropdown.is_open());
    }

    #[test]
    fn test_options_stack_below_header() {
        let (dropdown, _) = with_logged_options(&["earth", "moon", "jupiter"]);
        let bar = dropdown.bar_rect;

        let first = dropdown.option_rect(0).unwrap();
        assert_eq!(first.x, bar.x);
        assert_eq!(first.width, bar.width);
        assert_eq!(first.y, bar.bottom() - 2.0);

        for index in 1..3 {
            let above = dropdown.option_rect(index - 1).unwrap();
            let rect = dropdown.option_rect(index).unwrap();
            assert_eq!(rect.y, above.bottom() - 2.0);
            assert_eq!(rect.height, above.height);
            assert_eq!(rect.width, bar.width);
        }
    }

    #[test]
    fn test_first_option_becomes_header_text() {
        let (dropdown, _) = with_logged_options(&["earth", "moon"]);
        assert_eq!(dropdown.selected_label(), "earth");
        assert_eq!(dropdown.selected_index(), None);
    }

    #[test]
    fn test_select_every_option() {
        let labels = ["earth", "moon", "jupiter", "pluto"];
        let (mut dropdown, log) = with_logged_options(&labels);
        let header = dropdown.header_rect().center();

        for (k, label) in labels.iter().enumerate() {
            // Stir the open state a few times first.
            for _ in 0..=k {
                click(&mut dropdown, header);
                click(&mut dropdown, header);
            }
            click(&mut dropdown, header);
            assert!(dropdown.is_open());

            let at = dropdown.option_rect(k).unwrap().center();
            let response = click(&mut dropdown, at);

            assert!(response.changed);
            assert!(!dropdown.is_open());
            assert_eq!(dropdown.selected_label(), *label);
            assert_eq!(dropdown.selected_index(), Some(k));
            assert_eq!(log.borrow().last().map(String::as_str), Some(*label));
        }
        assert_eq!(log.borrow().len(), labels.len());
    }

    #[test]
    fn test_options_ignored_while_closed() {
        let (mut dropdown, log) = with_logged_options(&["earth"]);
        let at = dropdown.option_rect(0).unwrap().center();

        let response = click(&mut dropdown, at);
        assert!(!response.clicked);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_opening_press_does_not_select() {
        let (mut dropdown, log) = with_logged_options(&["earth"]);
        let header = dropdown.header_rect().center();
        let option = dropdown.option_rect(0).unwrap().center();

        // Press on the header, then slide onto the option while still held.
        dropdown.interact(header, true);
        dropdown.interact(option, true);
        dropdown.interact(option, false);

        assert!(dropdown.is_open());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_empty_dropdown_toggles_but_draws_no_stack() {
        let mut dropdown = dropdown();
        let header = dropdown.header_rect().center();

        click(&mut dropdown, header);
        assert!(dropdown.is_open());

        let mut commands = Vec::new();
        dropdown.draw(&mut commands);
        // Bar and arrow only: 3 commands each.
        assert_eq!(commands.len(), 6);

        let below = Point::new(header.x, dropdown.header_rect().bottom() + 10.0);
        let response = click(&mut dropdown, below);
        assert!(!response.clicked);
        assert!(dropdown.is_open());
    }

    #[test]
    fn test_open_dropdown_draws_options_and_arrow() {
        let (mut dropdown, _) = with_logged_options(&["earth", "moon"]);
        let header = dropdown.header_rect().center();
        click(&mut dropdown, header);

        let mut commands = Vec::new();
        dropdown.draw(&mut commands);
        assert_eq!(commands.len(), 12);
        assert!(commands.iter().any(|c| matches!(
            c,
            RenderCommand::Text { text, .. } if text == OPEN_GLYPH
        )));
    }
}
