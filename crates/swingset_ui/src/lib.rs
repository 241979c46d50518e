//! # SWINGSET UI
//!
//! A small retained-mode widget layer for live-tuning a simulation:
//! - Sliders that keep tracking the pointer once grabbed
//! - Buttons that fire exactly once per physical click
//! - Dropdowns with an append-only option stack
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                     UI PIPELINE                        │
//! ├────────────────────────────────────────────────────────┤
//! │  InputState → Controls → Widget::update → Commands     │
//! │       ↓            ↓              ↓             ↓      │
//! │  Hit Testing   Debounce      Value Change   Invocation │
//! │                                                        │
//! │  Controls::render → UIRenderer → RenderSink            │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! Widgets never reach into application state. A press edge is reported to
//! the owning widget, which invokes its own [`Command`]; what that command
//! touches is the caller's business.

#![deny(unsafe_code)]

pub mod command;
pub mod error;
pub mod input;
pub mod layout;
pub mod render;
pub mod style;
pub mod text;
pub mod widget;

pub use command::{BoxedCommand, Command};
pub use error::{WidgetError, WidgetResult};
pub use input::{InputSource, InputState, Key};
pub use layout::{Point, Rect};
pub use render::{RenderCommand, RenderSink, UIRenderer};
pub use style::{Color, Style};
pub use text::{FontMetrics, MonospaceMetrics, TextAnchor};
pub use widget::{
    debounce, hit_test, Button, ButtonId, Controls, ControlsReport, Debouncer, Dropdown,
    DropdownId, InteractionState, ParamLookup, Slider, SliderId, Widget, WidgetId, WidgetResponse,
    WidgetState,
};
