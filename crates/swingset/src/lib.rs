//! # SWINGSET
//!
//! A chained pendulum whose masses, arm lengths and angles are tuned live
//! through on-screen widgets.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                           SWINGSET                                  │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                                                                     │
//! │  InputSource ──> Controls (swingset_ui) ──> ActionBus               │
//! │                        │                        │                   │
//! │                        │ ParamLookup            │ SimAction         │
//! │                        v                        v                   │
//! │                      Chain  <──────────── Simulation::tick          │
//! │                        │                                            │
//! │                        v                                            │
//! │                  UIRenderer ──> RenderSink                          │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `chain`: Bodies, tension and position propagation
//! - `config`: TOML configuration
//! - `events`: Widget-to-simulation action queue
//! - `game_loop`: Tick ordering, pacing and frame statistics
//! - `scene`: Widget and chain assembly
//!
//! Window creation, fonts and presentation live outside this crate; the
//! embedding binary implements [`InputSource`], [`RenderSink`] and
//! [`Pacer`] and installs a `tracing` subscriber.

#![deny(unsafe_code)]

pub mod chain;
pub mod config;
pub mod error;
pub mod events;
pub mod game_loop;
pub mod scene;

// Re-export the widget layer
pub use swingset_ui as ui;

// Re-export commonly used types
pub use chain::{Body, BodySnapshot, Chain, EvalReport, ParamSource, COS_EPSILON};
pub use config::{BodyConfig, GravityPreset, RangeConfig, SimulationConfig};
pub use error::{ChainError, ChainResult, ConfigError, SimError, SimResult};
pub use events::{ActionBus, ActionSender, SimAction};
pub use game_loop::{
    FramePacer, FrameStats, FrameStatsAccumulator, Pacer, Simulation, TickOutcome, TickReport,
};
pub use scene::{BodyControls, Scene};
pub use swingset_ui::{InputSource, InputState, RenderSink};
