//! Scene assembly.
//!
//! Builds the widgets and the chain from a [`SimulationConfig`] and wires
//! them together:
//!
//! ```text
//!  mass 1   ═══●═══          ┌─────────┬───┐
//!  radius 1 ═●═════          │  Earth  │ v │
//!  angle 1  ════●══          └─────────┴───┘
//!  ...
//!                        ●  anchor
//!                         ╲
//!                          ● ── ●
//!
//!  [+] [-] [Resume] [Reset]
//! ```
//!
//! Sliders feed the chain through [`ParamLookup`]; buttons and the dropdown
//! post [`SimAction`]s on the scene's [`ActionBus`].

use swingset_ui::{
    Button, ButtonId, Controls, Dropdown, DropdownId, MonospaceMetrics, ParamLookup, Point,
    RenderCommand, Slider, SliderId, Style,
};
use tracing::{debug, warn};

use crate::chain::{Body, Chain, EvalReport, ParamSource};
use crate::config::{RangeConfig, SimulationConfig};
use crate::error::SimResult;
use crate::events::{ActionBus, ActionSender, SimAction};

/// Left edge of the slider column.
const SLIDER_X: f64 = 20.0;
/// Top of the first slider.
const SLIDER_TOP: f64 = 40.0;
/// Slider box size.
const SLIDER_WIDTH: f64 = 160.0;
const SLIDER_HEIGHT: f64 = 16.0;
/// Vertical distance between two sliders, caption included.
const SLIDER_PITCH: f64 = 45.0;
/// Gap between two buttons in the bottom row.
const BUTTON_GAP: f64 = 15.0;
/// Distance of the button row from the window bottom.
const BUTTON_ROW_OFFSET: f64 = 60.0;
/// Width reserved for the gravity dropdown at the top right.
const MENU_WIDTH: f64 = 220.0;

/// Label of the integration button while the chain is paused.
pub const RESUME_LABEL: &str = "Resume";
/// Label of the integration button while the chain is moving.
pub const PAUSE_LABEL: &str = "Pause";

/// Sliders that drive one body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BodyControls {
    /// Mass slider.
    pub mass: SliderId,
    /// Arm length slider.
    pub radius: SliderId,
    /// Angle slider, ranging over `[-pi, pi]`.
    pub angle: SliderId,
}

/// Widgets, chain and action queue of one simulation.
pub struct Scene {
    controls: Controls,
    chain: Chain,
    actions: ActionBus,
    bodies: Vec<BodyControls>,
    pause_button: ButtonId,
    gravity_menu: Option<DropdownId>,
}

impl Scene {
    /// Builds the stock scene for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SimError::Config`] if `config` fails
    /// [`SimulationConfig::validate`], [`crate::SimError::Widget`] if a widget
    /// gets an empty box and [`crate::SimError::Chain`] if the chain rejects
    /// its bodies.
    pub fn from_config(config: &SimulationConfig) -> SimResult<Self> {
        config.validate()?;
        let metrics = MonospaceMetrics::default();
        let style = Style::default();
        let actions = ActionBus::new(config.action_capacity);
        let mut controls = Controls::new();

        let mut row = 0.0;
        let mut next_row = || {
            let top = SLIDER_TOP + row * SLIDER_PITCH;
            row += 1.0;
            Point::new(SLIDER_X, top)
        };

        let mut bodies = Vec::with_capacity(config.bodies.len());
        let mut handles = Vec::with_capacity(config.bodies.len());
        for (index, body) in config.bodies.iter().enumerate() {
            let number = index + 1;
            let mass = add_slider(&mut controls, next_row(), format!("mass {number}"), body.mass)?;
            let radius = add_slider(&mut controls, next_row(), format!("radius {number}"), body.radius)?;
            let angle_range = RangeConfig::new(-std::f64::consts::PI, std::f64::consts::PI, body.angle);
            let angle = add_slider(&mut controls, next_row(), format!("angle {number}"), angle_range)?;

            bodies.push(
                Body::new(body.angle, ParamSource::Slider(radius), ParamSource::Slider(mass))
                    .with_angle_source(angle)
                    .with_angular_velocity(body.angular_velocity),
            );
            handles.push(BodyControls { mass, radius, angle });
        }

        let [width, height] = config.window;
        let mut x = SLIDER_X;
        let y = height - BUTTON_ROW_OFFSET;
        let mut add_button = |controls: &mut Controls, label: &str, action: SimAction| -> SimResult<ButtonId> {
            let sender = actions.sender();
            let id = controls.next_id();
            let button = Button::new(
                id,
                label,
                Point::new(x, y),
                move || {
                    sender.send(action);
                },
                style,
                &metrics,
            )?;
            x = button.button_rect().right() + BUTTON_GAP;
            Ok(controls.add_button(button))
        };

        add_button(&mut controls, "+", SimAction::NudgeAngle(config.angle_step))?;
        add_button(&mut controls, "-", SimAction::NudgeAngle(-config.angle_step))?;
        let label = if config.integrate { PAUSE_LABEL } else { RESUME_LABEL };
        let pause_button = add_button(&mut controls, label, SimAction::ToggleIntegration)?;
        add_button(&mut controls, "Reset", SimAction::ResetAngles)?;

        let gravity_menu = if config.gravity_presets.is_empty() {
            None
        } else {
            let id = controls.next_id();
            let pos = Point::new(width - MENU_WIDTH, SLIDER_TOP);
            let mut menu = Dropdown::new(id, "Gravity", pos, style, &metrics)?;
            for preset in &config.gravity_presets {
                menu.add_option(&preset.label, gravity_command(actions.sender(), preset.gravity));
            }
            Some(controls.add_dropdown(menu))
        };

        let anchor = Point::new(config.anchor[0], config.anchor[1]);
        let chain = Chain::new(anchor, config.radius_scale, bodies)?;

        debug!(
            bodies = chain.len(),
            widgets = controls.len(),
            presets = config.gravity_presets.len(),
            "scene built"
        );

        Ok(Self {
            controls,
            chain,
            actions,
            bodies: handles,
            pause_button,
            gravity_menu,
        })
    }

    /// All widgets.
    #[must_use]
    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// All widgets, mutably.
    pub fn controls_mut(&mut self) -> &mut Controls {
        &mut self.controls
    }

    /// The chain.
    #[must_use]
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// The chain, mutably.
    pub fn chain_mut(&mut self) -> &mut Chain {
        &mut self.chain
    }

    /// Queue that widget commands post to.
    #[must_use]
    pub fn actions(&self) -> &ActionBus {
        &self.actions
    }

    /// Slider handles per body, root first.
    #[must_use]
    pub fn body_controls(&self) -> &[BodyControls] {
        &self.bodies
    }

    /// The Pause/Resume button.
    #[must_use]
    pub fn pause_button(&self) -> ButtonId {
        self.pause_button
    }

    /// The gravity dropdown, absent when no presets are configured.
    #[must_use]
    pub fn gravity_menu(&self) -> Option<DropdownId> {
        self.gravity_menu
    }

    /// Updates the Pause/Resume label for the integration state.
    pub fn set_running(&mut self, running: bool) {
        if let Some(button) = self.controls.button_mut(self.pause_button) {
            button.change_text(if running { PAUSE_LABEL } else { RESUME_LABEL });
        }
    }

    /// Copies changed angle sliders into the chain.
    pub fn apply_angle_sliders(&mut self, changed: &[SliderId]) {
        self.chain.apply_angle_params(changed, &self.controls);
    }

    /// Recomputes the chain from the current slider values.
    pub fn evaluate(&mut self, gravity: f64) -> EvalReport {
        self.chain.evaluate(gravity, &self.controls)
    }

    /// Puts every body and its angle slider back at the starting angle.
    pub fn reset_angles(&mut self) {
        self.chain.reset_angles();
        for index in 0..self.bodies.len() {
            self.sync_angle_slider(index);
        }
    }

    /// Rotates the free end by `delta` radians and moves its angle slider
    /// along.
    pub fn nudge_free_end(&mut self, delta: f64) {
        self.chain.nudge_free_end(delta);
        if let Some(last) = self.bodies.len().checked_sub(1) {
            self.sync_angle_slider(last);
        }
    }

    fn sync_angle_slider(&mut self, index: usize) {
        let (Some(body), Some(handles)) = (self.chain.body(index), self.bodies.get(index)) else {
            return;
        };
        if let Some(slider) = self.controls.slider_mut(handles.angle) {
            if let Err(err) = slider.set_value(body.angle) {
                warn!(body = index, %err, "cannot move angle slider");
            }
        }
    }

    /// Current value of a slider.
    #[must_use]
    pub fn param(&self, id: SliderId) -> Option<f64> {
        self.controls.param(id)
    }

    /// Queues the chain, then the widgets on top of it.
    pub fn render(&self, commands: &mut Vec<RenderCommand>) {
        self.chain.render(commands);
        self.controls.render(commands);
    }
}

fn add_slider(
    controls: &mut Controls,
    pos: Point,
    caption: String,
    range: RangeConfig,
) -> SimResult<SliderId> {
    let id = controls.next_id();
    let mut slider = Slider::new(id, pos, SLIDER_WIDTH, SLIDER_HEIGHT)?
        .with_range(range.min, range.max)
        .with_caption(caption);
    if let Err(err) = slider.set_value(range.value) {
        warn!(widget = id.raw(), %err, "slider starts pinned at its lower bound");
    }
    Ok(controls.add_slider(slider))
}

fn gravity_command(sender: ActionSender, gravity: f64) -> impl FnMut() {
    move || {
        sender.send(SimAction::SetGravity(gravity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BodyConfig, GravityPreset};
    use crate::error::{ConfigError, SimError};
    use swingset_ui::InputState;

    fn press(scene: &mut Scene, at: Point) {
        scene.controls_mut().update(&InputState::at(at.x, at.y).pressed());
        scene.controls_mut().update(&InputState::at(at.x, at.y));
    }

    #[test]
    fn test_stock_scene_layout() {
        let scene = Scene::from_config(&SimulationConfig::default()).unwrap();

        // 3 sliders per body, 4 buttons, 1 dropdown.
        assert_eq!(scene.controls().len(), 2 * 3 + 4 + 1);
        assert_eq!(scene.chain().len(), 2);
        assert_eq!(scene.body_controls().len(), 2);
        assert!(scene.gravity_menu().is_some());
    }

    #[test]
    fn test_sliders_start_at_configured_values() {
        let scene = Scene::from_config(&SimulationConfig::default()).unwrap();
        let first = scene.body_controls()[0];

        assert_eq!(scene.param(first.mass), Some(1.0));
        assert_eq!(scene.param(first.radius), Some(0.5));
        assert_eq!(scene.param(first.angle), Some(0.6));
        assert_eq!(
            scene.controls().slider(first.angle).unwrap().range(),
            (-std::f64::consts::PI, std::f64::consts::PI)
        );
    }

    #[test]
    fn test_chain_is_bound_to_sliders() {
        let mut scene = Scene::from_config(&SimulationConfig::default()).unwrap();
        let first = scene.body_controls()[0];
        scene.controls_mut().slider_mut(first.radius).unwrap().set_value(1.0).unwrap();

        let _ = scene.evaluate(9.81);
        let root = scene.chain().body(0).unwrap();
        assert!((root.radius() - 1.0).abs() < 1e-12);
        assert!((root.center().distance(scene.chain().anchor()) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_buttons_post_actions() {
        let mut scene = Scene::from_config(&SimulationConfig::default()).unwrap();
        let pause = scene.controls().button(scene.pause_button()).unwrap().button_rect();

        press(&mut scene, pause.center());
        assert_eq!(scene.actions().drain(), vec![SimAction::ToggleIntegration]);
    }

    #[test]
    fn test_gravity_menu_posts_preset() {
        let config = SimulationConfig {
            gravity_presets: vec![GravityPreset::new("Earth", 9.81), GravityPreset::new("Moon", 1.62)],
            ..SimulationConfig::default()
        };
        let mut scene = Scene::from_config(&config).unwrap();
        let menu = scene.gravity_menu().unwrap();

        let header = scene.controls().dropdown(menu).unwrap().header_rect();
        press(&mut scene, header.center());
        let moon = scene.controls().dropdown(menu).unwrap().option_rect(1).unwrap();
        press(&mut scene, moon.center());

        assert_eq!(scene.actions().drain(), vec![SimAction::SetGravity(1.62)]);
        assert_eq!(scene.controls().dropdown(menu).unwrap().selected_label(), "Moon");
    }

    #[test]
    fn test_no_presets_no_menu() {
        let config = SimulationConfig {
            gravity_presets: Vec::new(),
            ..SimulationConfig::default()
        };
        let scene = Scene::from_config(&config).unwrap();
        assert!(scene.gravity_menu().is_none());
    }

    #[test]
    fn test_pause_label_follows_running_state() {
        let mut scene = Scene::from_config(&SimulationConfig::default()).unwrap();
        let id = scene.pause_button();
        assert_eq!(scene.controls().button(id).unwrap().label(), RESUME_LABEL);

        scene.set_running(true);
        assert_eq!(scene.controls().button(id).unwrap().label(), PAUSE_LABEL);
    }

    #[test]
    fn test_reset_moves_angle_sliders_back() {
        let mut scene = Scene::from_config(&SimulationConfig::default()).unwrap();
        let first = scene.body_controls()[0];
        scene.chain_mut().nudge_free_end(0.5);
        scene.chain_mut().body_mut(0).unwrap().angle = 2.0;
        scene.controls_mut().slider_mut(first.angle).unwrap().set_value(2.0).unwrap();

        scene.reset_angles();
        assert_eq!(scene.chain().body(0).unwrap().angle, 0.6);
        assert_eq!(scene.chain().body(1).unwrap().angle, 1.0);
        assert_eq!(scene.param(first.angle), Some(0.6));
    }

    #[test]
    fn test_degenerate_range_is_not_fatal() {
        let config = SimulationConfig {
            bodies: vec![BodyConfig {
                mass: RangeConfig::new(2.0, 2.0, 2.0),
                ..BodyConfig::default()
            }],
            ..SimulationConfig::default()
        };
        let scene = Scene::from_config(&config).unwrap();
        let mass = scene.body_controls()[0].mass;
        assert_eq!(scene.param(mass), Some(2.0));
    }

    #[test]
    fn test_nudge_moves_free_end_slider() {
        let mut scene = Scene::from_config(&SimulationConfig::default()).unwrap();
        let [root, leaf] = [scene.body_controls()[0], scene.body_controls()[1]];

        scene.nudge_free_end(0.05);
        assert!((scene.chain().body(1).unwrap().angle - 1.05).abs() < 1e-12);
        assert_eq!(scene.param(leaf.angle), Some(scene.chain().body(1).unwrap().angle));
        assert_eq!(scene.param(root.angle), Some(0.6));

        // A later angle-slider pass must not pull the body back.
        scene.apply_angle_sliders(&[leaf.angle]);
        assert!((scene.chain().body(1).unwrap().angle - 1.05).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let zero_capacity = SimulationConfig {
            action_capacity: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            Scene::from_config(&zero_capacity),
            Err(SimError::Config(ConfigError::Invalid(_)))
        ));

        let nan_gravity = SimulationConfig {
            gravity: f64::NAN,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            Scene::from_config(&nan_gravity),
            Err(SimError::Config(ConfigError::Invalid(_)))
        ));
    }
}
