//! Simulation configuration.
//!
//! Loaded once at startup from TOML. Every field has a default, so an empty
//! file (or no file at all) gives the stock two-arm pendulum.
//!
//! ```toml
//! target_fps = 60
//! gravity = 9.81
//!
//! [[bodies]]
//! angle = 0.6
//! mass = { min = 0.5, max = 5.0, value = 1.0 }
//! radius = { min = 0.1, max = 1.0, value = 0.5 }
//!
//! [[gravity_presets]]
//! label = "Moon"
//! gravity = 1.62
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A slider range with its starting value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RangeConfig {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Starting value.
    pub value: f64,
}

impl RangeConfig {
    /// Creates a range.
    #[must_use]
    pub const fn new(min: f64, max: f64, value: f64) -> Self {
        Self { min, max, value }
    }

    fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.value.is_finite()
    }
}

/// One link of the chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    /// Starting angle in radians.
    pub angle: f64,
    /// Angular velocity used when integration is on (radians per unit step).
    pub angular_velocity: f64,
    /// Mass slider.
    pub mass: RangeConfig,
    /// Arm length slider (multiplied by `radius_scale` on screen).
    pub radius: RangeConfig,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            angle: 0.6,
            angular_velocity: 0.0,
            mass: RangeConfig::new(0.5, 5.0, 1.0),
            radius: RangeConfig::new(0.1, 1.0, 0.5),
        }
    }
}

/// A named gravity value offered in the dropdown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GravityPreset {
    /// Label shown in the dropdown.
    pub label: String,
    /// Gravitational acceleration.
    pub gravity: f64,
}

impl GravityPreset {
    /// Creates a preset.
    #[must_use]
    pub fn new(label: impl Into<String>, gravity: f64) -> Self {
        Self {
            label: label.into(),
            gravity,
        }
    }
}

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Target frames per second.
    pub target_fps: u32,
    /// Gravitational acceleration at startup.
    pub gravity: f64,
    /// Pixels per unit of arm length.
    pub radius_scale: f64,
    /// Chain anchor position `[x, y]`.
    pub anchor: [f64; 2],
    /// Anchor movement per tick while an arrow key is held.
    pub anchor_speed: f64,
    /// Angle change applied by the +/- buttons (radians).
    pub angle_step: f64,
    /// Fraction of angular velocity added to the angle each tick.
    pub step_fraction: f64,
    /// Start with angular integration running.
    pub integrate: bool,
    /// Pending widget actions kept between ticks.
    pub action_capacity: usize,
    /// Window size `[width, height]`.
    pub window: [f64; 2],
    /// Chain links, root first.
    pub bodies: Vec<BodyConfig>,
    /// Dropdown gravity presets, in display order.
    pub gravity_presets: Vec<GravityPreset>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            gravity: 9.81,
            radius_scale: 200.0,
            anchor: [400.0, 150.0],
            anchor_speed: 4.0,
            angle_step: 0.05,
            step_fraction: 1.0 / 60.0,
            integrate: false,
            action_capacity: 128,
            window: [800.0, 600.0],
            bodies: vec![
                BodyConfig::default(),
                BodyConfig {
                    angle: 1.0,
                    ..BodyConfig::default()
                },
            ],
            gravity_presets: vec![
                GravityPreset::new("Earth", 9.81),
                GravityPreset::new("Moon", 1.62),
                GravityPreset::new("Mars", 3.71),
                GravityPreset::new("Jupiter", 24.79),
            ],
        }
    }
}

impl SimulationConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for values [`validate`](Self::validate)
    /// rejects.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks that the configuration can drive a simulation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.bodies.is_empty() {
            return invalid("at least one body is required".into());
        }
        if self.target_fps == 0 {
            return invalid("target_fps must be positive".into());
        }
        if self.action_capacity == 0 {
            return invalid("action_capacity must be positive".into());
        }
        let scalars = [
            ("gravity", self.gravity),
            ("anchor_speed", self.anchor_speed),
            ("angle_step", self.angle_step),
            ("step_fraction", self.step_fraction),
            ("anchor.x", self.anchor[0]),
            ("anchor.y", self.anchor[1]),
        ];
        if let Some((name, value)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return invalid(format!("{name} must be finite, got {value}"));
        }
        if !(self.radius_scale.is_finite() && self.radius_scale > 0.0) {
            return invalid(format!("radius_scale must be positive, got {}", self.radius_scale));
        }
        if !(self.window[0] > 0.0 && self.window[1] > 0.0) {
            return invalid(format!(
                "window must have positive size, got {}x{}",
                self.window[0], self.window[1]
            ));
        }
        for (index, body) in self.bodies.iter().enumerate() {
            if !(body.angle.is_finite()
                && body.angular_velocity.is_finite()
                && body.mass.is_finite()
                && body.radius.is_finite())
            {
                return invalid(format!("body {index} has non-finite values"));
            }
        }
        if let Some(preset) = self.gravity_presets.iter().find(|p| !p.gravity.is_finite()) {
            return invalid(format!("gravity preset {} is not finite", preset.label));
        }
        Ok(())
    }

    /// Frame duration for `target_fps`.
    #[must_use]
    pub fn frame_time(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / f64::from(self.target_fps.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bodies.len(), 2);
        assert_eq!(config.gravity_presets.len(), 4);
    }

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = SimulationConfig::from_toml_str("").unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_parse_partial_document() {
        let config = SimulationConfig::from_toml_str(
            r#"
            target_fps = 30
            gravity = 1.62
            integrate = true

            [[bodies]]
            angle = 0.1
            mass = { min = 1.0, max = 2.0, value = 1.5 }

            [[gravity_presets]]
            label = "Pluto"
            gravity = 0.62
            "#,
        )
        .unwrap();

        assert_eq!(config.target_fps, 30);
        assert!(config.integrate);
        assert_eq!(config.bodies.len(), 1);
        assert_eq!(config.bodies[0].angle, 0.1);
        assert_eq!(config.bodies[0].mass, RangeConfig::new(1.0, 2.0, 1.5));
        // Unspecified body fields fall back to defaults.
        assert_eq!(config.bodies[0].radius, BodyConfig::default().radius);
        assert_eq!(config.gravity_presets, vec![GravityPreset::new("Pluto", 0.62)]);
        assert_eq!(config.radius_scale, 200.0);
    }

    #[test]
    fn test_rejects_empty_chain() {
        let err = SimulationConfig::from_toml_str("bodies = []").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("body")));
    }

    #[test]
    fn test_rejects_zero_fps() {
        let err = SimulationConfig::from_toml_str("target_fps = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_action_capacity() {
        let err = SimulationConfig::from_toml_str("action_capacity = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("action_capacity")));
    }

    #[test]
    fn test_rejects_non_finite_scalars() {
        for (source, field) in [
            ("gravity = nan", "gravity"),
            ("angle_step = inf", "angle_step"),
            ("anchor = [400.0, -inf]", "anchor.y"),
        ] {
            let err = SimulationConfig::from_toml_str(source).unwrap_err();
            assert!(
                matches!(&err, ConfigError::Invalid(msg) if msg.contains(field)),
                "{source}: {err}"
            );
        }
    }

    #[test]
    fn test_rejects_non_positive_radius_scale() {
        for source in ["radius_scale = -1.0", "radius_scale = 0.0", "radius_scale = nan"] {
            let err = SimulationConfig::from_toml_str(source).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("radius_scale")));
        }
    }

    #[test]
    fn test_rejects_non_finite_body() {
        let err = SimulationConfig::from_toml_str(
            r#"
            [[bodies]]
            angle = 0.2
            angular_velocity = inf
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("body 0")));
    }

    #[test]
    fn test_rejects_non_finite_preset() {
        let err = SimulationConfig::from_toml_str(
            r#"
            [[gravity_presets]]
            label = "Mars"
            gravity = inf
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("Mars")));
    }

    #[test]
    fn test_rejects_bad_window() {
        let err = SimulationConfig::from_toml_str("window = [0.0, 600.0]").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("window")));
    }

    #[test]
    fn test_syntax_error_is_parse_error() {
        let err = SimulationConfig::from_toml_str("target_fps = = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SimulationConfig::from_toml_file("/nonexistent/swingset.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = SimulationConfig::default();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(SimulationConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_frame_time() {
        let config = SimulationConfig::default();
        assert_eq!(config.frame_time().as_micros(), 16_666);
    }
}
