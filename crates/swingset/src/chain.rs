//! # SWINGSET Chain Model
//!
//! A singly-linked chain of point masses hanging from an anchor.
//!
//! ```text
//!   anchor ●──── body 0 ●──── body 1 ●──── ... ──── body n-1 ● (free end)
//!            r0,a0          r1,a1                    tension flows ←
//!                                                    position flows →
//! ```
//!
//! Features:
//! - Tension propagated from the free end towards the root
//! - Positions recomputed root to leaf, each pivot taken from the previous
//!   body's center in the same pass
//! - Radius and mass read live from sliders through [`ParamLookup`]
//! - Optional forward angle nudge (`angle += ω · step`); drift is accepted
//!
//! Bodies live in one `Vec` owned by the [`Chain`] and refer to each other
//! only by index.

use bytemuck::{Pod, Zeroable};
use swingset_ui::{Color, ParamLookup, Point, RenderCommand, SliderId};
use tracing::warn;

use crate::error::{ChainError, ChainResult};

/// Below this `|cos(angle)|` the tension formula is treated as undefined.
pub const COS_EPSILON: f64 = 1e-9;

/// Arm stroke width in pixels.
const ARM_WIDTH: f64 = 2.0;
/// Anchor dot radius in pixels.
const ANCHOR_RADIUS: f64 = 4.0;

// ============================================================================
// PARAMETERS
// ============================================================================

/// Where a body reads a live parameter from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamSource {
    /// Constant value.
    Fixed(f64),
    /// Current value of a slider.
    Slider(SliderId),
}

impl ParamSource {
    /// Resolves the parameter, falling back to `last` if the slider is gone.
    fn resolve<P: ParamLookup + ?Sized>(self, params: &P, last: f64) -> f64 {
        match self {
            Self::Fixed(value) => value,
            Self::Slider(id) => params.param(id).unwrap_or(last),
        }
    }

    fn initial(self) -> f64 {
        match self {
            Self::Fixed(value) => value,
            Self::Slider(_) => 0.0,
        }
    }
}

// ============================================================================
// BODY
// ============================================================================

/// One link of the chain.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    /// Position in the chain (0 is the root).
    index: usize,
    /// Angle in radians.
    pub angle: f64,
    /// Angular velocity, applied only while integration runs.
    pub angular_velocity: f64,
    initial_angle: f64,
    radius_source: ParamSource,
    mass_source: ParamSource,
    angle_source: Option<SliderId>,
    radius: f64,
    mass: f64,
    pivot: Point,
    center: Point,
    tension: f64,
}

impl Body {
    /// Creates a body at `angle` with the given parameter sources.
    #[must_use]
    pub fn new(angle: f64, radius: ParamSource, mass: ParamSource) -> Self {
        Self {
            index: 0,
            angle,
            angular_velocity: 0.0,
            initial_angle: angle,
            radius_source: radius,
            mass_source: mass,
            angle_source: None,
            radius: radius.initial(),
            mass: mass.initial(),
            pivot: Point::ZERO,
            center: Point::ZERO,
            tension: 0.0,
        }
    }

    /// Sets the angular velocity.
    #[must_use]
    pub fn with_angular_velocity(mut self, angular_velocity: f64) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Binds the angle to a slider whose value is the angle in radians.
    #[must_use]
    pub fn with_angle_source(mut self, slider: SliderId) -> Self {
        self.angle_source = Some(slider);
        self
    }

    /// Index in the owning chain.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// True for the body hanging from the anchor.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.index == 0
    }

    /// Pivot used in the last evaluation.
    #[must_use]
    pub fn pivot(&self) -> Point {
        self.pivot
    }

    /// Center computed in the last evaluation.
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Tension computed in the last evaluation (or the last defined one).
    #[must_use]
    pub fn tension(&self) -> f64 {
        self.tension
    }

    /// Arm length resolved in the last evaluation.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Mass resolved in the last evaluation.
    #[must_use]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Slider bound to the angle, if any.
    #[must_use]
    pub fn angle_source(&self) -> Option<SliderId> {
        self.angle_source
    }

    fn resolve<P: ParamLookup + ?Sized>(&mut self, params: &P) {
        self.radius = self.radius_source.resolve(params, self.radius);
        self.mass = self.mass_source.resolve(params, self.mass);
    }
}

/// Plain-data copy of a body's derived state.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct BodySnapshot {
    /// Pivot point.
    pub pivot: Point,
    /// Center point.
    pub center: Point,
    /// Angle in radians.
    pub angle: f64,
    /// Tension.
    pub tension: f64,
}

// ============================================================================
// CHAIN
// ============================================================================

/// Outcome of one [`Chain::evaluate`] call.
#[derive(Clone, Debug, Default, PartialEq)]
#[must_use]
pub struct EvalReport {
    /// Recoverable faults, root-most last.
    pub faults: Vec<ChainError>,
}

impl EvalReport {
    /// True if nothing went wrong.
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }
}

/// An ordered chain of bodies hanging from an anchor.
#[derive(Clone, Debug)]
pub struct Chain {
    bodies: Vec<Body>,
    anchor: Point,
    scale: f64,
}

impl Chain {
    /// Creates a chain. Body 0 hangs from `anchor`; arm lengths are multiplied
    /// by `scale` on screen.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidBody`] if `bodies` is empty, a body has a
    /// non-finite angle, or `scale` is not positive.
    pub fn new(anchor: Point, scale: f64, mut bodies: Vec<Body>) -> ChainResult<Self> {
        if bodies.is_empty() {
            return Err(ChainError::InvalidBody {
                index: 0,
                reason: "a chain needs at least one body".into(),
            });
        }
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ChainError::InvalidBody {
                index: 0,
                reason: format!("scale must be positive, got {scale}"),
            });
        }
        for (index, body) in bodies.iter_mut().enumerate() {
            if !body.angle.is_finite() {
                return Err(ChainError::InvalidBody {
                    index,
                    reason: format!("angle must be finite, got {}", body.angle),
                });
            }
            body.index = index;
        }

        Ok(Self {
            bodies,
            anchor,
            scale,
        })
    }

    /// Bodies, root first.
    #[must_use]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Body by index.
    #[must_use]
    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    /// Mutable body by index.
    pub fn body_mut(&mut self, index: usize) -> Option<&mut Body> {
        self.bodies.get_mut(index)
    }

    /// Number of bodies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Always false: construction rejects empty chains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Anchor point.
    #[must_use]
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Screen scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Index of the free end.
    #[must_use]
    pub fn free_end(&self) -> usize {
        self.bodies.len() - 1
    }

    /// Recomputes every body's tension and position.
    ///
    /// Tension runs free end to root; a body whose `cos(angle)` vanishes keeps
    /// its previous tension and is reported. Positions run root to leaf and
    /// are always updated.
    pub fn evaluate<P: ParamLookup + ?Sized>(&mut self, gravity: f64, params: &P) -> EvalReport {
        let mut report = EvalReport::default();

        for body in &mut self.bodies {
            body.resolve(params);
        }

        let mut load = 0.0;
        for body in self.bodies.iter_mut().rev() {
            let cos = body.angle.cos();
            if cos.abs() < COS_EPSILON {
                warn!(
                    body = body.index,
                    angle = body.angle,
                    tension = body.tension,
                    "tension undefined, keeping previous value"
                );
                report.faults.push(ChainError::UndefinedTension {
                    index: body.index,
                    angle: body.angle,
                });
            } else {
                body.tension = (load + body.mass * gravity) / cos;
            }
            load = body.tension * cos;
        }

        let mut pivot = self.anchor;
        for body in &mut self.bodies {
            body.pivot = pivot;
            let (sin, cos) = body.angle.sin_cos();
            body.center = pivot + Point::new(cos, sin) * (body.radius * self.scale);
            pivot = body.center;
        }

        report
    }

    /// Forward angle nudge: `angle += angular_velocity * step_fraction`.
    pub fn integrate(&mut self, step_fraction: f64) {
        for body in &mut self.bodies {
            body.angle += body.angular_velocity * step_fraction;
        }
    }

    /// Rotates only the free end.
    pub fn nudge_free_end(&mut self, delta: f64) {
        if let Some(body) = self.bodies.last_mut() {
            body.angle += delta;
        }
    }

    /// Moves the anchor. Derived pivots follow on the next evaluation.
    pub fn move_anchor(&mut self, dx: f64, dy: f64) {
        self.anchor = self.anchor + Point::new(dx, dy);
    }

    /// Copies angles from the listed sliders into the bodies bound to them.
    pub fn apply_angle_params<P: ParamLookup + ?Sized>(&mut self, changed: &[SliderId], params: &P) {
        for body in &mut self.bodies {
            let Some(source) = body.angle_source else {
                continue;
            };
            if !changed.contains(&source) {
                continue;
            }
            if let Some(angle) = params.param(source) {
                body.angle = angle;
            }
        }
    }

    /// Puts every body back at its starting angle.
    pub fn reset_angles(&mut self) {
        for body in &mut self.bodies {
            body.angle = body.initial_angle;
        }
    }

    /// Plain-data snapshot of every body, root first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<BodySnapshot> {
        self.bodies
            .iter()
            .map(|body| BodySnapshot {
                pivot: body.pivot,
                center: body.center,
                angle: body.angle,
                tension: body.tension,
            })
            .collect()
    }

    /// Queues arms, bobs and the anchor.
    pub fn render(&self, commands: &mut Vec<RenderCommand>) {
        for body in &self.bodies {
            commands.push(RenderCommand::Line {
                from: body.pivot,
                to: body.center,
                color: Color::ARM,
                width: ARM_WIDTH,
            });
        }
        for body in &self.bodies {
            commands.push(RenderCommand::Circle {
                center: body.center,
                radius: bob_radius(body.mass),
                color: Color::BOB,
            });
        }
        commands.push(RenderCommand::Circle {
            center: self.anchor,
            radius: ANCHOR_RADIUS,
            color: Color::BLACK,
        });
    }
}

/// Bob size grows with the square root of mass.
fn bob_radius(mass: f64) -> f64 {
    6.0 + 4.0 * mass.max(0.0).sqrt()
}
