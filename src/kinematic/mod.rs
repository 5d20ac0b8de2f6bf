//! Kinematic movement and collision-resolution engine.
//!
//! [`KinematicObject`] turns a desired velocity into a collision-corrected
//! displacement once per fixed step:
//!
//! 1. **Integrator** ([`integrator`]): gravity and target horizontal velocity.
//! 2. **Mover** ([`mover`]): horizontal pass along the ground slope, then a
//!    vertical pass, each clamped to the nearest obstruction minus the shell.
//! 3. **Ground tracking**: `is_grounded` is rebuilt every step by the
//!    mover; `ground_normal` persists and orients the horizontal pass.
//! 4. **Control surface** ([`control`]): freeze, bounce, teleport and the
//!    attach/detach lifecycle.
//!
//! The module is engine-independent: the physics world is reached only
//! through [`ShapeCaster`] and [`BodyBinding`].  [`crate::simulation`] wires
//! it into Bevy.

pub mod contact;
pub mod control;
pub mod integrator;
pub mod mover;
pub mod policy;

pub use contact::{Contact, ContactBuffer, ShapeCaster};
pub use control::BodyBinding;
pub use policy::{NoHorizontalIntent, VelocityPolicy};

use crate::constants::{GRAVITY_MODIFIER, MIN_GROUND_NORMAL_Y, MIN_MOVE_DISTANCE, SHELL_RADIUS};
use crate::error::{
    validate_gravity_modifier, validate_min_ground_normal_y, validate_min_move_distance,
    validate_shell_radius, KinematicResult,
};
use bevy::math::Vec2;
use bevy::prelude::Component;

/// Per-body tuning, fixed for the lifetime of the body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicSettings {
    /// Contacts with `normal.y` strictly above this are ground.
    pub min_ground_normal_y: f32,
    /// Falling gravity scale; 0.0 selects gravity-exempt mode.
    pub gravity_modifier: f32,
    pub min_move_distance: f32,
    pub shell_radius: f32,
}

impl Default for KinematicSettings {
    fn default() -> Self {
        Self {
            min_ground_normal_y: MIN_GROUND_NORMAL_Y,
            gravity_modifier: GRAVITY_MODIFIER,
            min_move_distance: MIN_MOVE_DISTANCE,
            shell_radius: SHELL_RADIUS,
        }
    }
}

impl KinematicSettings {
    pub fn with_gravity_modifier(mut self, gravity_modifier: f32) -> Self {
        self.gravity_modifier = gravity_modifier;
        self
    }

    pub fn validate(&self) -> KinematicResult<()> {
        validate_min_ground_normal_y(self.min_ground_normal_y)?;
        validate_gravity_modifier(self.gravity_modifier)?;
        validate_min_move_distance(self.min_move_distance)?;
        validate_shell_radius(self.shell_radius)?;
        Ok(())
    }
}

/// Elapsed time and gravity for one step, supplied by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepClock {
    pub delta: f32,
    pub gravity: Vec2,
}

impl StepClock {
    pub fn new(delta: f32, gravity: Vec2) -> Self {
        Self { delta, gravity }
    }
}

/// State record of one kinematic body.
///
/// Velocity, ground state and the frozen flag are private: they change only
/// inside [`KinematicObject::step`] or through the control surface.
#[derive(Component, Debug, Clone)]
pub struct KinematicObject {
    settings: KinematicSettings,
    velocity: Vec2,
    target_velocity: Vec2,
    ground_normal: Vec2,
    is_grounded: bool,
    is_frozen: bool,
    is_attached: bool,
    hits: ContactBuffer,
}

impl Default for KinematicObject {
    fn default() -> Self {
        Self::new(KinematicSettings::default())
    }
}

impl KinematicObject {
    pub fn new(settings: KinematicSettings) -> Self {
        Self {
            settings,
            velocity: Vec2::ZERO,
            target_velocity: Vec2::ZERO,
            ground_normal: Vec2::Y,
            is_grounded: false,
            is_frozen: false,
            is_attached: false,
            hits: ContactBuffer::default(),
        }
    }

    pub fn settings(&self) -> &KinematicSettings {
        &self.settings
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Target velocity used by the most recent step (zero while frozen).
    pub fn target_velocity(&self) -> Vec2 {
        self.target_velocity
    }

    /// Last ground normal seen.  Only current when [`Self::is_grounded`] is
    /// true; otherwise it is the stale normal kept for slope-aligned movement.
    pub fn ground_normal(&self) -> Vec2 {
        self.ground_normal
    }

    /// Whether ground was touched during the most recent step.
    pub fn is_grounded(&self) -> bool {
        self.is_grounded
    }

    pub fn is_frozen(&self) -> bool {
        self.is_frozen
    }

    pub fn is_attached(&self) -> bool {
        self.is_attached
    }

    /// Advance one fixed step.
    ///
    /// No-op while frozen.  Otherwise asks `policy` for the target velocity,
    /// integrates gravity and runs the movement passes against `env`,
    /// committing the result to `body`.
    pub fn step<P, C, B>(&mut self, policy: &mut P, env: &C, body: &mut B, clock: StepClock)
    where
        P: VelocityPolicy + ?Sized,
        C: ShapeCaster + ?Sized,
        B: BodyBinding + ?Sized,
    {
        if self.is_frozen {
            return;
        }

        // Policies observe a cleared target.
        self.target_velocity = Vec2::ZERO;
        self.target_velocity = policy.compute_velocity(self);

        let delta_position = self.integrate(clock);

        if self.is_gravity_exempt() {
            self.resolve(Vec2::new(delta_position.x, 0.0), false, env, body);
            self.is_grounded = true;
            self.ground_normal = Vec2::Y;
        } else {
            self.is_grounded = false;

            // Perpendicular of the ground normal: horizontal motion follows the slope.
            let along_ground = Vec2::new(self.ground_normal.y, -self.ground_normal.x);
            self.resolve(along_ground * delta_position.x, false, env, body);
            self.resolve(Vec2::Y * delta_position.y, true, env, body);
        }
    }
}
