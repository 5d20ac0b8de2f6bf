//! Velocity-policy extension point.
//!
//! Whatever owns input or AI implements [`VelocityPolicy`]; the engine calls
//! it once per non-frozen step to obtain the target horizontal velocity.

use super::KinematicObject;
use bevy::math::Vec2;

/// Supplies the desired velocity for the coming step.
///
/// Only the `x` component of the returned vector is used by the integrator.
/// The policy sees the body's state as of the end of the previous step
/// (velocity, grounded flag, frozen flag) but cannot mutate it; use the
/// control surface for that.
pub trait VelocityPolicy {
    fn compute_velocity(&mut self, body: &KinematicObject) -> Vec2;
}

/// Default policy: no horizontal intent.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHorizontalIntent;

impl VelocityPolicy for NoHorizontalIntent {
    fn compute_velocity(&mut self, _body: &KinematicObject) -> Vec2 {
        Vec2::ZERO
    }
}

impl<F> VelocityPolicy for F
where
    F: FnMut(&KinematicObject) -> Vec2,
{
    fn compute_velocity(&mut self, body: &KinematicObject) -> Vec2 {
        self(body)
    }
}
