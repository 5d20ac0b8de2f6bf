//! Velocity integration: gravity plus the policy's target horizontal velocity.

use super::{KinematicObject, StepClock};
use bevy::math::Vec2;

impl KinematicObject {
    /// A zero gravity modifier marks flying/anchored bodies.
    pub fn is_gravity_exempt(&self) -> bool {
        self.settings.gravity_modifier == 0.0
    }

    /// Update `velocity` for one step and return the displacement it implies.
    ///
    /// Gravity is scaled by the modifier only while falling; rising or
    /// resting bodies get full gravity.  The horizontal component is always
    /// overwritten by the target velocity.
    pub(crate) fn integrate(&mut self, clock: StepClock) -> Vec2 {
        if self.is_gravity_exempt() {
            self.velocity.y = 0.0;
        } else if self.velocity.y < 0.0 {
            self.velocity += self.settings.gravity_modifier * clock.gravity * clock.delta;
        } else {
            self.velocity += clock.gravity * clock.delta;
        }
        self.velocity.x = self.target_velocity.x;

        self.velocity * clock.delta
    }
}
