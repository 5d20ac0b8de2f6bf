//! Control surface: the only sanctioned way to change a body's state from
//! outside a step.  Every operation is immediate and total.

use super::KinematicObject;
use bevy::math::Vec2;

/// Handle onto the physics-world body a [`KinematicObject`] drives.
pub trait BodyBinding {
    /// World-space position of the owned shape.
    fn position(&self) -> Vec2;
    fn set_position(&mut self, position: Vec2);
    /// Zero any velocity the physics world keeps for the body.
    fn clear_velocity(&mut self);
    /// Exempt the body from external force integration (or restore it).
    fn set_kinematic(&mut self, kinematic: bool);
}

impl KinematicObject {
    /// Bind to `body`, switching it into kinematic mode.  Only attached
    /// objects are stepped by the plugin.
    pub fn attach<B: BodyBinding + ?Sized>(&mut self, body: &mut B) {
        body.set_kinematic(true);
        self.is_attached = true;
    }

    /// Release `body` back to force-driven simulation.
    pub fn detach<B: BodyBinding + ?Sized>(&mut self, body: &mut B) {
        body.set_kinematic(false);
        self.is_attached = false;
    }

    /// Suspend simulation and drop all motion.  Idempotent.
    pub fn freeze(&mut self) {
        self.is_frozen = true;
        self.velocity = Vec2::ZERO;
        self.target_velocity = Vec2::ZERO;
    }

    /// Resume simulation.  Idempotent.
    pub fn unfreeze(&mut self) {
        self.is_frozen = false;
    }

    /// Overwrite vertical velocity only.
    pub fn bounce_vertical(&mut self, value: f32) {
        self.velocity.y = value;
    }

    /// Overwrite both velocity components (knockback, reflection).
    pub fn bounce(&mut self, direction: Vec2) {
        self.velocity = direction;
    }

    /// Place the body at `position` and stop it, in both the engine and the
    /// physics world.  No collision query is made: teleporting into solid
    /// geometry is the caller's problem.
    pub fn teleport<B: BodyBinding + ?Sized>(&mut self, position: Vec2, body: &mut B) {
        body.set_position(position);
        self.velocity = Vec2::ZERO;
        body.clear_velocity();
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{ScriptedCaster, TestBody, GRAVITY_10};
    use super::super::{NoHorizontalIntent, StepClock};
    use super::*;

    #[test]
    fn freeze_is_idempotent() {
        let mut once = KinematicObject::default();
        once.bounce(Vec2::new(1.0, 2.0));
        once.freeze();

        let mut twice = KinematicObject::default();
        twice.bounce(Vec2::new(1.0, 2.0));
        twice.freeze();
        twice.freeze();

        assert_eq!(once.is_frozen(), twice.is_frozen());
        assert_eq!(once.velocity(), twice.velocity());
        assert_eq!(twice.velocity(), Vec2::ZERO);
    }

    #[test]
    fn unfreeze_is_idempotent_and_resumes_stepping() {
        let mut object = KinematicObject::default();
        let mut body = TestBody::default();
        let env = ScriptedCaster::empty();
        object.freeze();
        object.unfreeze();
        object.unfreeze();
        assert!(!object.is_frozen());

        object.step(&mut NoHorizontalIntent, &env, &mut body, StepClock::new(0.1, GRAVITY_10));
        assert!(object.velocity().y < 0.0);
    }

    #[test]
    fn bounce_vertical_leaves_horizontal_velocity() {
        let mut object = KinematicObject::default();
        object.bounce(Vec2::new(2.0, -1.0));
        object.bounce_vertical(5.0);
        assert_eq!(object.velocity(), Vec2::new(2.0, 5.0));
    }

    #[test]
    fn bounce_overwrites_both_components() {
        let mut object = KinematicObject::default();
        object.bounce_vertical(9.0);
        object.bounce(Vec2::new(3.0, 4.0));
        assert_eq!(object.velocity(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn teleport_sets_position_and_stops_body() {
        let mut object = KinematicObject::default();
        let mut body = TestBody {
            position: Vec2::new(1.0, 1.0),
            world_velocity: Vec2::new(4.0, 4.0),
            kinematic: true,
        };
        object.bounce(Vec2::new(3.0, 4.0));

        object.teleport(Vec2::new(-7.0, 2.5), &mut body);

        assert_eq!(body.position, Vec2::new(-7.0, 2.5));
        assert_eq!(body.world_velocity, Vec2::ZERO);
        assert_eq!(object.velocity(), Vec2::ZERO);
    }

    #[test]
    fn attach_and_detach_toggle_kinematic_mode() {
        let mut object = KinematicObject::default();
        let mut body = TestBody::default();
        assert!(!object.is_attached());

        object.attach(&mut body);
        assert!(body.kinematic && object.is_attached());

        object.detach(&mut body);
        assert!(!body.kinematic && !object.is_attached());
    }
}
