//! Displacement resolution against the environment.

use super::{BodyBinding, KinematicObject, ShapeCaster};
use bevy::math::Vec2;

impl KinematicObject {
    /// Move the body by `displacement`, stopping `shell_radius` short of the
    /// nearest obstruction.
    ///
    /// Every contact along the sweep (in provider order, at most
    /// [`super::ContactBuffer::CAPACITY`]) is classified:
    ///
    /// | contact                        | effect on velocity                      |
    /// |--------------------------------|-----------------------------------------|
    /// | `normal.y > min_ground_normal_y` | marks grounded; vertical pass adopts it as ground normal |
    /// | while grounded                 | into-surface component removed (slide)  |
    /// | while airborne                 | `x = 0`, `y = min(y, 0)`                |
    ///
    /// Displacements no longer than `min_move_distance` are skipped entirely:
    /// no query and no commit.
    pub(crate) fn resolve<C, B>(
        &mut self,
        displacement: Vec2,
        vertical_pass: bool,
        env: &C,
        body: &mut B,
    ) where
        C: ShapeCaster + ?Sized,
        B: BodyBinding + ?Sized,
    {
        let mut distance = displacement.length();
        if distance <= self.settings.min_move_distance {
            return;
        }
        // Safe: distance is strictly positive past the guard above.
        let direction = displacement / distance;
        let shell = self.settings.shell_radius;

        self.hits.clear();
        env.cast(body.position(), direction, distance + shell, &mut self.hits);

        for i in 0..self.hits.len() {
            let contact = self.hits.as_slice()[i];
            let mut normal = contact.normal;

            if normal.y > self.settings.min_ground_normal_y {
                self.is_grounded = true;
                if vertical_pass {
                    self.ground_normal = normal;
                    normal.x = 0.0;
                }
            }

            if self.is_grounded {
                let projection = self.velocity.dot(normal);
                if projection < 0.0 {
                    self.velocity -= projection * normal;
                }
            } else {
                self.velocity.x = 0.0;
                self.velocity.y = self.velocity.y.min(0.0);
            }

            distance = distance.min(contact.distance - shell);
        }

        body.set_position(body.position() + direction * distance);
    }
}
