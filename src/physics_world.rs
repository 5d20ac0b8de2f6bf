//! Rapier2D bindings for the kinematic engine.
//!
//! - [`RapierShapeCaster`] answers the engine's shape-cast queries from the
//!   Rapier query pipeline.
//! - [`RapierBody`] exposes an entity's `Transform`, `RigidBody` and
//!   `Velocity` as a [`BodyBinding`].

use crate::kinematic::{BodyBinding, Contact, ContactBuffer, ShapeCaster};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Shape caster for one body: sweeps that body's collider through the
/// Rapier world, ignoring the body itself and sensors.
pub struct RapierShapeCaster<'a> {
    context: &'a RapierContext<'a>,
    collider: &'a Collider,
    entity: Entity,
    groups: Option<CollisionGroups>,
}

impl<'a> RapierShapeCaster<'a> {
    pub fn new(
        context: &'a RapierContext<'a>,
        collider: &'a Collider,
        entity: Entity,
        groups: Option<CollisionGroups>,
    ) -> Self {
        Self {
            context,
            collider,
            entity,
            groups,
        }
    }
}

impl ShapeCaster for RapierShapeCaster<'_> {
    /// Rapier reports only the first hit of a cast, so the sweep is repeated
    /// with every collider already hit excluded until nothing more is found
    /// or the buffer is full.  Contacts therefore arrive nearest first.
    fn cast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        hits: &mut ContactBuffer,
    ) -> usize {
        let mut seen = [Entity::PLACEHOLDER; ContactBuffer::CAPACITY];
        let mut seen_len = 0;

        while !hits.is_full() {
            let not_seen = |e: Entity| !seen[..seen_len].contains(&e);
            let mut filter = QueryFilter::new()
                .exclude_sensors()
                .exclude_collider(self.entity)
                .predicate(&not_seen);
            if let Some(groups) = self.groups {
                filter = filter.groups(groups);
            }
            let options = ShapeCastOptions::with_max_time_of_impact(max_distance);

            // Kinematic bodies do not rotate.
            let Some((hit_entity, hit)) =
                self.context
                    .cast_shape(origin, 0.0, direction, &*self.collider.raw, options, filter)
            else {
                break;
            };

            // normal1 is the obstacle's outward normal in world space.
            let normal = hit
                .details
                .map(|details| details.normal1)
                .unwrap_or(-direction);
            hits.push(Contact::new(normal, hit.time_of_impact));
            seen[seen_len] = hit_entity;
            seen_len += 1;
        }

        hits.len()
    }
}

/// Mutable view of one Rapier-backed entity.
pub struct RapierBody<'a> {
    pub transform: &'a mut Transform,
    pub rigid_body: Option<&'a mut RigidBody>,
    pub velocity: Option<&'a mut Velocity>,
}

impl BodyBinding for RapierBody<'_> {
    fn position(&self) -> Vec2 {
        self.transform.translation.truncate()
    }

    fn set_position(&mut self, position: Vec2) {
        self.transform.translation.x = position.x;
        self.transform.translation.y = position.y;
    }

    fn clear_velocity(&mut self) {
        if let Some(velocity) = self.velocity.as_deref_mut() {
            *velocity = Velocity::zero();
        }
    }

    fn set_kinematic(&mut self, kinematic: bool) {
        if let Some(rigid_body) = self.rigid_body.as_deref_mut() {
            *rigid_body = if kinematic {
                RigidBody::KinematicPositionBased
            } else {
                RigidBody::Dynamic
            };
        }
    }
}
