//! Demo level: static platformer geometry and a gravity-exempt patrol drone.

use crate::config::KinematicConfig;
use crate::kinematic::KinematicObject;
use crate::simulation::{KinematicSet, TargetVelocity};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            drone_patrol_system.in_set(KinematicSet::ComputeVelocity),
        );
    }
}

/// Horizontal patrol state for a gravity-exempt body.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Drone {
    /// X coordinate the patrol is centred on.
    pub anchor_x: f32,
    /// +1.0 moving right, -1.0 moving left.
    pub heading: f32,
}

/// One static block of level geometry: centre, half extents, rotation.
struct Block {
    center: Vec2,
    half_extents: Vec2,
    angle: f32,
}

const fn block(x: f32, y: f32, half_w: f32, half_h: f32, angle: f32) -> Block {
    Block {
        center: Vec2::new(x, y),
        half_extents: Vec2::new(half_w, half_h),
        angle,
    }
}

/// Ground, a walkable 30° ramp, a steep wall and a ceiling overhang.
const LEVEL: [Block; 5] = [
    // ground
    block(0.0, -0.5, 14.0, 0.5, 0.0),
    // 30° ramp rising to the right
    block(2.0, 0.6, 3.0, 0.2, std::f32::consts::FRAC_PI_6),
    // 70° wall: too steep to walk
    block(9.0, 2.0, 2.5, 0.2, 70.0_f32 * std::f32::consts::PI / 180.0),
    // ceiling overhang above the spawn
    block(-6.0, 5.0, 2.0, 0.2, 0.0),
    // far-left boundary wall
    block(-13.5, 4.0, 0.5, 4.0, 0.0),
];

/// Spawn static level geometry.
pub fn spawn_level(mut commands: Commands) {
    for b in LEVEL.iter() {
        commands.spawn((
            RigidBody::Fixed,
            Collider::cuboid(b.half_extents.x, b.half_extents.y),
            Sprite::from_color(Color::srgb(0.35, 0.4, 0.5), b.half_extents * 2.0),
            Transform::from_translation(b.center.extend(0.0))
                .with_rotation(Quat::from_rotation_z(b.angle)),
        ));
    }
}

/// Spawn a gravity-exempt drone patrolling above the ground.
pub fn spawn_drone(mut commands: Commands, config: Res<KinematicConfig>) {
    let anchor = Vec2::new(3.0, 6.5);
    commands.spawn((
        Drone {
            anchor_x: anchor.x,
            heading: 1.0,
        },
        KinematicObject::new(config.body_settings().with_gravity_modifier(0.0)),
        TargetVelocity::default(),
        RigidBody::Dynamic,
        Collider::ball(0.35),
        Velocity::zero(),
        Sprite::from_color(Color::srgb(0.8, 0.3, 0.3), Vec2::splat(0.7)),
        Transform::from_translation(anchor.extend(1.0)),
    ));
}

/// Velocity policy for drones: walk back and forth within the patrol range.
///
/// The heading flips at either end of the range, or when the last step left
/// the drone with no horizontal velocity while it wanted to move (blocked).
pub fn drone_patrol_system(
    config: Res<KinematicConfig>,
    mut q: Query<(&mut Drone, &KinematicObject, &Transform, &mut TargetVelocity)>,
) {
    for (mut drone, object, transform, mut target) in q.iter_mut() {
        let offset = transform.translation.x - drone.anchor_x;
        let blocked = object.target_velocity().x != 0.0 && object.velocity().x == 0.0;
        if offset > config.drone_patrol_range {
            drone.heading = -1.0;
        } else if offset < -config.drone_patrol_range {
            drone.heading = 1.0;
        } else if blocked {
            drone.heading = -drone.heading;
        }
        target.0 = Vec2::new(drone.heading * config.drone_speed, 0.0);
    }
}
