//! Kinematic plugin and systems for Bevy ECS.
//!
//! ## Pipeline (runs in order every `FixedUpdate` tick)
//!
//! 1. [`KinematicSet::ComputeVelocity`]: velocity policies (player input,
//!    AI) write [`TargetVelocity`] and may queue [`KinematicCommand`]s.
//! 2. [`KinematicSet::Control`]: [`attach_kinematic_bodies_system`] binds
//!    new bodies, then [`apply_kinematic_commands_system`] applies queued
//!    control-surface commands.
//! 3. [`KinematicSet::Step`]: [`kinematic_step_system`] steps every
//!    attached body against the Rapier world.

use crate::config::KinematicConfig;
use crate::kinematic::{KinematicObject, NoHorizontalIntent, StepClock, VelocityPolicy};
use crate::physics_world::{RapierBody, RapierShapeCaster};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

pub struct KinematicPlugin;

impl Plugin for KinematicPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<KinematicCommand>()
            .configure_sets(
                FixedUpdate,
                (
                    KinematicSet::ComputeVelocity,
                    KinematicSet::Control,
                    KinematicSet::Step,
                )
                    .chain(),
            )
            .add_systems(
                FixedUpdate,
                (
                    (attach_kinematic_bodies_system, apply_kinematic_commands_system)
                        .chain()
                        .in_set(KinematicSet::Control),
                    kinematic_step_system.in_set(KinematicSet::Step),
                ),
            );
    }
}

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KinematicSet {
    ComputeVelocity,
    Control,
    Step,
}

// ── Components & messages ─────────────────────────────────────────────────────

/// Desired velocity for the next step, written by whatever owns the body's
/// intent.  The step consumes it (resets it to zero), so a writer that goes
/// quiet leaves the body with no horizontal intent.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct TargetVelocity(pub Vec2);

impl VelocityPolicy for TargetVelocity {
    fn compute_velocity(&mut self, _body: &KinematicObject) -> Vec2 {
        std::mem::take(&mut self.0)
    }
}

/// Control-surface operation addressed to one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KinematicAction {
    Freeze,
    Unfreeze,
    /// Overwrite vertical velocity only.
    BounceVertical(f32),
    /// Overwrite the whole velocity.
    Bounce(Vec2),
    Teleport(Vec2),
    Attach,
    Detach,
}

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct KinematicCommand {
    pub entity: Entity,
    pub action: KinematicAction,
}

impl KinematicCommand {
    pub fn new(entity: Entity, action: KinematicAction) -> Self {
        Self { entity, action }
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Attach every newly added [`KinematicObject`] to its Rapier body.
pub fn attach_kinematic_bodies_system(
    mut q: Query<
        (
            Entity,
            &mut KinematicObject,
            &mut Transform,
            Option<&mut RigidBody>,
            Option<&mut Velocity>,
        ),
        Added<KinematicObject>,
    >,
) {
    for (entity, mut object, mut transform, mut rigid_body, mut velocity) in q.iter_mut() {
        let mut body = RapierBody {
            transform: &mut transform,
            rigid_body: rigid_body.as_deref_mut(),
            velocity: velocity.as_deref_mut(),
        };
        object.attach(&mut body);
        info!("[kinematic] attached {entity:?}");
    }
}

/// Apply queued [`KinematicCommand`]s in the order they were written.
pub fn apply_kinematic_commands_system(
    mut commands: MessageReader<KinematicCommand>,
    mut q: Query<(
        &mut KinematicObject,
        &mut Transform,
        Option<&mut RigidBody>,
        Option<&mut Velocity>,
    )>,
) {
    for command in commands.read() {
        let Ok((mut object, mut transform, mut rigid_body, mut velocity)) =
            q.get_mut(command.entity)
        else {
            warn!(
                "[kinematic] {:?} for missing body {:?} skipped",
                command.action, command.entity
            );
            continue;
        };
        let mut body = RapierBody {
            transform: &mut transform,
            rigid_body: rigid_body.as_deref_mut(),
            velocity: velocity.as_deref_mut(),
        };

        match command.action {
            KinematicAction::Freeze => object.freeze(),
            KinematicAction::Unfreeze => object.unfreeze(),
            KinematicAction::BounceVertical(value) => object.bounce_vertical(value),
            KinematicAction::Bounce(direction) => object.bounce(direction),
            KinematicAction::Teleport(position) => object.teleport(position, &mut body),
            KinematicAction::Attach => {
                object.attach(&mut body);
                info!("[kinematic] attached {:?}", command.entity);
            }
            KinematicAction::Detach => {
                object.detach(&mut body);
                info!("[kinematic] detached {:?}", command.entity);
            }
        }
    }
}

/// Step every attached body once.
///
/// Δt is the fixed timestep (`Res<Time>` inside `FixedUpdate`); gravity
/// comes from [`KinematicConfig`].  Bodies without a [`TargetVelocity`]
/// have no horizontal intent.
#[allow(clippy::type_complexity)]
pub fn kinematic_step_system(
    time: Res<Time>,
    config: Res<KinematicConfig>,
    rapier_context: ReadRapierContext,
    mut q: Query<(
        Entity,
        &mut KinematicObject,
        Option<&mut TargetVelocity>,
        &Collider,
        Option<&CollisionGroups>,
        &mut Transform,
        Option<&mut RigidBody>,
        Option<&mut Velocity>,
    )>,
) {
    let Ok(rapier) = rapier_context.single() else {
        return;
    };
    let clock = StepClock::new(time.delta_secs(), config.gravity());

    for (entity, mut object, target, collider, groups, mut transform, mut rigid_body, mut velocity) in
        q.iter_mut()
    {
        if !object.is_attached() {
            continue;
        }
        let caster = RapierShapeCaster::new(&rapier, collider, entity, groups.copied());
        let mut body = RapierBody {
            transform: &mut transform,
            rigid_body: rigid_body.as_deref_mut(),
            velocity: velocity.as_deref_mut(),
        };

        match target {
            Some(mut target) => {
                let policy: &mut TargetVelocity = &mut target;
                object.step(policy, &caster, &mut body, clock);
            }
            None => object.step(&mut NoHorizontalIntent, &caster, &mut body, clock),
        }
    }
}
