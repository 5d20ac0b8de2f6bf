//! Demo player: keyboard input as a velocity policy for a kinematic body.
//!
//! ## Pipeline
//!
//! 1. [`keyboard_to_intent_system`] (`Update`): samples keys into
//!    [`PlayerIntent`].  One-shot actions (jump, freeze toggle, reset) are
//!    latched until the next fixed tick consumes them.
//! 2. [`player_velocity_system`] (`FixedUpdate`, [`KinematicSet::ComputeVelocity`]):
//!    turns the intent into a [`TargetVelocity`] and control commands.

use crate::config::KinematicConfig;
use crate::constants::{PLAYER_HALF_HEIGHT, PLAYER_HALF_WIDTH, PLAYER_SPAWN};
use crate::kinematic::KinematicObject;
use crate::simulation::{KinematicAction, KinematicCommand, KinematicSet, TargetVelocity};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerIntent>()
            .add_systems(Update, keyboard_to_intent_system)
            .add_systems(
                FixedUpdate,
                player_velocity_system.in_set(KinematicSet::ComputeVelocity),
            );
    }
}

/// Marker component for the player body.
#[derive(Component)]
pub struct Player;

/// Input abstraction between the keyboard and the kinematic body.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerIntent {
    /// -1.0 (left) to 1.0 (right).
    pub move_axis: f32,
    pub jump: bool,
    pub toggle_freeze: bool,
    pub reset: bool,
}

/// Translate keys into [`PlayerIntent`].
///
/// - **A / ←**, **D / →** → `move_axis`
/// - **Space** → `jump`
/// - **F** → `toggle_freeze`
/// - **R** → `reset` (teleport back to spawn)
pub fn keyboard_to_intent_system(keys: Res<ButtonInput<KeyCode>>, mut intent: ResMut<PlayerIntent>) {
    let mut axis = 0.0;
    if keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        axis -= 1.0;
    }
    if keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        axis += 1.0;
    }
    intent.move_axis = axis;

    intent.jump |= keys.just_pressed(KeyCode::Space);
    intent.toggle_freeze |= keys.just_pressed(KeyCode::KeyF);
    intent.reset |= keys.just_pressed(KeyCode::KeyR);
}

/// Velocity policy for the player.
///
/// Horizontal intent becomes [`TargetVelocity`]; a jump is a vertical
/// bounce and only fires while grounded.  Latched one-shot flags are
/// cleared here whether or not they took effect.
pub fn player_velocity_system(
    mut intent: ResMut<PlayerIntent>,
    config: Res<KinematicConfig>,
    mut q: Query<(Entity, &KinematicObject, &mut TargetVelocity), With<Player>>,
    mut commands: MessageWriter<KinematicCommand>,
) {
    let Ok((entity, object, mut target)) = q.single_mut() else {
        return;
    };

    target.0 = Vec2::new(intent.move_axis * config.player_max_speed, 0.0);

    if intent.jump && object.is_grounded() && !object.is_frozen() {
        commands.write(KinematicCommand::new(
            entity,
            KinematicAction::BounceVertical(config.player_jump_speed),
        ));
    }
    if intent.toggle_freeze {
        let action = if object.is_frozen() {
            KinematicAction::Unfreeze
        } else {
            KinematicAction::Freeze
        };
        commands.write(KinematicCommand::new(entity, action));
    }
    if intent.reset {
        commands.write(KinematicCommand::new(
            entity,
            KinematicAction::Teleport(PLAYER_SPAWN),
        ));
    }

    intent.jump = false;
    intent.toggle_freeze = false;
    intent.reset = false;
}

/// Spawn the player box at [`PLAYER_SPAWN`].
///
/// The body starts `Dynamic`; the kinematic plugin switches it to
/// kinematic when it attaches.
pub fn spawn_player(mut commands: Commands, config: Res<KinematicConfig>) {
    let settings = config
        .body_settings()
        .with_gravity_modifier(config.player_gravity_modifier);
    commands.spawn((
        Player,
        KinematicObject::new(settings),
        TargetVelocity::default(),
        RigidBody::Dynamic,
        Collider::cuboid(PLAYER_HALF_WIDTH, PLAYER_HALF_HEIGHT),
        Velocity::zero(),
        Sprite::from_color(
            Color::srgb(0.9, 0.8, 0.3),
            Vec2::new(PLAYER_HALF_WIDTH * 2.0, PLAYER_HALF_HEIGHT * 2.0),
        ),
        Transform::from_translation(PLAYER_SPAWN.extend(1.0)),
    ));
}
