use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier2d::prelude::*;

use kinematic_platformer::config::{self, KinematicConfig};
use kinematic_platformer::simulation::KinematicPlugin;
use kinematic_platformer::{graphics, level, player};

/// Kinematic bodies integrate their own gravity; Rapier's would only pull on
/// bodies during the frame before they attach.
fn setup_physics_config(mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.gravity = Vec2::ZERO;
    }
}

/// Drive `FixedUpdate` at the configured rate.
fn apply_fixed_timestep(config: Res<KinematicConfig>, mut time: ResMut<Time<Fixed>>) {
    time.set_timestep_hz(config.fixed_timestep_hz);
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Kinematic Platformer".into(),
                resolution: WindowResolution::new(1200, 680),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        // Compiled defaults; load_kinematic_config overwrites them from
        // assets/kinematics.toml (if present) in the Startup schedule.
        .insert_resource(KinematicConfig::default())
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))
        .add_plugins((KinematicPlugin, player::PlayerPlugin, level::LevelPlugin))
        .add_systems(
            Startup,
            (
                // Load config first so every other startup system sees the final values.
                config::load_kinematic_config,
                apply_fixed_timestep.after(config::load_kinematic_config),
                graphics::setup_camera,
                setup_physics_config,
                level::spawn_level,
                level::spawn_drone.after(config::load_kinematic_config),
                player::spawn_player.after(config::load_kinematic_config),
            ),
        )
        .run();
}
