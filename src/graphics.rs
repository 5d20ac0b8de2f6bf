use crate::constants::PIXELS_PER_METRE;
use bevy::prelude::*;

/// Setup camera for 2D rendering.
///
/// World units are metres, so the orthographic scale shrinks the view until
/// one metre covers [`PIXELS_PER_METRE`] pixels.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: 1.0 / PIXELS_PER_METRE,
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_xyz(0.0, 3.0, 0.0),
    ));
    info!("[SETUP] Camera spawned");
}
