//! Centralised kinematic and demo-level constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place.  [`crate::config::KinematicConfig::default`] reads
//! every value from this file; `assets/kinematics.toml` can override them at
//! startup.

use bevy::math::Vec2;

// ── Ground Classification ─────────────────────────────────────────────────────

/// Minimum `normal.y` for a contact to count as ground.
///
/// The comparison is strict: a normal whose up-component equals this value is
/// a wall.  0.65 accepts slopes up to roughly 49° from horizontal.
pub const MIN_GROUND_NORMAL_Y: f32 = 0.65;

// ── Gravity ───────────────────────────────────────────────────────────────────

/// World gravity vector (units/s²).
pub const GRAVITY: Vec2 = Vec2::new(0.0, -9.81);

/// Scale applied to gravity while the body is falling (`velocity.y < 0`).
///
/// Rising and resting bodies always receive unscaled gravity, so values above
/// 1.0 give a fast fall and values below 1.0 a floaty descent.  0.0 switches
/// the body into gravity-exempt mode (always grounded, no vertical motion).
pub const GRAVITY_MODIFIER: f32 = 1.0;

// ── Collision Resolution ──────────────────────────────────────────────────────

/// Displacements of this length or shorter are not resolved or committed.
pub const MIN_MOVE_DISTANCE: f32 = 0.001;

/// Skin gap kept between a body and any obstacle it moves toward.
pub const SHELL_RADIUS: f32 = 0.01;

/// Maximum contacts reported by a single shape cast.  Extra contacts are
/// dropped without error.
pub const HIT_BUFFER_CAPACITY: usize = 16;

// ── Scheduling ────────────────────────────────────────────────────────────────

/// Fixed simulation rate driving [`crate::simulation::KinematicPlugin`].
pub const FIXED_TIMESTEP_HZ: f64 = 50.0;

// ── Demo: Player ──────────────────────────────────────────────────────────────

/// Horizontal speed of the demo player at full stick/key deflection (u/s).
pub const PLAYER_MAX_SPEED: f32 = 7.0;

/// Vertical velocity applied by a jump.
pub const PLAYER_JUMP_SPEED: f32 = 7.0;

/// Half-extents of the player collider box.
pub const PLAYER_HALF_WIDTH: f32 = 0.4;
pub const PLAYER_HALF_HEIGHT: f32 = 0.6;

/// Falling gravity scale for the player (fast fall).
pub const PLAYER_GRAVITY_MODIFIER: f32 = 1.5;

/// Where the player starts and where the reset key teleports it.
pub const PLAYER_SPAWN: Vec2 = Vec2::new(-6.0, 3.0);

// ── Demo: Drone ───────────────────────────────────────────────────────────────

/// Patrol speed of the gravity-exempt drone (u/s).
pub const DRONE_SPEED: f32 = 2.5;

/// Drone reverses direction after travelling this far from its anchor.
pub const DRONE_PATROL_RANGE: f32 = 4.0;

// ── Rendering ─────────────────────────────────────────────────────────────────

/// World units are metres; the camera zooms so one metre spans this many pixels.
pub const PIXELS_PER_METRE: f32 = 40.0;
