//! Kinematic 2D body controller library
//!
//! A slope-aware move-and-collide engine for platformer bodies: gravity
//! integration, shape-cast collision resolution with a skin gap, ground
//! tracking, and a small control surface (freeze, bounce, teleport), plus
//! the Bevy/Rapier2D plumbing that drives it at a fixed timestep.

pub mod config;
pub mod constants;
pub mod error;
pub mod graphics;
pub mod kinematic;
pub mod level;
pub mod physics_world;
pub mod player;
pub mod simulation;
