//! Runtime kinematic configuration loaded from `assets/kinematics.toml`.
//!
//! [`KinematicConfig`] is a Bevy [`Resource`] that mirrors the constants in
//! [`crate::constants`].  At startup, [`load_kinematic_config`] reads
//! `assets/kinematics.toml` and overwrites the defaults with any values
//! present in the file.  Missing keys fall back to the compile-time
//! defaults, so a minimal TOML can override just the values you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<KinematicConfig>` to a system and read e.g.
//! `config.gravity()` or `config.body_settings()`.

use crate::constants::*;
use crate::error::{KinematicError, KinematicResult};
use crate::kinematic::KinematicSettings;
use bevy::prelude::*;
use serde::Deserialize;

pub const CONFIG_PATH: &str = "assets/kinematics.toml";

/// Runtime-tunable kinematic and demo configuration.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct KinematicConfig {
    // ── Gravity ───────────────────────────────────────────────────────────────
    pub gravity_x: f32,
    pub gravity_y: f32,
    pub gravity_modifier: f32,

    // ── Collision Resolution ─────────────────────────────────────────────────
    pub min_ground_normal_y: f32,
    pub min_move_distance: f32,
    pub shell_radius: f32,

    // ── Scheduling ────────────────────────────────────────────────────────────
    pub fixed_timestep_hz: f64,

    // ── Demo: Player ──────────────────────────────────────────────────────────
    pub player_max_speed: f32,
    pub player_jump_speed: f32,
    pub player_gravity_modifier: f32,

    // ── Demo: Drone ───────────────────────────────────────────────────────────
    pub drone_speed: f32,
    pub drone_patrol_range: f32,
}

impl Default for KinematicConfig {
    fn default() -> Self {
        Self {
            gravity_x: GRAVITY.x,
            gravity_y: GRAVITY.y,
            gravity_modifier: GRAVITY_MODIFIER,
            min_ground_normal_y: MIN_GROUND_NORMAL_Y,
            min_move_distance: MIN_MOVE_DISTANCE,
            shell_radius: SHELL_RADIUS,
            fixed_timestep_hz: FIXED_TIMESTEP_HZ,
            player_max_speed: PLAYER_MAX_SPEED,
            player_jump_speed: PLAYER_JUMP_SPEED,
            player_gravity_modifier: PLAYER_GRAVITY_MODIFIER,
            drone_speed: DRONE_SPEED,
            drone_patrol_range: DRONE_PATROL_RANGE,
        }
    }
}

impl KinematicConfig {
    pub fn gravity(&self) -> Vec2 {
        Vec2::new(self.gravity_x, self.gravity_y)
    }

    /// Settings for a generic body using the configured gravity modifier.
    pub fn body_settings(&self) -> KinematicSettings {
        KinematicSettings {
            min_ground_normal_y: self.min_ground_normal_y,
            gravity_modifier: self.gravity_modifier,
            min_move_distance: self.min_move_distance,
            shell_radius: self.shell_radius,
        }
    }

    pub fn validate(&self) -> KinematicResult<()> {
        self.body_settings().validate()?;
        self.body_settings()
            .with_gravity_modifier(self.player_gravity_modifier)
            .validate()?;
        if !(self.fixed_timestep_hz > 0.0) {
            return Err(KinematicError::UnsafeConstant {
                name: "FIXED_TIMESTEP_HZ",
                value: self.fixed_timestep_hz as f32,
                safe_range: "(0.0, ∞)",
            });
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> KinematicResult<Self> {
        let config = toml::from_str::<KinematicConfig>(contents).map_err(|e| {
            KinematicError::ConfigParse {
                path: CONFIG_PATH.to_string(),
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }
}

/// Startup system: attempt to load `assets/kinematics.toml` and overwrite the
/// `KinematicConfig` resource with any values present in the file.
///
/// Parse and validation errors are logged and the defaults kept.  A missing
/// file is not an error.
pub fn load_kinematic_config(mut config: ResMut<KinematicConfig>) {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => match KinematicConfig::from_toml_str(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded kinematic config from {CONFIG_PATH}");
            }
            Err(e) => {
                warn!("{e}; using defaults");
            }
        },
        Err(_) => {
            info!("No {CONFIG_PATH} found; using compiled defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = KinematicConfig::from_toml_str("shell_radius = 0.05\ngravity_y = -20.0\n")
            .expect("valid config");
        assert_eq!(config.shell_radius, 0.05);
        assert_eq!(config.gravity(), Vec2::new(0.0, -20.0));
        assert_eq!(config.min_ground_normal_y, MIN_GROUND_NORMAL_Y);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = KinematicConfig::from_toml_str("shell_radius = \"wide\"").unwrap_err();
        assert!(matches!(err, KinematicError::ConfigParse { .. }));
    }

    #[test]
    fn out_of_range_value_is_rejected() {
        let err = KinematicConfig::from_toml_str("min_ground_normal_y = 1.5").unwrap_err();
        assert!(matches!(
            err,
            KinematicError::UnsafeConstant {
                name: "MIN_GROUND_NORMAL_Y",
                ..
            }
        ));
    }

    #[test]
    fn defaults_are_valid() {
        assert!(KinematicConfig::default().validate().is_ok());
        assert_eq!(
            KinematicConfig::default().body_settings(),
            KinematicSettings::default()
        );
    }
}
