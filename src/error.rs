//! Kinematic-engine error types.
//!
//! The per-step engine is total and never fails; errors only arise when
//! validating tuning values (from code or from `assets/kinematics.toml`).
//!
//! ## Usage
//!
//! ```rust
//! use kinematic_platformer::error::{validate_shell_radius, KinematicResult};
//!
//! fn check(radius: f32) -> KinematicResult<()> {
//!     validate_shell_radius(radius)?;
//!     Ok(())
//! }
//! # assert!(check(0.01).is_ok());
//! ```

use std::fmt;

/// Top-level error enum for kinematic configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum KinematicError {
    /// A tuning value is outside its safe operating range.
    UnsafeConstant {
        /// Name of the value (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },

    /// A config file was found but could not be parsed.
    ConfigParse {
        /// Path of the offending file.
        path: String,
        /// Parser message.
        message: String,
    },
}

impl fmt::Display for KinematicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KinematicError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
            KinematicError::ConfigParse { path, message } => {
                write!(f, "failed to parse {}: {}", path, message)
            }
        }
    }
}

impl std::error::Error for KinematicError {}

/// Convenience alias: a `Result` using `KinematicError` as the error type.
pub type KinematicResult<T> = Result<T, KinematicError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// `min_ground_normal_y` must lie strictly inside (-1, 1); at 1.0 nothing can
/// ever be ground and at -1.0 every ceiling would be.
pub fn validate_min_ground_normal_y(value: f32) -> KinematicResult<()> {
    if !(value > -1.0 && value < 1.0) {
        Err(KinematicError::UnsafeConstant {
            name: "MIN_GROUND_NORMAL_Y",
            value,
            safe_range: "(-1.0, 1.0)",
        })
    } else {
        Ok(())
    }
}

/// Gravity modifier must be finite and non-negative.  Zero is allowed and
/// selects gravity-exempt mode.
pub fn validate_gravity_modifier(value: f32) -> KinematicResult<()> {
    if !value.is_finite() || value < 0.0 {
        Err(KinematicError::UnsafeConstant {
            name: "GRAVITY_MODIFIER",
            value,
            safe_range: "[0.0, ∞)",
        })
    } else {
        Ok(())
    }
}

/// Returns an error if the shell radius is negative or not finite.
pub fn validate_shell_radius(value: f32) -> KinematicResult<()> {
    if !value.is_finite() || value < 0.0 {
        Err(KinematicError::UnsafeConstant {
            name: "SHELL_RADIUS",
            value,
            safe_range: "[0.0, ∞)",
        })
    } else {
        Ok(())
    }
}

/// Returns an error if the minimum move distance is negative or not finite.
pub fn validate_min_move_distance(value: f32) -> KinematicResult<()> {
    if !value.is_finite() || value < 0.0 {
        Err(KinematicError::UnsafeConstant {
            name: "MIN_MOVE_DISTANCE",
            value,
            safe_range: "[0.0, ∞)",
        })
    } else {
        Ok(())
    }
}
