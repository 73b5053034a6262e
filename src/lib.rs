//! Warp Shot - curved projectile deflection for distorted actors
//!
//! Core modules:
//! - `sim`: Deterministic simulation (deflection, distortion registry, hooks, tick)
//! - `settings`: JSON-backed deflection tuning

pub mod settings;
pub mod sim;

pub use settings::{DeflectionSettings, SettingsError};

use glam::Vec3;

/// Simulation configuration constants
pub mod consts {
    use glam::Vec3;

    /// Reference deflection strength (degrees per frame)
    pub const DEFLECTION_STRENGTH_DEG: f32 = 6.0;
    /// Velocities slower than this are never deflected
    pub const MIN_DEFLECT_SPEED: f32 = 0.1;
    /// Cross products shorter than this are treated as degenerate
    pub const MIN_AXIS_LENGTH: f32 = 0.1;

    /// Primary reference axis for the rotation axis
    pub const UP: Vec3 = Vec3::Y;
    /// Fallback reference axis when velocity is parallel to `UP`
    pub const FORWARD: Vec3 = Vec3::Z;

    /// Default fixed simulation rate
    pub const TICK_RATE_HZ: f32 = 50.0;
    /// Default projectile lifetime (seconds)
    pub const PROJECTILE_TTL: f32 = 3.0;
}

/// Angle between two vectors in degrees (0 if either is zero)
#[inline]
pub fn angle_between_deg(a: Vec3, b: Vec3) -> f32 {
    if a.length_squared() == 0.0 || b.length_squared() == 0.0 {
        return 0.0;
    }
    a.cross(b).length().atan2(a.dot(b)).to_degrees()
}
