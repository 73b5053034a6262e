//! Per-frame projectile deflection
//!
//! Rotates a velocity a few degrees about an axis perpendicular to it, so a
//! projectile wanders along a curved path without changing speed. The
//! rotation sign is drawn fresh on every call.

use glam::{Quat, Vec3};
use rand::Rng;
use thiserror::Error;

use crate::consts::*;
use crate::settings::DeflectionSettings;

/// Why a deflection was skipped
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DeflectError {
    #[error("velocity magnitude {0} is below the deflection threshold")]
    BelowThreshold(f32),
    #[error("no usable rotation axis for velocity {0}")]
    DegenerateAxis(Vec3),
    #[error("non-finite deflection input or result")]
    NonFinite,
}

/// Rotation axis perpendicular to `velocity`
///
/// Uses `velocity × UP`, falling back to `velocity × FORWARD` when the
/// velocity is parallel to `UP`. Returns `None` if both are degenerate.
pub fn perpendicular_axis(velocity: Vec3) -> Option<Vec3> {
    // Scale to unit max component so huge velocities don't overflow the cross product
    let largest = velocity.abs().max_element();
    if largest == 0.0 || !largest.is_finite() {
        return None;
    }
    let direction = velocity / largest;
    [UP, FORWARD]
        .into_iter()
        .map(|reference| direction.cross(reference).normalize_or_zero())
        .find(|axis| axis.length() >= MIN_AXIS_LENGTH)
}

/// One frame of deflection, reporting why the frame was skipped
///
/// Consumes exactly one random draw when the rotation is applied, none
/// otherwise.
pub fn try_deflect<R: Rng + ?Sized>(
    velocity: Vec3,
    strength_deg: f32,
    rng: &mut R,
) -> Result<Vec3, DeflectError> {
    rotate_once(velocity, strength_deg, MIN_DEFLECT_SPEED, rng)
}

/// One frame of deflection; any failure returns `velocity` unchanged
pub fn deflect<R: Rng + ?Sized>(velocity: Vec3, strength_deg: f32, rng: &mut R) -> Vec3 {
    try_deflect(velocity, strength_deg, rng).unwrap_or(velocity)
}

fn rotate_once<R: Rng + ?Sized>(
    velocity: Vec3,
    strength_deg: f32,
    min_speed: f32,
    rng: &mut R,
) -> Result<Vec3, DeflectError> {
    if !velocity.is_finite() || !strength_deg.is_finite() {
        return Err(DeflectError::NonFinite);
    }

    let speed = velocity.length();
    if speed < min_speed {
        return Err(DeflectError::BelowThreshold(speed));
    }

    let axis = perpendicular_axis(velocity).ok_or(DeflectError::DegenerateAxis(velocity))?;

    let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    let rotation = Quat::from_axis_angle(axis, (strength_deg * sign).to_radians());
    let rotated = rotation * velocity;

    if !rotated.is_finite() {
        return Err(DeflectError::NonFinite);
    }
    Ok(rotated)
}

/// Deflection tuning applied with a caller-supplied sign source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileDeflector {
    strength_deg: f32,
    min_speed: f32,
}

impl ProjectileDeflector {
    pub fn new(strength_deg: f32) -> Self {
        Self {
            strength_deg,
            min_speed: MIN_DEFLECT_SPEED,
        }
    }

    pub fn from_settings(settings: &DeflectionSettings) -> Self {
        Self {
            strength_deg: settings.strength_deg,
            min_speed: settings.min_speed,
        }
    }

    #[inline]
    pub fn strength_deg(&self) -> f32 {
        self.strength_deg
    }

    pub fn try_deflect<R: Rng + ?Sized>(
        &self,
        velocity: Vec3,
        rng: &mut R,
    ) -> Result<Vec3, DeflectError> {
        rotate_once(velocity, self.strength_deg, self.min_speed, rng)
    }

    /// Fail-soft deflection for per-frame callers
    pub fn deflect<R: Rng + ?Sized>(&self, velocity: Vec3, rng: &mut R) -> Vec3 {
        match self.try_deflect(velocity, rng) {
            Ok(v) => v,
            Err(DeflectError::BelowThreshold(_)) => velocity,
            Err(e) => {
                log::debug!("Deflection skipped: {}", e);
                velocity
            }
        }
    }
}

impl Default for ProjectileDeflector {
    fn default() -> Self {
        Self::new(DEFLECTION_STRENGTH_DEG)
    }
}
