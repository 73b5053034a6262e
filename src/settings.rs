//! Deflection tuning
//!
//! Loaded from a JSON file; every field is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting {field}: {value}")]
    Invalid { field: &'static str, value: f32 },
}

/// Deflection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeflectionSettings {
    /// Rotation applied per frame (degrees)
    pub strength_deg: f32,
    /// Slower projectiles are left alone
    pub min_speed: f32,
    /// Seed for the deflection sign source
    pub seed: u64,
    /// Fixed simulation rate
    pub tick_rate_hz: f32,
}

impl Default for DeflectionSettings {
    fn default() -> Self {
        Self {
            strength_deg: DEFLECTION_STRENGTH_DEG,
            min_speed: MIN_DEFLECT_SPEED,
            seed: 0,
            tick_rate_hz: TICK_RATE_HZ,
        }
    }
}

impl DeflectionSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{} ({}), using default settings", e, path.display());
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.strength_deg.is_finite() || self.strength_deg < 0.0 {
            return Err(SettingsError::Invalid {
                field: "strength_deg",
                value: self.strength_deg,
            });
        }
        if !self.min_speed.is_finite() || self.min_speed <= 0.0 {
            return Err(SettingsError::Invalid {
                field: "min_speed",
                value: self.min_speed,
            });
        }
        if !self.tick_rate_hz.is_finite() || self.tick_rate_hz <= 0.0 {
            return Err(SettingsError::Invalid {
                field: "tick_rate_hz",
                value: self.tick_rate_hz,
            });
        }
        Ok(())
    }

    /// Fixed timestep in seconds
    #[inline]
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate_hz
    }
}
