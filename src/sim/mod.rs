//! Deterministic simulation module
//!
//! All deflection logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by projectile ID)

pub mod deflect;
pub mod distortion;
pub mod hooks;
pub mod state;
pub mod tick;

pub use deflect::{DeflectError, ProjectileDeflector, deflect, perpendicular_axis, try_deflect};
pub use distortion::{DistortionRegistry, EffectId};
pub use hooks::{DistortionHook, HookContext, HookError, HookList, ProjectileHook};
pub use state::{ActorId, Projectile, WorldState};
pub use tick::{EffectEvent, Shot, TickInput, TickSummary, tick};
