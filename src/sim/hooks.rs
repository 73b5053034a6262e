//! Per-frame projectile update hooks
//!
//! The tick calls every registered hook once per projectile per frame. A
//! hook that fails or panics is contained here: the projectile is restored
//! to its pre-hook state and the frame carries on.

use std::panic::{AssertUnwindSafe, catch_unwind};

use glam::Vec3;
use rand_pcg::Pcg32;
use thiserror::Error;

use super::deflect::ProjectileDeflector;
use super::distortion::DistortionRegistry;
use super::state::{ActorId, Projectile};

/// World view handed to hooks; only the RNG is mutable
#[derive(Debug)]
pub struct HookContext<'a> {
    pub distortion: &'a DistortionRegistry,
    pub tracked_actor: ActorId,
    pub rng: &'a mut Pcg32,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HookError {
    #[error("hook rejected update: {0}")]
    Rejected(String),
    #[error("hook produced invalid velocity {0}")]
    InvalidVelocity(Vec3),
}

/// Something that may adjust a projectile once per frame
pub trait ProjectileHook {
    fn name(&self) -> &str;

    fn on_projectile_update(
        &mut self,
        projectile: &mut Projectile,
        ctx: &mut HookContext<'_>,
    ) -> Result<(), HookError>;
}

/// Ordered list of hooks run by the tick
#[derive(Default)]
pub struct HookList {
    hooks: Vec<Box<dyn ProjectileHook>>,
}

impl HookList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, hook: impl ProjectileHook + 'static) {
        log::debug!("Registered projectile hook '{}'", hook.name());
        self.hooks.push(Box::new(hook));
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run every hook on `projectile`, isolating failures
    ///
    /// Returns the number of hooks that failed.
    pub fn run(&mut self, projectile: &mut Projectile, ctx: &mut HookContext<'_>) -> usize {
        let mut failures = 0;
        for hook in self.hooks.iter_mut() {
            let before = projectile.clone();
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                hook.on_projectile_update(projectile, ctx)?;
                let v = projectile.velocity();
                if v.is_finite() {
                    Ok(())
                } else {
                    Err(HookError::InvalidVelocity(v))
                }
            }));

            match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => {
                    log::warn!(
                        "Hook '{}' failed on projectile {}: {}",
                        hook.name(),
                        before.id,
                        e
                    );
                }
                Err(_) => {
                    log::error!("Hook '{}' panicked on projectile {}", hook.name(), before.id);
                }
            }
            *projectile = before;
            failures += 1;
        }
        failures
    }
}

impl std::fmt::Debug for HookList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.hooks.iter().map(|h| h.name()))
            .finish()
    }
}

/// Curves the tracked actor's projectiles while that actor is distorted
#[derive(Debug, Clone, Copy)]
pub struct DistortionHook {
    deflector: ProjectileDeflector,
}

impl DistortionHook {
    pub fn new(deflector: ProjectileDeflector) -> Self {
        Self { deflector }
    }

    /// Gate: owned by the tracked actor, and that actor is distorted
    pub fn applies_to(projectile: &Projectile, ctx: &HookContext<'_>) -> bool {
        projectile.owner == ctx.tracked_actor && ctx.distortion.is_distorted(projectile.owner)
    }
}

impl ProjectileHook for DistortionHook {
    fn name(&self) -> &str {
        "distortion"
    }

    fn on_projectile_update(
        &mut self,
        projectile: &mut Projectile,
        ctx: &mut HookContext<'_>,
    ) -> Result<(), HookError> {
        if !Self::applies_to(projectile, ctx) {
            return Ok(());
        }
        let velocity = self.deflector.deflect(projectile.velocity(), &mut *ctx.rng);
        projectile.set_velocity(velocity);
        Ok(())
    }
}
