//! Fixed timestep simulation tick
//!
//! Applies effect events and new shots, runs the projectile hooks, then
//! integrates and despawns projectiles.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::distortion::EffectId;
use super::hooks::{HookContext, HookList};
use super::state::{ActorId, WorldState};

/// Effect lifecycle notification from the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EffectEvent {
    Added { actor: ActorId, effect: EffectId },
    Removed { actor: ActorId, effect: EffectId },
    /// Actor died or despawned
    Cleared { actor: ActorId },
}

/// A projectile fired this tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub owner: ActorId,
    pub pos: Vec3,
    pub velocity: Vec3,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    pub events: Vec<EffectEvent>,
    pub shots: Vec<Shot>,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub spawned: usize,
    pub hook_failures: usize,
    pub despawned: usize,
}

/// Advance the world by one fixed timestep
pub fn tick(
    state: &mut WorldState,
    hooks: &mut HookList,
    input: &TickInput,
    dt: f32,
) -> TickSummary {
    let mut summary = TickSummary::default();

    for event in &input.events {
        match *event {
            EffectEvent::Added { actor, effect } => {
                state.distortion.effect_added(actor, effect);
            }
            EffectEvent::Removed { actor, effect } => {
                state.distortion.effect_removed(actor, effect);
            }
            EffectEvent::Cleared { actor } => state.distortion.clear_actor(actor),
        }
    }

    for shot in &input.shots {
        state.spawn_projectile(shot.owner, shot.pos, shot.velocity);
        summary.spawned += 1;
    }

    let mut ctx = HookContext {
        distortion: &state.distortion,
        tracked_actor: state.tracked_actor,
        rng: &mut state.rng,
    };
    for projectile in state.projectiles.iter_mut() {
        summary.hook_failures += hooks.run(projectile, &mut ctx);
        projectile.integrate(dt);
    }

    let before = state.projectiles.len();
    state.projectiles.retain(|p| !p.expired());
    summary.despawned = before - state.projectiles.len();

    state.time_ticks += 1;

    if summary.hook_failures > 0 {
        log::warn!(
            "Tick {}: {} hook failure(s) rolled back",
            state.time_ticks,
            summary.hook_failures
        );
    }

    summary
}
