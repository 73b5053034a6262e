//! Per-actor distortion tracking
//!
//! Owned by the world and passed to whoever needs it. Effect instances are
//! tracked individually so overlapping applications keep an actor distorted
//! until the last one is removed.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::state::ActorId;

/// Identifies one application of the distortion effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EffectId(pub u32);

/// Which actors currently have distorted projectiles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DistortionRegistry {
    active: BTreeMap<ActorId, BTreeSet<EffectId>>,
}

impl DistortionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new effect instance on `actor`
    ///
    /// Returns true if the actor just became distorted.
    pub fn effect_added(&mut self, actor: ActorId, effect: EffectId) -> bool {
        let effects = self.active.entry(actor).or_default();
        let was_distorted = !effects.is_empty();
        if !effects.insert(effect) {
            log::warn!("Distortion effect {:?} already active on {:?}", effect, actor);
        }
        if !was_distorted {
            log::info!("Actor {:?} distorted", actor);
        }
        !was_distorted
    }

    /// Drop an effect instance from `actor`
    ///
    /// Returns true if the actor is no longer distorted.
    pub fn effect_removed(&mut self, actor: ActorId, effect: EffectId) -> bool {
        let Some(effects) = self.active.get_mut(&actor) else {
            log::debug!("No distortion on {:?} to remove ({:?})", actor, effect);
            return false;
        };
        if !effects.remove(&effect) {
            log::debug!("Unknown distortion effect {:?} on {:?}", effect, actor);
            return false;
        }
        if effects.is_empty() {
            self.active.remove(&actor);
            log::info!("Actor {:?} no longer distorted", actor);
            return true;
        }
        false
    }

    /// Drop every effect on `actor` (death, despawn)
    pub fn clear_actor(&mut self, actor: ActorId) {
        if self.active.remove(&actor).is_some() {
            log::info!("Cleared distortion on {:?}", actor);
        }
    }

    #[inline]
    pub fn is_distorted(&self, actor: ActorId) -> bool {
        self.active.get(&actor).is_some_and(|e| !e.is_empty())
    }

    /// Number of live effect instances on `actor`
    pub fn effect_count(&self, actor: ActorId) -> usize {
        self.active.get(&actor).map_or(0, BTreeSet::len)
    }

    /// Distorted actors in id order
    pub fn distorted_actors(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.active.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYER: ActorId = ActorId(1);
    const OTHER: ActorId = ActorId(2);

    #[test]
    fn test_add_remove_lifecycle() {
        let mut reg = DistortionRegistry::new();
        assert!(!reg.is_distorted(PLAYER));

        assert!(reg.effect_added(PLAYER, EffectId(10)));
        assert!(reg.is_distorted(PLAYER));
        assert!(!reg.is_distorted(OTHER));

        assert!(reg.effect_removed(PLAYER, EffectId(10)));
        assert!(!reg.is_distorted(PLAYER));
        assert_eq!(reg.distorted_actors().count(), 0);
    }

    #[test]
    fn test_overlapping_effects() {
        let mut reg = DistortionRegistry::new();
        assert!(reg.effect_added(PLAYER, EffectId(1)));
        assert!(!reg.effect_added(PLAYER, EffectId(2)));
        assert_eq!(reg.effect_count(PLAYER), 2);

        // First expiry leaves the actor distorted
        assert!(!reg.effect_removed(PLAYER, EffectId(1)));
        assert!(reg.is_distorted(PLAYER));

        assert!(reg.effect_removed(PLAYER, EffectId(2)));
        assert!(!reg.is_distorted(PLAYER));
    }

    #[test]
    fn test_duplicate_add_counts_once() {
        let mut reg = DistortionRegistry::new();
        reg.effect_added(PLAYER, EffectId(5));
        reg.effect_added(PLAYER, EffectId(5));
        assert_eq!(reg.effect_count(PLAYER), 1);
        assert!(reg.effect_removed(PLAYER, EffectId(5)));
    }

    #[test]
    fn test_unknown_removal_is_noop() {
        let mut reg = DistortionRegistry::new();
        assert!(!reg.effect_removed(PLAYER, EffectId(3)));

        reg.effect_added(PLAYER, EffectId(1));
        assert!(!reg.effect_removed(PLAYER, EffectId(99)));
        assert!(reg.is_distorted(PLAYER));
    }

    #[test]
    fn test_clear_actor() {
        let mut reg = DistortionRegistry::new();
        reg.effect_added(PLAYER, EffectId(1));
        reg.effect_added(PLAYER, EffectId(2));
        reg.effect_added(OTHER, EffectId(3));

        reg.clear_actor(PLAYER);
        assert!(!reg.is_distorted(PLAYER));
        assert!(reg.is_distorted(OTHER));
        assert_eq!(reg.distorted_actors().collect::<Vec<_>>(), vec![OTHER]);
    }
}
