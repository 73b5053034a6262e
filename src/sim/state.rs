//! World state and projectile types
//!
//! Everything needed to replay a simulation from its seed lives here.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::distortion::DistortionRegistry;
use crate::consts::*;

/// Identifies an actor (player, enemy) that can own projectiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u32);

/// A projectile in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub owner: ActorId,
    pub pos: Vec3,
    /// Seconds left before despawn
    pub ttl: f32,
    velocity: Vec3,
}

impl Projectile {
    pub fn new(id: u32, owner: ActorId, pos: Vec3, velocity: Vec3) -> Self {
        Self {
            id,
            owner,
            pos,
            ttl: PROJECTILE_TTL,
            velocity,
        }
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    #[inline]
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Advance position by one timestep
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.velocity * dt;
        self.ttl -= dt;
    }

    #[inline]
    pub fn expired(&self) -> bool {
        self.ttl <= 0.0
    }
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Deflection sign source, saved mid-run so a restored world continues the same sequence
    pub rng: Pcg32,
    /// Actor whose projectiles are subject to distortion
    pub tracked_actor: ActorId,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Projectiles in flight (sorted by id)
    pub projectiles: Vec<Projectile>,
    /// Who is currently distorted
    pub distortion: DistortionRegistry,
    next_id: u32,
}

impl WorldState {
    pub fn new(seed: u64, tracked_actor: ActorId) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tracked_actor,
            time_ticks: 0,
            projectiles: Vec::new(),
            distortion: DistortionRegistry::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Fire a projectile and return its id
    pub fn spawn_projectile(&mut self, owner: ActorId, pos: Vec3, velocity: Vec3) -> u32 {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile::new(id, owner, pos, velocity));
        log::debug!("Spawned projectile {} for {:?}", id, owner);
        id
    }

    pub fn projectile(&self, id: u32) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::distortion::EffectId;

    #[test]
    fn test_projectile_velocity_accessors() {
        let mut p = Projectile::new(1, ActorId(1), Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0));
        assert_eq!(p.speed(), 5.0);

        p.set_velocity(Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(p.velocity(), Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_projectile_integrate() {
        let mut p = Projectile::new(1, ActorId(1), Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));
        p.integrate(0.5);
        assert_eq!(p.pos, Vec3::new(5.0, 0.0, 0.0));
        assert!((p.ttl - (PROJECTILE_TTL - 0.5)).abs() < 1e-6);
        assert!(!p.expired());

        p.integrate(PROJECTILE_TTL);
        assert!(p.expired());
    }

    #[test]
    fn test_spawn_assigns_increasing_ids() {
        let mut world = WorldState::new(1, ActorId(1));
        let a = world.spawn_projectile(ActorId(1), Vec3::ZERO, Vec3::X);
        let b = world.spawn_projectile(ActorId(2), Vec3::ZERO, Vec3::Y);
        assert!(b > a);
        assert_eq!(world.projectile(b).map(|p| p.owner), Some(ActorId(2)));
    }

    #[test]
    fn test_world_serializes() {
        let mut world = WorldState::new(7, ActorId(1));
        world.spawn_projectile(ActorId(1), Vec3::ZERO, Vec3::X);
        world.distortion.effect_added(ActorId(1), EffectId(1));

        let json = serde_json::to_string(&world).unwrap();
        let back: WorldState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.projectiles.len(), 1);
        assert!(back.distortion.is_distorted(ActorId(1)));
        assert_eq!(back.seed, 7);
        assert_eq!(back.rng, world.rng);
    }
}
