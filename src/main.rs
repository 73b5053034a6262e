//! Warp Shot demo
//!
//! Fires a shot from a distorted player and an undistorted enemy, then logs
//! how far each trajectory wanders. Usage: `warp-shot [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec3;
    use warp_shot::DeflectionSettings;
    use warp_shot::sim::{
        ActorId, DistortionHook, EffectEvent, EffectId, HookList, ProjectileDeflector, Shot,
        TickInput, WorldState, tick,
    };

    const PLAYER: ActorId = ActorId(1);
    const ENEMY: ActorId = ActorId(2);
    const DISTORTION_TICKS: u64 = 60;
    const TOTAL_TICKS: u64 = 100;

    env_logger::init();
    log::info!("Warp Shot (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => DeflectionSettings::load_or_default(path),
        None => DeflectionSettings::default(),
    };
    log::info!(
        "Strength {}°/frame, seed {}, {} Hz",
        settings.strength_deg,
        settings.seed,
        settings.tick_rate_hz
    );

    let mut world = WorldState::new(settings.seed, PLAYER);
    let mut hooks = HookList::new();
    hooks.register(DistortionHook::new(ProjectileDeflector::from_settings(&settings)));

    let velocity = Vec3::new(0.0, 0.0, 30.0);
    let first = TickInput {
        events: vec![EffectEvent::Added {
            actor: PLAYER,
            effect: EffectId(1),
        }],
        shots: vec![
            Shot {
                owner: PLAYER,
                pos: Vec3::ZERO,
                velocity,
            },
            Shot {
                owner: ENEMY,
                pos: Vec3::X * 5.0,
                velocity,
            },
        ],
    };
    let expire = TickInput {
        events: vec![EffectEvent::Removed {
            actor: PLAYER,
            effect: EffectId(1),
        }],
        ..Default::default()
    };
    let idle = TickInput::default();

    let dt = settings.dt();
    for t in 0..TOTAL_TICKS {
        let input = match t {
            0 => &first,
            DISTORTION_TICKS => &expire,
            _ => &idle,
        };
        tick(&mut world, &mut hooks, input, dt);

        if t % 10 == 0 {
            for p in &world.projectiles {
                log::info!(
                    "tick {:3} projectile {} ({:?}) pos {:.2} heading off by {:.1}°",
                    world.time_ticks,
                    p.id,
                    p.owner,
                    p.pos,
                    warp_shot::angle_between_deg(velocity, p.velocity())
                );
            }
        }
    }

    match serde_json::to_string_pretty(&world.projectiles) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize projectiles: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library only on wasm
}
