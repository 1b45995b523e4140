use std::env;

use hunter_arena::components::creature::Archetype;
use hunter_arena::data::archetypes;
use hunter_arena::data::payload::{StartPose, VtMapData, WorldPayload};
use hunter_arena::{load_world_payload, EngineEvent, Game};

/// Scripted headless run: this binary plays the external engine's role,
/// feeding the core a fixed sequence of collision/overlap reports and hero
/// inputs, and prints the resulting event log.
fn main() {
    println!("hunter-arena - the hunter is welcome!");

    let payload = match env::args().nth(1) {
        Some(path) => match load_world_payload(&path) {
            Ok(payload) => payload,
            Err(err) => {
                eprintln!("Failed to load world payload: {}", err);
                std::process::exit(1);
            }
        },
        None => demo_payload(),
    };

    let mut game = Game::new(payload, 0xb10c);
    let hero_id = game.hero_id();

    for tick in 0u64..120 {
        let now = tick * 16;
        let mut events = Vec::new();

        // The hero walks steadily toward the zombie's corner of the field.
        events.push(EngineEvent::HeroMove {
            x: 320.0 + tick as f32 * 4.0,
            y: 320.0,
            rotation: 0.0,
        });
        // The hero holds the fire button for the first second.
        if now < 1000 {
            events.push(EngineEvent::HeroFire {
                aim_x: 960.0,
                aim_y: 320.0,
            });
        }
        // A stretch of fire tiles under the hero.
        if (600..900).contains(&now) {
            events.push(EngineEvent::FireTileOverlap { creature_id: hero_id });
        }
        // Then a well to recover at.
        if (1200..1600).contains(&now) {
            events.push(EngineEvent::WellTileOverlap { creature_id: hero_id });
        }
        // An arrow finds the zombie; the zombie later corners the hero.
        if now == 480 {
            events.push(EngineEvent::ProjectileHit {
                owner_id: hero_id,
                slot: 0,
                target_id: 2,
            });
        }
        if now == 1760 {
            events.push(EngineEvent::WeaponTouch {
                monster_id: 2,
                target_id: hero_id,
            });
        }
        // The bat clips a stone and re-plans.
        if now == 800 {
            events.push(EngineEvent::ObstacleCollision { creature_id: 4 });
        }

        let snapshot = game.tick(16, events);
        for event in &snapshot.events {
            println!("[{:>6}ms] {}", snapshot.now_ms, event);
        }
    }

    if let Some(hero) = game.creature(hero_id) {
        println!(
            "final: hero {}/{} life, {} arrows in flight",
            hero.life,
            hero.max_life,
            hero.active_bullets.unwrap_or(0)
        );
    }
}

/// Built-in world for running without a payload file: an open 20x20 field
/// with a well, a fire pit, and a few stones.
fn demo_payload() -> WorldPayload {
    let mut data = vec![vec![0u8; 20]; 20];
    data[4][4] = 5; // well
    data[10][12] = 6; // fire
    data[7][7] = 3; // stones
    data[7][8] = 3;
    data[13][3] = 1; // bush

    let start = |x: f32, y: f32| StartPose { x, y, rotation: 0.0 };

    WorldPayload {
        vt_map: VtMapData {
            data,
            tile_width: 64.0,
            tile_height: 64.0,
        },
        player: archetypes::descriptor(Archetype::Hero, 1, start(320.0, 320.0)),
        zombies: vec![archetypes::descriptor(Archetype::Zombie, 2, start(960.0, 320.0))],
        machines: vec![archetypes::descriptor(Archetype::Machine, 3, start(320.0, 960.0))],
        bats: vec![archetypes::descriptor(Archetype::Bat, 4, start(960.0, 960.0))],
    }
}
