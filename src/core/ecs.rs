use bevy_ecs::prelude::*;
use bevy_ecs::schedule::SystemSet;

use crate::core::events::{EventQueue, SimEventLog};
use crate::simulation::clock::SimClock;
use crate::simulation::map::VtMap;
use crate::simulation::rng::SimRng;
use crate::systems::automove::{automove_system, obstacle_collision_system};
use crate::systems::bullets::{advance_bullets_system, bullet_release_system, hero_fire_system};
use crate::systems::chat::hero_chat_system;
use crate::systems::combat::combat_system;
use crate::systems::{hero_move_system, track_last_pose_system};

/// Canonical tick ordering. Collision resolution runs before AI re-planning
/// so a monster forced idle by an obstacle has its idle state visible to the
/// same tick's evaluation.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum TickSet {
    Collision,
    Ai,
    Projectiles,
    Presentation,
}

/// Build the ECS world with baseline resources.
pub fn create_world(map: VtMap, seed: u64) -> World {
    let mut world = World::new();
    world.insert_resource(SimClock::default());
    world.insert_resource(SimRng::new(seed));
    world.insert_resource(EventQueue::default());
    world.insert_resource(SimEventLog::default());
    world.insert_resource(map);
    world
}

/// Build the system schedule in the canonical order.
pub fn create_schedule() -> Schedule {
    let mut schedule = Schedule::default();

    schedule.configure_sets(
        (
            TickSet::Collision,
            TickSet::Ai,
            TickSet::Projectiles,
            TickSet::Presentation,
        )
            .chain(),
    );

    schedule.add_systems((
        // Hero movement applies first so chase checks and combat both see
        // where the input collaborator put the hero this tick.
        (hero_move_system, combat_system, obstacle_collision_system)
            .chain()
            .in_set(TickSet::Collision),
        automove_system.in_set(TickSet::Ai),
        // Release before fire so a slot freed by this tick's impact report is
        // claimable by this tick's fire input.
        (bullet_release_system, advance_bullets_system, hero_fire_system)
            .chain()
            .in_set(TickSet::Projectiles),
        (hero_chat_system, track_last_pose_system).in_set(TickSet::Presentation),
    ));

    schedule
}
