use bevy_ecs::prelude::*;

use crate::components::creature::{AutoMove, Motion};
use crate::components::world::{CreatureId, Hero, Monster, Position, Rotation};
use crate::core::events::{EngineEvent, EventQueue};
use crate::simulation::clock::SimClock;
use crate::simulation::map::VtMap;
use crate::simulation::rng::SimRng;

/// How long a monster stays put after being forced idle.
pub const AUTOMOVE_DELAY_MS: u64 = 1000;
/// A wander target older than this is stale and gets replaced.
pub const WANDER_RETARGET_MS: u64 = 6000;
/// Within this distance the monster is "at" its target; re-target instead of
/// spinning around the point.
pub const WANDER_CLOSE_DISTANCE: f32 = 200.0;
/// New wander targets must be at least this far away.
pub const WANDER_MIN_DISTANCE: f32 = 600.0;
/// Obstacle collisions back-date the target timestamp by this much so the
/// next evaluation re-plans immediately instead of waiting out the target.
pub const FORCED_IDLE_BACKDATE_MS: u64 = 7000;

/// What the state machine decided this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoMoveState {
    Chasing,
    Idle,
    Wandering,
}

/// One tick of the monster movement state machine, in priority order:
/// chase the hero when in detection range, otherwise sit out a fresh idle
/// window, otherwise wander toward a (possibly re-sampled) random target.
pub fn automove_step(
    motion: &Motion,
    auto: &mut AutoMove,
    pos: &mut Position,
    rot: &mut Rotation,
    hero_pos: Option<Position>,
    map: &VtMap,
    rng: &mut SimRng,
    now_ms: u64,
    dt_secs: f32,
) -> AutoMoveState {
    if let Some(hero) = hero_pos {
        if pos.distance_to(hero) < motion.visible_range {
            // No target memory while chasing; steer at the hero's current spot.
            steer(pos, rot, hero, motion.velocity_speed, dt_secs);
            return AutoMoveState::Chasing;
        }
    }

    if auto.is_idle {
        let idled_ms = now_ms.saturating_sub(auto.last_idle_ms);
        let target_stale = now_ms.saturating_sub(auto.target_set_ms) > WANDER_RETARGET_MS;
        // A back-dated target releases the monster on the evaluation after
        // the collision; a plain idle waits out the full window.
        if idled_ms > AUTOMOVE_DELAY_MS || (idled_ms > 0 && target_stale) {
            auto.is_idle = false;
        } else {
            return AutoMoveState::Idle;
        }
    }

    let target_age = now_ms.saturating_sub(auto.target_set_ms);
    if target_age > WANDER_RETARGET_MS || pos.distance_to(auto.target) < WANDER_CLOSE_DISTANCE {
        auto.target = map.random_distant_position(*pos, WANDER_MIN_DISTANCE, rng);
        auto.target_set_ms = now_ms;
    }

    steer(pos, rot, auto.target, motion.velocity_speed, dt_secs);
    AutoMoveState::Wandering
}

/// Move toward `target` at `speed`, facing the direction of travel. Never
/// overshoots the target within one tick.
pub fn steer(pos: &mut Position, rot: &mut Rotation, target: Position, speed: f32, dt_secs: f32) {
    let distance = pos.distance_to(target);
    if distance <= f32::EPSILON {
        return;
    }

    rot.0 = pos.angle_to(target);
    let step = (speed * dt_secs).min(distance);
    pos.x += rot.0.cos() * step;
    pos.y += rot.0.sin() * step;
}

/// System: forces monsters that hit a static obstacle into idle. Runs in the
/// collision set so the same tick's AI evaluation sees the idle state.
pub fn obstacle_collision_system(
    events: Res<EventQueue>,
    clock: Res<SimClock>,
    mut monsters: Query<(&CreatureId, &mut AutoMove), With<Monster>>,
) {
    let now = clock.now_ms;

    for event in events.0.iter() {
        let EngineEvent::ObstacleCollision { creature_id } = event else {
            continue;
        };

        let Some((_, mut auto)) = monsters.iter_mut().find(|(id, _)| id.0 == *creature_id) else {
            continue;
        };

        auto.is_idle = true;
        auto.last_idle_ms = now;
        auto.target_set_ms = now.saturating_sub(FORCED_IDLE_BACKDATE_MS);
    }
}

/// System: per-tick movement decision for every mobile monster.
pub fn automove_system(
    clock: Res<SimClock>,
    map: Res<VtMap>,
    mut rng: ResMut<SimRng>,
    mut monsters: Query<
        (&Motion, &mut AutoMove, &mut Position, &mut Rotation),
        (With<Monster>, Without<Hero>),
    >,
    hero: Query<&Position, With<Hero>>,
) {
    let hero_pos = hero.iter().next().copied();
    let now = clock.now_ms;
    let dt = clock.delta_secs();

    for (motion, mut auto, mut pos, mut rot) in monsters.iter_mut() {
        automove_step(
            motion, &mut auto, &mut pos, &mut rot, hero_pos, &map, &mut rng, now, dt,
        );
    }
}
