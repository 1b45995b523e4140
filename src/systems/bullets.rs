use bevy_ecs::prelude::*;

use crate::components::bullet::{Armament, BulletPool};
use crate::components::world::{CreatureId, Hero, Position, Rotation};
use crate::core::events::{EngineEvent, EventQueue};
use crate::simulation::clock::SimClock;

/// Fire one projectile from `pos` toward `aim`.
///
/// Requires the fire cooldown to have elapsed and a dead slot in the pool;
/// otherwise the request is dropped without touching any state (starvation
/// is bounded by pool size by design, not an error). On success the shooter
/// turns to face the aim point and the cooldown restarts.
pub fn fire_at(
    pos: Position,
    rot: &mut Rotation,
    armament: &mut Armament,
    pool: &mut BulletPool,
    aim: Position,
    now_ms: u64,
) -> bool {
    if now_ms <= armament.next_fire_ms {
        return false;
    }
    let Some(slot) = pool.first_dead() else {
        return false;
    };

    let angle = pos.angle_to(aim);
    rot.0 = angle;

    let bullet = &mut pool.slots[slot];
    bullet.x = pos.x;
    bullet.y = pos.y;
    bullet.rotation = angle;
    bullet.vx = angle.cos() * armament.bullet_speed;
    bullet.vy = angle.sin() * armament.bullet_speed;
    bullet.active = true;

    armament.next_fire_ms = now_ms + armament.fire_rate_ms;
    true
}

/// System: releases bullets the physics collaborator reported as resolved,
/// either by impact or by leaving the world bounds.
pub fn bullet_release_system(
    events: Res<EventQueue>,
    mut pools: Query<(&CreatureId, &mut BulletPool)>,
) {
    for event in events.0.iter() {
        let (owner, slot) = match event {
            EngineEvent::ProjectileHit { owner_id, slot, .. } => (*owner_id, *slot),
            EngineEvent::BulletExpired { owner_id, slot } => (*owner_id, *slot),
            _ => continue,
        };

        if let Some((_, mut pool)) = pools.iter_mut().find(|(id, _)| id.0 == owner) {
            pool.release(slot);
        }
    }
}

/// System: advances live projectiles. Impact and bounds checks stay with the
/// external physics collaborator; the core only keeps positions current.
pub fn advance_bullets_system(clock: Res<SimClock>, mut pools: Query<&mut BulletPool>) {
    let dt = clock.delta_secs();

    for mut pool in pools.iter_mut() {
        for bullet in pool.slots.iter_mut().filter(|b| b.active) {
            bullet.x += bullet.vx * dt;
            bullet.y += bullet.vy * dt;
        }
    }
}

/// System: handles hero fire input.
pub fn hero_fire_system(
    events: Res<EventQueue>,
    clock: Res<SimClock>,
    mut heroes: Query<(&Position, &mut Rotation, &mut Armament, &mut BulletPool), With<Hero>>,
) {
    let now = clock.now_ms;

    for event in events.0.iter() {
        let EngineEvent::HeroFire { aim_x, aim_y } = event else {
            continue;
        };

        let Some((pos, mut rot, mut armament, mut pool)) = heroes.iter_mut().next() else {
            continue;
        };

        fire_at(
            *pos,
            &mut rot,
            &mut armament,
            &mut pool,
            Position::new(*aim_x, *aim_y),
            now,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero_weapon() -> (Armament, BulletPool) {
        (Armament::new(500, 400.0), BulletPool::with_capacity(2))
    }

    #[test]
    fn fire_claims_slot_and_restarts_cooldown() {
        let (mut armament, mut pool) = hero_weapon();
        let mut rot = Rotation(0.0);
        let pos = Position::new(10.0, 10.0);

        let fired = fire_at(pos, &mut rot, &mut armament, &mut pool, Position::new(10.0, 110.0), 100);
        assert!(fired);
        assert_eq!(pool.count_active(), 1);
        assert_eq!(armament.next_fire_ms, 600);

        let bullet = pool.slots[0];
        assert!(bullet.active);
        assert_eq!(bullet.x, 10.0);
        assert_eq!(bullet.y, 10.0);
        assert!(bullet.vy > 0.0 && bullet.vx.abs() < 1e-4);
        // Shooter faces the aim point.
        assert!((rot.0 - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn fire_inside_cooldown_is_dropped() {
        let (mut armament, mut pool) = hero_weapon();
        let mut rot = Rotation(0.0);
        let pos = Position::new(0.0, 0.0);
        let aim = Position::new(100.0, 0.0);

        assert!(fire_at(pos, &mut rot, &mut armament, &mut pool, aim, 100));
        assert!(!fire_at(pos, &mut rot, &mut armament, &mut pool, aim, 300));
        assert_eq!(pool.count_active(), 1);
        assert!(fire_at(pos, &mut rot, &mut armament, &mut pool, aim, 601));
    }

    #[test]
    fn starved_pool_drops_request_without_advancing_cooldown() {
        let (mut armament, mut pool) = hero_weapon();
        let mut rot = Rotation(0.0);
        let pos = Position::new(0.0, 0.0);
        let aim = Position::new(100.0, 0.0);

        assert!(fire_at(pos, &mut rot, &mut armament, &mut pool, aim, 100));
        assert!(fire_at(pos, &mut rot, &mut armament, &mut pool, aim, 700));
        assert_eq!(pool.count_dead(), 0);

        // Both slots live: the request is dropped and the cooldown untouched.
        let next_fire_before = armament.next_fire_ms;
        assert!(!fire_at(pos, &mut rot, &mut armament, &mut pool, aim, 1300));
        assert_eq!(armament.next_fire_ms, next_fire_before);
        assert_eq!(pool.count_active(), 2);

        // An external impact releases a slot; the next request succeeds.
        pool.release(0);
        assert!(fire_at(pos, &mut rot, &mut armament, &mut pool, aim, 1400));
        assert_eq!(pool.count_active(), 2);
    }

    #[test]
    fn release_ignores_unknown_slots() {
        let (_, mut pool) = hero_weapon();
        pool.release(99);
        assert_eq!(pool.count_dead(), 2);
    }
}
