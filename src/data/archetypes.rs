use crate::components::creature::Archetype;
use crate::data::payload::{CreatureDescriptor, StartPose};

/// Baseline combat/movement constants for one creature kind. The server may
/// override any of these per creature through its spawn descriptor; these
/// tables exist for local test worlds and the demo driver.
#[derive(Debug, Clone, Copy)]
pub struct ArchetypeStats {
    pub max_life: i32,
    pub immortal_delay_ms: u64,
    pub velocity_speed: f32,
    pub visible_range: f32,
    pub mass: f32,
    pub fire_rate_ms: u64,
    pub bullet_speed: f32,
    pub n_bullets: usize,
}

pub fn stats(archetype: Archetype) -> ArchetypeStats {
    match archetype {
        Archetype::Hero => ArchetypeStats {
            max_life: 10,
            immortal_delay_ms: 1000,
            velocity_speed: 200.0,
            visible_range: 0.0,
            mass: 10.0,
            fire_rate_ms: 500,
            bullet_speed: 500.0,
            n_bullets: 10,
        },
        Archetype::Zombie => ArchetypeStats {
            max_life: 3,
            immortal_delay_ms: 1000,
            velocity_speed: 120.0,
            visible_range: 300.0,
            mass: 20.0,
            fire_rate_ms: 0,
            bullet_speed: 0.0,
            n_bullets: 0,
        },
        // Stationary turret: zero velocity, but a laser pool.
        Archetype::Machine => ArchetypeStats {
            max_life: 4,
            immortal_delay_ms: 1000,
            velocity_speed: 0.0,
            visible_range: 600.0,
            mass: 100.0,
            fire_rate_ms: 2000,
            bullet_speed: 400.0,
            n_bullets: 5,
        },
        Archetype::Bat => ArchetypeStats {
            max_life: 2,
            immortal_delay_ms: 1000,
            velocity_speed: 160.0,
            visible_range: 400.0,
            mass: 8.0,
            fire_rate_ms: 0,
            bullet_speed: 0.0,
            n_bullets: 0,
        },
    }
}

/// Build a full-life spawn descriptor from the archetype table.
pub fn descriptor(archetype: Archetype, id: u32, start: StartPose) -> CreatureDescriptor {
    let stats = stats(archetype);
    CreatureDescriptor {
        id,
        life: stats.max_life,
        max_life: stats.max_life,
        immortal_delay_ms: stats.immortal_delay_ms,
        velocity_speed: stats.velocity_speed,
        visible_range: stats.visible_range,
        mass: stats.mass,
        fire_rate_ms: stats.fire_rate_ms,
        bullet_speed: stats.bullet_speed,
        n_bullets: stats.n_bullets,
        start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_starts_at_full_life() {
        for kind in [
            Archetype::Hero,
            Archetype::Zombie,
            Archetype::Machine,
            Archetype::Bat,
        ] {
            let desc = descriptor(kind, 1, StartPose { x: 0.0, y: 0.0, rotation: 0.0 });
            assert_eq!(desc.life, desc.max_life);
            assert!(desc.max_life > 0);
        }
    }

    #[test]
    fn only_armed_archetypes_carry_bullets() {
        assert!(stats(Archetype::Hero).n_bullets > 0);
        assert!(stats(Archetype::Machine).n_bullets > 0);
        assert_eq!(stats(Archetype::Zombie).n_bullets, 0);
        assert_eq!(stats(Archetype::Bat).n_bullets, 0);
    }
}
