use bevy_ecs::prelude::*;

use crate::components::creature::Archetype;

/// Externally-observed interactions fed into the core each tick: pairwise
/// collision/overlap reports from the physics collaborator plus local hero
/// input. Each system scans the queue for the variants it handles.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// Creature overlaps a fire tile.
    FireTileOverlap { creature_id: u32 },
    /// Creature overlaps a well tile.
    WellTileOverlap { creature_id: u32 },
    /// A monster's weapon touches another creature.
    WeaponTouch { monster_id: u32, target_id: u32 },
    /// A live projectile struck a hostile creature.
    ProjectileHit {
        owner_id: u32,
        slot: usize,
        target_id: u32,
    },
    /// A live projectile left the world bounds.
    BulletExpired { owner_id: u32, slot: usize },
    /// A monster collided with a static obstacle (stone or bush).
    ObstacleCollision { creature_id: u32 },
    /// Hero transform as moved by the external input/physics collaborator.
    HeroMove { x: f32, y: f32, rotation: f32 },
    /// Hero fire input, aimed at a world-space point.
    HeroFire { aim_x: f32, aim_y: f32 },
    /// Hero pressed the chat toggle key.
    HeroToggleTyping,
    /// Hero submitted a chat message.
    HeroChat { message: String },
}

/// Resource storing this tick's events; replaced wholesale every tick.
#[derive(Resource, Default, Debug)]
pub struct EventQueue(pub Vec<EngineEvent>);

/// Why a creature lost a life point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageCause {
    Fire,
    Weapon(Archetype),
    Projectile(Archetype),
}

impl std::fmt::Display for DamageCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DamageCause::Fire => write!(f, "fire"),
            DamageCause::Weapon(Archetype::Zombie) => write!(f, "zombie hands"),
            DamageCause::Weapon(Archetype::Machine) => write!(f, "machine's turret"),
            DamageCause::Weapon(Archetype::Bat) => write!(f, "bat wings"),
            DamageCause::Weapon(Archetype::Hero) => write!(f, "hero weapon"),
            DamageCause::Projectile(Archetype::Hero) => write!(f, "arrow"),
            DamageCause::Projectile(Archetype::Machine) => write!(f, "laser"),
            DamageCause::Projectile(_) => write!(f, "projectile"),
        }
    }
}

/// Where a recovered life point came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySource {
    Well,
}

impl std::fmt::Display for RecoverySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecoverySource::Well => write!(f, "well"),
        }
    }
}

/// Outbound notifications for the logging and roster collaborators, drained
/// into each tick's snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    Spawned {
        id: u32,
        archetype: Archetype,
        x: f32,
        y: f32,
    },
    Damaged {
        id: u32,
        archetype: Archetype,
        cause: DamageCause,
        life: i32,
    },
    Recovered {
        id: u32,
        archetype: Archetype,
        source: RecoverySource,
        life: i32,
    },
    Died {
        id: u32,
        archetype: Archetype,
        cause: DamageCause,
    },
    Respawned {
        id: u32,
        archetype: Archetype,
        x: f32,
        y: f32,
        life: i32,
    },
    Message {
        id: u32,
        archetype: Archetype,
        text: String,
    },
}

impl std::fmt::Display for SimEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimEvent::Spawned { id, archetype, x, y } => {
                write!(f, "{} {} spawned at {}, {}", archetype, id, x, y)
            }
            SimEvent::Damaged {
                id,
                archetype,
                cause,
                life,
            } => write!(
                f,
                "-1 life {} {} ({} > {}) was damaged from {}",
                archetype,
                id,
                life + 1,
                life,
                cause
            ),
            SimEvent::Recovered {
                id,
                archetype,
                source,
                life,
            } => write!(
                f,
                "+1 life {} {} ({} > {}) was recovered from {}",
                archetype,
                id,
                life - 1,
                life,
                source
            ),
            SimEvent::Died { id, archetype, cause } => {
                write!(f, "{} {} died from {}", archetype, id, cause)
            }
            SimEvent::Respawned {
                id,
                archetype,
                x,
                y,
                life,
            } => write!(
                f,
                "{} {} ({}) respawned at {}, {}",
                archetype, id, life, x, y
            ),
            SimEvent::Message { id, archetype, text } => {
                write!(f, "{} {}: {}", archetype, id, text)
            }
        }
    }
}

/// Resource capturing this tick's outbound events.
#[derive(Resource, Default, Debug)]
pub struct SimEventLog(pub Vec<SimEvent>);
