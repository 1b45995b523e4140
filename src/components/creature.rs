use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::world::Position;

/// The closed set of creature kinds. Behavior constants hang off the
/// archetype tables in `data::archetypes`; the tag itself is what systems
/// dispatch on.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Hero,
    Zombie,
    Machine,
    Bat,
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Archetype::Hero => "hero",
            Archetype::Zombie => "zombie",
            Archetype::Machine => "machine",
            Archetype::Bat => "bat",
        };
        write!(f, "{}", name)
    }
}

/// Life pool plus the two independent cooldown gates.
///
/// `last_damage_ms` and `last_recover_ms` are `None` until the first such
/// event (and cleared back to `None` on respawn), which permits the next
/// damage/recovery immediately.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct Vitals {
    pub life: i32,
    pub max_life: i32,
    pub immortal_delay_ms: u64,
    pub last_damage_ms: Option<u64>,
    pub last_recover_ms: Option<u64>,
    pub is_immortal: bool,
}

impl Vitals {
    pub fn new(life: i32, max_life: i32, immortal_delay_ms: u64) -> Self {
        Self {
            life: life.clamp(0, max_life),
            max_life,
            immortal_delay_ms,
            last_damage_ms: None,
            last_recover_ms: None,
            is_immortal: false,
        }
    }

    /// True if the damage cooldown window has elapsed.
    pub fn damage_gate_open(&self, now_ms: u64) -> bool {
        match self.last_damage_ms {
            Some(last) => now_ms > last + self.immortal_delay_ms,
            None => true,
        }
    }

    /// True if the recovery cooldown window has elapsed.
    pub fn recover_gate_open(&self, now_ms: u64) -> bool {
        match self.last_recover_ms {
            Some(last) => now_ms > last + self.immortal_delay_ms,
            None => true,
        }
    }
}

/// Movement parameters shared by every creature.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Motion {
    /// Units per second while steering.
    pub velocity_speed: f32,
    /// Hero-detection radius for the chase transition.
    pub visible_range: f32,
    pub mass: f32,
}

/// Autonomous-movement state carried by mobile monsters only. The machine is
/// a stationary turret and never gets this component.
#[derive(Component, Debug, Clone)]
pub struct AutoMove {
    pub is_idle: bool,
    pub last_idle_ms: u64,
    pub target: Position,
    /// When the current wander target was chosen.
    pub target_set_ms: u64,
}

impl AutoMove {
    /// A fresh monster wanders from its own spawn point, so the first tick's
    /// proximity check forces an immediate re-target.
    pub fn at(start: Position) -> Self {
        Self {
            is_idle: false,
            last_idle_ms: 0,
            target: start,
            target_set_ms: 0,
        }
    }
}

/// Hero chat state. Shares the cooldown-gate pattern with combat: the enter
/// toggle and message stamp are both timestamp comparisons.
#[derive(Component, Debug, Clone, Default)]
pub struct Chat {
    pub is_typing: bool,
    pub last_enter_ms: Option<u64>,
    pub last_message: Option<String>,
    pub last_message_ms: u64,
}
