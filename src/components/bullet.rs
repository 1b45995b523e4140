use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// One reusable projectile slot. Inactive slots are dead bullets waiting to
/// be recycled by the next fire request.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub vx: f32,
    pub vy: f32,
    pub active: bool,
}

/// Weapon timing and projectile speed for a firing creature.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Armament {
    pub fire_rate_ms: u64,
    pub next_fire_ms: u64,
    pub bullet_speed: f32,
}

impl Armament {
    pub fn new(fire_rate_ms: u64, bullet_speed: f32) -> Self {
        Self {
            fire_rate_ms,
            next_fire_ms: 0,
            bullet_speed,
        }
    }
}

/// Fixed-capacity projectile store owned by exactly one creature. Slots are
/// claimed on fire and released when the external physics collaborator
/// reports an impact or an out-of-bounds exit.
#[derive(Component, Debug, Clone)]
pub struct BulletPool {
    pub slots: Vec<Bullet>,
}

impl BulletPool {
    pub fn with_capacity(n_bullets: usize) -> Self {
        Self {
            slots: vec![Bullet::default(); n_bullets],
        }
    }

    /// Index of the first dead slot, if any.
    pub fn first_dead(&self) -> Option<usize> {
        self.slots.iter().position(|b| !b.active)
    }

    pub fn count_dead(&self) -> usize {
        self.slots.iter().filter(|b| !b.active).count()
    }

    pub fn count_active(&self) -> usize {
        self.slots.len() - self.count_dead()
    }

    /// Return a slot to the pool. Unknown indices are ignored; the external
    /// collaborator can report a resolution for a bullet we already recycled.
    pub fn release(&mut self, slot: usize) {
        if let Some(bullet) = self.slots.get_mut(slot) {
            bullet.active = false;
        }
    }
}
