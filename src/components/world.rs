use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// World-space location in pixels.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Angle in radians from this point toward `other`.
    pub fn angle_to(&self, other: Position) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

/// Facing angle in radians.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotation(pub f32);

/// Last-observed transform, kept for change detection by presentation collaborators.
#[derive(Component, Debug, Clone, Copy)]
pub struct LastPose {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
}

impl LastPose {
    pub fn of(pos: Position, rot: Rotation) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            rotation: rot.0,
        }
    }

    pub fn moved(&self, pos: Position) -> bool {
        self.x != pos.x || self.y != pos.y
    }

    pub fn rotated(&self, rot: Rotation) -> bool {
        self.rotation != rot.0
    }
}

/// Stable identifier for addressing creatures externally. Handles stay valid
/// across respawn; respawn mutates in place and never reallocates the entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureId(pub u32);

/// Marker component for the locally controlled hero.
#[derive(Component, Debug)]
pub struct Hero;

/// Marker component for server-driven monsters.
#[derive(Component, Debug)]
pub struct Monster;
