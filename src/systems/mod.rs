pub mod automove;
pub mod bullets;
pub mod chat;
pub mod combat;
pub mod respawn;

use bevy_ecs::prelude::*;

use crate::components::world::{Hero, LastPose, Position, Rotation};
use crate::core::events::{EngineEvent, EventQueue};

/// System: applies externally-driven hero movement. The core never steers
/// the hero itself; it only records where the input collaborator put them,
/// so the same tick's chase checks see the fresh transform.
pub fn hero_move_system(
    events: Res<EventQueue>,
    mut heroes: Query<(&mut Position, &mut Rotation), With<Hero>>,
) {
    for event in events.0.iter() {
        let EngineEvent::HeroMove { x, y, rotation } = event else {
            continue;
        };

        if let Some((mut pos, mut rot)) = heroes.iter_mut().next() {
            pos.x = *x;
            pos.y = *y;
            rot.0 = *rotation;
        }
    }
}

/// System: records each creature's transform at the end of the tick so
/// presentation collaborators can cheaply detect movement and rotation.
pub fn track_last_pose_system(mut query: Query<(&Position, &Rotation, &mut LastPose)>) {
    for (pos, rot, mut last) in query.iter_mut() {
        *last = LastPose::of(*pos, *rot);
    }
}
