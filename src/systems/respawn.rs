use crate::components::creature::{Archetype, Vitals};
use crate::components::world::{CreatureId, Position, Rotation};
use crate::core::events::{SimEvent, SimEventLog};
use crate::simulation::map::VtMap;
use crate::simulation::rng::SimRng;

/// Reset a creature in place: full life, cooldown gates cleared so the next
/// damage or recovery applies immediately, and a fresh random walkable
/// position. Idempotent at full life; the entity and its id are untouched.
pub fn respawn_creature(
    id: CreatureId,
    archetype: Archetype,
    vitals: &mut Vitals,
    pos: &mut Position,
    rot: &mut Rotation,
    map: &VtMap,
    rng: &mut SimRng,
    log: &mut SimEventLog,
) {
    let spawn = map.random_walkable_position(rng);

    vitals.life = vitals.max_life;
    vitals.last_damage_ms = None;
    vitals.last_recover_ms = None;
    *pos = spawn;
    rot.0 = 0.0;

    log.0.push(SimEvent::Respawned {
        id: id.0,
        archetype,
        x: spawn.x,
        y: spawn.y,
        life: vitals.life,
    });
}
