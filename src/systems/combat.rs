use bevy_ecs::prelude::*;

use crate::components::creature::{Archetype, Vitals};
use crate::components::world::{CreatureId, Position, Rotation};
use crate::core::events::{DamageCause, EngineEvent, EventQueue, RecoverySource, SimEvent, SimEventLog};
use crate::simulation::clock::SimClock;
use crate::simulation::map::VtMap;
use crate::simulation::rng::SimRng;
use crate::systems::respawn::respawn_creature;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Gate closed (immortal or inside the cooldown window); nothing changed.
    Ignored,
    Applied,
    /// Life reached zero; the caller must respawn synchronously.
    Fatal,
}

/// Take one life point off `vitals`, honoring the immortality flag and the
/// damage cooldown gate. Emits the damage event and, on a fatal hit, the
/// death event; respawning is the caller's job so it can reach the map.
pub fn apply_damage(
    id: CreatureId,
    archetype: Archetype,
    vitals: &mut Vitals,
    cause: DamageCause,
    now_ms: u64,
    log: &mut SimEventLog,
) -> DamageOutcome {
    if vitals.is_immortal || !vitals.damage_gate_open(now_ms) {
        return DamageOutcome::Ignored;
    }

    vitals.life -= 1;
    vitals.last_damage_ms = Some(now_ms);
    log.0.push(SimEvent::Damaged {
        id: id.0,
        archetype,
        cause,
        life: vitals.life,
    });

    if vitals.life <= 0 {
        log.0.push(SimEvent::Died {
            id: id.0,
            archetype,
            cause,
        });
        DamageOutcome::Fatal
    } else {
        DamageOutcome::Applied
    }
}

/// Restore one life point, gated independently of damage on the recovery
/// timestamp. No-op at full life.
pub fn apply_recovery(
    id: CreatureId,
    archetype: Archetype,
    vitals: &mut Vitals,
    source: RecoverySource,
    now_ms: u64,
    log: &mut SimEventLog,
) -> bool {
    if vitals.life >= vitals.max_life || !vitals.recover_gate_open(now_ms) {
        return false;
    }

    vitals.life += 1;
    vitals.last_recover_ms = Some(now_ms);
    log.0.push(SimEvent::Recovered {
        id: id.0,
        archetype,
        source,
        life: vitals.life,
    });
    true
}

/// System: resolves this tick's damage/recovery interactions. A fatal hit
/// respawns the creature in place before the next event is processed.
pub fn combat_system(
    events: Res<EventQueue>,
    clock: Res<SimClock>,
    map: Res<VtMap>,
    mut rng: ResMut<SimRng>,
    mut log: ResMut<SimEventLog>,
    mut creatures: Query<(
        &CreatureId,
        &Archetype,
        &mut Vitals,
        &mut Position,
        &mut Rotation,
    )>,
) {
    let now = clock.now_ms;

    for event in events.0.iter() {
        let (target, action) = match event {
            EngineEvent::FireTileOverlap { creature_id } => {
                (*creature_id, CombatAction::Damage(DamageCause::Fire))
            }
            EngineEvent::WellTileOverlap { creature_id } => {
                (*creature_id, CombatAction::Recover(RecoverySource::Well))
            }
            EngineEvent::WeaponTouch { monster_id, target_id } => {
                let Some(kind) = archetype_of(&creatures, *monster_id) else {
                    continue;
                };
                (*target_id, CombatAction::Damage(DamageCause::Weapon(kind)))
            }
            EngineEvent::ProjectileHit {
                owner_id, target_id, ..
            } => {
                let Some(kind) = archetype_of(&creatures, *owner_id) else {
                    continue;
                };
                (
                    *target_id,
                    CombatAction::Damage(DamageCause::Projectile(kind)),
                )
            }
            _ => continue,
        };

        let Some((id, archetype, mut vitals, mut pos, mut rot)) = creatures
            .iter_mut()
            .find(|(cid, _, _, _, _)| cid.0 == target)
        else {
            continue;
        };

        match action {
            CombatAction::Damage(cause) => {
                let outcome = apply_damage(*id, *archetype, &mut vitals, cause, now, &mut log);
                if outcome == DamageOutcome::Fatal {
                    respawn_creature(
                        *id, *archetype, &mut vitals, &mut pos, &mut rot, &map, &mut rng, &mut log,
                    );
                }
            }
            CombatAction::Recover(source) => {
                apply_recovery(*id, *archetype, &mut vitals, source, now, &mut log);
            }
        }
    }
}

enum CombatAction {
    Damage(DamageCause),
    Recover(RecoverySource),
}

fn archetype_of(
    creatures: &Query<(
        &CreatureId,
        &Archetype,
        &mut Vitals,
        &mut Position,
        &mut Rotation,
    )>,
    id: u32,
) -> Option<Archetype> {
    creatures
        .iter()
        .find(|(cid, _, _, _, _)| cid.0 == id)
        .map(|(_, archetype, _, _, _)| *archetype)
}
