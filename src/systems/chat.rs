use bevy_ecs::prelude::*;

use crate::components::creature::{Archetype, Chat};
use crate::components::world::{CreatureId, Hero};
use crate::core::events::{EngineEvent, EventQueue, SimEvent, SimEventLog};
use crate::simulation::clock::SimClock;

/// Key-repeat guard on the chat toggle, same cooldown-gate shape as combat.
pub const ENTER_KEY_DELAY_MS: u64 = 200;

fn enter_gate_open(chat: &Chat, now_ms: u64) -> bool {
    match chat.last_enter_ms {
        Some(last) => now_ms.saturating_sub(last) > ENTER_KEY_DELAY_MS,
        None => true,
    }
}

/// System: hero chat input. Toggling opens/closes the message box;
/// submitting stamps the message and reports it for the log collaborator.
pub fn hero_chat_system(
    events: Res<EventQueue>,
    clock: Res<SimClock>,
    mut log: ResMut<SimEventLog>,
    mut heroes: Query<(&CreatureId, &Archetype, &mut Chat), With<Hero>>,
) {
    let now = clock.now_ms;

    for event in events.0.iter() {
        let Some((id, archetype, mut chat)) = heroes.iter_mut().next() else {
            continue;
        };

        match event {
            EngineEvent::HeroToggleTyping => {
                if enter_gate_open(&chat, now) {
                    chat.last_enter_ms = Some(now);
                    chat.is_typing = !chat.is_typing;
                }
            }
            EngineEvent::HeroChat { message } => {
                if !enter_gate_open(&chat, now) {
                    continue;
                }
                chat.last_enter_ms = Some(now);
                chat.is_typing = false;
                if message.is_empty() {
                    continue;
                }
                chat.last_message = Some(message.clone());
                chat.last_message_ms = now;
                log.0.push(SimEvent::Message {
                    id: id.0,
                    archetype: *archetype,
                    text: message.clone(),
                });
            }
            _ => continue,
        }
    }
}
