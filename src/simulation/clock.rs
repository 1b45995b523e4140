use bevy_ecs::prelude::*;

/// Simulation clock advanced once per tick by the external frame clock.
/// Cooldowns everywhere are comparisons against `now_ms`; nothing in the
/// core schedules timers.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SimClock {
    pub now_ms: u64,
    pub delta_ms: u64,
}

impl SimClock {
    pub fn advance(&mut self, delta_ms: u64) {
        self.now_ms += delta_ms;
        self.delta_ms = delta_ms;
    }

    pub fn delta_secs(&self) -> f32 {
        self.delta_ms as f32 / 1000.0
    }
}
