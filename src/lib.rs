// Re-export core modules for use by the binary or other consumers
pub mod components;
pub mod core;
pub mod data;
pub mod simulation;
pub mod systems;

// Expose the main Game wrapper and the types needed to drive it
pub use crate::core::events::{EngineEvent, SimEvent};
pub use crate::core::world::{CreatureSummary, Game, Snapshot};
pub use crate::data::payload::{load_world_payload, parse_world_payload, WorldPayload};
