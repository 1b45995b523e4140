pub mod ecs;
pub mod events;
pub mod world;
