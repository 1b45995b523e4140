pub mod archetypes;
pub mod payload;
