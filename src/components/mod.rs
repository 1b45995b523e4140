pub mod bullet;
pub mod creature;
pub mod world;
