pub mod clock;
pub mod map;
pub mod rng;
