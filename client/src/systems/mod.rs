//! Client-side scene systems

mod player;
mod world;

pub use player::*;
pub use world::*;
