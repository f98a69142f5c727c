//! Engine-independent pieces shared by every demo scene:
//! the character controller, its ground probe, and the scene layout records.

pub mod body;
pub mod colliders;
pub mod layouts;
pub mod movement;
pub mod physics;
pub mod player;
pub mod scene;

pub use body::*;
pub use colliders::*;
pub use layouts::*;
pub use movement::*;
pub use physics::*;
pub use player::*;
pub use scene::*;
