//! Math Primitives
//!
//! Shared vector math and randomness for the input pipeline and game logic.
//!
//! - `vec2`: 2D vectors in pixel / playfield space
//! - `vec3`: 3D vectors in world-landmark space (meters, hand-centroid origin)
//! - `rng`: seeded Xorshift128+ PRNG so demo runs replay exactly

pub mod rng;
pub mod vec2;
pub mod vec3;

pub use rng::GameRng;
pub use vec2::Vec2;
pub use vec3::Vec3;
