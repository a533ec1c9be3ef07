mod bounds;
mod enemy;
mod fleet;
mod projectile;
mod ship;

// Re-export all public types
pub use bounds::Bounds;
pub use enemy::Enemy;
pub use fleet::Fleet;
pub use projectile::{Shot, ShotKind, Shots};
pub use ship::Ship;
