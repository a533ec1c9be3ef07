use super::bounds::Bounds;
use crate::config::Config;

/// One fleet member. Liveness is membership in the fleet's vec; a hit
/// removes the enemy outright.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub bounds: Bounds,
}

impl Enemy {
    pub fn new(x: f32, y: f32, config: &Config) -> Self {
        Self {
            bounds: Bounds::new(x, y, config.enemy_width, config.enemy_height),
        }
    }

    /// True when the box touches either horizontal screen bound.
    pub fn at_horizontal_edge(&self, screen_width: f32) -> bool {
        self.bounds.right() >= screen_width || self.bounds.left() <= 0.0
    }
}
