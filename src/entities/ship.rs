use super::bounds::Bounds;
use crate::config::Config;

/// The player ship. Never destroyed, only recentered.
#[derive(Debug, Clone)]
pub struct Ship {
    pub bounds: Bounds,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Ship {
    pub fn new(config: &Config) -> Self {
        let mut ship = Self {
            bounds: Bounds::new(0.0, 0.0, config.ship_width, config.ship_height),
            moving_left: false,
            moving_right: false,
        };
        ship.center(config);
        ship
    }

    /// Records horizontal movement intent from input. The input layer
    /// enforces last-key-wins, so both flags set means a forced conflict
    /// and `advance` treats it as a no-op.
    pub fn set_movement_intent(&mut self, left: bool, right: bool) {
        self.moving_left = left;
        self.moving_right = right;
    }

    /// Applies one frame of horizontal movement, clamped to the screen.
    pub fn advance(&mut self, speed: f32, config: &Config) {
        if self.moving_right && !self.moving_left {
            self.bounds.x += speed;
        }
        if self.moving_left && !self.moving_right {
            self.bounds.x -= speed;
        }
        let max_x = config.screen_width - self.bounds.width;
        self.bounds.x = self.bounds.x.clamp(0.0, max_x);
    }

    /// Horizontal screen center, bottom edge on the screen bottom.
    /// Called on new game and after a survivable hit.
    pub fn center(&mut self, config: &Config) {
        self.bounds.x = (config.screen_width - self.bounds.width) / 2.0;
        self.bounds.y = config.screen_height - self.bounds.height;
    }

    /// Spawn point for player shots: top-center of the ship.
    pub fn nose(&self) -> (f32, f32) {
        (self.bounds.center_x(), self.bounds.top())
    }
}
