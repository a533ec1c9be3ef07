use std::time::Duration;

/// Static gameplay configuration in logical world units.
///
/// The world is a fixed coordinate space; the renderer scales it onto the
/// terminal, so none of these values depend on the terminal size.
#[derive(Debug, Clone)]
pub struct Config {
    pub screen_width: f32,
    pub screen_height: f32,

    pub ship_width: f32,
    pub ship_height: f32,
    pub ship_speed: f32,

    pub shot_width: f32,
    pub shot_height: f32,
    pub shot_speed: f32,
    /// Per-fire cap for player shots; the admission limit is twice this.
    pub shots_allowed: usize,
    pub enemy_shots_allowed: usize,
    /// Max upgrade shots outstanding at once (one volley's worth).
    pub upgrade_shots_allowed: usize,

    pub enemy_width: f32,
    pub enemy_height: f32,
    pub fleet_speed: f32,
    /// Vertical drop applied to the whole fleet on an edge hit.
    pub fleet_drop: f32,
    pub enemy_fire_min_ms: u64,
    pub enemy_fire_max_ms: u64,

    pub points_per_enemy: u32,
    /// Score delta that must be crossed to earn one upgrade volley.
    pub reward_interval: u32,
    /// Multiplier applied to every speed on a level clear.
    pub speedup_scale: f32,
    pub ship_limit: u32,
    /// Non-interactive breather after losing a ship.
    pub respawn_pause: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,

            ship_width: 60.0,
            ship_height: 48.0,
            ship_speed: 1.5,

            shot_width: 3.0,
            shot_height: 15.0,
            shot_speed: 2.5,
            shots_allowed: 3,
            enemy_shots_allowed: 3,
            upgrade_shots_allowed: 3,

            enemy_width: 40.0,
            enemy_height: 20.0,
            fleet_speed: 1.0,
            fleet_drop: 10.0,
            enemy_fire_min_ms: 1000,
            enemy_fire_max_ms: 3000,

            points_per_enemy: 10,
            reward_interval: 1000,
            speedup_scale: 1.1,
            ship_limit: 3,
            respawn_pause: Duration::from_millis(500),
        }
    }
}

/// The speeds that scale with difficulty. Reset to base on a new game,
/// multiplied up on every level clear.
#[derive(Debug, Clone, PartialEq)]
pub struct Speeds {
    pub ship: f32,
    pub shot: f32,
    pub fleet: f32,
}

impl Speeds {
    pub fn base(config: &Config) -> Self {
        Self {
            ship: config.ship_speed,
            shot: config.shot_speed,
            fleet: config.fleet_speed,
        }
    }

    pub fn increase(&mut self, scale: f32) {
        self.ship *= scale;
        self.shot *= scale;
        self.fleet *= scale;
    }
}
