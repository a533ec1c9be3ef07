use super::bounds::Bounds;
use super::ship::Ship;
use crate::config::{Config, Speeds};

/// Who fired a shot. The kind fixes the vertical direction and whether
/// the shot survives enemy collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotKind {
    PlayerNormal,
    PlayerUpgrade,
    Enemy,
}

impl ShotKind {
    pub fn is_player(self) -> bool {
        matches!(self, ShotKind::PlayerNormal | ShotKind::PlayerUpgrade)
    }

    /// Upgrade shots punch through: they survive enemy hits.
    pub fn penetrating(self) -> bool {
        matches!(self, ShotKind::PlayerUpgrade)
    }
}

#[derive(Debug, Clone)]
pub struct Shot {
    pub bounds: Bounds,
    pub velocity_y: f32,
    pub kind: ShotKind,
}

impl Shot {
    /// Spawns a shot centered horizontally on `center_x`, with its top
    /// edge at `top_y`. Player shots travel up, enemy shots down.
    pub fn new(kind: ShotKind, center_x: f32, top_y: f32, speed: f32, config: &Config) -> Self {
        let velocity_y = match kind {
            ShotKind::PlayerNormal | ShotKind::PlayerUpgrade => -speed,
            ShotKind::Enemy => speed,
        };
        Self {
            bounds: Bounds::new(
                center_x - config.shot_width / 2.0,
                top_y,
                config.shot_width,
                config.shot_height,
            ),
            velocity_y,
            kind,
        }
    }

    pub fn advance(&mut self) {
        self.bounds.y += self.velocity_y;
    }

    /// Player shots expire past the top, enemy shots past the bottom.
    pub fn offscreen(&self, screen_height: f32) -> bool {
        match self.kind {
            ShotKind::PlayerNormal | ShotKind::PlayerUpgrade => self.bounds.bottom() <= 0.0,
            ShotKind::Enemy => self.bounds.top() >= screen_height,
        }
    }
}

/// Owns every live shot and enforces the per-owner admission caps.
/// Rejected fire requests are silent; callers may inspect the bool.
#[derive(Debug, Default)]
pub struct Shots {
    pub shots: Vec<Shot>,
}

impl Shots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    pub fn count(&self, kind: ShotKind) -> usize {
        self.shots.iter().filter(|s| s.kind == kind).count()
    }

    fn player_count(&self) -> usize {
        self.shots.iter().filter(|s| s.kind.is_player()).count()
    }

    /// One normal shot from the ship's nose. The admission limit is a
    /// deliberately loose 2x the per-fire cap, counting both player kinds.
    pub fn fire_player_shot(&mut self, ship: &Ship, speeds: &Speeds, config: &Config) -> bool {
        if self.player_count() >= config.shots_allowed * 2 {
            return false;
        }
        let (center_x, top_y) = ship.nose();
        self.shots.push(Shot::new(
            ShotKind::PlayerNormal,
            center_x,
            top_y,
            speeds.shot,
            config,
        ));
        true
    }

    /// Three upgrade shots fanned out from the ship center. No-op unless
    /// the game is active and fewer than the cap are still outstanding.
    pub fn fire_upgrade_volley(
        &mut self,
        ship: &Ship,
        active: bool,
        speeds: &Speeds,
        config: &Config,
    ) -> bool {
        if !active || self.count(ShotKind::PlayerUpgrade) >= config.upgrade_shots_allowed {
            return false;
        }
        let top_y = ship.bounds.top();
        for offset in [-20.0, 0.0, 20.0] {
            self.shots.push(Shot::new(
                ShotKind::PlayerUpgrade,
                ship.bounds.center_x() + offset,
                top_y,
                speeds.shot,
                config,
            ));
        }
        true
    }

    /// One enemy shot dropping from `(center_x, top_y)`, the shooter's
    /// bottom-center.
    pub fn fire_enemy_shot(
        &mut self,
        center_x: f32,
        top_y: f32,
        speeds: &Speeds,
        config: &Config,
    ) -> bool {
        if self.count(ShotKind::Enemy) >= config.enemy_shots_allowed {
            return false;
        }
        self.shots.push(Shot::new(
            ShotKind::Enemy,
            center_x,
            top_y,
            speeds.shot,
            config,
        ));
        true
    }

    /// Moves every shot and drops the ones that left the screen. Bounds
    /// are rechecked every frame, so advance/expire order is immaterial.
    pub fn advance_all(&mut self, config: &Config) {
        for shot in &mut self.shots {
            shot.advance();
        }
        let screen_height = config.screen_height;
        self.shots.retain(|s| !s.offscreen(screen_height));
    }

    pub fn clear(&mut self) {
        self.shots.clear();
    }
}
