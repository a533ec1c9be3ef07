//! Collision resolution and scoring.
//!
//! All tests are coarse AABB overlap. The session and entity sets come in
//! by `&mut` from the game loop; nothing here holds state of its own.

use std::time::Instant;

use crate::config::{Config, Speeds};
use crate::entities::{Fleet, Ship, ShotKind, Shots};
use crate::session::Session;

/// Resolves player shots against the fleet, then scoring, rewards, and
/// the level clear.
///
/// Every overlapping enemy is destroyed. A normal shot dies with its
/// first victim; a penetrating shot keeps going and may destroy several
/// enemies in one pass.
pub fn resolve_player_shots(
    session: &mut Session,
    fleet: &mut Fleet,
    shots: &mut Shots,
    ship: &Ship,
    speeds: &mut Speeds,
    config: &Config,
) {
    let mut dead_shots: Vec<usize> = Vec::new();
    let mut dead_enemies: Vec<usize> = Vec::new();

    for (s_idx, shot) in shots.shots.iter().enumerate() {
        if !shot.kind.is_player() {
            continue;
        }
        for (e_idx, enemy) in fleet.enemies.iter().enumerate() {
            if dead_enemies.contains(&e_idx) {
                continue;
            }
            if shot.bounds.intersects(&enemy.bounds) {
                dead_enemies.push(e_idx);
                if !shot.kind.penetrating() {
                    dead_shots.push(s_idx);
                    break;
                }
            }
        }
    }

    let destroyed = dead_enemies.len() as u32;

    // Remove back to front so earlier indices stay valid.
    dead_shots.sort_unstable();
    dead_shots.dedup();
    for idx in dead_shots.into_iter().rev() {
        shots.shots.remove(idx);
    }
    dead_enemies.sort_unstable();
    for idx in dead_enemies.into_iter().rev() {
        fleet.enemies.remove(idx);
    }

    if destroyed > 0 {
        session.award(destroyed * config.points_per_enemy);
        if session.take_reward(config.reward_interval) {
            shots.fire_upgrade_volley(ship, session.is_playing(), speeds, config);
        }
    }

    if fleet.is_empty() {
        speeds.increase(config.speedup_scale);
        session.advance_level();
        shots.clear();
        fleet.rebuild(config);
    }
}

/// Checks the three ways the player loses a ship: an enemy shot on the
/// hull, an enemy on the hull, or an enemy reaching the screen bottom.
pub fn resolve_ship_hits(
    session: &mut Session,
    fleet: &mut Fleet,
    shots: &mut Shots,
    ship: &mut Ship,
    config: &Config,
    now: Instant,
) {
    let shot_hit = shots
        .shots
        .iter()
        .any(|s| s.kind == ShotKind::Enemy && s.bounds.intersects(&ship.bounds));

    if shot_hit || fleet.overlaps(&ship.bounds) || fleet.reached_bottom(config.screen_height) {
        ship_hit(session, fleet, shots, ship, config, now);
    }
}

/// One ship down. Both entity sets always empty out; with ships left the
/// board is rebuilt under a respawn breather, otherwise the session goes
/// idle with the board left bare.
pub fn ship_hit(
    session: &mut Session,
    fleet: &mut Fleet,
    shots: &mut Shots,
    ship: &mut Ship,
    config: &Config,
    now: Instant,
) {
    shots.clear();
    fleet.clear();

    if session.lose_ship(now + config.respawn_pause) {
        fleet.rebuild(config);
        ship.center(config);
    }
}
