use std::time::Instant;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// No game running: before the first start and after the last ship.
    /// Movement and fire input are ignored until an explicit start.
    Idle,
    Playing,
    /// Brief breather after losing a ship. Gameplay is frozen but the
    /// loop keeps polling input so quit stays responsive.
    Respawning { resume_at: Instant },
}

/// Score, level, ships, high score, and the phase state machine.
///
/// The single source of truth for session data. Owned by the game loop
/// and passed by `&mut` into the components that may touch it; only the
/// loop itself starts a new game.
#[derive(Debug)]
pub struct Session {
    pub score: u32,
    pub level: u32,
    pub ships_left: u32,
    pub high_score: u32,
    pub phase: Phase,
    /// Score at which the last upgrade volley was granted.
    last_reward_score: u32,
}

impl Session {
    /// A fresh session sits idle until the player starts a game.
    pub fn new(high_score: u32) -> Self {
        Self {
            score: 0,
            level: 1,
            ships_left: 0,
            high_score,
            phase: Phase::Idle,
            last_reward_score: 0,
        }
    }

    /// Resets everything but the high score and begins play.
    pub fn start(&mut self, ship_limit: u32) {
        self.score = 0;
        self.level = 1;
        self.ships_left = ship_limit;
        self.last_reward_score = 0;
        self.phase = Phase::Playing;
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Adds points and keeps the high score ahead of the score.
    pub fn award(&mut self, points: u32) {
        self.score += points;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    /// True at most once per reward interval crossed. Crossing several
    /// multiples in one jump still grants a single reward; the watermark
    /// advances to the newest multiple so the band cannot re-trigger.
    pub fn take_reward(&mut self, interval: u32) -> bool {
        if interval == 0 {
            return false;
        }
        let earned = self.score / interval;
        if earned > self.last_reward_score / interval {
            self.last_reward_score = earned * interval;
            return true;
        }
        false
    }

    pub fn advance_level(&mut self) {
        self.level += 1;
    }

    /// Consumes one ship. Returns `false` when none remain and the
    /// session has gone idle; otherwise schedules the respawn breather.
    pub fn lose_ship(&mut self, resume_at: Instant) -> bool {
        self.ships_left = self.ships_left.saturating_sub(1);
        if self.ships_left == 0 {
            self.phase = Phase::Idle;
            false
        } else {
            self.phase = Phase::Respawning { resume_at };
            true
        }
    }

    /// Ends the respawn breather once its deadline has passed.
    pub fn resume_if_due(&mut self, now: Instant) {
        if let Phase::Respawning { resume_at } = self.phase
            && now >= resume_at
        {
            self.phase = Phase::Playing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new(500);
        assert!(session.is_idle());
        assert_eq!(session.high_score, 500);
        assert_eq!(session.score, 0);
    }

    #[test]
    fn test_start_resets_everything_but_high_score() {
        let mut session = Session::new(500);
        session.award(2000);
        session.take_reward(1000);
        session.advance_level();

        session.start(3);
        assert!(session.is_playing());
        assert_eq!(session.score, 0);
        assert_eq!(session.level, 1);
        assert_eq!(session.ships_left, 3);
        assert_eq!(session.high_score, 2000);
        // The reward watermark resets with the score.
        session.award(1000);
        assert!(session.take_reward(1000));
    }

    #[test]
    fn test_award_is_exact_and_bumps_high_score() {
        let mut session = Session::new(50);
        session.award(10 * 3);
        assert_eq!(session.score, 30);
        assert_eq!(session.high_score, 50);

        session.award(40);
        assert_eq!(session.score, 70);
        assert_eq!(session.high_score, 70);
    }

    #[test]
    fn test_reward_fires_once_per_interval() {
        let mut session = Session::new(0);

        session.award(999);
        assert!(!session.take_reward(1000));

        session.award(1);
        assert!(session.take_reward(1000));
        // Still inside the same band on later resolutions.
        assert!(!session.take_reward(1000));
        session.award(500);
        assert!(!session.take_reward(1000));

        session.award(500);
        assert!(session.take_reward(1000));
    }

    #[test]
    fn test_reward_single_grant_across_multiple_crossings() {
        let mut session = Session::new(0);
        // Jumping three intervals at once grants one reward and moves the
        // watermark to the newest multiple.
        session.award(3200);
        assert!(session.take_reward(1000));
        assert!(!session.take_reward(1000));

        session.award(800);
        assert!(session.take_reward(1000));
    }

    #[test]
    fn test_lose_ship_schedules_respawn_while_ships_remain() {
        let mut session = Session::new(0);
        session.start(3);

        let resume_at = Instant::now() + Duration::from_millis(500);
        assert!(session.lose_ship(resume_at));
        assert_eq!(session.ships_left, 2);
        assert_eq!(session.phase, Phase::Respawning { resume_at });
    }

    #[test]
    fn test_losing_last_ship_goes_idle() {
        let mut session = Session::new(0);
        session.start(1);

        assert!(!session.lose_ship(Instant::now()));
        assert_eq!(session.ships_left, 0);
        assert!(session.is_idle());
    }

    #[test]
    fn test_resume_waits_for_deadline() {
        let mut session = Session::new(0);
        session.start(3);

        let now = Instant::now();
        session.lose_ship(now + Duration::from_millis(500));

        session.resume_if_due(now);
        assert!(!session.is_playing());

        session.resume_if_due(now + Duration::from_millis(500));
        assert!(session.is_playing());
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_score_is_monotonic_and_high_score_dominates(
                initial_high in 0u32..5000,
                awards in prop::collection::vec(0u32..200, 0..50)
            ) {
                let mut session = Session::new(initial_high);
                session.start(3);
                let mut last = 0;
                for points in awards {
                    session.award(points);
                    prop_assert!(session.score >= last);
                    prop_assert!(session.high_score >= session.score);
                    prop_assert!(session.high_score >= initial_high);
                    last = session.score;
                }
            }
        }
    }
}
