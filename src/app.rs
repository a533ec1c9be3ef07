use color_eyre::Result;
use ratatui::layout::{Position, Rect};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};

use crate::collision;
use crate::config::{Config, Speeds};
use crate::entities::{Fleet, Ship, Shots};
use crate::highscore::{HIGH_SCORE_FILE, HighScoreStore};
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView, play_button_area};
use crate::session::Session;

/// The main application which holds the state and logic of the game.
pub struct App {
    running: bool,
    config: Config,
    speeds: Speeds,
    session: Session,
    ship: Ship,
    fleet: Fleet,
    shots: Shots,
    /// Origin for the enemy fire timer's elapsed-ms clock.
    started_at: Instant,
    /// Last known terminal cells, for click hit-testing.
    screen_cells: Rect,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    store: HighScoreStore,
}

impl App {
    /// Construct a new instance of [`App`]. The session starts idle with
    /// the fleet already on screen behind the play button.
    pub fn new() -> Self {
        Self::with_store(HighScoreStore::new(HIGH_SCORE_FILE))
    }

    pub fn with_store(store: HighScoreStore) -> Self {
        let config = Config::default();
        let high_score = store.load();

        let mut app = Self {
            running: true,
            speeds: Speeds::base(&config),
            session: Session::new(high_score),
            ship: Ship::new(&config),
            fleet: Fleet::new(),
            shots: Shots::new(),
            started_at: Instant::now(),
            screen_cells: Rect::default(),
            input_manager: InputManager::new(),
            renderer: GameRenderer::new(),
            store,
            config,
        };
        app.fleet.rebuild(&app.config);
        app
    }

    /// Run the application's main loop. Persists the high score on the
    /// way out, whatever ended the loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        while self.running {
            terminal.draw(|frame| {
                let view = RenderView {
                    phase: self.session.phase,
                    ship: &self.ship,
                    enemies: &self.fleet.enemies,
                    shots: &self.shots.shots,
                    score: self.session.score,
                    high_score: self.session.high_score,
                    level: self.session.level,
                    ships_left: self.session.ships_left,
                    area: frame.area(),
                };
                self.screen_cells = frame.area();
                self.renderer.render(frame, &view, &self.config);
            })?;

            self.input_manager.poll_events(&self.session.phase)?;
            let actions = self.input_manager.get_actions(&self.session.phase);
            self.process_actions(&actions);

            self.session.resume_if_due(Instant::now());
            if self.session.is_playing() {
                self.update_game();
            }

            // Small sleep to maintain the frame rate and prevent CPU spinning
            std::thread::sleep(Duration::from_millis(8));
        }

        self.store.save(self.session.high_score);
        Ok(())
    }

    /// Process input actions and update game state accordingly.
    fn process_actions(&mut self, actions: &[InputAction]) {
        let mut left = false;
        let mut right = false;

        for action in actions {
            match action {
                InputAction::Quit => {
                    self.running = false;
                }
                InputAction::Start => {
                    self.start_game();
                }
                InputAction::Click { column, row } => {
                    let clicked_play = play_button_area(self.screen_cells)
                        .contains(Position::new(*column, *row));
                    if self.session.is_idle() && clicked_play {
                        self.start_game();
                    }
                }
                InputAction::MoveLeft => left = true,
                InputAction::MoveRight => right = true,
                InputAction::Fire => {
                    if self.session.is_playing() {
                        self.shots
                            .fire_player_shot(&self.ship, &self.speeds, &self.config);
                    }
                }
            }
        }

        if self.session.is_playing() {
            self.ship.set_movement_intent(left, right);
        }
    }

    /// Starts a fresh game: speeds back to base, session reset, board
    /// rebuilt. Only honored while idle.
    fn start_game(&mut self) {
        if !self.session.is_idle() {
            return;
        }
        self.speeds = Speeds::base(&self.config);
        self.session.start(self.config.ship_limit);
        self.shots.clear();
        self.fleet.rebuild(&self.config);
        self.ship.center(&self.config);
    }

    /// One gameplay tick, in fixed order: ship, shots, shot collisions,
    /// fleet, hull collisions, enemy fire.
    fn update_game(&mut self) {
        self.ship.advance(self.speeds.ship, &self.config);

        self.shots.advance_all(&self.config);
        collision::resolve_player_shots(
            &mut self.session,
            &mut self.fleet,
            &mut self.shots,
            &self.ship,
            &mut self.speeds,
            &self.config,
        );

        self.fleet.advance(self.speeds.fleet, &self.config);
        collision::resolve_ship_hits(
            &mut self.session,
            &mut self.fleet,
            &mut self.shots,
            &mut self.ship,
            &self.config,
            Instant::now(),
        );

        // A hit above may have frozen or ended the session.
        if self.session.is_playing() {
            let now_ms = self.started_at.elapsed().as_millis() as u64;
            if let Some((x, y)) =
                self.fleet
                    .select_shooter(now_ms, &mut rand::rng(), &self.config)
            {
                self.shots.fire_enemy_shot(x, y, &self.speeds, &self.config);
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
