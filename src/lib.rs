// Library exports for testing
pub use config::{Config, Speeds};
pub use entities::{Bounds, Enemy, Fleet, Ship, Shot, ShotKind, Shots};
pub use highscore::{HIGH_SCORE_FILE, HighScoreStore};
pub use session::{Phase, Session};

pub mod app;
pub mod collision;
pub mod config;
pub mod entities;
pub mod highscore;
pub mod input;
pub mod renderer;
pub mod session;
