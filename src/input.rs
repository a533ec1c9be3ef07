use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use std::time::Duration;

use crate::session::Phase;

/// Semantic game signals decoded from raw terminal events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    Fire,
    Start,
    /// Left-button press in terminal cell coordinates.
    Click { column: u16, row: u16 },
    Quit,
}

/// Tracks the movement keys that can be held down for continuous input.
#[derive(Debug, Default)]
struct KeyState {
    left: bool,
    right: bool,
}

/// Polls crossterm and translates key and mouse events into game actions.
///
/// Movement is continuous (held keys); fire, start, quit, and clicks are
/// one-shot. Opposing horizontal keys resolve last-key-wins: pressing one
/// side clears the other side's held flag.
#[derive(Debug, Default)]
pub struct InputManager {
    key_state: KeyState,
    oneshot_actions: Vec<InputAction>,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains all pending events. Call once per frame before `get_actions`.
    pub fn poll_events(&mut self, phase: &Phase) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key_event) => self.handle_key_event(key_event, phase),
                Event::Mouse(mouse_event) => {
                    if let MouseEventKind::Down(MouseButton::Left) = mouse_event.kind {
                        self.oneshot_actions.push(InputAction::Click {
                            column: mouse_event.column,
                            row: mouse_event.row,
                        });
                    }
                }
                Event::Resize(_, _) => {
                    // The renderer rescales from the frame area every draw.
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent, phase: &Phase) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, phase),
            KeyEventKind::Release => self.handle_key_release(key_event.code),
            _ => {}
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, phase: &Phase) {
        // Quit works in any phase.
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        match phase {
            Phase::Idle => {
                if matches!(
                    key_event.code,
                    KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R')
                ) {
                    self.oneshot_actions.push(InputAction::Start);
                }
            }
            Phase::Playing | Phase::Respawning { .. } => {
                match key_event.code {
                    KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                        self.key_state.left = true;
                        self.key_state.right = false;
                    }
                    KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                        self.key_state.right = true;
                        self.key_state.left = false;
                    }
                    // One shot per press; holding space does not autofire.
                    KeyCode::Char(' ') => {
                        self.oneshot_actions.push(InputAction::Fire);
                    }
                    _ => {}
                }
            }
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = false;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = false;
            }
            _ => {}
        }
    }

    /// Returns this frame's actions: one-shots first, then held movement.
    /// Movement only surfaces while the session is actually playing.
    pub fn get_actions(&self, phase: &Phase) -> Vec<InputAction> {
        let mut actions = Vec::new();
        actions.extend_from_slice(&self.oneshot_actions);

        if *phase == Phase::Playing {
            if self.key_state.left {
                actions.push(InputAction::MoveLeft);
            }
            if self.key_state.right {
                actions.push(InputAction::MoveRight);
            }
        }

        actions
    }
}
