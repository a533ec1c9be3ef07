use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::config::Config;
use crate::entities::{Bounds, Enemy, Ship, Shot, ShotKind};
use crate::session::Phase;

/// View struct that holds all game state needed for rendering.
pub struct RenderView<'a> {
    pub phase: Phase,
    pub ship: &'a Ship,
    pub enemies: &'a [Enemy],
    pub shots: &'a [Shot],
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub ships_left: u32,
    pub area: Rect,
}

/// The play button's terminal cells for the given frame area. Shared with
/// the app so mouse clicks can be hit-tested against what was drawn.
pub fn play_button_area(area: Rect) -> Rect {
    let width = area.width.min(30);
    let height = area.height.min(5);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Handles all rendering responsibilities for the game.
///
/// The world lives in a fixed logical space; every entity box is scaled
/// onto whatever terminal area the frame provides.
pub struct GameRenderer;

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &RenderView, config: &Config) {
        self.render_world(frame, view, config);
        self.render_score_panel(frame, view);

        if view.phase == Phase::Idle {
            self.render_play_button(frame, view);
        }
    }

    fn render_world(&self, frame: &mut Frame, view: &RenderView, config: &Config) {
        let area = view.area;

        self.render_entity(frame, area, config, &view.ship.bounds, "▲", Color::Green);

        for enemy in view.enemies {
            self.render_entity(frame, area, config, &enemy.bounds, "▼", Color::Red);
        }

        for shot in view.shots {
            let (glyph, color) = match shot.kind {
                ShotKind::PlayerNormal => ("|", Color::Yellow),
                ShotKind::PlayerUpgrade => ("║", Color::Cyan),
                ShotKind::Enemy => ("!", Color::Magenta),
            };
            self.render_entity(frame, area, config, &shot.bounds, glyph, color);
        }
    }

    /// Scales one world box onto the terminal and fills it with a glyph.
    fn render_entity(
        &self,
        frame: &mut Frame,
        area: Rect,
        config: &Config,
        bounds: &Bounds,
        glyph: &str,
        color: Color,
    ) {
        let Some(cell_rect) = scale_to_cells(bounds, area, config) else {
            return;
        };

        let row = glyph.repeat(cell_rect.width as usize);
        let text: Vec<Line> = (0..cell_rect.height).map(|_| Line::from(row.clone())).collect();
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
            cell_rect,
        );
    }

    fn render_score_panel(&self, frame: &mut Frame, view: &RenderView) {
        let stats = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.score),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  High: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.high_score),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Level: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.level),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Ships: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.ships_left),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let stats_area = Rect {
            x: view.area.x + 1,
            y: view.area.y,
            width: view.area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(stats), stats_area);

        let controls = Line::from(vec![Span::styled(
            "[A/D or Arrows: Move] [Space: Fire] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        let controls_area = Rect {
            x: view.area.x + 1,
            y: view.area.y + view.area.height.saturating_sub(1),
            width: view.area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    fn render_play_button(&self, frame: &mut Frame, view: &RenderView) {
        let title = if view.score > 0 {
            format!("GAME OVER — {}", view.score)
        } else {
            String::from("FLEET INBOUND")
        };
        let button_text = vec![
            Line::from(title).centered().red().bold(),
            Line::from("P L A Y").centered().green().bold(),
            Line::from("click or press Enter").centered().white(),
        ];

        let button_area = play_button_area(view.area);
        frame.render_widget(
            Paragraph::new(button_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Green)),
                )
                .alignment(Alignment::Center),
            button_area,
        );
    }
}

impl Default for GameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps a world box to terminal cells, clipped to the drawable area.
/// Returns `None` once nothing of the box is visible.
fn scale_to_cells(bounds: &Bounds, area: Rect, config: &Config) -> Option<Rect> {
    if area.width == 0 || area.height == 0 {
        return None;
    }

    let sx = area.width as f32 / config.screen_width;
    let sy = area.height as f32 / config.screen_height;

    let x = (bounds.x * sx).floor() as i32;
    let y = (bounds.y * sy).floor() as i32;
    let width = ((bounds.width * sx).ceil() as i32).max(1);
    let height = ((bounds.height * sy).ceil() as i32).max(1);

    let clipped_x = x.max(0);
    let clipped_y = y.max(0);
    let clipped_w = (x + width).min(area.width as i32) - clipped_x;
    let clipped_h = (y + height).min(area.height as i32) - clipped_y;
    if clipped_w <= 0 || clipped_h <= 0 {
        return None;
    }

    Some(Rect {
        x: area.x + clipped_x as u16,
        y: area.y + clipped_y as u16,
        width: clipped_w as u16,
        height: clipped_h as u16,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_maps_world_onto_cells() {
        let config = Config::default();
        let area = Rect::new(0, 0, 80, 30);

        // A 40x20 enemy on an 800x600 world is 4x1 cells on an 80x30 grid.
        let rect = scale_to_cells(&Bounds::new(40.0, 20.0, 40.0, 20.0), area, &config).unwrap();
        assert_eq!(rect, Rect::new(4, 1, 4, 1));
    }

    #[test]
    fn test_scale_never_collapses_to_zero_cells() {
        let config = Config::default();
        let area = Rect::new(0, 0, 80, 30);

        // A shot is thinner than one cell but must stay visible.
        let rect = scale_to_cells(&Bounds::new(400.0, 300.0, 3.0, 15.0), area, &config).unwrap();
        assert!(rect.width >= 1);
        assert!(rect.height >= 1);
    }

    #[test]
    fn test_scale_clips_offscreen_boxes() {
        let config = Config::default();
        let area = Rect::new(0, 0, 80, 30);

        assert!(scale_to_cells(&Bounds::new(-100.0, 0.0, 40.0, 20.0), area, &config).is_none());
        assert!(scale_to_cells(&Bounds::new(0.0, 700.0, 40.0, 20.0), area, &config).is_none());
    }

    #[test]
    fn test_play_button_is_centered() {
        let area = Rect::new(0, 0, 100, 40);
        let button = play_button_area(area);
        assert_eq!(button.width, 30);
        assert_eq!(button.height, 5);
        assert_eq!(button.x, 35);
        assert_eq!(button.y, 17);
    }
}
