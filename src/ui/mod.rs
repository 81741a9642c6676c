mod combat_scene;
mod dungeon_scene;
mod end_scene;
mod inventory_panel;
mod menu_scene;
mod settings_scene;

use beyond::core::{Game, GameMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    Frame,
};

/// Draws whatever screen the game is on.
pub fn draw_game(frame: &mut Frame, game: &Game) {
    let area = frame.size();

    match game.mode() {
        GameMode::Menu => {
            menu_scene::draw_menu(frame, area, game);
            if game.menu.ranking_open {
                menu_scene::draw_ranking_overlay(frame, centered_rect(70, 80, area), game);
            }
        }
        GameMode::Settings => settings_scene::draw_settings(frame, area, game),
        GameMode::Playing | GameMode::Paused => {
            if let Some(session) = game.session() {
                dungeon_scene::draw_dungeon(frame, area, session);
                if session.inventory_view.open {
                    inventory_panel::draw_inventory(frame, centered_rect(60, 70, area), session);
                }
            }
            if game.mode() == GameMode::Paused {
                end_scene::draw_pause(frame, centered_rect(40, 30, area));
            }
        }
        GameMode::Combat => {
            if let Some((session, combat)) = game
                .session()
                .and_then(|s| s.combat.as_ref().map(|c| (s, c)))
            {
                combat_scene::draw_combat_scene(frame, area, session, combat);
            }
        }
        GameMode::Transition => {
            if let Some(session) = game.session() {
                end_scene::draw_transition(frame, area, session);
            }
        }
        GameMode::GameOver | GameMode::Victory => {
            end_scene::draw_name_entry(frame, area, game);
        }
    }
}

/// A rectangle of `percent_x` by `percent_y` centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Green above two thirds, yellow above one third, red below.
pub fn ratio_color(ratio: f64) -> Color {
    if ratio > 0.66 {
        Color::Green
    } else if ratio > 0.33 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// `current / max` clamped for a gauge.
pub fn gauge_ratio(current: u32, max: u32) -> f64 {
    if max == 0 {
        return 0.0;
    }
    (current as f64 / max as f64).clamp(0.0, 1.0)
}
