use super::{gauge_ratio, ratio_color};
use beyond::core::constants::{BOSS_SIZE, PLAYER_SIZE};
use beyond::core::Session;
use beyond::dungeon::{rects_overlap, CollisionMap};
use beyond::ranking::format_elapsed;
use beyond::character::Position;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// World units covered by one terminal cell. Cells are about twice as tall
/// as they are wide.
const CELL_WIDTH: i32 = 16;
const CELL_HEIGHT: i32 = 32;

pub fn draw_dungeon(frame: &mut Frame, area: Rect, session: &Session) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Stat bars
            Constraint::Min(5),    // Map
            Constraint::Length(3), // Status line
        ])
        .split(area);

    draw_bars(frame, chunks[0], session);
    draw_map(frame, chunks[1], session);
    draw_status(frame, chunks[2], session);
}

fn draw_bars(frame: &mut Frame, area: Rect, session: &Session) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let c = &session.player.character;

    let hp_ratio = gauge_ratio(c.hp, c.hp_max);
    let hp = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(c.name.as_str()))
        .gauge_style(Style::default().fg(ratio_color(hp_ratio)).add_modifier(Modifier::BOLD))
        .label(format!("HP {}/{}", c.hp, c.hp_max))
        .ratio(hp_ratio);
    frame.render_widget(hp, halves[0]);

    let mana = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Mana"))
        .gauge_style(Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD))
        .label(format!("MP {}/{}", c.mana, c.mana_max))
        .ratio(gauge_ratio(c.mana, c.mana_max));
    frame.render_widget(mana, halves[1]);
}

fn draw_map(frame: &mut Frame, area: Rect, session: &Session) {
    let title = session
        .progression
        .current_dungeon()
        .map(|d| format!(" {} ", d.name))
        .unwrap_or_default();
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let grid = session.progression.grid();
    let player = session.player.character.position;
    let boss = session.progression.boss_position();

    // Camera centered on the player, clamped to the dungeon.
    let view_w = inner.width as i32 * CELL_WIDTH;
    let view_h = inner.height as i32 * CELL_HEIGHT;
    let size = grid.size();
    let cam_x = (player.x + PLAYER_SIZE / 2 - view_w / 2).clamp(0, (size - view_w).max(0));
    let cam_y = (player.y + PLAYER_SIZE / 2 - view_h / 2).clamp(0, (size - view_h).max(0));

    let lines: Vec<Line> = (0..inner.height as i32)
        .map(|row| {
            let spans: Vec<Span> = (0..inner.width as i32)
                .map(|col| {
                    let cell = Position::new(cam_x + col * CELL_WIDTH, cam_y + row * CELL_HEIGHT);
                    cell_span(grid, cell, player, boss)
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn cell_span(grid: &impl CollisionMap, cell: Position, player: Position, boss: Position) -> Span<'static> {
    if cell.x >= grid.size() || cell.y >= grid.size() {
        return Span::raw(" ");
    }
    if rects_overlap(cell, CELL_WIDTH.min(CELL_HEIGHT), player, PLAYER_SIZE) {
        return Span::styled("@", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    }
    if rects_overlap(cell, CELL_WIDTH.min(CELL_HEIGHT), boss, BOSS_SIZE) {
        return Span::styled("B", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
    }
    let center_x = cell.x + CELL_WIDTH / 2;
    let center_y = cell.y + CELL_HEIGHT / 2;
    if grid.is_point_passable(center_x, center_y) {
        Span::styled(".", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled("#", Style::default().fg(Color::Gray))
    }
}

fn draw_status(frame: &mut Frame, area: Rect, session: &Session) {
    let weapon = session
        .player
        .character
        .weapon
        .as_ref()
        .map(|w| w.name.as_str())
        .unwrap_or("-");

    let mut spans = vec![
        Span::styled(format!("Gold {}", session.player.gold), Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::raw(format!("Kills {}", session.enemies_killed)),
        Span::raw("  "),
        Span::raw(format!("Time {}", format_elapsed(session.elapsed_seconds))),
        Span::raw("  "),
        Span::raw(format!("Weapon {}", weapon)),
        Span::raw("  "),
        Span::styled("[I] Inventory [Esc] Pause", Style::default().fg(Color::DarkGray)),
    ];
    if let Some(notice) = &session.notice {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            notice.text.clone(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}
