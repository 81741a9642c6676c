use beyond::core::constants::{TRANSITION_FRAMES, TRANSITION_SKIP_BELOW};
use beyond::core::{Game, GameMode, Session};
use beyond::dungeon::get_dungeon;
use beyond::ranking::{calculate_score, format_elapsed};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

pub fn draw_pause(frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "PAUSED",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("[Esc] Resume"),
        Line::from("[Q] Quit to menu"),
    ];
    let pause = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(pause, area);
}

/// Screen shown between a boss kill and the next dungeon.
pub fn draw_transition(frame: &mut Frame, area: Rect, session: &Session) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .split(area);

    let cleared = session
        .progression
        .current_dungeon()
        .map(|d| d.name)
        .unwrap_or("Dungeon");
    let next = get_dungeon(session.progression.dungeon_index() + 1)
        .map(|d| format!("Next: {}", d.name))
        .unwrap_or_else(|| "The way out lies ahead".to_string());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} cleared!", cleared),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(next),
    ];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), chunks[0]);

    let frames_left = session.progression.transition_frames();
    let progress = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(1.0 - frames_left.min(TRANSITION_FRAMES) as f64 / TRANSITION_FRAMES as f64);
    frame.render_widget(progress, chunks[1]);

    if frames_left > 0 && frames_left < TRANSITION_SKIP_BELOW {
        let hint = Paragraph::new("Press Enter to continue")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(hint, chunks[2]);
    }
}

/// Game over or victory, with the score preview and the name prompt.
pub fn draw_name_entry(frame: &mut Frame, area: Rect, game: &Game) {
    let (title, color) = if game.mode() == GameMode::Victory {
        ("VICTORY", Color::Yellow)
    } else {
        ("GAME OVER", Color::Red)
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if let Some(session) = game.session() {
        let score = calculate_score(
            session.enemies_killed,
            session.elapsed_seconds,
            game.settings.difficulty,
        );
        lines.push(Line::from(format!("Enemies defeated: {}", session.enemies_killed)));
        lines.push(Line::from(format!("Time: {}", format_elapsed(session.elapsed_seconds))));
        lines.push(Line::from(Span::styled(
            format!("Score: {}", score),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from("Enter your name:"));
    lines.push(Line::from(Span::styled(
        format!("{}_", game.name_input),
        Style::default().fg(Color::Yellow),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] Save",
        Style::default().fg(Color::DarkGray),
    )));

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(panel, area);
}
