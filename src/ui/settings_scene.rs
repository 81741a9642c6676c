use beyond::core::{Game, SettingsOption};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_settings(frame: &mut Frame, area: Rect, game: &Game) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(9),
            Constraint::Length(3),
        ])
        .split(area);

    let title = Paragraph::new("Settings")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let selected = game.menu.selected_setting();
    let lines: Vec<Line> = SettingsOption::ALL
        .iter()
        .map(|option| {
            let style = if *option == selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let marker = if *option == selected { "> " } else { "  " };
            Line::from(vec![
                Span::styled(format!("{}{:<16}", marker, option.label()), style),
                Span::styled(game.settings.value_label(*option), Style::default().fg(Color::Green)),
            ])
        })
        .collect();
    let list = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(list, chunks[1]);

    let controls = Paragraph::new("[Up/Down] Select  [Left/Right] Change  [Esc] Back")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(controls, chunks[2]);
}
