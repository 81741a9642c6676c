use beyond::core::{Game, MenuOption};
use beyond::ranking::format_elapsed;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
    Frame,
};

pub fn draw_menu(frame: &mut Frame, area: Rect, game: &Game) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(5), // Title
            Constraint::Min(6),    // Options
            Constraint::Length(3), // Controls
        ])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "BEYOND THE DUNGEON",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Difficulty: {}", game.settings.difficulty.name()),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let selected = game.menu.selected_option();
    let lines: Vec<Line> = MenuOption::ALL
        .iter()
        .map(|option| {
            if *option == selected {
                Line::from(Span::styled(
                    format!("> {} <", option.label()),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(option.label(), Style::default().fg(Color::White)))
            }
        })
        .collect();
    let options = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(options, chunks[1]);

    let controls = Paragraph::new("[Up/Down] Select  [Enter] Confirm")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(controls, chunks[2]);
}

pub fn draw_ranking_overlay(frame: &mut Frame, area: Rect, game: &Game) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Top 10 ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    if game.ranking.is_empty() {
        let empty = Paragraph::new("No runs recorded yet.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, chunks[0]);
    } else {
        let rows = game.ranking.top().iter().enumerate().map(|(i, entry)| {
            let style = if i == 0 {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                format!("{}.", i + 1),
                entry.player_name.clone(),
                entry.score.to_string(),
                format_elapsed(entry.elapsed_seconds),
                entry.enemies_killed.to_string(),
                entry.difficulty.name().to_string(),
                entry.date_label(),
            ])
            .style(style)
        });
        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Min(10),
                Constraint::Length(7),
                Constraint::Length(7),
                Constraint::Length(6),
                Constraint::Length(7),
                Constraint::Length(11),
            ],
        )
        .header(
            Row::new(vec!["#", "Name", "Score", "Time", "Kills", "Mode", "Date"])
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        );
        frame.render_widget(table, chunks[0]);
    }

    let controls = Paragraph::new("[Esc] Close  [C] Clear")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(controls, chunks[1]);
}
