use super::{gauge_ratio, ratio_color};
use beyond::character::Character;
use beyond::combat::{CombatAction, CombatPhase, CombatSession, HitKind, Turn};
use beyond::core::Session;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Draws the combat scene: both combatants, the log and the action menu.
pub fn draw_combat_scene(frame: &mut Frame, area: Rect, session: &Session, combat: &CombatSession) {
    let title = if combat.is_boss { "Boss Fight" } else { "Combat Arena" };
    let combat_block = Block::default().borders(Borders::ALL).title(title);
    let inner = combat_block.inner(area);
    frame.render_widget(combat_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Enemy HP bar
            Constraint::Min(3),    // Hit display
            Constraint::Length(3), // Player HP bar
            Constraint::Length(3), // Player mana bar
            Constraint::Length(6), // Log
            Constraint::Length(3), // Menu
        ])
        .split(inner);

    draw_hp(frame, chunks[0], &combat.enemy, Color::Red);
    draw_hit(frame, chunks[1], combat);
    let player = &session.player.character;
    draw_hp(frame, chunks[2], player, ratio_color(gauge_ratio(player.hp, player.hp_max)));

    let mana = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Mana"))
        .gauge_style(Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD))
        .label(format!("{}/{}", player.mana, player.mana_max))
        .ratio(gauge_ratio(player.mana, player.mana_max));
    frame.render_widget(mana, chunks[3]);

    draw_log(frame, chunks[4], combat);
    draw_menu(frame, chunks[5], combat);
}

fn draw_hp(frame: &mut Frame, area: Rect, who: &Character, color: Color) {
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(who.name.as_str()))
        .gauge_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .label(format!("HP {}/{}", who.hp, who.hp_max))
        .ratio(gauge_ratio(who.hp, who.hp_max));
    frame.render_widget(gauge, area);
}

fn draw_hit(frame: &mut Frame, area: Rect, combat: &CombatSession) {
    let mut lines = vec![Line::from("")];

    if let Some(hit) = combat.last_hit {
        let (text, color) = match hit.kind {
            HitKind::Normal => (format!("-{}", hit.amount), Color::White),
            HitKind::Critical => (format!("CRIT -{}", hit.amount), Color::Yellow),
            HitKind::Special => (format!("-{}!", hit.amount), Color::Magenta),
            HitKind::Heal => (format!("+{}", hit.amount), Color::Green),
        };
        let arrow = match hit.target {
            Turn::Enemy => "enemy ",
            Turn::Player => "you ",
        };
        lines.push(Line::from(vec![
            Span::styled(arrow, Style::default().fg(Color::DarkGray)),
            Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ]));
    }

    let status = match combat.phase() {
        CombatPhase::Menu => "Your turn",
        CombatPhase::PlayerResolving { .. } => "",
        CombatPhase::EnemyTurn { .. } => "Enemy is preparing...",
        CombatPhase::EnemyResolving { .. } => "",
        CombatPhase::Finished(_) => "",
    };
    lines.push(Line::from(Span::styled(
        status,
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    )));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_log(frame: &mut Frame, area: Rect, combat: &CombatSession) {
    let lines: Vec<Line> = combat
        .log
        .visible()
        .map(|entry| {
            let color = if entry.is_player_action {
                Color::Cyan
            } else {
                Color::Red
            };
            Line::from(Span::styled(entry.message.as_str(), Style::default().fg(color)))
        })
        .collect();

    let log = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Log"));
    frame.render_widget(log, area);
}

fn draw_menu(frame: &mut Frame, area: Rect, combat: &CombatSession) {
    let open = combat.is_menu_open();
    let selected = combat.selected_action();

    let spans: Vec<Span> = CombatAction::ALL
        .iter()
        .flat_map(|action| {
            let style = if !open {
                Style::default().fg(Color::DarkGray)
            } else if *action == selected {
                Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            [Span::styled(format!(" {} ", action.label()), style), Span::raw("   ")]
        })
        .collect();

    let menu = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(menu, area);
}
