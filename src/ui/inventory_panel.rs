use beyond::core::Session;
use beyond::items::InventoryTab;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

pub fn draw_inventory(frame: &mut Frame, area: Rect, session: &Session) {
    frame.render_widget(Clear, area);
    let inventory = &session.player.inventory;
    let view = &session.inventory_view;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Inventory {}/{} ", inventory.len(), inventory.capacity()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tabs
            Constraint::Min(3),    // Items
            Constraint::Length(1), // Controls
        ])
        .split(inner);

    let selected_tab = InventoryTab::ALL.iter().position(|t| *t == view.tab).unwrap_or(0);
    let tabs = Tabs::new(InventoryTab::ALL.iter().map(|t| t.name()).collect::<Vec<_>>())
        .select(selected_tab)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, chunks[0]);

    let equipped_weapon = session.player.character.weapon.as_ref().map(|w| w.name.as_str());
    let equipped_armor = session.player.character.armor.as_ref().map(|a| a.name.as_str());

    let indices = inventory.tab_indices(view.tab);
    let lines: Vec<Line> = if indices.is_empty() {
        vec![Line::from(Span::styled("Empty", Style::default().fg(Color::DarkGray)))]
    } else {
        indices
            .iter()
            .enumerate()
            .filter_map(|(row, &index)| inventory.get(index).map(|item| (row, item)))
            .map(|(row, item)| {
                let equipped = Some(item.name.as_str()) == equipped_weapon
                    || Some(item.name.as_str()) == equipped_armor;
                let style = if row == view.selected {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::styled(if row == view.selected { "> " } else { "  " }, style),
                    Span::styled(format!("{:<22}", item.name), style),
                    Span::styled(format!("{:<11}", item.kind.name()), Style::default().fg(Color::DarkGray)),
                    Span::styled(item.stats_summary(), Style::default().fg(Color::Green)),
                    Span::styled(if equipped { "  [E]" } else { "" }, Style::default().fg(Color::Cyan)),
                ])
            })
            .collect()
    };
    frame.render_widget(Paragraph::new(lines), chunks[1]);

    let controls = Paragraph::new("[Tab] Category  [Up/Down] Select  [Enter] Use  [I] Close")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(controls, chunks[2]);
}
