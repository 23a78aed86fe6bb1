//! Document checklist screen

use super::widgets::render_scrollable_list;
use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let checklist = &app.checklist;
    let items: Vec<ListItem> = checklist
        .items()
        .iter()
        .map(|item| {
            let (mark, style) = if item.checked {
                ("[x]", Style::default().fg(Color::Green))
            } else {
                ("[ ]", Style::default())
            };
            ListItem::new(format!("{mark} {}", item.label)).style(style)
        })
        .collect();

    let title = format!(
        " Documents Required ({}/{}) ",
        checklist.checked_count(),
        checklist.items().len()
    );
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    render_scrollable_list(frame, area, list, checklist.selected);
}
