//! Gallery grid and lightbox overlay

use super::components::{centered_rect, render_button, BUTTON_HEIGHT};
use super::layout::SIDEBAR_WIDTH;
use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use school_portal::gallery::{CategoryFilter, GalleryCategory, GalleryEntry};

const CARD_WIDTH: u16 = 24;
const CARD_HEIGHT: u16 = 5;
const CARD_SPACING: u16 = 1;

/// Number of card columns that fit a terminal `width` columns wide
pub fn gallery_grid_columns(width: u16) -> usize {
    // Sidebar plus the gallery's own borders
    let usable = width.saturating_sub(SIDEBAR_WIDTH + 2);
    (((usable + CARD_SPACING) / (CARD_WIDTH + CARD_SPACING)) as usize).max(1)
}

/// Shorten to `max` characters, marking the cut with an ellipsis
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

fn category_color(category: GalleryCategory) -> Color {
    match category {
        GalleryCategory::Academics => Color::Blue,
        GalleryCategory::Science => Color::Green,
        GalleryCategory::Sports => Color::Red,
        GalleryCategory::Cultural => Color::Magenta,
        GalleryCategory::Events => Color::Yellow,
        GalleryCategory::Campus => Color::Cyan,
    }
}

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Gallery ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let load_more = app.gallery.load_more_label();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Filters
            Constraint::Length(3),             // Search
            Constraint::Length(1),             // Stats
            Constraint::Min(0),                // Grid
            Constraint::Length(if load_more.is_some() { BUTTON_HEIGHT } else { 0 }),
        ])
        .split(inner);

    draw_filters(frame, chunks[0], app.gallery.filter());
    draw_search(frame, chunks[1], app.gallery.search_input());
    draw_stats(frame, chunks[2], app);

    if app.gallery.has_no_results() {
        draw_no_results(frame, chunks[3]);
    } else {
        draw_grid(frame, chunks[3], app);
    }

    if let Some(label) = load_more {
        let width = (label.chars().count() as u16 + 4).min(chunks[4].width);
        render_button(
            frame,
            Rect::new(chunks[4].x, chunks[4].y, width, chunks[4].height),
            &label,
            false,
            true,
        );
    }
}

fn draw_filters(frame: &mut Frame, area: Rect, active: CategoryFilter) {
    let buttons = CategoryFilter::buttons();
    let constraints: Vec<Constraint> = buttons
        .iter()
        .map(|f| Constraint::Length(f.label().len() as u16 + 4))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);
    for (filter, cell) in buttons.iter().zip(cells.iter()) {
        render_button(frame, *cell, filter.label(), *filter == active, true);
    }
}

fn draw_search(frame: &mut Frame, area: Rect, input: &str) {
    let line = if input.is_empty() {
        Line::from(vec![
            Span::styled("▌", Style::default().fg(Color::Cyan)),
            Span::styled("Search photos...", Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(vec![
            Span::raw(input.to_string()),
            Span::styled("▌", Style::default().fg(Color::Cyan)),
        ])
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Search ");
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_stats(frame: &mut Frame, area: Rect, app: &App) {
    let stats = app.gallery.stats();
    let text = format!(
        " Showing {} of {} photos · {} categories",
        stats.showing, stats.matching, stats.categories
    );
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Gray)),
        area,
    );
}

fn draw_no_results(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No photos found",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("Try adjusting your search or filter criteria."),
        Line::from(Span::styled(
            "Press ^R to clear all filters",
            Style::default().fg(Color::Cyan),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        area,
    );
}

fn draw_grid(frame: &mut Frame, area: Rect, app: &App) {
    let columns = app.gallery_columns();
    let visible = app.gallery.visible();
    let rows_fit = (area.height / CARD_HEIGHT).max(1) as usize;
    let selected_row = app.gallery.selected / columns;
    let first_row = selected_row.saturating_sub(rows_fit - 1);

    for (index, entry) in visible.iter().enumerate().skip(first_row * columns) {
        let row = index / columns - first_row;
        if row >= rows_fit {
            break;
        }
        let col = index % columns;
        let rect = Rect {
            x: area.x + col as u16 * (CARD_WIDTH + CARD_SPACING),
            y: area.y + row as u16 * CARD_HEIGHT,
            width: CARD_WIDTH.min(area.width),
            height: CARD_HEIGHT,
        };
        if rect.right() > area.right() || rect.bottom() > area.bottom() {
            continue;
        }
        draw_card(frame, rect, entry, index == app.gallery.selected);
    }
}

fn draw_card(frame: &mut Frame, area: Rect, entry: &GalleryEntry, is_selected: bool) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let lines = vec![
        Line::from(Span::styled(
            truncate(&entry.title, inner_width),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            entry.category.label(),
            Style::default().fg(category_color(entry.category)),
        )),
        Line::from(Span::styled(
            truncate(&entry.description, inner_width),
            Style::default().fg(Color::Gray),
        )),
    ];
    let border = if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default().borders(Borders::ALL).border_style(border);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Draw the lightbox over everything else
pub fn draw_lightbox(frame: &mut Frame, app: &App) {
    let Some(entry) = app.gallery.lightbox_entry() else {
        return;
    };
    let index = app.gallery.lightbox_index().unwrap_or_default();
    let total = app.gallery.stats().showing;

    let screen = frame.area();
    let area = centered_rect(screen, screen.width.saturating_sub(8).min(72), 14);
    frame.render_widget(Clear, area);

    let enabled = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let disabled = Style::default().fg(Color::DarkGray);
    let nav = Line::from(vec![
        Span::styled(
            "◀ Prev",
            if app.gallery.can_go_prev() { enabled } else { disabled },
        ),
        Span::raw(format!("    {} / {}    ", index + 1, total)),
        Span::styled(
            "Next ▶",
            if app.gallery.can_go_next() { enabled } else { disabled },
        ),
    ])
    .alignment(Alignment::Center);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("[ {} ]", entry.image_ref),
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
        Line::from(entry.description.as_str()).alignment(Alignment::Center),
        Line::from(Span::styled(
            entry.category.label(),
            Style::default().fg(category_color(entry.category)),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
        nav,
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .style(Style::default().bg(Color::Black))
        .title(Span::styled(
            format!(" {} ", entry.title),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(" Esc close · y share ").alignment(Alignment::Right));
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}
