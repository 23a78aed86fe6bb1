//! Layout components (sidebar, status bar)

use super::components::{render_sidebar_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::platform::{COPY_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Sidebar width in columns
pub const SIDEBAR_WIDTH: u16 = 20;

/// Create the main layout with sidebar, leaving the bottom row for the
/// status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SIDEBAR_WIDTH), // Sidebar
            Constraint::Min(0),                // Main content
        ])
        .split(rows[0]);

    (chunks[0], chunks[1])
}

/// Sidebar buttons, vertically centered in the sidebar
fn sidebar_button_rects(sidebar: Rect) -> Vec<Rect> {
    let count = View::SIDEBAR.len() as u16;
    let content = count * BUTTON_HEIGHT;
    let top = sidebar.y + sidebar.height.saturating_sub(content) / 2;
    (0..count)
        .map(|i| Rect {
            x: sidebar.x,
            y: top + i * BUTTON_HEIGHT,
            width: sidebar.width,
            height: BUTTON_HEIGHT,
        })
        .filter(|r| r.bottom() <= sidebar.bottom())
        .collect()
}

/// Which sidebar view sits under `row` on a terminal `terminal_height` tall
pub fn sidebar_view_at(row: u16, terminal_height: u16) -> Option<View> {
    let sidebar = Rect::new(0, 0, SIDEBAR_WIDTH, terminal_height.saturating_sub(1));
    sidebar_button_rects(sidebar)
        .iter()
        .position(|r| row >= r.y && row < r.bottom())
        .map(|i| View::SIDEBAR[i])
}

/// Draw the sidebar with boxed buttons
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    for (rect, view) in sidebar_button_rects(area).into_iter().zip(View::SIDEBAR) {
        render_sidebar_button(
            frame,
            rect,
            view.shortcut(),
            view.label(),
            app.state.current_view == view,
        );
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", app.config.school_name()),
        Style::default().fg(Color::Yellow),
    )];

    spans.push(Span::styled(
        get_view_hints(app),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Quit hint on the right (double Ctrl+C to quit)
    let quit_hint = " ^C^C:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(app: &App) -> String {
    match app.state.current_view {
        View::Splash => "Press any key to skip".to_string(),
        View::Admissions => format!(
            "Tab:next  ←/→:grade  Space:tick  {SUBMIT_SHORTCUT}:submit  ^R:reset  {COPY_SHORTCUT}:copy ref"
        ),
        View::Checklist => "j/k:nav  Space:toggle".to_string(),
        View::Gallery if app.gallery.lightbox_index().is_some() => {
            "←/→:browse  y:share  Esc:close".to_string()
        }
        View::Gallery => format!(
            "type:search  Tab:category  Enter:open  ^L:more  ^R:clear  {COPY_SHORTCUT}:share"
        ),
    }
}
