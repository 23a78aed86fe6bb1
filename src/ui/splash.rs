//! Splash screen rendering with a block-letter school banner

use crate::state::SplashState;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const GLYPH_S: [&str; 5] = [" ████", "█    ", " ███ ", "    █", "████ "];
const GLYPH_M: [&str; 5] = ["█   █", "██ ██", "█ █ █", "█   █", "█   █"];
const GLYPH_P: [&str; 5] = ["████ ", "█   █", "████ ", "█    ", "█    "];

/// "SMPS" in block letters, one string per row
fn banner_rows() -> Vec<String> {
    let word = [GLYPH_S, GLYPH_M, GLYPH_P, GLYPH_S];
    (0..GLYPH_S.len())
        .map(|row| {
            word.iter()
                .map(|glyph| glyph[row])
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect()
}

/// Draw the splash screen
pub fn draw(frame: &mut Frame, area: Rect, splash_state: &SplashState, school_name: &str) {
    let logo_style = Style::default().fg(Color::Yellow);
    let mut lines: Vec<Line> = banner_rows()
        .into_iter()
        .map(|row| Line::from(Span::styled(row, logo_style)))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        school_name.to_string(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        "Admissions Open",
        Style::default().fg(Color::Green),
    )));

    let logo_height = lines.len() as u16;
    let logo_width = lines.iter().map(Line::width).max().unwrap_or(0) as u16;

    // Center position with scroll offset (can go above screen)
    let base_y = area.y as i32 + (area.height.saturating_sub(logo_height)) as i32 / 2;
    let y_pos = base_y - splash_state.scroll_offset as i32;
    let x = area.x + (area.width.saturating_sub(logo_width)) / 2;

    let lines_off_top = if y_pos < 0 { (-y_pos) as usize } else { 0 };
    if lines_off_top >= lines.len() {
        return;
    }

    let visible_lines: Vec<Line> = lines.into_iter().skip(lines_off_top).collect();
    let visible_height = visible_lines.len() as u16;
    let render_y = if y_pos < 0 { area.y } else { y_pos as u16 };

    let logo_area = Rect {
        x,
        y: render_y,
        width: logo_width.min(area.width),
        height: visible_height.min(area.bottom().saturating_sub(render_y)),
    };
    frame.render_widget(Paragraph::new(visible_lines), logo_area);

    // Skip hint at the bottom, only before the banner starts moving
    if splash_state.scroll_offset < 1.0 && area.height >= 2 {
        let hint = "Press any key to skip";
        let hint_area = Rect {
            x: area.x + (area.width.saturating_sub(hint.len() as u16)) / 2,
            y: area.y + area.height - 2,
            width: (hint.len() as u16).min(area.width),
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                hint,
                Style::default().fg(Color::DarkGray),
            ))),
            hint_area,
        );
    }
}
