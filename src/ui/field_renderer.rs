//! Field rendering for the admission form

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use school_portal::admissions::{FieldKind, FieldView};
use school_portal::utils::grade_name;

/// Rows taken by one field box
pub const FIELD_HEIGHT: u16 = 3;

/// Text shown inside the box, before the cursor
fn display_text(field: &FieldView, is_active: bool) -> (String, bool) {
    match field.kind {
        FieldKind::Select => {
            let name = if field.value.is_empty() {
                "Select Grade".to_string()
            } else {
                grade_name(&field.value)
            };
            let text = if is_active { format!("◀ {name} ▶") } else { name };
            (text, field.value.is_empty())
        }
        FieldKind::Checkbox => (format!("{} {}", field.value, field.label), false),
        _ if field.value.is_empty() && !is_active => ("(empty)".to_string(), true),
        _ => (field.value.clone(), false),
    }
}

/// Draw a form field from its declarative view
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FieldView, is_active: bool) {
    let border_style = match (&field.error, is_active) {
        (Some(_), _) => Style::default().fg(Color::Red),
        (None, true) => Style::default().fg(Color::Cyan),
        (None, false) => Style::default().fg(Color::DarkGray),
    };

    let (text, placeholder) = display_text(field, is_active);
    let text_style = if placeholder {
        Style::default().fg(Color::DarkGray)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let mut spans = vec![Span::styled(text, text_style)];
    let takes_text = !matches!(field.kind, FieldKind::Select | FieldKind::Checkbox);
    if is_active && takes_text {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    if field.kind != FieldKind::Checkbox {
        block = block.title(format!(" {} ", field.label));
    }
    if let Some(error) = &field.error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {error} "),
            Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
        )));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(kind: FieldKind, value: &str) -> FieldView {
        FieldView {
            name: "gradeApplying",
            label: "Grade Applying For *".to_string(),
            kind,
            value: value.to_string(),
            required: true,
            error: None,
        }
    }

    #[test]
    fn test_select_shows_grade_name() {
        let (text, placeholder) = display_text(&field(FieldKind::Select, "class1"), false);
        assert_eq!(text, "Class I");
        assert!(!placeholder);
    }

    #[test]
    fn test_select_placeholder_with_arrows_when_active() {
        let (text, placeholder) = display_text(&field(FieldKind::Select, ""), true);
        assert_eq!(text, "◀ Select Grade ▶");
        assert!(placeholder);
    }

    #[test]
    fn test_empty_text_placeholder_only_when_inactive() {
        assert_eq!(display_text(&field(FieldKind::Text, ""), false).0, "(empty)");
        assert_eq!(display_text(&field(FieldKind::Text, ""), true).0, "");
    }

    #[test]
    fn test_checkbox_inlines_label() {
        let (text, _) = display_text(&field(FieldKind::Checkbox, "[x]"), false);
        assert_eq!(text, "[x] Grade Applying For *");
    }
}
