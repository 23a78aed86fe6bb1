//! Admission form screen

use super::components::{render_button, wrap_text, BUTTON_HEIGHT};
use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::app::App;
use crate::state::FormFocus;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use school_portal::admissions::{
    AdmissionFormView, RequirementPanel, SuccessBanner, SuggestionPanel, GRADE_APPLYING,
};

/// One vertically stacked piece of the form
enum Section<'a> {
    Banner(&'a SuccessBanner),
    Progress,
    Field(usize),
    Requirements(&'a RequirementPanel),
    Suggestions(&'a SuggestionPanel),
    Submit,
}

impl Section<'_> {
    fn height(&self, width: u16) -> u16 {
        match self {
            Self::Banner(_) => banner_lines(width).len() as u16 + 3,
            Self::Progress => 3,
            Self::Field(_) => FIELD_HEIGHT,
            Self::Requirements(panel) => panel.items.len() as u16 + 3,
            Self::Suggestions(panel) => panel.grades.len() as u16 + 4,
            Self::Submit => BUTTON_HEIGHT,
        }
    }
}

fn sections(view: &AdmissionFormView) -> Vec<Section<'_>> {
    let mut sections = Vec::new();
    if let Some(banner) = &view.banner {
        sections.push(Section::Banner(banner));
    }
    sections.push(Section::Progress);
    for (i, field) in view.fields.iter().enumerate() {
        sections.push(Section::Field(i));
        if field.name == GRADE_APPLYING {
            if let Some(panel) = &view.requirements {
                sections.push(Section::Requirements(panel));
            }
        }
    }
    if let Some(panel) = &view.suggestion {
        sections.push(Section::Suggestions(panel));
    }
    sections.push(Section::Submit);
    sections
}

const BANNER_TEXT: &str = "We have received your application and will contact you within 24 hours to schedule an interaction session.";

fn banner_lines(width: u16) -> Vec<String> {
    wrap_text(BANNER_TEXT, width.saturating_sub(4).max(20) as usize)
}

/// First section to draw so that the focused one stays on screen
fn first_visible(heights: &[u16], focused: Option<usize>, scroll: usize, available: u16) -> usize {
    let mut start = scroll.min(heights.len().saturating_sub(1));
    if let Some(focused) = focused {
        if focused < start {
            start = focused;
        }
        while start < focused
            && heights[start..=focused].iter().map(|&h| u32::from(h)).sum::<u32>()
                > u32::from(available)
        {
            start += 1;
        }
    }
    start
}

/// Draw the admission form
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let view = app.form.view();
    let focus = app.form_focus();

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" Admissions {} ", app.config.school_name()));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let sections = sections(&view);
    let heights: Vec<u16> = sections.iter().map(|s| s.height(inner.width)).collect();
    let focused_section = sections.iter().position(|s| match (s, focus) {
        (Section::Field(i), FormFocus::Field(f)) => *i == f,
        (Section::Suggestions(_), FormFocus::Suggestion(_)) => true,
        (Section::Submit, FormFocus::Submit) => true,
        _ => false,
    });
    let start = first_visible(&heights, focused_section, app.state.form_scroll, inner.height);

    let mut y = inner.y;
    for (section, height) in sections.iter().zip(&heights).skip(start) {
        if y + height > inner.bottom() {
            break;
        }
        let rect = Rect::new(inner.x, y, inner.width, *height);
        match section {
            Section::Banner(banner) => draw_banner(frame, rect, banner),
            Section::Progress => draw_progress(frame, rect, app),
            Section::Field(i) => {
                draw_field(frame, rect, &view.fields[*i], focus == FormFocus::Field(*i));
            }
            Section::Requirements(panel) => draw_requirements(frame, rect, panel),
            Section::Suggestions(panel) => draw_suggestions(frame, rect, panel, focus),
            Section::Submit => render_button(
                frame,
                Rect::new(rect.x, rect.y, rect.width.min(32), rect.height),
                view.submit.label,
                focus == FormFocus::Submit,
                view.submit.enabled,
            ),
        }
        y += height;
    }
}

fn draw_banner(frame: &mut Frame, area: Rect, banner: &SuccessBanner) {
    let mut lines = vec![Line::from(vec![
        Span::raw("Reference ID: "),
        Span::styled(
            banner.reference.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ])];
    lines.extend(banner_lines(area.width).into_iter().map(Line::from));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(Span::styled(
            " Application Submitted Successfully! ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_progress(frame: &mut Frame, area: Rect, app: &App) {
    let progress = app.progress_fill.target();
    let ratio = f64::from(app.progress_fill.value().clamp(0.0, 100.0)) / 100.0;
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Progress "))
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .ratio(ratio)
        .label(format!("{progress}% Complete"));
    frame.render_widget(gauge, area);
}

fn draw_requirements(frame: &mut Frame, area: Rect, panel: &RequirementPanel) {
    let mut lines = vec![Line::from(Span::styled(
        panel.title(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.extend(panel.items.iter().map(|item| Line::from(format!("  • {item}"))));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_suggestions(frame: &mut Frame, area: Rect, panel: &SuggestionPanel, focus: FormFocus) {
    let mut lines = vec![
        Line::from(format!(
            "Based on the age ({} years), we recommend considering a different grade:",
            panel.age
        )),
        Line::from(""),
    ];
    for (i, grade) in panel.grades.iter().enumerate() {
        let style = if focus == FormFocus::Suggestion(i) {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };
        lines.push(Line::from(Span::styled(
            format!(" [ {} ] ", grade.display_name()),
            style,
        )));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Age Notice ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
